use crate::api::error::AppError;
use crate::api::AppState;
use crate::domain::model::{
    BatchRequest, BatchResult, ConversionOperation, ConversionRequest, ConversionResponse,
    HealthStatus, TemperatureUnit,
};
use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    Json,
};
use serde_json::{json, Value};

pub async fn root() -> Json<Value> {
    Json(json!({
        "message": "Temperature Conversion API",
        "description": "REST API wrapper for a SOAP temperature conversion service",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "health": "/health",
            "fahrenheit_to_celsius": "/convert/ftc",
            "celsius_to_fahrenheit": "/convert/ctf",
            "batch_conversion": "/convert/batch"
        }
    }))
}

/// Checks the remote service with one trial conversion. Always answers 200.
pub async fn health(State(state): State<AppState>) -> Json<HealthStatus> {
    let remote_available = match state.client() {
        Ok(client) => match client.convert_fahrenheit_to_celsius("32").await {
            Ok(_) => true,
            Err(e) => {
                tracing::warn!("SOAP service health check failed: {}", e);
                false
            }
        },
        Err(_) => false,
    };

    Json(HealthStatus::new(remote_available))
}

pub async fn fahrenheit_to_celsius(
    State(state): State<AppState>,
    payload: Result<Json<ConversionRequest>, JsonRejection>,
) -> Result<Json<ConversionResponse>, AppError> {
    let Json(request) = payload?;
    convert(&state, ConversionOperation::FahrenheitToCelsius, request.temperature).await
}

pub async fn fahrenheit_to_celsius_query(
    State(state): State<AppState>,
    query: Result<Query<ConversionRequest>, QueryRejection>,
) -> Result<Json<ConversionResponse>, AppError> {
    let Query(request) = query?;
    convert(&state, ConversionOperation::FahrenheitToCelsius, request.temperature).await
}

pub async fn celsius_to_fahrenheit(
    State(state): State<AppState>,
    payload: Result<Json<ConversionRequest>, JsonRejection>,
) -> Result<Json<ConversionResponse>, AppError> {
    let Json(request) = payload?;
    convert(&state, ConversionOperation::CelsiusToFahrenheit, request.temperature).await
}

pub async fn celsius_to_fahrenheit_query(
    State(state): State<AppState>,
    query: Result<Query<ConversionRequest>, QueryRejection>,
) -> Result<Json<ConversionResponse>, AppError> {
    let Query(request) = query?;
    convert(&state, ConversionOperation::CelsiusToFahrenheit, request.temperature).await
}

async fn convert(
    state: &AppState,
    operation: ConversionOperation,
    temperature: String,
) -> Result<Json<ConversionResponse>, AppError> {
    let client = state.client()?;

    let result = match operation {
        ConversionOperation::FahrenheitToCelsius => {
            client.convert_fahrenheit_to_celsius(&temperature).await
        }
        ConversionOperation::CelsiusToFahrenheit => {
            client.convert_celsius_to_fahrenheit(&temperature).await
        }
    };

    match result {
        Ok(converted) => Ok(Json(ConversionResponse::new(
            temperature,
            converted,
            operation.source(),
        ))),
        Err(e) => {
            tracing::error!(
                "Error converting {} to {}: {}",
                operation.source(),
                operation.source().target(),
                e
            );
            Err(AppError::conversion_failed(e))
        }
    }
}

pub async fn batch_conversion(
    State(state): State<AppState>,
    payload: Result<Json<BatchRequest>, JsonRejection>,
) -> Result<Json<BatchResult>, AppError> {
    let Json(request) = payload?;
    let client = state.client()?;

    // 在任何遠端呼叫之前先檢查輸入
    if request.temperatures.is_empty() {
        return Err(AppError::bad_request("No temperatures provided"));
    }
    let from = request
        .from_unit
        .parse::<TemperatureUnit>()
        .map_err(|_| AppError::bad_request("from_unit must be 'celsius' or 'fahrenheit'"))?;

    let items = client.batch_convert(&request.temperatures, from).await;
    let result = BatchResult::from_items(&items);

    tracing::info!(
        "Batch conversion from {}: {} converted, {} errors",
        from,
        result.total_converted,
        result.total_errors
    );
    Ok(Json(result))
}

pub async fn not_found() -> AppError {
    AppError::not_found()
}
