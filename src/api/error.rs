//! Every error response is JSON with the same shape:
//!
//! ```json
//! { "error": "Service unavailable", "message": "SOAP service not available" }
//! ```

use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ApiErrorBody {
    pub error: String,
    pub message: String,
}

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub error: &'static str,
    pub message: String,
}

impl AppError {
    pub fn new(status: StatusCode, error: &'static str, message: impl Into<String>) -> Self {
        Self {
            status,
            error,
            message: message.into(),
        }
    }

    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "Bad request", msg)
    }

    pub fn not_found() -> Self {
        Self::new(
            StatusCode::NOT_FOUND,
            "Endpoint not found",
            "Please check the API documentation at /",
        )
    }

    pub fn service_unavailable() -> Self {
        Self::new(
            StatusCode::SERVICE_UNAVAILABLE,
            "Service unavailable",
            "SOAP service not available",
        )
    }

    pub fn conversion_failed(err: impl std::fmt::Display) -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            "Internal server error",
            format!("Conversion failed: {}", err),
        )
    }

    pub fn internal() -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            "Internal server error",
            "Please try again later",
        )
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = ApiErrorBody {
            error: self.error.to_string(),
            message: self.message,
        };
        (self.status, Json(body)).into_response()
    }
}

/// 解碼失敗一律 422；只有超過大小上限保留 413
fn invalid_request(status: StatusCode, detail: String) -> AppError {
    let status = if status == StatusCode::PAYLOAD_TOO_LARGE {
        status
    } else {
        StatusCode::UNPROCESSABLE_ENTITY
    };
    AppError::new(status, "Invalid request", detail)
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        invalid_request(rejection.status(), rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        invalid_request(rejection.status(), rejection.body_text())
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}: {}", self.status.as_u16(), self.error, self.message)
    }
}

impl std::error::Error for AppError {}
