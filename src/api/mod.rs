pub mod error;
pub mod handlers;

use crate::api::error::AppError;
use crate::config::ServerSettings;
use crate::core::client::ConversionClient;
use axum::{
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use std::any::Any;
use std::sync::Arc;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

/// Shared handle injected into every handler. `None` means the remote
/// binding is not ready; it never changes after startup.
#[derive(Clone, Default)]
pub struct AppState {
    client: Option<Arc<ConversionClient>>,
}

impl AppState {
    pub fn ready(client: ConversionClient) -> Self {
        Self {
            client: Some(Arc::new(client)),
        }
    }

    pub fn unready() -> Self {
        Self::default()
    }

    pub fn client(&self) -> Result<&ConversionClient, AppError> {
        self.client.as_deref().ok_or_else(AppError::service_unavailable)
    }
}

pub fn app(state: AppState, server: &ServerSettings) -> Router {
    Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health))
        .route(
            "/convert/ftc",
            get(handlers::fahrenheit_to_celsius_query).post(handlers::fahrenheit_to_celsius),
        )
        .route(
            "/convert/ctf",
            get(handlers::celsius_to_fahrenheit_query).post(handlers::celsius_to_fahrenheit),
        )
        .route("/convert/batch", post(handlers::batch_conversion))
        .fallback(handlers::not_found)
        .layer(TraceLayer::new_for_http())
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(RequestBodyLimitLayer::new(server.max_body_bytes))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = err
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| err.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");
    tracing::error!("Handler panicked: {}", detail);
    AppError::internal().into_response()
}

pub mod test {
    use super::AppState;
    use crate::config::ServerSettings;
    use std::net::SocketAddr;
    use tokio::net::TcpListener;

    /// Spawn the server on a random port. Returns the address and a
    /// JoinHandle that keeps the server alive until dropped.
    pub async fn spawn(state: AppState) -> std::io::Result<(SocketAddr, tokio::task::JoinHandle<()>)> {
        spawn_with(state, &ServerSettings::default()).await
    }

    pub async fn spawn_with(
        state: AppState,
        server: &ServerSettings,
    ) -> std::io::Result<(SocketAddr, tokio::task::JoinHandle<()>)> {
        let app = super::app(state, server);
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let handle = tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, app).await {
                tracing::error!("test server stopped: {}", e);
            }
        });
        Ok((addr, handle))
    }
}
