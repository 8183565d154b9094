//! HTTP surface: `POST /vat` and `GET /health` on an axum router.
//!
//! - `config.rs`: CLI/env configuration
//! - `logging.rs`: tracing subscriber setup
//! - `errors.rs`: consistent error responses

mod config;
mod errors;
mod logging;

pub use config::{CliArgs, LogFormat, ServerConfig};
pub use errors::{dispatch_error_to_response, json_error, rejection_to_response};
pub use logging::init_logging;

use std::sync::Arc;

use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::json;

use crate::core::VatSubmission;
use crate::dispatch::Dispatcher;
use crate::transport::{HttpTransport, Transport};

/// Build the router around a dispatcher.
pub fn router<T>(dispatcher: Arc<Dispatcher<T>>) -> Router
where
    T: Transport + 'static,
{
    Router::new()
        .route("/vat", post(submit_vat::<T>))
        .route("/health", get(health))
        .with_state(dispatcher)
}

async fn submit_vat<T>(
    State(dispatcher): State<Arc<Dispatcher<T>>>,
    payload: Result<Json<VatSubmission>, JsonRejection>,
) -> Response
where
    T: Transport + 'static,
{
    let Json(submission) = match payload {
        Ok(p) => p,
        Err(rejection) => {
            tracing::info!(error = %rejection.body_text(), "rejected malformed submission");
            return rejection_to_response(rejection);
        }
    };

    match dispatcher.submit(&submission).await {
        Ok(submitted) => (StatusCode::OK, Json(submitted)).into_response(),
        Err(e) => dispatch_error_to_response(e),
    }
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

/// Serve until Ctrl-C.
pub async fn run_server(config: ServerConfig) -> anyhow::Result<()> {
    let transport = HttpTransport::new(config.upstream_timeout)?;
    let dispatcher = Arc::new(Dispatcher::new(transport, config.endpoints));
    let app = router(dispatcher);

    let listener = tokio::net::TcpListener::bind(config.bind).await?;
    tracing::info!(addr = %listener.local_addr()?, "listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
