//! Liveness endpoint.

use axum::{Json, Router, routing::get};
use serde::Serialize;

use crate::AppState;

/// Liveness response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Always `ok` while the process serves requests.
    pub status: &'static str,
    /// Service name.
    pub service: &'static str,
    /// Crate version.
    pub version: &'static str,
}

async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        service: "mymoney",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Creates the health route. Needs no authentication.
pub fn routes() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
