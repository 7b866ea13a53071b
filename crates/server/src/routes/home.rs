//! Root and health route handlers.

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde_json::json;

use crate::state::AppState;

/// Handle `GET /`: API information.
pub async fn index() -> impl IntoResponse {
    Json(json!({
        "message": "Grapevine API",
        "version": env!("CARGO_PKG_VERSION"),
        "status": "running",
        "websocket": "enabled",
        "endpoints": {
            "health": "/health",
            "auth": "/auth",
            "gossips": "/gossips",
            "ws": "/ws",
        },
    }))
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check dependencies.
pub async fn health() -> &'static str {
    "ok"
}

/// Readiness health check endpoint.
///
/// Verifies database connectivity before returning OK.
/// Returns 503 Service Unavailable if the database is not reachable.
pub async fn readiness(State(state): State<AppState>) -> StatusCode {
    match sqlx::query("SELECT 1").fetch_one(state.pool()).await {
        Ok(_) => StatusCode::OK,
        Err(_) => StatusCode::SERVICE_UNAVAILABLE,
    }
}
