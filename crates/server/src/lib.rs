//! Grapevine server library.
//!
//! Exposes the configuration, state, and router assembly so the binary stays
//! thin and the integration tests can drive the assembled router directly.
//!
//! # Architecture
//!
//! - Axum web framework, JSON request/response bodies
//! - `PostgreSQL` via sqlx for users, gossips, votes, and comments
//! - A process-wide broadcast channel pushing feed events to WebSocket
//!   clients
//!
//! Identity is a client-supplied user id per request; there is no session
//! layer. This is inherited from the system Grapevine replaces and is a
//! known weakness, not a feature.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod realtime;
pub mod routes;
pub mod services;
pub mod state;

use axum::Router;
use axum::http::{HeaderValue, Method, header};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;
use crate::state::AppState;

/// Assemble the application router with its middleware layers.
#[must_use]
pub fn app(state: AppState) -> Router {
    let cors = cors_layer(state.config());

    routes::routes()
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// CORS for the configured frontend origin.
fn cors_layer(config: &ServerConfig) -> CorsLayer {
    let mut cors = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::PATCH,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .allow_credentials(true);

    match config.frontend_url.parse::<HeaderValue>() {
        Ok(origin) => cors = cors.allow_origin(origin),
        Err(e) => tracing::warn!(
            error = %e,
            "invalid GRAPEVINE_FRONTEND_URL; cross-origin requests disabled"
        ),
    }

    cors
}
