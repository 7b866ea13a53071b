//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET    /                     - API info
//! GET    /health               - Liveness check
//! GET    /health/ready         - Readiness check (pings the database)
//! GET    /ws                   - WebSocket subscription to feed events
//!
//! # Auth
//! POST   /auth/register        - Create an account
//! POST   /auth/login           - User or administrator login
//! GET    /auth/user/{id}       - Public view of an account
//!
//! # Gossips
//! GET    /gossips?sortBy=      - Full feed with comments attached
//! POST   /gossips              - Create a gossip
//! POST   /gossips/{id}/vote    - Cast or flip a vote
//! POST   /gossips/{id}/comments - Add a comment
//! DELETE /gossips/{id}         - Delete (author or administrator)
//! ```

pub mod auth;
pub mod gossips;
pub mod home;

use axum::{
    Router,
    routing::{get, post},
};

use crate::realtime::ws;
use crate::state::AppState;

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .route("/user/{id}", get(auth::get_user))
}

/// Create the gossip routes router.
pub fn gossip_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(gossips::list).post(gossips::create))
        .route("/{id}/vote", post(gossips::vote))
        .route("/{id}/comments", post(gossips::add_comment))
        .route("/{id}", axum::routing::delete(gossips::delete))
}

/// Create all routes for the server.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home::index))
        .route("/health", get(home::health))
        .route("/health/ready", get(home::readiness))
        .route("/ws", get(ws::subscribe))
        .nest("/auth", auth_routes())
        .nest("/gossips", gossip_routes())
}
