//! Integration tests for Grapevine.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p grapevine-integration-tests
//! ```
//!
//! Most tests drive the assembled router directly via `tower::ServiceExt`
//! over a lazily-connected pool: request paths that fail validation before
//! any store access (the server's fail-fast contract) run with no database
//! at all, as do the constant-lookup administrator login and the health and
//! info routes.
//!
//! Tests that need real rows are `#[ignore]`d. To run them, start a
//! `PostgreSQL`, point `GRAPEVINE_TEST_DATABASE_URL` at an empty database,
//! and run:
//!
//! ```bash
//! cargo test -p grapevine-integration-tests -- --ignored
//! ```

#![allow(clippy::unwrap_used, clippy::missing_panics_doc)]

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use secrecy::SecretString;
use sqlx::PgPool;
use tower::ServiceExt;

use grapevine_server::config::{AdminConfig, ServerConfig};
use grapevine_server::state::AppState;
use grapevine_server::{app, db};

/// Administrator credentials every test router is configured with.
pub const TEST_ADMIN_USERNAME: &str = "admin";
pub const TEST_ADMIN_PASSWORD: &str = "integration-admin-pw";

/// Configuration for test routers. The database URL points at the test
/// database when one is configured and at a dead default otherwise; lazy
/// pools never touch it unless a request actually reaches the store.
#[must_use]
pub fn test_config() -> ServerConfig {
    ServerConfig {
        database_url: SecretString::from(test_database_url()),
        host: "127.0.0.1".parse().unwrap(),
        port: 0,
        frontend_url: "http://localhost:5173".to_string(),
        admin: AdminConfig {
            username: TEST_ADMIN_USERNAME.to_string(),
            password: SecretString::from(TEST_ADMIN_PASSWORD),
        },
    }
}

fn test_database_url() -> String {
    std::env::var("GRAPEVINE_TEST_DATABASE_URL")
        .unwrap_or_else(|_| "postgres://localhost:1/grapevine_unreachable".to_string())
}

/// A router over a lazily-connected pool. No database needed until a
/// request actually reaches the store.
#[must_use]
pub fn test_router() -> Router {
    let config = test_config();
    let pool = db::create_lazy_pool(&config.database_url).expect("valid connection string");
    app(AppState::new(config, pool))
}

/// A router over a real, migrated pool. Only for `#[ignore]`d tests.
pub async fn db_router() -> (Router, PgPool) {
    let config = test_config();
    let pool = db::create_pool(&config.database_url)
        .await
        .expect("GRAPEVINE_TEST_DATABASE_URL must point at a running PostgreSQL");
    db::MIGRATOR.run(&pool).await.expect("migrations apply");

    (app(AppState::new(config, pool.clone())), pool)
}

/// Send one JSON request through the router and decode the JSON response.
pub async fn send_json(
    router: Router,
    method: &str,
    uri: &str,
    body: Option<serde_json::Value>,
) -> (StatusCode, serde_json::Value) {
    let mut builder = Request::builder().method(method).uri(uri);

    let request = match body {
        Some(json) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            builder
                .body(Body::from(serde_json::to_vec(&json).unwrap()))
                .unwrap()
        }
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();

    let json = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null)
    };

    (status, json)
}

/// Like [`db_router`], but also hands back the state so tests can subscribe
/// to the broadcast channel.
pub async fn db_router_with_state() -> (Router, AppState) {
    let config = test_config();
    let pool = db::create_pool(&config.database_url)
        .await
        .expect("GRAPEVINE_TEST_DATABASE_URL must point at a running PostgreSQL");
    db::MIGRATOR.run(&pool).await.expect("migrations apply");

    let state = AppState::new(config, pool);
    (app(state.clone()), state)
}
