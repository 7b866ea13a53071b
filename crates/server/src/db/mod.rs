//! Database operations for the gossip feed `PostgreSQL`.
//!
//! # Tables
//!
//! - `app_user` - Accounts (username, Argon2 password hash, admin flag)
//! - `gossip` - Posts with author attribution and anonymity flag
//! - `gossip_vote` - One row per (gossip, voter); the composite primary key
//!   enforces at most one vote per user per gossip
//! - `gossip_comment` - Comments attached to a gossip
//!
//! # Migrations
//!
//! Migrations are stored in `crates/server/migrations/` and embedded via
//! [`MIGRATOR`]; the server runs them at startup.

pub mod comments;
pub mod gossips;
pub mod users;

pub use comments::CommentRepository;
pub use gossips::GossipRepository;
pub use users::UserRepository;

use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::migrate::Migrator;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

/// Embedded migrations from `crates/server/migrations/`.
pub static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Errors from repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,

    /// Constraint violation (e.g., unique username).
    #[error("constraint violation: {0}")]
    Conflict(String),
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}

/// Create a pool without connecting.
///
/// Connections are established on first use, which lets request paths that
/// fail validation before any store access be exercised with no database
/// running (the integration tests rely on this).
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection string cannot be parsed.
pub fn create_lazy_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .acquire_timeout(Duration::from_secs(10))
        .connect_lazy(database_url.expose_secret())
}
