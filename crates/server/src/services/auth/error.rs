//! Authentication error types.

use thiserror::Error;

use crate::db::RepositoryError;

/// Errors that can occur during authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Username missing, empty, or malformed.
    #[error("invalid username: {0}")]
    InvalidUsername(#[from] grapevine_core::UsernameError),

    /// Password missing or empty.
    #[error("password is required")]
    MissingPassword,

    /// Password too short.
    #[error("{0}")]
    WeakPassword(String),

    /// Wrong password or no such user. One variant for both cases: the
    /// response must not reveal which it was.
    #[error("invalid username or password")]
    InvalidCredentials,

    /// Username already registered.
    #[error("username already taken")]
    UsernameTaken,

    /// User not found (lookup by id).
    #[error("user not found")]
    UserNotFound,

    /// Password hashing error.
    #[error("password hashing error")]
    PasswordHash,

    /// Repository/database error.
    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),
}
