//! Unified error handling.
//!
//! Provides a unified `AppError` type that every route handler returns.
//! Service-level errors convert into it, it decides the HTTP status, and it
//! renders the `{success: false, message}` body the clients expect. Internal
//! failures are logged with their detail but answered with a generic message
//! outside development builds.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use crate::db::RepositoryError;
use crate::services::auth::AuthError;
use crate::services::feed::FeedError;

/// Application-level error type.
#[derive(Debug, Error)]
pub enum AppError {
    /// Malformed, missing, or empty input. Detected before any store access.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Uniqueness violation (e.g., username already taken).
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Bad credentials.
    #[error("Authentication error: {0}")]
    Authentication(String),

    /// Insufficient rights.
    #[error("Not authorized: {0}")]
    Authorization(String),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Database operation failed.
    #[error("Database error: {0}")]
    Database(#[from] RepositoryError),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidUsername(e) => Self::Validation(e.to_string()),
            e @ (AuthError::MissingPassword | AuthError::WeakPassword(_)) => {
                Self::Validation(e.to_string())
            }
            e @ AuthError::InvalidCredentials => Self::Authentication(e.to_string()),
            e @ AuthError::UsernameTaken => Self::Conflict(e.to_string()),
            AuthError::UserNotFound => Self::NotFound("User not found".to_string()),
            e @ AuthError::PasswordHash => Self::Internal(e.to_string()),
            AuthError::Repository(e) => Self::Database(e),
        }
    }
}

impl From<FeedError> for AppError {
    fn from(err: FeedError) -> Self {
        match err {
            e @ FeedError::EmptyContent => Self::Validation(e.to_string()),
            FeedError::GossipNotFound => Self::NotFound("Gossip not found".to_string()),
            e @ FeedError::NotAuthorized => Self::Authorization(e.to_string()),
            FeedError::Repository(e) => Self::Database(e),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if matches!(self, Self::Database(_) | Self::Internal(_)) {
            tracing::error!(error = %self, "request failed");
        }

        let status = match &self {
            // Conflicts answer 400, not 409: the registration contract
            // reports a taken username as a plain validation failure.
            Self::Validation(_) | Self::Conflict(_) => StatusCode::BAD_REQUEST,
            Self::Authentication(_) => StatusCode::UNAUTHORIZED,
            Self::Authorization(_) => StatusCode::FORBIDDEN,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Database(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let message = match &self {
            Self::Database(_) | Self::Internal(_) => {
                if cfg!(debug_assertions) {
                    self.to_string()
                } else {
                    // Don't expose internal error details to clients
                    "Something went wrong!".to_string()
                }
            }
            Self::Validation(msg)
            | Self::Conflict(msg)
            | Self::Authentication(msg)
            | Self::Authorization(msg)
            | Self::NotFound(msg) => msg.clone(),
        };

        (
            status,
            Json(json!({ "success": false, "message": message })),
        )
            .into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn get_status(err: AppError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(
            get_status(AppError::Validation("bad".to_string())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            get_status(AppError::Conflict("taken".to_string())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            get_status(AppError::Authentication("nope".to_string())),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            get_status(AppError::Authorization("nope".to_string())),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            get_status(AppError::NotFound("gone".to_string())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            get_status(AppError::Internal("boom".to_string())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_wrong_password_and_missing_user_are_indistinguishable() {
        let wrong_password = AppError::from(AuthError::InvalidCredentials);
        let missing_user = AppError::from(AuthError::InvalidCredentials);

        assert_eq!(wrong_password.to_string(), missing_user.to_string());
    }

    #[test]
    fn test_feed_error_mapping() {
        assert_eq!(
            get_status(AppError::from(FeedError::GossipNotFound)),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            get_status(AppError::from(FeedError::NotAuthorized)),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            get_status(AppError::from(FeedError::EmptyContent)),
            StatusCode::BAD_REQUEST
        );
    }
}
