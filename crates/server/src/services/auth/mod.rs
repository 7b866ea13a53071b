//! Authentication service.
//!
//! Handles registration, login, and user lookup. Two kinds of principal can
//! log in: regular members, checked against the store, and the single
//! configured administrator, checked against process configuration with no
//! store access at all.

mod error;

pub use error::AuthError;

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use secrecy::ExposeSecret;
use sqlx::PgPool;

use grapevine_core::{UserId, Username};

use crate::config::AdminConfig;
use crate::db::{RepositoryError, UserRepository};
use crate::models::{ADMIN_USER_ID, UserResponse};

/// Minimum password length.
const MIN_PASSWORD_LENGTH: usize = 6;

/// Authentication service.
pub struct AuthService<'a> {
    users: UserRepository<'a>,
    admin: &'a AdminConfig,
}

impl<'a> AuthService<'a> {
    /// Create a new authentication service.
    #[must_use]
    pub const fn new(pool: &'a PgPool, admin: &'a AdminConfig) -> Self {
        Self {
            users: UserRepository::new(pool),
            admin,
        }
    }

    /// Register a new account.
    ///
    /// All validation happens before the store is touched.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidUsername` if the username is missing or empty.
    /// Returns `AuthError::MissingPassword` / `AuthError::WeakPassword` for
    /// bad passwords.
    /// Returns `AuthError::UsernameTaken` if the username is already registered.
    pub async fn register(&self, username: &str, password: &str) -> Result<UserResponse, AuthError> {
        let username = Username::parse(username)?;
        validate_password(password)?;

        let password_hash = hash_password(password)?;

        let user = self
            .users
            .create(&username, &password_hash)
            .await
            .map_err(|e| match e {
                RepositoryError::Conflict(_) => AuthError::UsernameTaken,
                other => AuthError::Repository(other),
            })?;

        tracing::info!(username = %user.username, id = %user.id, "new user registered");

        Ok(UserResponse::from(user))
    }

    /// Log in, resolving either the administrator or a member.
    ///
    /// A missing account and a wrong password produce the identical error so
    /// the response cannot be used to enumerate usernames. (Timing still
    /// differs between the two paths; a known limitation.)
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` on any credential mismatch.
    pub async fn login(
        &self,
        username: &str,
        password: &str,
        as_admin: bool,
    ) -> Result<UserResponse, AuthError> {
        if as_admin {
            return self.authenticate_administrator(username, password);
        }
        self.authenticate_member(username, password).await
    }

    /// Get the public view of an account by id.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::UserNotFound` if no such account exists.
    pub async fn get_user(&self, id: UserId) -> Result<UserResponse, AuthError> {
        let user = self
            .users
            .get_by_id(id)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        Ok(UserResponse::from(user))
    }

    /// Check the configured administrator credentials. Constant lookup; the
    /// store is never consulted.
    fn authenticate_administrator(
        &self,
        username: &str,
        password: &str,
    ) -> Result<UserResponse, AuthError> {
        if username != self.admin.username || password != self.admin.password.expose_secret() {
            tracing::warn!(username, "failed administrator login");
            return Err(AuthError::InvalidCredentials);
        }

        tracing::info!("administrator logged in");

        Ok(UserResponse {
            id: ADMIN_USER_ID,
            username: self.admin.username.clone(),
            is_admin: true,
        })
    }

    /// Look up a member and verify their password.
    async fn authenticate_member(
        &self,
        username: &str,
        password: &str,
    ) -> Result<UserResponse, AuthError> {
        let username = Username::parse(username)?;
        if password.is_empty() {
            return Err(AuthError::MissingPassword);
        }

        let (user, password_hash) = self
            .users
            .get_with_password_hash(&username)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        verify_password(password, &password_hash)?;

        tracing::info!(username = %user.username, id = %user.id, "user logged in");

        Ok(UserResponse::from(user))
    }
}

/// Validate password meets requirements.
fn validate_password(password: &str) -> Result<(), AuthError> {
    if password.is_empty() {
        return Err(AuthError::MissingPassword);
    }

    if password.len() < MIN_PASSWORD_LENGTH {
        return Err(AuthError::WeakPassword(format!(
            "password must be at least {MIN_PASSWORD_LENGTH} characters"
        )));
    }

    Ok(())
}

/// Hash a password using Argon2id.
fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| AuthError::PasswordHash)
}

/// Verify a password against a hash.
fn verify_password(password: &str, hash: &str) -> Result<(), AuthError> {
    let parsed_hash = PasswordHash::new(hash).map_err(|_| AuthError::InvalidCredentials)?;
    let argon2 = Argon2::default();

    argon2
        .verify_password(password.as_bytes(), &parsed_hash)
        .map_err(|_| AuthError::InvalidCredentials)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_password_empty() {
        assert!(matches!(
            validate_password(""),
            Err(AuthError::MissingPassword)
        ));
    }

    #[test]
    fn test_validate_password_too_short() {
        assert!(matches!(
            validate_password("12345"),
            Err(AuthError::WeakPassword(_))
        ));
    }

    #[test]
    fn test_validate_password_minimum_length() {
        assert!(validate_password("123456").is_ok());
    }

    #[test]
    fn test_hash_then_verify_roundtrip() {
        let hash = hash_password("correct horse").unwrap();
        assert!(verify_password("correct horse", &hash).is_ok());
        assert!(matches!(
            verify_password("battery staple", &hash),
            Err(AuthError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_hashes_are_salted() {
        let first = hash_password("same input").unwrap();
        let second = hash_password("same input").unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn test_garbage_hash_is_invalid_credentials() {
        assert!(matches!(
            verify_password("anything", "not-a-phc-string"),
            Err(AuthError::InvalidCredentials)
        ));
    }
}
