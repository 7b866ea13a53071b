//! User repository for database operations.

use sqlx::PgPool;

use grapevine_core::{UserId, Username};

use super::RepositoryError;
use crate::models::User;

/// Repository for account rows.
pub struct UserRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> UserRepository<'a> {
    /// Create a new user repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Create a new account.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the username is already taken.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create(
        &self,
        username: &Username,
        password_hash: &str,
    ) -> Result<User, RepositoryError> {
        let user = sqlx::query_as::<_, User>(
            r"
            INSERT INTO app_user (id, username, password_hash)
            VALUES ($1, $2, $3)
            RETURNING id, username, is_admin, created_at
            ",
        )
        .bind(UserId::generate())
        .bind(username)
        .bind(password_hash)
        .fetch_one(self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e
                && db_err.is_unique_violation()
            {
                return RepositoryError::Conflict("username already exists".to_owned());
            }
            RepositoryError::Database(e)
        })?;

        Ok(user)
    }

    /// Get an account by its ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_id(&self, id: UserId) -> Result<Option<User>, RepositoryError> {
        let user = sqlx::query_as::<_, User>(
            r"
            SELECT id, username, is_admin, created_at
            FROM app_user
            WHERE id = $1
            ",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(user)
    }

    /// Get an account and its password hash by username.
    ///
    /// Returns `None` if no such account exists; the caller is responsible
    /// for collapsing that case and a hash mismatch into one failure.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_with_password_hash(
        &self,
        username: &Username,
    ) -> Result<Option<(User, String)>, RepositoryError> {
        let row = sqlx::query_as::<_, CredentialRow>(
            r"
            SELECT id, username, is_admin, created_at, password_hash
            FROM app_user
            WHERE username = $1
            ",
        )
        .bind(username)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(|r| {
            (
                User {
                    id: r.id,
                    username: r.username,
                    is_admin: r.is_admin,
                    created_at: r.created_at,
                },
                r.password_hash,
            )
        }))
    }
}

/// Row shape for credential lookups; never leaves this module.
#[derive(sqlx::FromRow)]
struct CredentialRow {
    id: UserId,
    username: Username,
    is_admin: bool,
    created_at: chrono::DateTime<chrono::Utc>,
    password_hash: String,
}
