//! Comment repository for database operations.

use sqlx::PgPool;
use uuid::Uuid;

use grapevine_core::{CommentId, GossipId};

use super::RepositoryError;
use crate::models::{Comment, NewComment};

/// Repository for comment rows.
pub struct CommentRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> CommentRepository<'a> {
    /// Create a new comment repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Insert a comment attached to a gossip. The foreign key makes the
    /// existence check part of the insert itself, so commenting on a
    /// concurrently-deleted gossip fails instead of leaving an orphan.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the gossip does not exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create(
        &self,
        gossip_id: GossipId,
        new: &NewComment,
    ) -> Result<Comment, RepositoryError> {
        let comment = sqlx::query_as::<_, Comment>(
            r"
            INSERT INTO gossip_comment
                (id, gossip_id, content, author_id, author_username, is_anonymous)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, gossip_id, content, author_id, author_username,
                      is_anonymous, created_at
            ",
        )
        .bind(CommentId::generate())
        .bind(gossip_id)
        .bind(&new.content)
        .bind(new.author_id)
        .bind(&new.author_username)
        .bind(new.is_anonymous)
        .fetch_one(self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e
                && db_err.is_foreign_key_violation()
            {
                return RepositoryError::NotFound;
            }
            RepositoryError::Database(e)
        })?;

        Ok(comment)
    }

    /// Fetch the comments of all listed gossips in one round-trip, newest
    /// first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_for_gossips(
        &self,
        gossip_ids: &[GossipId],
    ) -> Result<Vec<Comment>, RepositoryError> {
        if gossip_ids.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<Uuid> = gossip_ids.iter().map(|id| id.as_uuid()).collect();

        let comments = sqlx::query_as::<_, Comment>(
            r"
            SELECT id, gossip_id, content, author_id, author_username,
                   is_anonymous, created_at
            FROM gossip_comment
            WHERE gossip_id = ANY($1)
            ORDER BY created_at DESC
            ",
        )
        .bind(&ids)
        .fetch_all(self.pool)
        .await?;

        Ok(comments)
    }
}
