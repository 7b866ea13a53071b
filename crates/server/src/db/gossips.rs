//! Gossip repository: posts, votes, and the delete cascade.
//!
//! A vote is a single `INSERT .. ON CONFLICT .. DO UPDATE` against the
//! `gossip_vote` relation, so flipping or repeating a vote has no
//! read-modify-write window and the composite primary key keeps a user in at
//! most one of the up/down sets.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use grapevine_core::{GossipId, UserId};

use super::RepositoryError;
use crate::models::{Gossip, GossipWithVotes, NewGossip, SortKey, VoteKind, VoteTally};

/// Repository for gossip rows and their vote sets.
pub struct GossipRepository<'a> {
    pool: &'a PgPool,
}

/// Aggregated feed row; converted to [`GossipWithVotes`] before leaving.
#[derive(sqlx::FromRow)]
struct FeedRow {
    id: GossipId,
    content: String,
    author_id: UserId,
    author_username: String,
    is_anonymous: bool,
    created_at: DateTime<Utc>,
    upvotes: i64,
    downvotes: i64,
    upvoted_by: Vec<Uuid>,
    downvoted_by: Vec<Uuid>,
}

impl From<FeedRow> for GossipWithVotes {
    fn from(row: FeedRow) -> Self {
        Self {
            gossip: Gossip {
                id: row.id,
                content: row.content,
                author_id: row.author_id,
                author_username: row.author_username,
                is_anonymous: row.is_anonymous,
                created_at: row.created_at,
            },
            upvotes: row.upvotes,
            downvotes: row.downvotes,
            upvoted_by: row.upvoted_by.into_iter().map(UserId::new).collect(),
            downvoted_by: row.downvoted_by.into_iter().map(UserId::new).collect(),
        }
    }
}

impl<'a> GossipRepository<'a> {
    /// Create a new gossip repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Insert a new gossip with empty vote sets.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(&self, new: &NewGossip) -> Result<Gossip, RepositoryError> {
        let gossip = sqlx::query_as::<_, Gossip>(
            r"
            INSERT INTO gossip (id, content, author_id, author_username, is_anonymous)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, content, author_id, author_username, is_anonymous, created_at
            ",
        )
        .bind(GossipId::generate())
        .bind(&new.content)
        .bind(new.author_id)
        .bind(&new.author_username)
        .bind(new.is_anonymous)
        .fetch_one(self.pool)
        .await?;

        Ok(gossip)
    }

    /// Get a gossip by ID, without vote aggregates.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_id(&self, id: GossipId) -> Result<Option<Gossip>, RepositoryError> {
        let gossip = sqlx::query_as::<_, Gossip>(
            r"
            SELECT id, content, author_id, author_username, is_anonymous, created_at
            FROM gossip
            WHERE id = $1
            ",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(gossip)
    }

    /// List every gossip with vote counts and voter sets, ordered by the
    /// given sort key (creation time descending breaks ties).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_with_votes(
        &self,
        sort: SortKey,
    ) -> Result<Vec<GossipWithVotes>, RepositoryError> {
        let order_by = match sort {
            SortKey::Newest => "g.created_at DESC",
            SortKey::Popular => "upvotes DESC, g.created_at DESC",
            SortKey::Controversial => "downvotes DESC, g.created_at DESC",
        };

        let query = format!(
            r"
            SELECT g.id, g.content, g.author_id, g.author_username,
                   g.is_anonymous, g.created_at,
                   COUNT(v.user_id) FILTER (WHERE v.vote = 'up')   AS upvotes,
                   COUNT(v.user_id) FILTER (WHERE v.vote = 'down') AS downvotes,
                   COALESCE(ARRAY_AGG(v.user_id) FILTER (WHERE v.vote = 'up'),
                            ARRAY[]::uuid[]) AS upvoted_by,
                   COALESCE(ARRAY_AGG(v.user_id) FILTER (WHERE v.vote = 'down'),
                            ARRAY[]::uuid[]) AS downvoted_by
            FROM gossip g
            LEFT JOIN gossip_vote v ON v.gossip_id = g.id
            GROUP BY g.id
            ORDER BY {order_by}
            ",
        );

        let rows = sqlx::query_as::<_, FeedRow>(&query)
            .fetch_all(self.pool)
            .await?;

        Ok(rows.into_iter().map(GossipWithVotes::from).collect())
    }

    /// Apply a vote: removes the user's previous vote on this gossip (if
    /// any) and records the new one, as one atomic statement.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the gossip does not exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn apply_vote(
        &self,
        gossip_id: GossipId,
        user_id: UserId,
        kind: VoteKind,
    ) -> Result<(), RepositoryError> {
        sqlx::query(
            r"
            INSERT INTO gossip_vote (gossip_id, user_id, vote)
            VALUES ($1, $2, $3)
            ON CONFLICT (gossip_id, user_id) DO UPDATE SET vote = EXCLUDED.vote
            ",
        )
        .bind(gossip_id)
        .bind(user_id)
        .bind(kind.as_str())
        .execute(self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e
                && db_err.is_foreign_key_violation()
            {
                // Voted on a gossip that does not (or no longer does) exist
                return RepositoryError::NotFound;
            }
            RepositoryError::Database(e)
        })?;

        Ok(())
    }

    /// Current vote counts for one gossip.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn tally(&self, gossip_id: GossipId) -> Result<VoteTally, RepositoryError> {
        let tally = sqlx::query_as::<_, VoteTally>(
            r"
            SELECT COUNT(*) FILTER (WHERE vote = 'up')   AS upvotes,
                   COUNT(*) FILTER (WHERE vote = 'down') AS downvotes
            FROM gossip_vote
            WHERE gossip_id = $1
            ",
        )
        .bind(gossip_id)
        .fetch_one(self.pool)
        .await?;

        Ok(tally)
    }

    /// Delete a gossip together with all of its comments, in one
    /// transaction. Vote rows go with the gossip via `ON DELETE CASCADE`.
    ///
    /// # Returns
    ///
    /// Returns `true` if the gossip existed and was deleted.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if any statement fails.
    pub async fn delete_with_comments(&self, id: GossipId) -> Result<bool, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM gossip_comment WHERE gossip_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        let result = sqlx::query("DELETE FROM gossip WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(result.rows_affected() > 0)
    }
}
