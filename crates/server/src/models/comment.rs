//! Comment domain types.

use chrono::{DateTime, Utc};
use serde::Serialize;

use grapevine_core::{CommentId, GossipId, UserId};

use super::ANONYMOUS_AUTHOR;

/// A stored comment (domain type). Comments are only ever created attached
/// to a gossip and only ever removed as part of deleting that gossip.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Comment {
    pub id: CommentId,
    pub gossip_id: GossipId,
    pub content: String,
    pub author_id: UserId,
    pub author_username: String,
    pub is_anonymous: bool,
    pub created_at: DateTime<Utc>,
}

/// Input for creating a comment.
#[derive(Debug, Clone)]
pub struct NewComment {
    pub content: String,
    pub author_id: UserId,
    pub author_username: String,
    pub is_anonymous: bool,
}

/// Wire view of a comment.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentView {
    pub id: CommentId,
    pub content: String,
    /// Display name; `"Anonymous"` when the comment is anonymous.
    pub author: String,
    pub author_id: UserId,
    pub is_anonymous: bool,
    pub created_at: DateTime<Utc>,
}

impl From<Comment> for CommentView {
    fn from(comment: Comment) -> Self {
        let author = if comment.is_anonymous {
            ANONYMOUS_AUTHOR.to_string()
        } else {
            comment.author_username
        };

        Self {
            id: comment.id,
            content: comment.content,
            author,
            author_id: comment.author_id,
            is_anonymous: comment.is_anonymous,
            created_at: comment.created_at,
        }
    }
}
