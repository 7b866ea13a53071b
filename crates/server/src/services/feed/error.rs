//! Feed error types.

use thiserror::Error;

use crate::db::RepositoryError;

/// Errors that can occur during feed operations.
#[derive(Debug, Error)]
pub enum FeedError {
    /// Gossip or comment content is empty after trimming.
    #[error("content is required")]
    EmptyContent,

    /// The gossip does not exist.
    #[error("gossip not found")]
    GossipNotFound,

    /// The requester is neither the author nor the administrator.
    #[error("not authorized to delete this gossip")]
    NotAuthorized,

    /// Repository/database error.
    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),
}
