//! Domain models for the gossip feed.
//!
//! Domain types (`User`, `Gossip`, `Comment`) mirror what the store holds;
//! view types (`UserResponse`, `GossipView`, `CommentView`) are what crosses
//! the API boundary. Author redaction for anonymous items happens exactly
//! once, when a view is built from its domain type.

pub mod comment;
pub mod gossip;
pub mod principal;
pub mod user;

pub use comment::{Comment, CommentView, NewComment};
pub use gossip::{Gossip, GossipView, GossipWithVotes, NewGossip, SortKey, VoteKind, VoteTally};
pub use principal::{ADMIN_USER_ID, Principal, Role};
pub use user::{User, UserResponse};

/// Display name substituted for the author of anonymous gossips and comments.
pub const ANONYMOUS_AUTHOR: &str = "Anonymous";
