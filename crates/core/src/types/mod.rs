//! Newtype wrappers for domain primitives.
//!
//! - [`id`] - Type-safe entity IDs (`UserId`, `GossipId`, `CommentId`)
//! - [`username`] - Validated account names

pub mod id;
pub mod username;

pub use id::{CommentId, GossipId, UserId};
pub use username::{Username, UsernameError};
