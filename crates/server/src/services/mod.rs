//! Business logic services.
//!
//! - [`auth`] - Registration, login, and user lookup
//! - [`feed`] - The gossip feed: posts, votes, comments, deletion

pub mod auth;
pub mod feed;
