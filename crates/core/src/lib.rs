//! Grapevine Core - Shared types library.
//!
//! This crate provides common types used across all Grapevine components:
//! - `server` - The gossip feed API server
//! - `integration-tests` - Black-box tests against the assembled router
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no database access, no HTTP
//! clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs and usernames

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
