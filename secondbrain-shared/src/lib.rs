//! # Second Brain Shared Library
//!
//! Types and building blocks used by the Second Brain API server.
//!
//! ## Module Organization
//!
//! - `models`: Users, content and share links, with their PostgreSQL queries
//! - `store`: The `BrainStore` port and its PostgreSQL and in-memory adapters
//! - `db`: Connection pool and migrations
//! - `auth`: Password hashing, JWT tokens and bearer authentication
//! - `share_token`: Random share-link hashes

pub mod auth;
pub mod db;
pub mod models;
pub mod share_token;
pub mod store;

/// Current version of the shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
