/// Storage port for users, content and share links
///
/// Route handlers talk to storage only through [`BrainStore`]. Two
/// implementations exist:
///
/// - [`postgres::PgStore`]: the production store, backed by a `sqlx` pool
/// - [`memory::MemoryStore`]: an in-process store with the same unique-key
///   rules, used by the HTTP tests and for running without a database
///
/// Operations are independent: nothing here opens a transaction across
/// entities, and nothing is retried.

use async_trait::async_trait;
use uuid::Uuid;

use crate::models::{
    content::{Content, ContentWithOwner, NewContent},
    share_link::{NewShareLink, ShareLink},
    user::{NewUser, User},
};

pub mod memory;
pub mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

/// Unique keys the store enforces
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UniqueKey {
    /// `users.email`
    Email,

    /// `share_links.user_id`
    ShareLinkOwner,

    /// `share_links.hash`
    ShareLinkHash,
}

impl std::fmt::Display for UniqueKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UniqueKey::Email => write!(f, "email"),
            UniqueKey::ShareLinkOwner => write!(f, "share link owner"),
            UniqueKey::ShareLinkHash => write!(f, "share link hash"),
        }
    }
}

/// Error type for store operations
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A unique key already holds this value
    #[error("Duplicate {0}")]
    Conflict(UniqueKey),

    /// Any other database failure
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

#[async_trait]
pub trait BrainStore: Send + Sync {
    // --- Users ---
    async fn create_user(&self, data: NewUser) -> StoreResult<User>;

    async fn find_user_by_id(&self, id: Uuid) -> StoreResult<Option<User>>;

    async fn find_user_by_email(&self, email: &str) -> StoreResult<Option<User>>;

    // --- Content ---
    async fn create_content(&self, data: NewContent) -> StoreResult<Content>;

    /// Oldest first, each item carrying the owner's username
    async fn list_content_by_owner(&self, user_id: Uuid) -> StoreResult<Vec<ContentWithOwner>>;

    /// Deletes `id` only when `user_id` owns it; false when nothing matched
    async fn delete_content(&self, id: Uuid, user_id: Uuid) -> StoreResult<bool>;

    // --- Share links ---
    async fn create_share_link(&self, data: NewShareLink) -> StoreResult<ShareLink>;

    async fn find_share_link_by_user(&self, user_id: Uuid) -> StoreResult<Option<ShareLink>>;

    async fn find_share_link_by_hash(&self, hash: &str) -> StoreResult<Option<ShareLink>>;

    async fn delete_share_link_by_user(&self, user_id: Uuid) -> StoreResult<bool>;

    // --- Health ---
    async fn ping(&self) -> StoreResult<()>;
}
