/// Database models
///
/// # Models
///
/// - `user`: Registered accounts
/// - `content`: Saved bookmarks, owned by a user
/// - `share_link`: Public read-only links to a user's content
///
/// Each model carries its own PostgreSQL queries as associated functions
/// taking a `&PgPool`. Handlers do not call these directly; they go through
/// [`crate::store::BrainStore`].

pub mod content;
pub mod share_link;
pub mod user;
