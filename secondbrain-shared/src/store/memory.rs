/// In-memory implementation of [`BrainStore`]
///
/// Keeps the three collections in insertion order behind one
/// `tokio::sync::RwLock` and enforces the same unique keys as the database
/// schema: user email, share-link owner and share-link hash.
///
/// # Example
///
/// ```
/// use secondbrain_shared::models::user::NewUser;
/// use secondbrain_shared::store::{BrainStore, MemoryStore};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let store = MemoryStore::new();
/// let user = store
///     .create_user(NewUser {
///         username: "ada".to_string(),
///         email: "ada@example.com".to_string(),
///         password_hash: "$argon2id$...".to_string(),
///     })
///     .await?;
///
/// assert!(store.find_user_by_id(user.id).await?.is_some());
/// # Ok(())
/// # }
/// ```

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{BrainStore, StoreError, StoreResult, UniqueKey};
use crate::models::{
    content::{Content, ContentWithOwner, NewContent},
    share_link::{NewShareLink, ShareLink},
    user::{NewUser, User},
};

#[derive(Debug, Default)]
struct Collections {
    users: Vec<User>,
    contents: Vec<Content>,
    share_links: Vec<ShareLink>,
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: RwLock<Collections>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BrainStore for MemoryStore {
    async fn create_user(&self, data: NewUser) -> StoreResult<User> {
        let mut db = self.inner.write().await;

        if db.users.iter().any(|u| u.email == data.email) {
            return Err(StoreError::Conflict(UniqueKey::Email));
        }

        let user = User {
            id: Uuid::new_v4(),
            username: data.username,
            email: data.email,
            password_hash: data.password_hash,
            created_at: Utc::now(),
        };
        db.users.push(user.clone());

        Ok(user)
    }

    async fn find_user_by_id(&self, id: Uuid) -> StoreResult<Option<User>> {
        let db = self.inner.read().await;
        Ok(db.users.iter().find(|u| u.id == id).cloned())
    }

    async fn find_user_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        let db = self.inner.read().await;
        Ok(db.users.iter().find(|u| u.email == email).cloned())
    }

    async fn create_content(&self, data: NewContent) -> StoreResult<Content> {
        let mut db = self.inner.write().await;

        let content = Content {
            id: Uuid::new_v4(),
            content_type: data.content_type,
            link: data.link,
            title: data.title,
            tags: Vec::new(),
            user_id: data.user_id,
            created_at: Utc::now(),
        };
        db.contents.push(content.clone());

        Ok(content)
    }

    async fn list_content_by_owner(&self, user_id: Uuid) -> StoreResult<Vec<ContentWithOwner>> {
        let db = self.inner.read().await;

        // Inner join: content whose owner is gone is not listed
        let owner_username = match db.users.iter().find(|u| u.id == user_id) {
            Some(user) => user.username.clone(),
            None => return Ok(Vec::new()),
        };

        Ok(db
            .contents
            .iter()
            .filter(|c| c.user_id == user_id)
            .map(|c| ContentWithOwner {
                content: c.clone(),
                owner_username: owner_username.clone(),
            })
            .collect())
    }

    async fn delete_content(&self, id: Uuid, user_id: Uuid) -> StoreResult<bool> {
        let mut db = self.inner.write().await;

        let before = db.contents.len();
        db.contents.retain(|c| !(c.id == id && c.user_id == user_id));

        Ok(db.contents.len() < before)
    }

    async fn create_share_link(&self, data: NewShareLink) -> StoreResult<ShareLink> {
        let mut db = self.inner.write().await;

        if db.share_links.iter().any(|l| l.user_id == data.user_id) {
            return Err(StoreError::Conflict(UniqueKey::ShareLinkOwner));
        }
        if db.share_links.iter().any(|l| l.hash == data.hash) {
            return Err(StoreError::Conflict(UniqueKey::ShareLinkHash));
        }

        let link = ShareLink {
            id: Uuid::new_v4(),
            hash: data.hash,
            user_id: data.user_id,
            created_at: Utc::now(),
        };
        db.share_links.push(link.clone());

        Ok(link)
    }

    async fn find_share_link_by_user(&self, user_id: Uuid) -> StoreResult<Option<ShareLink>> {
        let db = self.inner.read().await;
        Ok(db.share_links.iter().find(|l| l.user_id == user_id).cloned())
    }

    async fn find_share_link_by_hash(&self, hash: &str) -> StoreResult<Option<ShareLink>> {
        let db = self.inner.read().await;
        Ok(db.share_links.iter().find(|l| l.hash == hash).cloned())
    }

    async fn delete_share_link_by_user(&self, user_id: Uuid) -> StoreResult<bool> {
        let mut db = self.inner.write().await;

        let before = db.share_links.len();
        db.share_links.retain(|l| l.user_id != user_id);

        Ok(db.share_links.len() < before)
    }

    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }
}
