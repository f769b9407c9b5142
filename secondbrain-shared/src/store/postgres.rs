/// PostgreSQL implementation of [`BrainStore`]
///
/// Delegates every operation to the model query functions and translates
/// unique-constraint violations into [`StoreError::Conflict`].

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::debug;
use uuid::Uuid;

use super::{BrainStore, StoreError, StoreResult, UniqueKey};
use crate::{
    db::pool,
    models::{
        content::{Content, ContentWithOwner, NewContent},
        share_link::{self, NewShareLink, ShareLink},
        user::{self, NewUser, User},
    },
};

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Underlying pool, for migrations and shutdown
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

/// Maps a unique-constraint violation to the key it protects
fn map_unique_violation(err: sqlx::Error) -> StoreError {
    let key = match &err {
        sqlx::Error::Database(db_err) => match db_err.constraint() {
            Some(user::EMAIL_CONSTRAINT) => Some(UniqueKey::Email),
            Some(share_link::OWNER_CONSTRAINT) => Some(UniqueKey::ShareLinkOwner),
            Some(share_link::HASH_CONSTRAINT) => Some(UniqueKey::ShareLinkHash),
            _ => None,
        },
        _ => None,
    };

    match key {
        Some(key) => {
            debug!(%key, "Unique constraint violation");
            StoreError::Conflict(key)
        }
        None => StoreError::Database(err),
    }
}

#[async_trait]
impl BrainStore for PgStore {
    async fn create_user(&self, data: NewUser) -> StoreResult<User> {
        User::create(&self.pool, data).await.map_err(map_unique_violation)
    }

    async fn find_user_by_id(&self, id: Uuid) -> StoreResult<Option<User>> {
        Ok(User::find_by_id(&self.pool, id).await?)
    }

    async fn find_user_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        Ok(User::find_by_email(&self.pool, email).await?)
    }

    async fn create_content(&self, data: NewContent) -> StoreResult<Content> {
        Ok(Content::create(&self.pool, data).await?)
    }

    async fn list_content_by_owner(&self, user_id: Uuid) -> StoreResult<Vec<ContentWithOwner>> {
        Ok(Content::list_by_owner(&self.pool, user_id).await?)
    }

    async fn delete_content(&self, id: Uuid, user_id: Uuid) -> StoreResult<bool> {
        Ok(Content::delete_owned(&self.pool, id, user_id).await?)
    }

    async fn create_share_link(&self, data: NewShareLink) -> StoreResult<ShareLink> {
        ShareLink::create(&self.pool, data)
            .await
            .map_err(map_unique_violation)
    }

    async fn find_share_link_by_user(&self, user_id: Uuid) -> StoreResult<Option<ShareLink>> {
        Ok(ShareLink::find_by_user(&self.pool, user_id).await?)
    }

    async fn find_share_link_by_hash(&self, hash: &str) -> StoreResult<Option<ShareLink>> {
        Ok(ShareLink::find_by_hash(&self.pool, hash).await?)
    }

    async fn delete_share_link_by_user(&self, user_id: Uuid) -> StoreResult<bool> {
        Ok(ShareLink::delete_by_user(&self.pool, user_id).await?)
    }

    async fn ping(&self) -> StoreResult<()> {
        Ok(pool::health_check(&self.pool).await?)
    }
}
