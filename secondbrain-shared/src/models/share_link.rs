/// Share link model and database operations
///
/// A share link publishes one user's content read-only under a short random
/// hash. Each user has at most one link; disabling sharing deletes it.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE share_links (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     hash VARCHAR(32) NOT NULL,
///     user_id UUID NOT NULL REFERENCES users (id) ON DELETE CASCADE,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     CONSTRAINT share_links_hash_key UNIQUE (hash),
///     CONSTRAINT share_links_user_id_key UNIQUE (user_id)
/// );
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// Unique constraint on `share_links.user_id`
pub const OWNER_CONSTRAINT: &str = "share_links_user_id_key";

/// Unique constraint on `share_links.hash`
pub const HASH_CONSTRAINT: &str = "share_links_hash_key";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct ShareLink {
    pub id: Uuid,

    /// Public token used in `/brain/:shareLink`
    pub hash: String,

    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewShareLink {
    pub hash: String,
    pub user_id: Uuid,
}

impl ShareLink {
    /// Inserts a share link
    ///
    /// # Errors
    ///
    /// Fails with a database error naming [`OWNER_CONSTRAINT`] if the user
    /// already has a link, or [`HASH_CONSTRAINT`] if the hash is taken.
    pub async fn create(pool: &PgPool, data: NewShareLink) -> Result<Self, sqlx::Error> {
        let link = sqlx::query_as::<_, ShareLink>(
            r#"
            INSERT INTO share_links (hash, user_id)
            VALUES ($1, $2)
            RETURNING id, hash, user_id, created_at
            "#,
        )
        .bind(data.hash)
        .bind(data.user_id)
        .fetch_one(pool)
        .await?;

        Ok(link)
    }

    pub async fn find_by_user(pool: &PgPool, user_id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, ShareLink>(
            "SELECT id, hash, user_id, created_at FROM share_links WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_optional(pool)
        .await
    }

    pub async fn find_by_hash(pool: &PgPool, hash: &str) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, ShareLink>(
            "SELECT id, hash, user_id, created_at FROM share_links WHERE hash = $1",
        )
        .bind(hash)
        .fetch_optional(pool)
        .await
    }

    /// Deletes the user's link, returning true if one existed
    pub async fn delete_by_user(pool: &PgPool, user_id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM share_links WHERE user_id = $1")
            .bind(user_id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
