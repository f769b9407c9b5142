/// Content model and database operations
///
/// A content row is one saved bookmark: a kind, a link, a title and a list of
/// free-form tags, owned by exactly one user.
///
/// # Schema
///
/// ```sql
/// CREATE TYPE content_type AS ENUM ('document', 'tweet', 'youtube', 'link');
///
/// CREATE TABLE contents (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     content_type content_type NOT NULL,
///     link TEXT NOT NULL,
///     title TEXT NOT NULL,
///     tags TEXT[] NOT NULL DEFAULT '{}',
///     user_id UUID NOT NULL REFERENCES users (id) ON DELETE CASCADE,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// Kind of saved content
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "content_type", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    Document,
    Tweet,
    Youtube,
    Link,
}

impl ContentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentType::Document => "document",
            ContentType::Tweet => "tweet",
            ContentType::Youtube => "youtube",
            ContentType::Link => "link",
        }
    }
}

impl std::fmt::Display for ContentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A saved content item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Content {
    pub id: Uuid,

    #[serde(rename = "type")]
    pub content_type: ContentType,

    pub link: String,
    pub title: String,

    /// Tags in insertion order
    pub tags: Vec<String>,

    /// Owning user
    pub user_id: Uuid,

    pub created_at: DateTime<Utc>,
}

/// A content item together with its owner's username
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentWithOwner {
    pub content: Content,
    pub owner_username: String,
}

/// Input for creating content
///
/// Tags always start empty.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewContent {
    pub content_type: ContentType,
    pub link: String,
    pub title: String,
    pub user_id: Uuid,
}

#[derive(sqlx::FromRow)]
struct ContentOwnerRow {
    #[sqlx(flatten)]
    content: Content,
    username: String,
}

impl Content {
    /// Inserts a content item with an empty tag list
    pub async fn create(pool: &PgPool, data: NewContent) -> Result<Self, sqlx::Error> {
        let content = sqlx::query_as::<_, Content>(
            r#"
            INSERT INTO contents (content_type, link, title, tags, user_id)
            VALUES ($1, $2, $3, '{}', $4)
            RETURNING id, content_type, link, title, tags, user_id, created_at
            "#,
        )
        .bind(data.content_type)
        .bind(data.link)
        .bind(data.title)
        .bind(data.user_id)
        .fetch_one(pool)
        .await?;

        Ok(content)
    }

    /// Lists a user's content, oldest first, with the owner's username joined in
    pub async fn list_by_owner(
        pool: &PgPool,
        user_id: Uuid,
    ) -> Result<Vec<ContentWithOwner>, sqlx::Error> {
        let rows = sqlx::query_as::<_, ContentOwnerRow>(
            r#"
            SELECT c.id, c.content_type, c.link, c.title, c.tags, c.user_id, c.created_at,
                   u.username
            FROM contents c
            JOIN users u ON u.id = c.user_id
            WHERE c.user_id = $1
            ORDER BY c.created_at ASC, c.id ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| ContentWithOwner {
                content: row.content,
                owner_username: row.username,
            })
            .collect())
    }

    /// Deletes a content item only if `user_id` owns it
    ///
    /// Returns true if a row was deleted.
    pub async fn delete_owned(pool: &PgPool, id: Uuid, user_id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM contents WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
