/// Share-link endpoints
///
/// A user publishes their whole collection read-only under a short random
/// hash. At most one link exists per user.
///
/// # Endpoints
///
/// - `POST /api/v1/brain/share` - Enable or disable sharing (bearer)
/// - `GET /api/v1/brain/:shareLink` - Public view of a shared collection

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
    routes::content::{load_listing, ContentItem},
};
use axum::{
    extract::{Path, State},
    Extension, Json,
};
use secondbrain_shared::{
    auth::middleware::AuthContext,
    models::share_link::NewShareLink,
    share_token::{generate, SHARE_HASH_LENGTH},
    store::{StoreError, UniqueKey},
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// How many fresh hashes to try before giving up on a collision streak
pub const MAX_HASH_ATTEMPTS: usize = 3;

/// Share toggle request
#[derive(Debug, Deserialize)]
pub struct ShareRequest {
    pub share: bool,
}

/// Share toggle response
///
/// `link` is present only when a link was created.
#[derive(Debug, Serialize, Deserialize)]
pub struct ShareResponse {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

/// Public view of a shared collection
#[derive(Debug, Serialize, Deserialize)]
pub struct SharedBrainResponse {
    pub username: String,
    pub content: Vec<ContentItem>,
}

/// Enable or disable the caller's share link
///
/// ```text
/// POST /api/v1/brain/share
/// Authorization: Bearer <token>
///
/// { "share": true }
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: Sharing is already enabled; the body carries the existing `link`
pub async fn share_brain(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Json(req): Json<ShareRequest>,
) -> ApiResult<Json<ShareResponse>> {
    if !req.share {
        let removed = state.store.delete_share_link_by_user(auth.user_id).await?;
        tracing::info!(user_id = %auth.user_id, removed, "Share link disabled");

        return Ok(Json(ShareResponse {
            message: "Link deleted".to_string(),
            link: None,
        }));
    }

    if let Some(existing) = state.store.find_share_link_by_user(auth.user_id).await? {
        return Err(ApiError::LinkExists { link: existing.hash });
    }

    let hash = create_link(&state, auth.user_id).await?;
    tracing::info!(user_id = %auth.user_id, "Share link created");

    Ok(Json(ShareResponse {
        message: "Link Created".to_string(),
        link: Some(hash),
    }))
}

/// Inserts a new link, regenerating the hash on collision
async fn create_link(state: &AppState, user_id: Uuid) -> ApiResult<String> {
    for attempt in 1..=MAX_HASH_ATTEMPTS {
        let hash = generate(SHARE_HASH_LENGTH);

        match state
            .store
            .create_share_link(NewShareLink { hash, user_id })
            .await
        {
            Ok(link) => return Ok(link.hash),
            Err(StoreError::Conflict(UniqueKey::ShareLinkHash)) => {
                tracing::warn!(attempt, "Share hash collision, regenerating");
            }
            Err(StoreError::Conflict(UniqueKey::ShareLinkOwner)) => {
                // A concurrent request created the link first
                return match state.store.find_share_link_by_user(user_id).await? {
                    Some(existing) => Err(ApiError::LinkExists { link: existing.hash }),
                    None => Err(ApiError::InternalError(
                        "Share link vanished after owner conflict".to_string(),
                    )),
                };
            }
            Err(e) => return Err(e.into()),
        }
    }

    Err(ApiError::InternalError(format!(
        "No unique share hash after {} attempts",
        MAX_HASH_ATTEMPTS
    )))
}

/// Resolve a share hash to its owner's collection
///
/// ```text
/// GET /api/v1/brain/8fk2mq0zpa
/// ```
///
/// # Errors
///
/// - `404 Not Found`: Unknown hash, or the owner no longer exists
pub async fn view_shared_brain(
    State(state): State<AppState>,
    Path(share_link): Path<String>,
) -> ApiResult<Json<SharedBrainResponse>> {
    let link = state
        .store
        .find_share_link_by_hash(&share_link)
        .await?
        .ok_or_else(|| ApiError::NotFound("Link not found".to_string()))?;

    let owner = state
        .store
        .find_user_by_id(link.user_id)
        .await?
        .ok_or_else(|| {
            tracing::warn!(user_id = %link.user_id, "Share link points at a missing user");
            ApiError::NotFound("User not found".to_string())
        })?;

    let content = load_listing(&state, owner.id).await?;

    Ok(Json(SharedBrainResponse {
        username: owner.username,
        content,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ApiConfig, Config, DatabaseConfig, JwtConfig, LISTEN_PORT};
    use async_trait::async_trait;
    use secondbrain_shared::{
        models::{
            content::{Content, ContentWithOwner, NewContent},
            share_link::ShareLink,
            user::{NewUser, User},
        },
        store::{BrainStore, MemoryStore, StoreResult},
    };
    use std::sync::{
        atomic::{AtomicBool, AtomicUsize, Ordering},
        Arc,
    };

    const WINNER_HASH: &str = "winner0000";

    /// In-memory store that can be told to fail share-link inserts
    #[derive(Default)]
    struct ScriptedStore {
        inner: MemoryStore,
        /// Remaining inserts that report a hash collision
        hash_conflicts: AtomicUsize,
        /// Next insert loses a race against a concurrent insert for the same user
        owner_race: AtomicBool,
        share_inserts: AtomicUsize,
    }

    #[async_trait]
    impl BrainStore for ScriptedStore {
        async fn create_user(&self, data: NewUser) -> StoreResult<User> {
            self.inner.create_user(data).await
        }

        async fn find_user_by_id(&self, id: Uuid) -> StoreResult<Option<User>> {
            self.inner.find_user_by_id(id).await
        }

        async fn find_user_by_email(&self, email: &str) -> StoreResult<Option<User>> {
            self.inner.find_user_by_email(email).await
        }

        async fn create_content(&self, data: NewContent) -> StoreResult<Content> {
            self.inner.create_content(data).await
        }

        async fn list_content_by_owner(&self, user_id: Uuid) -> StoreResult<Vec<ContentWithOwner>> {
            self.inner.list_content_by_owner(user_id).await
        }

        async fn delete_content(&self, id: Uuid, user_id: Uuid) -> StoreResult<bool> {
            self.inner.delete_content(id, user_id).await
        }

        async fn create_share_link(&self, data: NewShareLink) -> StoreResult<ShareLink> {
            self.share_inserts.fetch_add(1, Ordering::SeqCst);

            if self.owner_race.swap(false, Ordering::SeqCst) {
                self.inner
                    .create_share_link(NewShareLink {
                        hash: WINNER_HASH.to_string(),
                        user_id: data.user_id,
                    })
                    .await?;
                return Err(StoreError::Conflict(UniqueKey::ShareLinkOwner));
            }

            let remaining = self.hash_conflicts.load(Ordering::SeqCst);
            if remaining > 0 {
                self.hash_conflicts.store(remaining - 1, Ordering::SeqCst);
                return Err(StoreError::Conflict(UniqueKey::ShareLinkHash));
            }

            self.inner.create_share_link(data).await
        }

        async fn find_share_link_by_user(&self, user_id: Uuid) -> StoreResult<Option<ShareLink>> {
            self.inner.find_share_link_by_user(user_id).await
        }

        async fn find_share_link_by_hash(&self, hash: &str) -> StoreResult<Option<ShareLink>> {
            self.inner.find_share_link_by_hash(hash).await
        }

        async fn delete_share_link_by_user(&self, user_id: Uuid) -> StoreResult<bool> {
            self.inner.delete_share_link_by_user(user_id).await
        }

        async fn ping(&self) -> StoreResult<()> {
            Ok(())
        }
    }

    fn test_state(store: Arc<dyn BrainStore>) -> AppState {
        AppState::new(
            store,
            Config {
                api: ApiConfig {
                    host: "127.0.0.1".to_string(),
                    port: LISTEN_PORT,
                    cors_origins: vec!["*".to_string()],
                },
                database: DatabaseConfig {
                    url: "postgresql://unused".to_string(),
                    max_connections: 1,
                },
                jwt: JwtConfig {
                    secret: "test-secret-key-at-least-32-bytes-long".to_string(),
                    expiration_hours: None,
                },
            },
        )
    }

    async fn enable(state: &AppState, user_id: Uuid) -> ApiResult<Json<ShareResponse>> {
        share_brain(
            State(state.clone()),
            Extension(AuthContext::new(user_id)),
            Json(ShareRequest { share: true }),
        )
        .await
    }

    #[tokio::test]
    async fn test_hash_collision_is_retried() {
        let store = Arc::new(ScriptedStore::default());
        store.hash_conflicts.store(MAX_HASH_ATTEMPTS - 1, Ordering::SeqCst);
        let state = test_state(store.clone());
        let user_id = Uuid::new_v4();

        let Json(response) = enable(&state, user_id).await.unwrap();

        let hash = response.link.unwrap();
        assert_eq!(hash.len(), SHARE_HASH_LENGTH);
        assert_eq!(store.share_inserts.load(Ordering::SeqCst), MAX_HASH_ATTEMPTS);

        let stored = store.find_share_link_by_user(user_id).await.unwrap().unwrap();
        assert_eq!(stored.hash, hash);
    }

    #[tokio::test]
    async fn test_persistent_hash_collision_gives_up() {
        let store = Arc::new(ScriptedStore::default());
        store.hash_conflicts.store(usize::MAX, Ordering::SeqCst);
        let state = test_state(store.clone());
        let user_id = Uuid::new_v4();

        let err = enable(&state, user_id).await.unwrap_err();

        assert!(matches!(err, ApiError::InternalError(_)));
        assert_eq!(store.share_inserts.load(Ordering::SeqCst), MAX_HASH_ATTEMPTS);
        assert!(store.find_share_link_by_user(user_id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_lost_owner_race_returns_existing_link() {
        let store = Arc::new(ScriptedStore::default());
        store.owner_race.store(true, Ordering::SeqCst);
        let state = test_state(store.clone());

        let err = enable(&state, Uuid::new_v4()).await.unwrap_err();

        assert!(matches!(err, ApiError::LinkExists { ref link } if link == WINNER_HASH));
        assert_eq!(store.share_inserts.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_share_view_with_missing_owner_is_not_found() {
        let store = Arc::new(MemoryStore::new());
        store
            .create_share_link(NewShareLink {
                hash: "orphan0000".to_string(),
                user_id: Uuid::new_v4(),
            })
            .await
            .unwrap();
        let state = test_state(store);

        let err = view_shared_brain(State(state), Path("orphan0000".to_string()))
            .await
            .unwrap_err();

        assert!(matches!(err, ApiError::NotFound(ref m) if m == "User not found"));
    }

    #[tokio::test]
    async fn test_share_view_unknown_hash_is_not_found() {
        let state = test_state(Arc::new(MemoryStore::new()));

        let err = view_shared_brain(State(state), Path("missing000".to_string()))
            .await
            .unwrap_err();

        assert!(matches!(err, ApiError::NotFound(ref m) if m == "Link not found"));
    }
}
