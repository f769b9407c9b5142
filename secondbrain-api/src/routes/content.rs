/// Content endpoints (bearer authenticated)
///
/// # Endpoints
///
/// - `POST /api/v1/content` - Save a content item
/// - `GET /api/v1/content` - List the caller's content
/// - `DELETE /api/v1/content` - Delete one of the caller's items

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
    routes::auth::MessageResponse,
};
use axum::{extract::State, Extension, Json};
use secondbrain_shared::{
    auth::middleware::AuthContext,
    models::content::{ContentType, ContentWithOwner, NewContent},
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Create content request
#[derive(Debug, Deserialize)]
pub struct CreateContentRequest {
    #[serde(rename = "type")]
    pub content_type: ContentType,
    pub link: String,
    pub title: String,
}

/// Create content response
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateContentResponse {
    pub message: String,
    pub content_id: Uuid,
}

/// Delete content request
///
/// The id is kept as a string: a value that is not a UUID simply matches
/// nothing.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteContentRequest {
    pub content_id: String,
}

/// Owner reference embedded in every listed item
#[derive(Debug, Serialize, Deserialize)]
pub struct OwnerRef {
    pub id: Uuid,
    pub username: String,
}

/// One listed content item
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentItem {
    pub id: Uuid,
    #[serde(rename = "type")]
    pub content_type: ContentType,
    pub link: String,
    pub title: String,
    pub tags: Vec<String>,
    pub user_id: OwnerRef,
}

impl From<ContentWithOwner> for ContentItem {
    fn from(item: ContentWithOwner) -> Self {
        let content = item.content;
        Self {
            id: content.id,
            content_type: content.content_type,
            link: content.link,
            title: content.title,
            tags: content.tags,
            user_id: OwnerRef {
                id: content.user_id,
                username: item.owner_username,
            },
        }
    }
}

/// Content listing response
#[derive(Debug, Serialize, Deserialize)]
pub struct ContentListResponse {
    pub content: Vec<ContentItem>,
}

/// Save a content item owned by the caller
///
/// ```text
/// POST /api/v1/content
/// Authorization: Bearer <token>
///
/// { "type": "youtube", "link": "https://youtube.com/watch?v=...", "title": "Talk" }
/// ```
///
/// Tags always start empty.
pub async fn create_content(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Json(req): Json<CreateContentRequest>,
) -> ApiResult<Json<CreateContentResponse>> {
    let content = state
        .store
        .create_content(NewContent {
            content_type: req.content_type,
            link: req.link,
            title: req.title,
            user_id: auth.user_id,
        })
        .await?;

    tracing::info!(
        user_id = %auth.user_id,
        content_id = %content.id,
        content_type = %content.content_type,
        "Content created"
    );

    Ok(Json(CreateContentResponse {
        message: "Content created successfully".to_string(),
        content_id: content.id,
    }))
}

/// List the caller's content, oldest first
pub async fn list_content(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
) -> ApiResult<Json<ContentListResponse>> {
    let content = load_listing(&state, auth.user_id).await?;
    Ok(Json(ContentListResponse { content }))
}

/// Delete a content item the caller owns
///
/// # Errors
///
/// - `403 Forbidden`: No item with that id belongs to the caller
pub async fn delete_content(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Json(req): Json<DeleteContentRequest>,
) -> ApiResult<Json<MessageResponse>> {
    let not_owned = || ApiError::Forbidden("Trying to delete a doc you don't own".to_string());

    let content_id = Uuid::parse_str(req.content_id.trim()).map_err(|_| not_owned())?;

    if !state.store.delete_content(content_id, auth.user_id).await? {
        tracing::debug!(user_id = %auth.user_id, content_id = %content_id, "Delete matched nothing");
        return Err(not_owned());
    }

    tracing::info!(user_id = %auth.user_id, content_id = %content_id, "Content deleted");

    Ok(Json(MessageResponse::new("Content deleted")))
}

/// Loads a user's content in response shape
pub(crate) async fn load_listing(state: &AppState, user_id: Uuid) -> ApiResult<Vec<ContentItem>> {
    Ok(state
        .store
        .list_content_by_owner(user_id)
        .await?
        .into_iter()
        .map(ContentItem::from)
        .collect())
}
