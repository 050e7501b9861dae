// handlers/bookmarks.rs - /bookmarks route handlers

use axum::extract::{Extension, Path};
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::database::models::Bookmark;
use crate::error::ApiError;
use crate::identity::UserContext;
use crate::middleware::response::{ApiResponse, ApiResult};
use crate::stores::bookmarks::BookmarkStore;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBookmark {
    pub assignment_id: Option<Uuid>,
}

/// GET /bookmarks - the authenticated user's bookmarks
pub async fn list(Extension(user): Extension<UserContext>) -> ApiResult<Vec<Bookmark>> {
    let store = BookmarkStore::new().await?;
    let bookmarks = store.list(&user.email).await?;

    Ok(ApiResponse::success(bookmarks))
}

/// POST /bookmarks - bookmark an assignment once per user
pub async fn create(
    Extension(user): Extension<UserContext>,
    Json(payload): Json<NewBookmark>,
) -> ApiResult<Bookmark> {
    let assignment_id = payload
        .assignment_id
        .ok_or_else(|| ApiError::bad_request("assignmentId is required"))?;

    let store = BookmarkStore::new().await?;
    if store.exists(&user.email, assignment_id).await? {
        return Err(ApiError::conflict("Assignment already bookmarked"));
    }

    let bookmark = store.add(&user.email, assignment_id).await?;
    Ok(ApiResponse::created(bookmark))
}

/// DELETE /bookmarks/:assignmentId - remove a bookmark; absent pairs are
/// not an error (idempotent delete)
pub async fn remove(
    Extension(user): Extension<UserContext>,
    Path(assignment_id): Path<Uuid>,
) -> ApiResult<Value> {
    let store = BookmarkStore::new().await?;
    let deleted = store.remove(&user.email, assignment_id).await?;

    Ok(ApiResponse::success(json!({ "deletedCount": deleted })))
}
