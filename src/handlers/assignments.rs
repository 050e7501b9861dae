// handlers/assignments.rs - /assignments route handlers

use axum::extract::{Extension, Path, Query};
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::database::models::{Assignment, AssignmentCard, Difficulty};
use crate::error::ApiError;
use crate::identity::UserContext;
use crate::middleware::guard;
use crate::middleware::response::{ApiResponse, ApiResult};
use crate::stores::assignments::{
    AssignmentFilter, AssignmentPage, AssignmentPatch, AssignmentStore, NewAssignment,
    DEFAULT_PAGE_SIZE,
};

/// Homepage teaser size
const HOME_SAMPLE_SIZE: i64 = 5;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub difficulty: Option<Difficulty>,
    pub search: Option<String>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct OwnerQuery {
    pub email: Option<String>,
}

/// POST /assignments - create an assignment (token + self-match on creatorEmail)
pub async fn create(
    Extension(user): Extension<UserContext>,
    Json(payload): Json<NewAssignment>,
) -> ApiResult<Assignment> {
    guard::ensure_self(Some(&payload.creator_email), &user.email)?;

    if payload.title.trim().is_empty() {
        return Err(ApiError::bad_request("title must not be empty"));
    }
    if payload.marks < 0 {
        return Err(ApiError::bad_request("marks must not be negative"));
    }

    let store = AssignmentStore::new().await?;
    let assignment = store.create(&payload).await?;

    Ok(ApiResponse::created(assignment))
}

/// GET /assignments - paginated, filtered listing
pub async fn list(Query(query): Query<ListQuery>) -> ApiResult<AssignmentPage> {
    let filter = AssignmentFilter {
        difficulty: query.difficulty,
        search: query.search,
    };

    let store = AssignmentStore::new().await?;
    let page = store
        .list(
            &filter,
            query.page.unwrap_or(1),
            query.limit.unwrap_or(DEFAULT_PAGE_SIZE),
        )
        .await?;

    Ok(ApiResponse::success(page))
}

/// GET /assignments/home - random sample for the homepage teaser
pub async fn home() -> ApiResult<Vec<AssignmentCard>> {
    let store = AssignmentStore::new().await?;
    let cards = store.sample_for_home(HOME_SAMPLE_SIZE).await?;

    Ok(ApiResponse::success(cards))
}

/// GET /assignments/:id - fetch one assignment
pub async fn get(Path(id): Path<Uuid>) -> ApiResult<Assignment> {
    let store = AssignmentStore::new().await?;
    let assignment = store
        .get(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Assignment not found"))?;

    Ok(ApiResponse::success(assignment))
}

/// PUT /assignments/:id?email= - update provided fields (token + self-match)
pub async fn update(
    Extension(user): Extension<UserContext>,
    Path(id): Path<Uuid>,
    Query(query): Query<OwnerQuery>,
    Json(patch): Json<AssignmentPatch>,
) -> ApiResult<Assignment> {
    guard::ensure_self(query.email.as_deref(), &user.email)?;

    if let Some(marks) = patch.marks {
        if marks < 0 {
            return Err(ApiError::bad_request("marks must not be negative"));
        }
    }

    let store = AssignmentStore::new().await?;
    let updated = store
        .update(id, &patch)
        .await?
        .ok_or_else(|| ApiError::not_found("Assignment not found"))?;

    Ok(ApiResponse::success(updated))
}

/// DELETE /assignments/:id?email= - delete if the supplied email owns it.
/// The record is loaded first: absent id is NotFound, wrong owner Forbidden.
pub async fn delete(Path(id): Path<Uuid>, Query(query): Query<OwnerQuery>) -> ApiResult<Value> {
    let email = query
        .email
        .ok_or_else(|| ApiError::bad_request("email query parameter is required"))?;

    let store = AssignmentStore::new().await?;
    let assignment = store
        .get(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Assignment not found"))?;

    guard::ensure_owner(&assignment.creator_email, &email)?;

    let deleted = store.delete(id).await?;
    Ok(ApiResponse::success(json!({ "deletedCount": deleted })))
}
