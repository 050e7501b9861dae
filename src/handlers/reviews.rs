// handlers/reviews.rs - /reviews route handlers

use axum::extract::Extension;
use axum::Json;
use serde::Deserialize;

use crate::database::models::Review;
use crate::error::ApiError;
use crate::identity::UserContext;
use crate::middleware::response::{ApiResponse, ApiResult};
use crate::stores::reviews::ReviewStore;

/// Review payload. Both fields are required; identity fields come from the
/// verified token, never from the body.
#[derive(Debug, Deserialize)]
pub struct NewReview {
    pub message: Option<String>,
    pub rating: Option<i32>,
}

/// GET /reviews - all reviews, newest first
pub async fn list() -> ApiResult<Vec<Review>> {
    let store = ReviewStore::new().await?;
    let reviews = store.list().await?;

    Ok(ApiResponse::success(reviews))
}

/// POST /reviews - append a review (token)
pub async fn create(
    Extension(user): Extension<UserContext>,
    Json(payload): Json<NewReview>,
) -> ApiResult<Review> {
    let message = payload
        .message
        .filter(|m| !m.trim().is_empty())
        .ok_or_else(|| ApiError::bad_request("message is required"))?;
    let rating = payload
        .rating
        .ok_or_else(|| ApiError::bad_request("rating is required"))?;

    let store = ReviewStore::new().await?;
    let review = store.add(&user, &message, rating).await?;

    Ok(ApiResponse::created(review))
}
