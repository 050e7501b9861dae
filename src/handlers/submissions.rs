// handlers/submissions.rs - /submissions route handlers

use axum::extract::{Extension, Path, Query};
use axum::Json;
use serde::Deserialize;
use uuid::Uuid;

use crate::database::models::{Submission, SubmissionStatus};
use crate::error::ApiError;
use crate::identity::UserContext;
use crate::middleware::guard;
use crate::middleware::response::{ApiResponse, ApiResult};
use crate::stores::submissions::{Grade, NewSubmission, SubmissionFilter, SubmissionStore};

#[derive(Debug, Deserialize)]
pub struct SubmissionListQuery {
    pub email: Option<String>,
    pub status: Option<SubmissionStatus>,
}

/// GET /submissions?email=&status= - filtered listing (token; the email
/// filter must self-match the authenticated user)
pub async fn list(
    Extension(user): Extension<UserContext>,
    Query(query): Query<SubmissionListQuery>,
) -> ApiResult<Vec<Submission>> {
    guard::ensure_self(query.email.as_deref(), &user.email)?;

    let store = SubmissionStore::new().await?;
    let submissions = store
        .list(&SubmissionFilter {
            student_email: query.email,
            status: query.status,
        })
        .await?;

    Ok(ApiResponse::success(submissions))
}

/// POST /submissions - create a submission (token required; studentEmail is
/// stored as supplied, not matched against the token)
pub async fn create(
    Extension(_user): Extension<UserContext>,
    Json(payload): Json<NewSubmission>,
) -> ApiResult<Submission> {
    if payload.student_email.trim().is_empty() {
        return Err(ApiError::bad_request("studentEmail must not be empty"));
    }

    let store = SubmissionStore::new().await?;
    let submission = store.create(&payload).await?;

    Ok(ApiResponse::created(submission))
}

/// PATCH /submissions/:id - peer grading. Self-grading is forbidden; a valid
/// grade sets the grading fields and flips status to completed atomically.
pub async fn grade(Path(id): Path<Uuid>, Json(grade): Json<Grade>) -> ApiResult<Submission> {
    if grade.marked_by.trim().is_empty() {
        return Err(ApiError::bad_request("markedBy must not be empty"));
    }

    let store = SubmissionStore::new().await?;
    let submission = store
        .get(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Submission not found"))?;

    if submission.student_email == grade.marked_by {
        return Err(ApiError::forbidden(
            "Students cannot grade their own submission",
        ));
    }

    let graded = store
        .grade(id, &grade)
        .await?
        .ok_or_else(|| ApiError::not_found("Submission not found"))?;

    Ok(ApiResponse::success(graded))
}
