use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A student's attempt at an assignment. The grading fields stay NULL until a
/// peer grades it, at which point all of them are set together with the
/// status flip.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    pub id: Uuid,
    pub assignment_id: Uuid,
    pub student_email: String,
    pub status: String,
    pub obtained_marks: Option<i32>,
    pub feedback: Option<String>,
    pub marked_by: Option<String>,
    pub marked_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// Submission lifecycle. One-way: pending -> completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubmissionStatus {
    Pending,
    Completed,
}

impl SubmissionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubmissionStatus::Pending => "pending",
            SubmissionStatus::Completed => "completed",
        }
    }
}
