use serde::Deserialize;
use sqlx::{PgPool, QueryBuilder};
use uuid::Uuid;

use crate::database::manager::{DatabaseError, DatabaseManager};
use crate::database::models::{Submission, SubmissionStatus};

/// New submission payload. The caller must be authenticated; student_email
/// is taken as supplied and not cross-checked against the token.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSubmission {
    pub assignment_id: Uuid,
    pub student_email: String,
}

/// Peer grading payload
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Grade {
    pub obtained_marks: i32,
    pub feedback: String,
    pub marked_by: String,
}

#[derive(Debug, Clone, Default)]
pub struct SubmissionFilter {
    pub student_email: Option<String>,
    pub status: Option<SubmissionStatus>,
}

pub struct SubmissionStore {
    pool: PgPool,
}

impl SubmissionStore {
    pub async fn new() -> Result<Self, DatabaseError> {
        Ok(Self {
            pool: DatabaseManager::pool().await?,
        })
    }

    pub async fn create(&self, new: &NewSubmission) -> Result<Submission, DatabaseError> {
        let submission = sqlx::query_as::<_, Submission>(
            "INSERT INTO submissions (id, assignment_id, student_email, status)
             VALUES ($1, $2, $3, $4)
             RETURNING *",
        )
        .bind(Uuid::new_v4())
        .bind(new.assignment_id)
        .bind(&new.student_email)
        .bind(SubmissionStatus::Pending.as_str())
        .fetch_one(&self.pool)
        .await?;

        Ok(submission)
    }

    /// Filtered listing; both filters optional, AND-combined, newest first
    pub async fn list(&self, filter: &SubmissionFilter) -> Result<Vec<Submission>, DatabaseError> {
        let mut query = QueryBuilder::new("SELECT * FROM submissions WHERE 1=1");

        if let Some(email) = &filter.student_email {
            query.push(" AND student_email = ").push_bind(email);
        }
        if let Some(status) = filter.status {
            query.push(" AND status = ").push_bind(status.as_str());
        }
        query.push(" ORDER BY created_at DESC");

        let submissions = query
            .build_query_as::<Submission>()
            .fetch_all(&self.pool)
            .await?;

        Ok(submissions)
    }

    pub async fn get(&self, id: Uuid) -> Result<Option<Submission>, DatabaseError> {
        let submission =
            sqlx::query_as::<_, Submission>("SELECT * FROM submissions WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(submission)
    }

    /// Apply a grade: one atomic UPDATE sets the grading fields together
    /// with the pending -> completed status flip. Re-grading overwrites the
    /// prior values (last-write-wins, no optimistic lock).
    pub async fn grade(&self, id: Uuid, grade: &Grade) -> Result<Option<Submission>, DatabaseError> {
        let submission = sqlx::query_as::<_, Submission>(
            "UPDATE submissions SET
                obtained_marks = $2,
                feedback = $3,
                marked_by = $4,
                marked_at = now(),
                status = $5
             WHERE id = $1
             RETURNING *",
        )
        .bind(id)
        .bind(grade.obtained_marks)
        .bind(&grade.feedback)
        .bind(&grade.marked_by)
        .bind(SubmissionStatus::Completed.as_str())
        .fetch_optional(&self.pool)
        .await?;

        Ok(submission)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grade_requires_all_fields() {
        let missing_grader = r#"{"obtainedMarks": 55, "feedback": "solid work"}"#;
        assert!(serde_json::from_str::<Grade>(missing_grader).is_err());

        let full = r#"{"obtainedMarks": 55, "feedback": "solid work", "markedBy": "peer@x.com"}"#;
        let grade: Grade = serde_json::from_str(full).unwrap();
        assert_eq!(grade.marked_by, "peer@x.com");
    }
}
