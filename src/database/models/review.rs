use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Append-only platform review. Identity fields are derived from the
/// authenticated user context, never from the request body.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: Uuid,
    pub user_email: String,
    pub user_name: String,
    pub user_photo: Option<String>,
    pub message: String,
    pub rating: i32,
    pub created_at: DateTime<Utc>,
}
