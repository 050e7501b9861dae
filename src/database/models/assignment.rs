use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A task definition posted by an instructor. Ownership is by email match on
/// `creator_email`; there is no structural parent-child link to submissions.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Assignment {
    pub id: Uuid,
    pub title: String,
    pub thumbnail: String,
    pub description: String,
    pub marks: i32,
    pub difficulty: String,
    pub creator_email: String,
    pub created_at: DateTime<Utc>,
}

/// Display-field projection used by the homepage teaser
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentCard {
    pub id: Uuid,
    pub title: String,
    pub thumbnail: String,
    pub marks: i32,
    pub difficulty: String,
}

/// Recognized difficulty tags. Validated at the API boundary; stored as text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_difficulty_accepts_recognized_tags_only() {
        assert_eq!(
            serde_json::from_str::<Difficulty>("\"easy\"").unwrap(),
            Difficulty::Easy
        );
        assert_eq!(
            serde_json::from_str::<Difficulty>("\"hard\"").unwrap(),
            Difficulty::Hard
        );
        assert!(serde_json::from_str::<Difficulty>("\"extreme\"").is_err());
        assert!(serde_json::from_str::<Difficulty>("\"Easy\"").is_err());
    }
}
