use sqlx::PgPool;
use uuid::Uuid;

use crate::database::manager::{DatabaseError, DatabaseManager};
use crate::database::models::Bookmark;

pub struct BookmarkStore {
    pool: PgPool,
}

impl BookmarkStore {
    pub async fn new() -> Result<Self, DatabaseError> {
        Ok(Self {
            pool: DatabaseManager::pool().await?,
        })
    }

    pub async fn exists(&self, user_email: &str, assignment_id: Uuid) -> Result<bool, DatabaseError> {
        let found: Option<Uuid> = sqlx::query_scalar(
            "SELECT id FROM bookmarks WHERE user_email = $1 AND assignment_id = $2",
        )
        .bind(user_email)
        .bind(assignment_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(found.is_some())
    }

    /// Insert a bookmark. The unique index on (user_email, assignment_id)
    /// backstops the handler's existence check under concurrent requests.
    pub async fn add(&self, user_email: &str, assignment_id: Uuid) -> Result<Bookmark, DatabaseError> {
        let bookmark = sqlx::query_as::<_, Bookmark>(
            "INSERT INTO bookmarks (id, user_email, assignment_id)
             VALUES ($1, $2, $3)
             RETURNING *",
        )
        .bind(Uuid::new_v4())
        .bind(user_email)
        .bind(assignment_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(bookmark)
    }

    /// All bookmarks of one user, newest first
    pub async fn list(&self, user_email: &str) -> Result<Vec<Bookmark>, DatabaseError> {
        let bookmarks = sqlx::query_as::<_, Bookmark>(
            "SELECT * FROM bookmarks WHERE user_email = $1 ORDER BY created_at DESC",
        )
        .bind(user_email)
        .fetch_all(&self.pool)
        .await?;

        Ok(bookmarks)
    }

    /// Idempotent delete: removing an absent pair is not an error
    pub async fn remove(&self, user_email: &str, assignment_id: Uuid) -> Result<u64, DatabaseError> {
        let result = sqlx::query(
            "DELETE FROM bookmarks WHERE user_email = $1 AND assignment_id = $2",
        )
        .bind(user_email)
        .bind(assignment_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }
}
