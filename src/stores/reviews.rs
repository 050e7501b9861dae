use sqlx::PgPool;
use uuid::Uuid;

use crate::database::manager::{DatabaseError, DatabaseManager};
use crate::database::models::Review;
use crate::identity::UserContext;

pub struct ReviewStore {
    pool: PgPool,
}

impl ReviewStore {
    pub async fn new() -> Result<Self, DatabaseError> {
        Ok(Self {
            pool: DatabaseManager::pool().await?,
        })
    }

    /// All reviews, newest first
    pub async fn list(&self) -> Result<Vec<Review>, DatabaseError> {
        let reviews =
            sqlx::query_as::<_, Review>("SELECT * FROM reviews ORDER BY created_at DESC")
                .fetch_all(&self.pool)
                .await?;

        Ok(reviews)
    }

    /// Append-only insert; identity fields come from the verified context
    pub async fn add(
        &self,
        user: &UserContext,
        message: &str,
        rating: i32,
    ) -> Result<Review, DatabaseError> {
        let review = sqlx::query_as::<_, Review>(
            "INSERT INTO reviews (id, user_email, user_name, user_photo, message, rating)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING *",
        )
        .bind(Uuid::new_v4())
        .bind(&user.email)
        .bind(user.display_name())
        .bind(user.photo.as_deref())
        .bind(message)
        .bind(rating)
        .fetch_one(&self.pool)
        .await?;

        Ok(review)
    }
}
