use serde::Serialize;
use sqlx::PgPool;

use crate::database::manager::{DatabaseError, DatabaseManager};

/// Dashboard counters. Each aggregate is computed independently; any failure
/// fails the whole response (no partial results).
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlatformStats {
    pub students: i64,
    pub instructors: i64,
    pub assignments: i64,
    pub partners: i64,
}

pub struct StatsStore {
    pool: PgPool,
}

impl StatsStore {
    pub async fn new() -> Result<Self, DatabaseError> {
        Ok(Self {
            pool: DatabaseManager::pool().await?,
        })
    }

    pub async fn gather(&self, partners: i64) -> Result<PlatformStats, DatabaseError> {
        let students: i64 =
            sqlx::query_scalar("SELECT COUNT(DISTINCT student_email) FROM submissions")
                .fetch_one(&self.pool)
                .await?;

        let instructors: i64 =
            sqlx::query_scalar("SELECT COUNT(DISTINCT creator_email) FROM assignments")
                .fetch_one(&self.pool)
                .await?;

        let assignments: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM assignments")
            .fetch_one(&self.pool)
            .await?;

        Ok(PlatformStats {
            students,
            instructors,
            assignments,
            partners,
        })
    }
}
