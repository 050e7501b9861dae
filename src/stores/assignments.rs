use serde::{Deserialize, Serialize};
use sqlx::{PgPool, QueryBuilder};
use uuid::Uuid;

use crate::database::manager::{DatabaseError, DatabaseManager};
use crate::database::models::{Assignment, AssignmentCard, Difficulty};

/// New assignment payload. Difficulty is validated by serde against the
/// recognized tags before it ever reaches the store.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAssignment {
    pub title: String,
    pub thumbnail: String,
    pub description: String,
    pub marks: i32,
    pub difficulty: Difficulty,
    pub creator_email: String,
}

/// Partial update of an assignment; absent fields keep their stored value
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentPatch {
    pub title: Option<String>,
    pub thumbnail: Option<String>,
    pub description: Option<String>,
    pub marks: Option<i32>,
    pub difficulty: Option<Difficulty>,
}

#[derive(Debug, Clone, Default)]
pub struct AssignmentFilter {
    pub difficulty: Option<Difficulty>,
    pub search: Option<String>,
}

/// One page of assignments plus the counts the client needs for paging
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentPage {
    pub items: Vec<Assignment>,
    pub total: i64,
    pub page: i64,
    pub limit: i64,
    pub total_pages: i64,
}

pub const DEFAULT_PAGE_SIZE: i64 = 10;
const MAX_PAGE_SIZE: i64 = 100;

/// total_pages = ceil(total / limit)
pub fn page_count(total: i64, limit: i64) -> i64 {
    if limit <= 0 {
        return 0;
    }
    (total + limit - 1) / limit
}

pub struct AssignmentStore {
    pool: PgPool,
}

impl AssignmentStore {
    pub async fn new() -> Result<Self, DatabaseError> {
        Ok(Self {
            pool: DatabaseManager::pool().await?,
        })
    }

    pub async fn create(&self, new: &NewAssignment) -> Result<Assignment, DatabaseError> {
        let assignment = sqlx::query_as::<_, Assignment>(
            "INSERT INTO assignments (id, title, thumbnail, description, marks, difficulty, creator_email)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING *",
        )
        .bind(Uuid::new_v4())
        .bind(&new.title)
        .bind(&new.thumbnail)
        .bind(&new.description)
        .bind(new.marks)
        .bind(new.difficulty.as_str())
        .bind(&new.creator_email)
        .fetch_one(&self.pool)
        .await?;

        Ok(assignment)
    }

    /// Paginated, filtered listing: exact difficulty match AND
    /// case-insensitive substring match on title, newest first
    pub async fn list(
        &self,
        filter: &AssignmentFilter,
        page: i64,
        limit: i64,
    ) -> Result<AssignmentPage, DatabaseError> {
        let page = page.max(1);
        let limit = limit.clamp(1, MAX_PAGE_SIZE);
        let offset = (page - 1) * limit;

        let mut count_query = QueryBuilder::new("SELECT COUNT(*) FROM assignments WHERE 1=1");
        push_filter(&mut count_query, filter);
        let total: i64 = count_query
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await?;

        let mut page_query = QueryBuilder::new("SELECT * FROM assignments WHERE 1=1");
        push_filter(&mut page_query, filter);
        page_query
            .push(" ORDER BY created_at DESC LIMIT ")
            .push_bind(limit)
            .push(" OFFSET ")
            .push_bind(offset);

        let items = page_query
            .build_query_as::<Assignment>()
            .fetch_all(&self.pool)
            .await?;

        Ok(AssignmentPage {
            items,
            total,
            page,
            limit,
            total_pages: page_count(total, limit),
        })
    }

    /// Uniformly-random distinct records for the homepage teaser, projected
    /// to display fields. Sampling is the store's own, not reimplemented.
    pub async fn sample_for_home(&self, n: i64) -> Result<Vec<AssignmentCard>, DatabaseError> {
        let cards = sqlx::query_as::<_, AssignmentCard>(
            "SELECT id, title, thumbnail, marks, difficulty
             FROM assignments
             ORDER BY random()
             LIMIT $1",
        )
        .bind(n)
        .fetch_all(&self.pool)
        .await?;

        Ok(cards)
    }

    pub async fn get(&self, id: Uuid) -> Result<Option<Assignment>, DatabaseError> {
        let assignment =
            sqlx::query_as::<_, Assignment>("SELECT * FROM assignments WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(assignment)
    }

    /// Update provided fields of an existing assignment. Returns None when
    /// the id does not exist; a missing id is never created here.
    pub async fn update(
        &self,
        id: Uuid,
        patch: &AssignmentPatch,
    ) -> Result<Option<Assignment>, DatabaseError> {
        let assignment = sqlx::query_as::<_, Assignment>(
            "UPDATE assignments SET
                title = COALESCE($2, title),
                thumbnail = COALESCE($3, thumbnail),
                description = COALESCE($4, description),
                marks = COALESCE($5, marks),
                difficulty = COALESCE($6, difficulty)
             WHERE id = $1
             RETURNING *",
        )
        .bind(id)
        .bind(patch.title.as_deref())
        .bind(patch.thumbnail.as_deref())
        .bind(patch.description.as_deref())
        .bind(patch.marks)
        .bind(patch.difficulty.map(|d| d.as_str()))
        .fetch_optional(&self.pool)
        .await?;

        Ok(assignment)
    }

    pub async fn delete(&self, id: Uuid) -> Result<u64, DatabaseError> {
        let result = sqlx::query("DELETE FROM assignments WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}

fn push_filter(query: &mut QueryBuilder<'_, sqlx::Postgres>, filter: &AssignmentFilter) {
    if let Some(difficulty) = filter.difficulty {
        query.push(" AND difficulty = ").push_bind(difficulty.as_str());
    }
    if let Some(search) = &filter.search {
        query
            .push(" AND title ILIKE ")
            .push_bind(format!("%{}%", search));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_count_rounds_up() {
        assert_eq!(page_count(0, 5), 0);
        assert_eq!(page_count(1, 5), 1);
        assert_eq!(page_count(5, 5), 1);
        assert_eq!(page_count(6, 5), 2);
        assert_eq!(page_count(11, 5), 3);
    }

    #[test]
    fn test_page_count_guards_nonpositive_limit() {
        assert_eq!(page_count(10, 0), 0);
        assert_eq!(page_count(10, -1), 0);
    }

    #[test]
    fn test_new_assignment_rejects_unknown_difficulty() {
        let body = r#"{
            "title": "Graph traversal",
            "thumbnail": "https://img.example.com/g.png",
            "description": "BFS and DFS drills",
            "marks": 60,
            "difficulty": "impossible",
            "creatorEmail": "teacher@x.com"
        }"#;
        assert!(serde_json::from_str::<NewAssignment>(body).is_err());
    }

    #[test]
    fn test_new_assignment_parses_camel_case() {
        let body = r#"{
            "title": "Graph traversal",
            "thumbnail": "https://img.example.com/g.png",
            "description": "BFS and DFS drills",
            "marks": 60,
            "difficulty": "medium",
            "creatorEmail": "teacher@x.com"
        }"#;
        let new: NewAssignment = serde_json::from_str(body).unwrap();
        assert_eq!(new.creator_email, "teacher@x.com");
        assert_eq!(new.difficulty, Difficulty::Medium);
    }
}
