use std::sync::OnceLock;
use std::time::Duration;

use sqlx::{postgres::PgPoolOptions, PgPool};
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::info;

/// Errors from DatabaseManager
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Missing configuration: {0}")]
    ConfigMissing(&'static str),

    #[error("Invalid database URL")]
    InvalidDatabaseUrl,

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Query error: {0}")]
    QueryError(String),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

/// Process-wide connection pool for the shared store.
///
/// Every request handler borrows the same pool; there are no per-request
/// transactions, so each operation must stand alone.
pub struct DatabaseManager {
    pool: RwLock<Option<PgPool>>,
}

impl DatabaseManager {
    fn instance() -> &'static DatabaseManager {
        static INSTANCE: OnceLock<DatabaseManager> = OnceLock::new();
        INSTANCE.get_or_init(|| DatabaseManager {
            pool: RwLock::new(None),
        })
    }

    /// Get the shared pool, creating it lazily on first use
    pub async fn pool() -> Result<PgPool, DatabaseError> {
        Self::instance().get_pool().await
    }

    async fn get_pool(&self) -> Result<PgPool, DatabaseError> {
        // Fast path: try read lock
        {
            let pool = self.pool.read().await;
            if let Some(pool) = pool.as_ref() {
                return Ok(pool.clone());
            }
        }

        let connection_string = Self::build_connection_string()?;
        let db_config = &crate::config::config().database;

        let pool = PgPoolOptions::new()
            .max_connections(db_config.max_connections)
            .acquire_timeout(Duration::from_secs(db_config.connect_timeout_secs))
            .connect(&connection_string)
            .await?;

        let mut slot = self.pool.write().await;
        // Another request may have raced us here; keep the first pool
        if let Some(existing) = slot.as_ref() {
            pool.close().await;
            return Ok(existing.clone());
        }
        *slot = Some(pool.clone());

        info!("Created shared database pool");
        Ok(pool)
    }

    fn build_connection_string() -> Result<String, DatabaseError> {
        let base = std::env::var("DATABASE_URL")
            .map_err(|_| DatabaseError::ConfigMissing("DATABASE_URL"))?;

        // Parse up front so a malformed URL fails here, not deep inside sqlx
        let url = url::Url::parse(&base).map_err(|_| DatabaseError::InvalidDatabaseUrl)?;
        Ok(String::from(url))
    }

    /// Pings the pool to ensure connectivity
    pub async fn health_check() -> Result<(), DatabaseError> {
        let pool = Self::pool().await?;
        sqlx::query("SELECT 1").execute(&pool).await?;
        Ok(())
    }

    /// Create tables and indexes if they do not exist yet. Idempotent, run
    /// once at startup against the shared pool.
    pub async fn ensure_schema() -> Result<(), DatabaseError> {
        let pool = Self::pool().await?;

        for statement in SCHEMA_DDL {
            sqlx::query(statement).execute(&pool).await?;
        }

        info!("Store schema ensured");
        Ok(())
    }

    /// Close the shared pool. Called once during graceful shutdown.
    pub async fn close() {
        let mut slot = Self::instance().pool.write().await;
        if let Some(pool) = slot.take() {
            pool.close().await;
            info!("Closed shared database pool");
        }
    }
}

const SCHEMA_DDL: &[&str] = &[
    "CREATE TABLE IF NOT EXISTS assignments (
        id UUID PRIMARY KEY,
        title TEXT NOT NULL,
        thumbnail TEXT NOT NULL,
        description TEXT NOT NULL,
        marks INTEGER NOT NULL,
        difficulty TEXT NOT NULL,
        creator_email TEXT NOT NULL,
        created_at TIMESTAMPTZ NOT NULL DEFAULT now()
    )",
    "CREATE TABLE IF NOT EXISTS submissions (
        id UUID PRIMARY KEY,
        assignment_id UUID NOT NULL,
        student_email TEXT NOT NULL,
        status TEXT NOT NULL DEFAULT 'pending',
        obtained_marks INTEGER,
        feedback TEXT,
        marked_by TEXT,
        marked_at TIMESTAMPTZ,
        created_at TIMESTAMPTZ NOT NULL DEFAULT now()
    )",
    "CREATE TABLE IF NOT EXISTS reviews (
        id UUID PRIMARY KEY,
        user_email TEXT NOT NULL,
        user_name TEXT NOT NULL,
        user_photo TEXT,
        message TEXT NOT NULL,
        rating INTEGER NOT NULL,
        created_at TIMESTAMPTZ NOT NULL DEFAULT now()
    )",
    "CREATE TABLE IF NOT EXISTS bookmarks (
        id UUID PRIMARY KEY,
        user_email TEXT NOT NULL,
        assignment_id UUID NOT NULL,
        created_at TIMESTAMPTZ NOT NULL DEFAULT now()
    )",
    // No foreign keys: deleting an assignment intentionally leaves its
    // submissions and bookmarks in place
    "CREATE UNIQUE INDEX IF NOT EXISTS bookmarks_user_assignment_idx
        ON bookmarks (user_email, assignment_id)",
    "CREATE INDEX IF NOT EXISTS submissions_student_email_idx
        ON submissions (student_email)",
    "CREATE INDEX IF NOT EXISTS assignments_creator_email_idx
        ON assignments (creator_email)",
];
