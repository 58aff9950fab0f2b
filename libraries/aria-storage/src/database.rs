/// Database connection management
use crate::error::{Result, StorageError};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;

/// `SQLite` database holding playback state and settings
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Create a new database connection
    ///
    /// # Errors
    /// Returns an error if the connection fails or migrations fail
    pub async fn new(database_url: &str) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await?;

        // Run migrations manually for reliability across different execution contexts
        Self::run_migrations(&pool).await?;

        Ok(Self { pool })
    }

    /// Create an in-memory database (for testing)
    ///
    /// Limited to a single connection: every pooled connection to
    /// `sqlite::memory:` opens its own empty database.
    ///
    /// # Errors
    /// Returns an error if the connection fails or migrations fail
    pub async fn in_memory() -> Result<Self> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?;

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            // No liveness ping on acquire: the ping parks the runtime, and
            // under a paused tokio clock (test-util) that park auto-advances
            // time straight through the acquire timeout.
            .test_before_acquire(false)
            .connect_with(options)
            .await?;

        Self::run_migrations(&pool).await?;

        Ok(Self { pool })
    }

    /// Get a reference to the underlying pool
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Run database migrations
    async fn run_migrations(pool: &SqlitePool) -> Result<()> {
        // Embedded migrations for reliability
        const MIGRATIONS: &[&str] = &[
            include_str!("../migrations/20250612000001_create_playback_state.sql"),
            include_str!("../migrations/20250612000002_create_settings.sql"),
        ];

        for migration in MIGRATIONS {
            sqlx::query(migration)
                .execute(pool)
                .await
                .map_err(|e| StorageError::Migration(e.to_string()))?;
        }

        Ok(())
    }
}
