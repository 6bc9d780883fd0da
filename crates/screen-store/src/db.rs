use anyhow::{Context, Result};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;

#[derive(Clone)]
pub struct ScreenDb {
    pool: SqlitePool,
}

impl ScreenDb {
    /// Open (or create) the database and make sure the schema exists
    pub async fn new(database_url: &str) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(database_url)
            .with_context(|| format!("invalid database url: {}", database_url))?
            .create_if_missing(true);

        // Every connection to an in-memory database is a separate database
        let max_connections = if database_url.contains(":memory:") { 1 } else { 5 };

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await
            .with_context(|| format!("failed to open {}", database_url))?;

        let db = Self { pool };
        db.init_schema().await?;

        tracing::debug!("screen store ready at {}", database_url);
        Ok(db)
    }

    async fn init_schema(&self) -> Result<()> {
        let schema = include_str!("../schema.sql");

        // sqlx runs one statement per query
        for statement in schema.split(';') {
            let stmt = statement.trim();
            if !stmt.is_empty() && !stmt.lines().all(|l| l.trim_start().starts_with("--")) {
                sqlx::query(stmt).execute(&self.pool).await?;
            }
        }

        Ok(())
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}
