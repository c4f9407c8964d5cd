use std::time::Duration;

use anyhow::{Context, Result};
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};
use sqlx::Row;
use tracing::info;

/// Creates the SQLite pool, creating the database file if it does not exist.
///
/// WAL lets readers proceed while a session is being persisted; the busy timeout
/// serializes concurrent writers instead of failing them.
pub async fn create_pool(database_path: &str) -> Result<SqlitePool> {
    info!("Opening SQLite database at {database_path}");

    let options = SqliteConnectOptions::new()
        .filename(database_path)
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(Duration::from_secs(5));

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await
        .context("Failed to connect to SQLite database")?;

    info!("SQLite connection pool established");
    Ok(pool)
}

/// Creates the `interviews` table and applies additive migrations.
/// Never drops or rewrites existing rows.
pub async fn migrate(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS interviews (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            date TEXT,
            resume_snippet TEXT,
            score INTEGER,
            verdict TEXT,
            feedback TEXT,
            chat_history TEXT
        )
        "#,
    )
    .execute(pool)
    .await?;

    // Databases created before transcripts were stored lack `chat_history`.
    let columns: Vec<String> = sqlx::query("PRAGMA table_info(interviews)")
        .fetch_all(pool)
        .await?
        .iter()
        .map(|row| row.try_get::<String, _>("name"))
        .collect::<Result<_, _>>()?;

    if !columns.iter().any(|c| c == "chat_history") {
        sqlx::query("ALTER TABLE interviews ADD COLUMN chat_history TEXT")
            .execute(pool)
            .await?;
        info!("Migrated interviews table: added chat_history column");
    }

    info!("Database migrations completed successfully");
    Ok(())
}
