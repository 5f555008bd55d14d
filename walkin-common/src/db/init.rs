//! Database initialization
//!
//! Opens (or creates) the queue database file and applies the schema.
//! Schema application is idempotent: every table uses `CREATE TABLE IF NOT EXISTS`.

use crate::Result;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};
use std::path::Path;
use std::time::Duration;
use tracing::info;

/// Initialize the connection pool and create tables if needed
pub async fn init_database(db_path: &Path, max_connections: u32) -> Result<SqlitePool> {
    let newly_created = !db_path.exists();

    // Create parent directory if it doesn't exist
    if let Some(parent) = db_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    // queue_members.queue_id is never checked against queues.id, so foreign
    // key enforcement (on by default in sqlx) stays off for every connection.
    let options = SqliteConnectOptions::new()
        .filename(db_path)
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(Duration::from_secs(5))
        .foreign_keys(false);

    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections.max(1))
        .connect_with(options)
        .await?;

    if newly_created {
        info!("Initialized new database: {}", db_path.display());
    } else {
        info!("Opened existing database: {}", db_path.display());
    }

    apply_schema(&pool).await?;

    Ok(pool)
}

/// Create all tables and indexes (safe to call repeatedly)
pub async fn apply_schema(pool: &SqlitePool) -> Result<()> {
    create_queues_table(pool).await?;
    create_queue_members_table(pool).await?;
    Ok(())
}

async fn create_queues_table(pool: &SqlitePool) -> Result<()> {
    // NUMERIC affinity keeps whole minutes as integers and fractions as reals
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS queues (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            description TEXT NOT NULL DEFAULT '',
            location TEXT NOT NULL DEFAULT '',
            time_per_person NUMERIC NOT NULL DEFAULT 5
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

async fn create_queue_members_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS queue_members (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            queue_id INTEGER NOT NULL REFERENCES queues(id),
            name TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_queue_members_queue ON queue_members(queue_id, id)",
    )
    .execute(pool)
    .await?;

    Ok(())
}
