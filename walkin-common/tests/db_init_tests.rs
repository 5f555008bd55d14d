//! Integration tests for database initialization
//!
//! Covers schema creation on first run, idempotent re-initialization,
//! column defaults, and the unenforced queue reference on members.

use sqlx::Row;
use walkin_common::db::{init_database, Queue, QueueMember, QUEUE_COLUMNS};

#[tokio::test]
async fn test_database_creation_when_missing() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("nested").join("queues.db");

    let result = init_database(&db_path, 2).await;

    assert!(result.is_ok(), "Database initialization failed: {:?}", result.err());
    assert!(db_path.exists(), "Database file was not created");
}

#[tokio::test]
async fn test_database_opens_existing() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("queues.db");

    let pool1 = init_database(&db_path, 2).await.unwrap();
    sqlx::query("INSERT INTO queues (name) VALUES ('Existing')")
        .execute(&pool1)
        .await
        .unwrap();
    pool1.close().await;

    // Re-applying the schema must not fail or drop data
    let pool2 = init_database(&db_path, 2).await;
    assert!(pool2.is_ok(), "Failed to open existing database: {:?}", pool2.err());

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM queues")
        .fetch_one(&pool2.unwrap())
        .await
        .unwrap();
    assert_eq!(count, 1);
}

#[tokio::test]
async fn test_tables_created() {
    let dir = tempfile::tempdir().unwrap();
    let pool = init_database(&dir.path().join("queues.db"), 2).await.unwrap();

    let tables: Vec<String> = sqlx::query_scalar(
        "SELECT name FROM sqlite_master WHERE type = 'table' AND name IN ('queues', 'queue_members') ORDER BY name",
    )
    .fetch_all(&pool)
    .await
    .unwrap();

    assert_eq!(tables, vec!["queue_members", "queues"]);
}

#[tokio::test]
async fn test_queue_column_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let pool = init_database(&dir.path().join("queues.db"), 2).await.unwrap();

    sqlx::query("INSERT INTO queues (name) VALUES ('Lunch')")
        .execute(&pool)
        .await
        .unwrap();

    let queue: Queue = sqlx::query_as(&format!("SELECT {} FROM queues", QUEUE_COLUMNS))
        .fetch_one(&pool)
        .await
        .unwrap();

    assert_eq!(queue.id, 1);
    assert_eq!(queue.name, "Lunch");
    assert_eq!(queue.description, "");
    assert_eq!(queue.location, "");
    assert_eq!(queue.time_per_person, serde_json::Number::from(5));
}

#[tokio::test]
async fn test_member_queue_reference_not_enforced() {
    let dir = tempfile::tempdir().unwrap();
    let pool = init_database(&dir.path().join("queues.db"), 2).await.unwrap();

    // No queue 42 exists; the orphaned member is still accepted
    sqlx::query("INSERT INTO queue_members (queue_id, name) VALUES (42, 'Ghost')")
        .execute(&pool)
        .await
        .unwrap();

    let member: QueueMember = sqlx::query_as("SELECT id, queue_id, name FROM queue_members")
        .fetch_one(&pool)
        .await
        .unwrap();

    assert_eq!(member.queue_id, 42);
    assert_eq!(member.name, "Ghost");

    let foreign_keys: i64 = sqlx::query("PRAGMA foreign_keys")
        .fetch_one(&pool)
        .await
        .unwrap()
        .get(0);
    assert_eq!(foreign_keys, 0);
}

#[tokio::test]
async fn test_queue_ids_not_reused() {
    let dir = tempfile::tempdir().unwrap();
    let pool = init_database(&dir.path().join("queues.db"), 2).await.unwrap();

    sqlx::query("INSERT INTO queues (name) VALUES ('First')")
        .execute(&pool)
        .await
        .unwrap();
    sqlx::query("DELETE FROM queues").execute(&pool).await.unwrap();

    let id = sqlx::query("INSERT INTO queues (name) VALUES ('Second')")
        .execute(&pool)
        .await
        .unwrap()
        .last_insert_rowid();

    assert_eq!(id, 2, "AUTOINCREMENT must not hand out a deleted id again");
}

#[tokio::test]
async fn test_time_per_person_decoded_by_storage_class() {
    let dir = tempfile::tempdir().unwrap();
    let pool = init_database(&dir.path().join("queues.db"), 2).await.unwrap();

    // 2^53 + 1 has no exact f64 representation
    for minutes in [9_007_199_254_740_993_i64, i64::MAX] {
        sqlx::query("INSERT INTO queues (name, time_per_person) VALUES ('Big', ?)")
            .bind(minutes)
            .execute(&pool)
            .await
            .unwrap();
    }
    sqlx::query("INSERT INTO queues (name, time_per_person) VALUES ('Fraction', ?)")
        .bind(2.5_f64)
        .execute(&pool)
        .await
        .unwrap();

    let queues: Vec<Queue> =
        sqlx::query_as(&format!("SELECT {} FROM queues ORDER BY id", QUEUE_COLUMNS))
            .fetch_all(&pool)
            .await
            .unwrap();

    assert_eq!(queues[0].time_per_person, serde_json::Number::from(9_007_199_254_740_993_i64));
    assert_eq!(queues[1].time_per_person, serde_json::Number::from(i64::MAX));
    assert_eq!(queues[2].time_per_person, serde_json::Number::from_f64(2.5).unwrap());
}
