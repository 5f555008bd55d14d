//! Queue table queries

use sqlx::SqliteConnection;
use walkin_common::db::{NewQueue, Queue, DEFAULT_TIME_PER_PERSON, QUEUE_COLUMNS};
use walkin_common::Result;

/// Insert a queue row and return its assigned id
pub async fn insert_queue(conn: &mut SqliteConnection, queue: &NewQueue) -> Result<i64> {
    let query = sqlx::query(
        "INSERT INTO queues (name, description, location, time_per_person) VALUES (?, ?, ?, ?)",
    )
    .bind(queue.name.as_str())
    .bind(queue.description.as_str())
    .bind(queue.location.as_str());

    // Bind whole numbers as INTEGER so they read back as JSON integers
    let query = match queue.time_per_person.as_i64() {
        Some(minutes) => query.bind(minutes),
        None => query.bind(
            queue
                .time_per_person
                .as_f64()
                .unwrap_or(DEFAULT_TIME_PER_PERSON as f64),
        ),
    };

    let result = query.execute(&mut *conn).await?;
    Ok(result.last_insert_rowid())
}

/// All queues in ascending id order
pub async fn list_queues(conn: &mut SqliteConnection) -> Result<Vec<Queue>> {
    let sql = format!("SELECT {} FROM queues ORDER BY id", QUEUE_COLUMNS);

    let queues = sqlx::query_as::<_, Queue>(&sql)
        .fetch_all(&mut *conn)
        .await?;

    Ok(queues)
}

/// Single queue by id
pub async fn get_queue(conn: &mut SqliteConnection, queue_id: i64) -> Result<Option<Queue>> {
    let sql = format!("SELECT {} FROM queues WHERE id = ?", QUEUE_COLUMNS);

    let queue = sqlx::query_as::<_, Queue>(&sql)
        .bind(queue_id)
        .fetch_optional(&mut *conn)
        .await?;

    Ok(queue)
}
