//! Queue member table queries

use sqlx::SqliteConnection;
use walkin_common::db::QueueMember;
use walkin_common::Result;

/// Insert a member row for `queue_id`
///
/// The queue reference is not checked: joining an unknown queue stores an
/// orphaned member.
pub async fn insert_member(
    conn: &mut SqliteConnection,
    queue_id: i64,
    name: &str,
) -> Result<QueueMember> {
    let result = sqlx::query("INSERT INTO queue_members (queue_id, name) VALUES (?, ?)")
        .bind(queue_id)
        .bind(name)
        .execute(&mut *conn)
        .await?;

    Ok(QueueMember {
        id: result.last_insert_rowid(),
        queue_id,
        name: name.to_string(),
    })
}

/// Member names of a queue in join order
pub async fn list_member_names(conn: &mut SqliteConnection, queue_id: i64) -> Result<Vec<String>> {
    let names = sqlx::query_scalar::<_, String>(
        "SELECT name FROM queue_members WHERE queue_id = ? ORDER BY id",
    )
    .bind(queue_id)
    .fetch_all(&mut *conn)
    .await?;

    Ok(names)
}
