//! Joining a queue and listing its members
//!
//! POST /queues/:queue_id/join, GET /queues/:queue_id/members

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::ApiError;
use crate::db::{self, DbConn};
use crate::AppState;

/// Body of POST /queues/:queue_id/join
#[derive(Debug, Default, Deserialize)]
pub struct JoinQueueRequest {
    pub name: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct JoinQueueResponse {
    pub message: String,
}

/// POST /queues/:queue_id/join
///
/// Does not verify that the queue exists. The body is validated before a
/// pooled connection is taken.
pub async fn join_queue(
    path: Result<Path<i64>, PathRejection>,
    State(state): State<AppState>,
    payload: Result<Json<JoinQueueRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<JoinQueueResponse>), ApiError> {
    let Path(queue_id) = path?;
    let Json(request) = payload?;
    let name = request.name.ok_or(ApiError::MissingField("name"))?;

    let mut conn = DbConn::acquire(&state.db).await?;
    let member = db::members::insert_member(&mut conn, queue_id, &name).await?;
    info!("{} joined queue {} as member {}", member.name, queue_id, member.id);

    Ok((
        StatusCode::CREATED,
        Json(JoinQueueResponse {
            message: "Joined queue".to_string(),
        }),
    ))
}

/// GET /queues/:queue_id/members
///
/// Names in join order; an unknown queue yields an empty list.
pub async fn get_members(
    path: Result<Path<i64>, PathRejection>,
    mut conn: DbConn,
) -> Result<Json<Vec<String>>, ApiError> {
    let Path(queue_id) = path?;

    let names = db::members::list_member_names(&mut conn, queue_id).await?;
    debug!("Queue {} has {} members", queue_id, names.len());

    Ok(Json(names))
}
