//! Queue creation and listing
//!
//! POST /queues, GET /queues, GET /queues/:queue_id

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Number;
use tracing::{debug, info};
use walkin_common::db::{NewQueue, Queue};

use super::ApiError;
use crate::db::{self, DbConn};
use crate::AppState;

/// Body of POST /queues
///
/// Only `name` is required; a JSON `null` counts as absent.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateQueueRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub time_per_person: Option<Number>,
}

impl CreateQueueRequest {
    /// Check required fields and fill in defaults
    pub fn into_new_queue(self) -> Result<NewQueue, ApiError> {
        let name = self.name.ok_or(ApiError::MissingField("name"))?;

        let mut queue = NewQueue::named(name);
        if let Some(description) = self.description {
            queue.description = description;
        }
        if let Some(location) = self.location {
            queue.location = location;
        }
        if let Some(minutes) = self.time_per_person {
            queue.time_per_person = minutes;
        }

        Ok(queue)
    }
}

#[derive(Debug, Serialize)]
pub struct CreateQueueResponse {
    pub id: i64,
}

/// POST /queues
///
/// The body is validated before a pooled connection is taken.
pub async fn create_queue(
    State(state): State<AppState>,
    payload: Result<Json<CreateQueueRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<CreateQueueResponse>), ApiError> {
    let Json(request) = payload?;
    let queue = request.into_new_queue()?;

    let mut conn = DbConn::acquire(&state.db).await?;
    let id = db::queues::insert_queue(&mut conn, &queue).await?;
    info!("Created queue {} ({})", id, queue.name);

    Ok((StatusCode::CREATED, Json(CreateQueueResponse { id })))
}

/// GET /queues
///
/// Every queue, no filtering or paging.
pub async fn list_queues(mut conn: DbConn) -> Result<Json<Vec<Queue>>, ApiError> {
    let queues = db::queues::list_queues(&mut conn).await?;
    debug!("Listing {} queues", queues.len());

    Ok(Json(queues))
}

/// GET /queues/:queue_id
pub async fn get_queue(
    path: Result<Path<i64>, PathRejection>,
    mut conn: DbConn,
) -> Result<Json<Queue>, ApiError> {
    let Path(queue_id) = path?;

    db::queues::get_queue(&mut conn, queue_id)
        .await?
        .map(Json)
        .ok_or(ApiError::QueueNotFound(queue_id))
}
