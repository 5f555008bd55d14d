//! walkin-server library - HTTP API for walk-in queues
//!
//! Maps four JSON endpoints onto the `queues` and `queue_members` tables.

use axum::extract::FromRef;
use axum::Router;
use sqlx::SqlitePool;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub mod api;
pub mod db;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: SqlitePool,
}

impl AppState {
    /// Create new application state
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }
}

impl FromRef<AppState> for SqlitePool {
    fn from_ref(state: &AppState) -> Self {
        state.db.clone()
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    use axum::routing::{get, post};

    let queues = Router::new()
        .route("/queues", post(api::create_queue).get(api::list_queues))
        .route("/queues/:queue_id", get(api::get_queue))
        .route("/queues/:queue_id/join", post(api::join_queue))
        .route("/queues/:queue_id/members", get(api::get_members));

    Router::new()
        .merge(queues)
        .merge(api::health_routes())
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
