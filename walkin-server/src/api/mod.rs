//! HTTP API handlers for walkin-server

pub mod error;
pub mod health;
pub mod members;
pub mod queues;

pub use error::ApiError;
pub use health::health_routes;
pub use members::{get_members, join_queue};
pub use queues::{create_queue, get_queue, list_queues};
