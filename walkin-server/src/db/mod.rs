//! Database access layer for walkin-server
//!
//! Handlers receive a [`DbConn`] and pass it explicitly to the per-table
//! query functions, so every statement of a request runs on one connection.

use axum::async_trait;
use axum::extract::{FromRef, FromRequestParts};
use axum::http::request::Parts;
use sqlx::pool::PoolConnection;
use sqlx::{Sqlite, SqliteConnection, SqlitePool};
use std::ops::{Deref, DerefMut};

use crate::api::ApiError;

pub mod members;
pub mod queues;

/// Request-scoped pooled connection
///
/// Acquired when the handler's arguments are extracted and returned to the
/// pool when dropped, on success and error paths alike.
pub struct DbConn(PoolConnection<Sqlite>);

impl DbConn {
    /// Acquire a connection from the pool
    pub async fn acquire(pool: &SqlitePool) -> Result<Self, ApiError> {
        Ok(Self(pool.acquire().await?))
    }
}

impl Deref for DbConn {
    type Target = SqliteConnection;

    fn deref(&self) -> &SqliteConnection {
        &self.0
    }
}

impl DerefMut for DbConn {
    fn deref_mut(&mut self) -> &mut SqliteConnection {
        &mut self.0
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for DbConn
where
    SqlitePool: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(_parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let pool = SqlitePool::from_ref(state);
        DbConn::acquire(&pool).await
    }
}
