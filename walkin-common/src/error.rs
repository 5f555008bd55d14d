//! Common error types for the walk-in queue service

use thiserror::Error;

/// Common result type for walk-in operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types across walk-in crates
#[derive(Error, Debug)]
pub enum Error {
    /// Database operation error (wraps sqlx::Error)
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),
}
