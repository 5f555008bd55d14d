//! # Walk-in Common Library
//!
//! Shared code for the walk-in queue service:
//! - Database initialization and row models
//! - Configuration loading
//! - Common error type

pub mod config;
pub mod db;
pub mod error;

pub use error::{Error, Result};
