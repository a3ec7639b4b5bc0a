//! Shared types for the Campus platform
//!
//! Common types used across crates: error codes and responses,
//! and the data models exposed over the HTTP API.

pub mod error;
pub mod models;
pub mod util;

// Re-exports
pub use axum::{Json, body};
pub use http;
pub use serde::{Deserialize, Serialize};

pub use error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};
