use thiserror::Error;

/// Startup and server-lifecycle errors
///
/// Request handlers use [`shared::error::AppError`]; this type only
/// covers the bind/initialize/serve path.
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

/// Result alias for the server lifecycle
pub type Result<T> = std::result::Result<T, ServerError>;
