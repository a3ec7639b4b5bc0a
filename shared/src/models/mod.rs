//! Data models
//!
//! Shared between campus-server and frontend (via API).
//! DB row types use `#[cfg_attr(feature = "db", derive(sqlx::FromRow))]`.
//! All IDs are `i64` (SQLite INTEGER PRIMARY KEY).

pub mod content;
pub mod course;
pub mod module;
pub mod subject;
pub mod user;

// Re-exports
pub use content::*;
pub use course::*;
pub use module::*;
pub use subject::*;
pub use user::*;
