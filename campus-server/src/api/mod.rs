//! HTTP API
//!
//! Route modules, one per resource. Each module exposes a `router()`
//! that the HTTP service merges into the application.

pub mod auth;
pub mod catalog;
pub mod contents;
pub mod courses;
pub mod health;
pub mod modules;
pub mod subjects;
pub mod users;
