//! Utility Module
//!
//! - [`logger`] - tracing setup with optional rolling file output
//! - [`validation`] - input length and format checks

pub mod logger;
pub mod validation;
