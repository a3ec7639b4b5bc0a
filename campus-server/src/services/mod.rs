//! Service Layer
//!
//! - [`http`] - router assembly and middleware stack

pub mod http;
