//! Authentication and Authorization
//!
//! JWT authentication, argon2 password hashing and route middleware:
//! - [`JwtService`] - token generation and validation
//! - [`CurrentUser`] - caller identity context
//! - [`require_auth`] - authentication middleware
//! - [`require_permission`] / [`require_admin`] - authorization middleware

pub mod extractor;
pub mod jwt;
pub mod middleware;
pub mod password;
pub mod permissions;

pub use jwt::{Claims, CurrentUser, JwtConfig, JwtError, JwtService};
pub use middleware::{require_admin, require_auth, require_permission};
pub use permissions::{get_default_permissions, is_valid_role};
