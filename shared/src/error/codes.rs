//! Unified error codes for the Campus platform
//!
//! This module defines all error codes used across campus-server and frontend.
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 2xxx: Permission errors
//! - 3xxx: Subject errors
//! - 4xxx: Course errors
//! - 5xxx: Module errors
//! - 6xxx: Content errors
//! - 7xxx: Account errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values for efficient serialization
/// and cross-language compatibility (Rust, TypeScript, etc.)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Unknown error
    Unknown = 1,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Resource already exists
    AlreadyExists = 4,
    /// Invalid request
    InvalidRequest = 5,
    /// Invalid format
    InvalidFormat = 6,
    /// Required field missing
    RequiredField = 7,
    /// Value out of range
    ValueOutOfRange = 8,

    // ==================== 1xxx: Auth ====================
    /// User is not authenticated
    NotAuthenticated = 1001,
    /// Invalid credentials (username/password)
    InvalidCredentials = 1002,
    /// Token has expired
    TokenExpired = 1003,
    /// Token is invalid
    TokenInvalid = 1004,
    /// Account is disabled
    AccountDisabled = 1005,

    // ==================== 2xxx: Permission ====================
    /// Permission denied
    PermissionDenied = 2001,
    /// Admin role required
    AdminRequired = 2002,

    // ==================== 3xxx: Subject ====================
    /// Subject not found
    SubjectNotFound = 3001,
    /// Subject slug already in use
    SubjectSlugExists = 3002,
    /// Subject still has courses attached
    SubjectHasCourses = 3003,

    // ==================== 4xxx: Course ====================
    /// Course not found
    CourseNotFound = 4001,
    /// Course slug already in use
    CourseSlugExists = 4002,

    // ==================== 5xxx: Module ====================
    /// Module not found
    ModuleNotFound = 5001,
    /// Module does not belong to the given course
    ModuleCourseMismatch = 5002,

    // ==================== 6xxx: Content ====================
    /// Content not found
    ContentNotFound = 6001,
    /// Content does not belong to the given module
    ContentModuleMismatch = 6002,

    // ==================== 7xxx: Account ====================
    /// User not found
    UserNotFound = 7001,
    /// Username already taken
    UsernameExists = 7002,
    /// Seeded admin account is protected
    SeedAdminProtected = 7003,
    /// Unknown role name
    RoleInvalid = 7004,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
    /// Database error
    DatabaseError = 9002,
    /// Configuration error
    ConfigError = 9003,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Check if this is a success code
    #[inline]
    pub const fn is_success(&self) -> bool {
        matches!(self, ErrorCode::Success)
    }

    /// Get the developer-facing English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::Success => "Operation completed successfully",
            ErrorCode::Unknown => "An unknown error occurred",
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::AlreadyExists => "Resource already exists",
            ErrorCode::InvalidRequest => "Invalid request",
            ErrorCode::InvalidFormat => "Invalid format",
            ErrorCode::RequiredField => "Required field is missing",
            ErrorCode::ValueOutOfRange => "Value is out of range",

            // Auth
            ErrorCode::NotAuthenticated => "User is not authenticated",
            ErrorCode::InvalidCredentials => "Invalid username or password",
            ErrorCode::TokenExpired => "Authentication token has expired",
            ErrorCode::TokenInvalid => "Authentication token is invalid",
            ErrorCode::AccountDisabled => "Account is disabled",

            // Permission
            ErrorCode::PermissionDenied => "Permission denied",
            ErrorCode::AdminRequired => "Administrator role is required",

            // Subject
            ErrorCode::SubjectNotFound => "Subject not found",
            ErrorCode::SubjectSlugExists => "Subject slug already exists",
            ErrorCode::SubjectHasCourses => "Subject still has courses attached",

            // Course
            ErrorCode::CourseNotFound => "Course not found",
            ErrorCode::CourseSlugExists => "Course slug already exists",

            // Module
            ErrorCode::ModuleNotFound => "Module not found",
            ErrorCode::ModuleCourseMismatch => "Module does not belong to this course",

            // Content
            ErrorCode::ContentNotFound => "Content not found",
            ErrorCode::ContentModuleMismatch => "Content does not belong to this module",

            // Account
            ErrorCode::UserNotFound => "User not found",
            ErrorCode::UsernameExists => "Username already exists",
            ErrorCode::SeedAdminProtected => "Seeded admin account cannot be changed",
            ErrorCode::RoleInvalid => "Unknown role name",

            // System
            ErrorCode::InternalError => "Internal server error",
            ErrorCode::DatabaseError => "Database error",
            ErrorCode::ConfigError => "Configuration error",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            0 => Ok(ErrorCode::Success),
            1 => Ok(ErrorCode::Unknown),
            2 => Ok(ErrorCode::ValidationFailed),
            3 => Ok(ErrorCode::NotFound),
            4 => Ok(ErrorCode::AlreadyExists),
            5 => Ok(ErrorCode::InvalidRequest),
            6 => Ok(ErrorCode::InvalidFormat),
            7 => Ok(ErrorCode::RequiredField),
            8 => Ok(ErrorCode::ValueOutOfRange),

            // Auth
            1001 => Ok(ErrorCode::NotAuthenticated),
            1002 => Ok(ErrorCode::InvalidCredentials),
            1003 => Ok(ErrorCode::TokenExpired),
            1004 => Ok(ErrorCode::TokenInvalid),
            1005 => Ok(ErrorCode::AccountDisabled),

            // Permission
            2001 => Ok(ErrorCode::PermissionDenied),
            2002 => Ok(ErrorCode::AdminRequired),

            // Subject
            3001 => Ok(ErrorCode::SubjectNotFound),
            3002 => Ok(ErrorCode::SubjectSlugExists),
            3003 => Ok(ErrorCode::SubjectHasCourses),

            // Course
            4001 => Ok(ErrorCode::CourseNotFound),
            4002 => Ok(ErrorCode::CourseSlugExists),

            // Module
            5001 => Ok(ErrorCode::ModuleNotFound),
            5002 => Ok(ErrorCode::ModuleCourseMismatch),

            // Content
            6001 => Ok(ErrorCode::ContentNotFound),
            6002 => Ok(ErrorCode::ContentModuleMismatch),

            // Account
            7001 => Ok(ErrorCode::UserNotFound),
            7002 => Ok(ErrorCode::UsernameExists),
            7003 => Ok(ErrorCode::SeedAdminProtected),
            7004 => Ok(ErrorCode::RoleInvalid),

            // System
            9001 => Ok(ErrorCode::InternalError),
            9002 => Ok(ErrorCode::DatabaseError),
            9003 => Ok(ErrorCode::ConfigError),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
