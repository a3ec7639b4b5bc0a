//! Error category classification

use super::codes::ErrorCode;
use serde::{Deserialize, Serialize};

/// Error category classification based on error code ranges
///
/// Categories are determined by the leading digit of the error code:
/// - 0xxx: General errors
/// - 1xxx: Authentication errors
/// - 2xxx: Permission errors
/// - 3xxx: Subject errors
/// - 4xxx: Course errors
/// - 5xxx: Module errors
/// - 6xxx: Content errors
/// - 7xxx: Account errors
/// - 9xxx: System errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// General errors (0xxx)
    General,
    /// Authentication errors (1xxx)
    Auth,
    /// Permission errors (2xxx)
    Permission,
    /// Subject errors (3xxx)
    Subject,
    /// Course errors (4xxx)
    Course,
    /// Module errors (5xxx)
    Module,
    /// Content errors (6xxx)
    Content,
    /// Account errors (7xxx)
    Account,
    /// System errors (9xxx)
    System,
}

impl ErrorCategory {
    /// Determine category from error code value
    pub fn from_code(code: u16) -> Self {
        match code {
            0..1000 => Self::General,
            1000..2000 => Self::Auth,
            2000..3000 => Self::Permission,
            3000..4000 => Self::Subject,
            4000..5000 => Self::Course,
            5000..6000 => Self::Module,
            6000..7000 => Self::Content,
            7000..8000 => Self::Account,
            _ => Self::System,
        }
    }

    /// Get the string name for this category
    pub fn name(&self) -> &'static str {
        match self {
            Self::General => "general",
            Self::Auth => "auth",
            Self::Permission => "permission",
            Self::Subject => "subject",
            Self::Course => "course",
            Self::Module => "module",
            Self::Content => "content",
            Self::Account => "account",
            Self::System => "system",
        }
    }
}

impl ErrorCode {
    /// Get the category for this error code
    pub fn category(&self) -> ErrorCategory {
        ErrorCategory::from_code(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_from_code() {
        assert_eq!(ErrorCategory::from_code(0), ErrorCategory::General);
        assert_eq!(ErrorCategory::from_code(8), ErrorCategory::General);
        assert_eq!(ErrorCategory::from_code(999), ErrorCategory::General);

        assert_eq!(ErrorCategory::from_code(1001), ErrorCategory::Auth);
        assert_eq!(ErrorCategory::from_code(1999), ErrorCategory::Auth);

        assert_eq!(ErrorCategory::from_code(2001), ErrorCategory::Permission);
        assert_eq!(ErrorCategory::from_code(3001), ErrorCategory::Subject);
        assert_eq!(ErrorCategory::from_code(4001), ErrorCategory::Course);
        assert_eq!(ErrorCategory::from_code(5001), ErrorCategory::Module);
        assert_eq!(ErrorCategory::from_code(6001), ErrorCategory::Content);
        assert_eq!(ErrorCategory::from_code(7001), ErrorCategory::Account);
        assert_eq!(ErrorCategory::from_code(9001), ErrorCategory::System);
        assert_eq!(ErrorCategory::from_code(10000), ErrorCategory::System);
    }

    #[test]
    fn test_error_code_category() {
        assert_eq!(ErrorCode::Success.category(), ErrorCategory::General);
        assert_eq!(ErrorCode::NotAuthenticated.category(), ErrorCategory::Auth);
        assert_eq!(
            ErrorCode::PermissionDenied.category(),
            ErrorCategory::Permission
        );
        assert_eq!(
            ErrorCode::SubjectNotFound.category(),
            ErrorCategory::Subject
        );
        assert_eq!(ErrorCode::CourseNotFound.category(), ErrorCategory::Course);
        assert_eq!(ErrorCode::ModuleNotFound.category(), ErrorCategory::Module);
        assert_eq!(
            ErrorCode::ContentNotFound.category(),
            ErrorCategory::Content
        );
        assert_eq!(ErrorCode::UserNotFound.category(), ErrorCategory::Account);
        assert_eq!(ErrorCode::InternalError.category(), ErrorCategory::System);
    }

    #[test]
    fn test_category_name() {
        assert_eq!(ErrorCategory::General.name(), "general");
        assert_eq!(ErrorCategory::Auth.name(), "auth");
        assert_eq!(ErrorCategory::Permission.name(), "permission");
        assert_eq!(ErrorCategory::Subject.name(), "subject");
        assert_eq!(ErrorCategory::Course.name(), "course");
        assert_eq!(ErrorCategory::Module.name(), "module");
        assert_eq!(ErrorCategory::Content.name(), "content");
        assert_eq!(ErrorCategory::Account.name(), "account");
        assert_eq!(ErrorCategory::System.name(), "system");
    }

    #[test]
    fn test_category_serialize() {
        let category = ErrorCategory::Auth;
        let json = serde_json::to_string(&category).unwrap();
        assert_eq!(json, "\"auth\"");

        let category = ErrorCategory::Permission;
        let json = serde_json::to_string(&category).unwrap();
        assert_eq!(json, "\"permission\"");
    }

    #[test]
    fn test_category_deserialize() {
        let category: ErrorCategory = serde_json::from_str("\"auth\"").unwrap();
        assert_eq!(category, ErrorCategory::Auth);

        let category: ErrorCategory = serde_json::from_str("\"system\"").unwrap();
        assert_eq!(category, ErrorCategory::System);
    }
}
