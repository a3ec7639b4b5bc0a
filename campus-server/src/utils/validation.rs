//! Input validation helpers
//!
//! Centralized text length constants and validation functions.
//! SQLite TEXT has no built-in length enforcement, so limits are
//! applied at the handler boundary.

use shared::error::AppError;

// ── Text length limits ──────────────────────────────────────────────

/// Titles: subject, course, module, content item
pub const MAX_TITLE_LEN: usize = 200;

/// Long text: course overview, module description, text item body
pub const MAX_TEXT_LEN: usize = 5000;

/// URLs for file/image/video items
pub const MAX_URL_LEN: usize = 2048;

/// Usernames
pub const MAX_USERNAME_LEN: usize = 50;

/// Slugs (subject and course)
pub const MAX_SLUG_LEN: usize = 200;

/// Passwords (before hashing)
pub const MIN_PASSWORD_LEN: usize = 8;
pub const MAX_PASSWORD_LEN: usize = 128;

// ── Validation helpers ──────────────────────────────────────────────

/// Validate only the length limit; empty is allowed.
pub fn validate_text_len(value: &str, field: &str, max_len: usize) -> Result<(), AppError> {
    if value.len() > max_len {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            value.len()
        )));
    }
    Ok(())
}

/// Validate that a required string is non-empty and within the length limit.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::validation(format!("{field} must not be empty")));
    }
    validate_text_len(value, field, max_len)
}

/// Validate that an optional string, if present, is within the length limit.
pub fn validate_optional_text(
    value: &Option<String>,
    field: &str,
    max_len: usize,
) -> Result<(), AppError> {
    match value {
        Some(v) => validate_text_len(v, field, max_len),
        None => Ok(()),
    }
}

/// Validate a URL-identified slug: lowercase letters, digits, `-`, `_`.
pub fn validate_slug(slug: &str, field: &str) -> Result<(), AppError> {
    validate_required_text(slug, field, MAX_SLUG_LEN)?;
    if !slug
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '_')
    {
        return Err(AppError::validation(format!(
            "{field} may only contain lowercase letters, digits, '-' and '_'"
        )));
    }
    Ok(())
}

/// Validate password length bounds (content is not restricted).
pub fn validate_password(password: &str) -> Result<(), AppError> {
    if password.len() < MIN_PASSWORD_LEN || password.len() > MAX_PASSWORD_LEN {
        return Err(AppError::validation(format!(
            "password must be between {MIN_PASSWORD_LEN} and {MAX_PASSWORD_LEN} characters"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_text() {
        assert!(validate_required_text("Mathematics", "title", MAX_TITLE_LEN).is_ok());
        assert!(validate_required_text("", "title", MAX_TITLE_LEN).is_err());
        assert!(validate_required_text("   ", "title", MAX_TITLE_LEN).is_err());
        assert!(validate_required_text(&"x".repeat(201), "title", MAX_TITLE_LEN).is_err());
    }

    #[test]
    fn test_optional_text() {
        assert!(validate_optional_text(&None, "overview", MAX_TEXT_LEN).is_ok());
        assert!(validate_optional_text(&Some("fine".into()), "overview", MAX_TEXT_LEN).is_ok());
        assert!(
            validate_optional_text(&Some("x".repeat(5001)), "overview", MAX_TEXT_LEN).is_err()
        );
    }

    #[test]
    fn test_slug_charset() {
        assert!(validate_slug("intro-to-rust_2026", "slug").is_ok());
        assert!(validate_slug("Intro", "slug").is_err());
        assert!(validate_slug("has space", "slug").is_err());
        assert!(validate_slug("каталог", "slug").is_err());
        assert!(validate_slug("", "slug").is_err());
    }

    #[test]
    fn test_password_bounds() {
        assert!(validate_password("12345678").is_ok());
        assert!(validate_password("1234567").is_err());
        assert!(validate_password(&"p".repeat(129)).is_err());
    }
}
