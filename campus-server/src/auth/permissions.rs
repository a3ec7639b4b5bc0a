//! Permission Definitions
//!
//! Simplified RBAC: permissions derive from the role, there is no
//! per-user permission table. Roles are `admin` and `instructor`.

/// Configurable permission list
///
/// Does not include `"all"` or `"users:manage"`, which are admin-only.
pub const ALL_PERMISSIONS: &[&str] = &[
    "subjects:manage", // subject catalog (create/rename/delete subjects)
    "courses:manage",  // own courses and their module structure
    "contents:manage", // module contents (text/file/image/video items)
];

/// Admin-only permissions (never granted to instructors)
pub const ADMIN_ONLY_PERMISSIONS: &[&str] = &[
    "users:manage", // account administration
    "all",          // super permission
];

pub const DEFAULT_ADMIN_PERMISSIONS: &[&str] = &["all"];

/// Instructors manage their own courses and contents, not the subject
/// catalog or accounts.
pub const DEFAULT_INSTRUCTOR_PERMISSIONS: &[&str] = &["courses:manage", "contents:manage"];

/// Get the default permissions for a role name
pub fn get_default_permissions(role: &str) -> Vec<String> {
    match role {
        "admin" => DEFAULT_ADMIN_PERMISSIONS
            .iter()
            .map(|s| s.to_string())
            .collect(),
        "instructor" => DEFAULT_INSTRUCTOR_PERMISSIONS
            .iter()
            .map(|s| s.to_string())
            .collect(),
        _ => vec![],
    }
}

/// Validate a role name
pub fn is_valid_role(role: &str) -> bool {
    matches!(role, "admin" | "instructor")
}
