//! Module Model

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Module entity (ordered section within a course)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Module {
    pub id: i64,
    pub course_id: i64,
    pub title: String,
    pub description: String,
    /// Position within the course, assigned automatically when omitted
    pub sort_order: i64,
}

/// Create module payload
///
/// When `sort_order` is omitted the module is appended after the
/// current highest position in its course.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModuleCreate {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub sort_order: Option<i64>,
}

/// Update module payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModuleUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub sort_order: Option<i64>,
}

/// One row of a bulk module edit
///
/// Rows with an `id` update the existing module, rows without insert a
/// new one, and `delete: true` removes the module and its contents.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModuleEdit {
    pub id: Option<i64>,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub delete: bool,
}

/// Reorder payload: target position keyed by row id
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReorderRequest {
    pub orders: HashMap<i64, i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_module_create_defaults() {
        let m: ModuleCreate = serde_json::from_str(r#"{"title":"Week 1"}"#).unwrap();
        assert_eq!(m.title, "Week 1");
        assert_eq!(m.description, "");
        assert_eq!(m.sort_order, None);
    }

    #[test]
    fn test_module_edit_defaults() {
        let e: ModuleEdit = serde_json::from_str(r#"{"title":"Intro"}"#).unwrap();
        assert_eq!(e.id, None);
        assert!(!e.delete);

        let e: ModuleEdit =
            serde_json::from_str(r#"{"id":3,"title":"Old","delete":true}"#).unwrap();
        assert_eq!(e.id, Some(3));
        assert!(e.delete);
    }

    #[test]
    fn test_reorder_request_integer_keys() {
        // JSON object keys arrive as strings and must parse into i64
        let r: ReorderRequest =
            serde_json::from_str(r#"{"orders":{"12":0,"13":1}}"#).unwrap();
        assert_eq!(r.orders.get(&12), Some(&0));
        assert_eq!(r.orders.get(&13), Some(&1));
    }
}
