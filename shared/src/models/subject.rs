//! Subject Model

use serde::{Deserialize, Serialize};

/// Subject entity (top-level catalog grouping)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Subject {
    pub id: i64,
    pub title: String,
    pub slug: String,
}

/// Create subject payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubjectCreate {
    pub title: String,
    pub slug: String,
}

/// Update subject payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubjectUpdate {
    pub title: Option<String>,
    pub slug: Option<String>,
}

/// Subject with course count (for catalog listing)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct SubjectWithCount {
    pub id: i64,
    pub title: String,
    pub slug: String,
    pub course_count: i64,
}
