//! Course Model

use serde::{Deserialize, Serialize};

/// Course entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Course {
    pub id: i64,
    pub owner_id: i64,
    pub subject_id: i64,
    pub title: String,
    pub slug: String,
    pub overview: String,
    pub created_at: i64,
}

/// Create course payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CourseCreate {
    pub subject_id: i64,
    pub title: String,
    pub slug: String,
    pub overview: String,
}

/// Update course payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CourseUpdate {
    pub subject_id: Option<i64>,
    pub title: Option<String>,
    pub slug: Option<String>,
    pub overview: Option<String>,
}

/// Course with owner/subject names and module count (for list views)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct CourseSummary {
    pub id: i64,
    pub owner_id: i64,
    pub owner_name: String,
    pub subject_id: i64,
    pub subject_title: String,
    pub title: String,
    pub slug: String,
    pub overview: String,
    pub module_count: i64,
    pub created_at: i64,
}
