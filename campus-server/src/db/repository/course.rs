//! Course Repository
//!
//! Catalog reads join owner and subject names; owner-scoped lookups
//! back the manage endpoints, where a foreign row reads as absent.

use super::{RepoError, RepoResult, content};
use shared::models::{Course, CourseCreate, CourseSummary, CourseUpdate};
use shared::util::now_millis;
use sqlx::SqlitePool;

const COLUMNS: &str = "id, owner_id, subject_id, title, slug, overview, created_at";

const SUMMARY_SELECT: &str = "SELECT c.id, c.owner_id,
        COALESCE(u.display_name, u.username) AS owner_name,
        c.subject_id, s.title AS subject_title,
        c.title, c.slug, c.overview,
        (SELECT COUNT(*) FROM module m WHERE m.course_id = c.id) AS module_count,
        c.created_at
     FROM course c
     JOIN user u ON u.id = c.owner_id
     JOIN subject s ON s.id = c.subject_id";

pub async fn find_summaries(pool: &SqlitePool) -> RepoResult<Vec<CourseSummary>> {
    let courses = sqlx::query_as::<_, CourseSummary>(&format!(
        "{SUMMARY_SELECT} ORDER BY c.created_at DESC, c.id DESC"
    ))
    .fetch_all(pool)
    .await?;
    Ok(courses)
}

pub async fn find_summaries_by_subject(
    pool: &SqlitePool,
    subject_id: i64,
) -> RepoResult<Vec<CourseSummary>> {
    let courses = sqlx::query_as::<_, CourseSummary>(&format!(
        "{SUMMARY_SELECT} WHERE c.subject_id = ? ORDER BY c.created_at DESC, c.id DESC"
    ))
    .bind(subject_id)
    .fetch_all(pool)
    .await?;
    Ok(courses)
}

pub async fn find_summaries_by_owner(
    pool: &SqlitePool,
    owner_id: i64,
) -> RepoResult<Vec<CourseSummary>> {
    let courses = sqlx::query_as::<_, CourseSummary>(&format!(
        "{SUMMARY_SELECT} WHERE c.owner_id = ? ORDER BY c.created_at DESC, c.id DESC"
    ))
    .bind(owner_id)
    .fetch_all(pool)
    .await?;
    Ok(courses)
}

pub async fn find_summary_by_slug(
    pool: &SqlitePool,
    slug: &str,
) -> RepoResult<Option<CourseSummary>> {
    let course =
        sqlx::query_as::<_, CourseSummary>(&format!("{SUMMARY_SELECT} WHERE c.slug = ? LIMIT 1"))
            .bind(slug)
            .fetch_optional(pool)
            .await?;
    Ok(course)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Course>> {
    let course = sqlx::query_as::<_, Course>(&format!("SELECT {COLUMNS} FROM course WHERE id = ?"))
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(course)
}

pub async fn find_by_slug(pool: &SqlitePool, slug: &str) -> RepoResult<Option<Course>> {
    let course = sqlx::query_as::<_, Course>(&format!(
        "SELECT {COLUMNS} FROM course WHERE slug = ? LIMIT 1"
    ))
    .bind(slug)
    .fetch_optional(pool)
    .await?;
    Ok(course)
}

/// Fetch a course only when it belongs to the given owner
pub async fn find_owned(pool: &SqlitePool, id: i64, owner_id: i64) -> RepoResult<Option<Course>> {
    let course = sqlx::query_as::<_, Course>(&format!(
        "SELECT {COLUMNS} FROM course WHERE id = ? AND owner_id = ?"
    ))
    .bind(id)
    .bind(owner_id)
    .fetch_optional(pool)
    .await?;
    Ok(course)
}

pub async fn create(pool: &SqlitePool, owner_id: i64, data: CourseCreate) -> RepoResult<Course> {
    let id = sqlx::query_scalar::<_, i64>(
        "INSERT INTO course (owner_id, subject_id, title, slug, overview, created_at)
         VALUES (?, ?, ?, ?, ?, ?) RETURNING id",
    )
    .bind(owner_id)
    .bind(data.subject_id)
    .bind(&data.title)
    .bind(&data.slug)
    .bind(&data.overview)
    .bind(now_millis())
    .fetch_one(pool)
    .await?;
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create course".into()))
}

pub async fn update(pool: &SqlitePool, id: i64, data: CourseUpdate) -> RepoResult<Course> {
    let rows = sqlx::query(
        "UPDATE course SET subject_id = COALESCE(?1, subject_id),
             title = COALESCE(?2, title),
             slug = COALESCE(?3, slug),
             overview = COALESCE(?4, overview)
         WHERE id = ?5",
    )
    .bind(data.subject_id)
    .bind(&data.title)
    .bind(&data.slug)
    .bind(&data.overview)
    .bind(id)
    .execute(pool)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Course {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Course {id} not found")))
}

/// Delete a course with its modules and contents.
///
/// Item rows are not covered by foreign keys (polymorphic reference),
/// so they are removed explicitly before the cascading delete.
pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let mut tx = pool.begin().await?;
    content::delete_items_for_course(&mut tx, id).await?;
    let rows = sqlx::query("DELETE FROM course WHERE id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?;
    tx.commit().await?;
    Ok(rows.rows_affected() > 0)
}
