//! Subject Repository

use super::{RepoError, RepoResult};
use shared::models::{Subject, SubjectCreate, SubjectUpdate, SubjectWithCount};
use sqlx::SqlitePool;

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<Subject>> {
    let subjects =
        sqlx::query_as::<_, Subject>("SELECT id, title, slug FROM subject ORDER BY title")
            .fetch_all(pool)
            .await?;
    Ok(subjects)
}

pub async fn find_all_with_counts(pool: &SqlitePool) -> RepoResult<Vec<SubjectWithCount>> {
    let subjects = sqlx::query_as::<_, SubjectWithCount>(
        "SELECT s.id, s.title, s.slug, COUNT(c.id) AS course_count
         FROM subject s
         LEFT JOIN course c ON c.subject_id = s.id
         GROUP BY s.id
         ORDER BY s.title",
    )
    .fetch_all(pool)
    .await?;
    Ok(subjects)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Subject>> {
    let subject =
        sqlx::query_as::<_, Subject>("SELECT id, title, slug FROM subject WHERE id = ?")
            .bind(id)
            .fetch_optional(pool)
            .await?;
    Ok(subject)
}

pub async fn find_by_slug(pool: &SqlitePool, slug: &str) -> RepoResult<Option<Subject>> {
    let subject =
        sqlx::query_as::<_, Subject>("SELECT id, title, slug FROM subject WHERE slug = ? LIMIT 1")
            .bind(slug)
            .fetch_optional(pool)
            .await?;
    Ok(subject)
}

pub async fn create(pool: &SqlitePool, data: SubjectCreate) -> RepoResult<Subject> {
    let id =
        sqlx::query_scalar::<_, i64>("INSERT INTO subject (title, slug) VALUES (?, ?) RETURNING id")
            .bind(&data.title)
            .bind(&data.slug)
            .fetch_one(pool)
            .await?;
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create subject".into()))
}

pub async fn update(pool: &SqlitePool, id: i64, data: SubjectUpdate) -> RepoResult<Subject> {
    let rows = sqlx::query(
        "UPDATE subject SET title = COALESCE(?1, title), slug = COALESCE(?2, slug) WHERE id = ?3",
    )
    .bind(&data.title)
    .bind(&data.slug)
    .bind(id)
    .execute(pool)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Subject {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Subject {id} not found")))
}

pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let rows = sqlx::query("DELETE FROM subject WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}

/// Number of courses attached to a subject (delete guard)
pub async fn course_count(pool: &SqlitePool, id: i64) -> RepoResult<i64> {
    let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM course WHERE subject_id = ?")
        .bind(id)
        .fetch_one(pool)
        .await?;
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::sqlite::SqlitePoolOptions;

    async fn test_pool() -> SqlitePool {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        sqlx::query(
            "CREATE TABLE subject (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                title TEXT NOT NULL,
                slug TEXT NOT NULL UNIQUE
            )",
        )
        .execute(&pool)
        .await
        .unwrap();
        sqlx::query(
            "CREATE TABLE course (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                subject_id INTEGER NOT NULL,
                title TEXT NOT NULL
            )",
        )
        .execute(&pool)
        .await
        .unwrap();
        pool
    }

    #[tokio::test]
    async fn test_create_and_find() {
        let pool = test_pool().await;
        let created = create(
            &pool,
            SubjectCreate {
                title: "Mathematics".into(),
                slug: "mathematics".into(),
            },
        )
        .await
        .unwrap();

        assert_eq!(created.title, "Mathematics");
        let found = find_by_slug(&pool, "mathematics").await.unwrap().unwrap();
        assert_eq!(found.id, created.id);
    }

    #[tokio::test]
    async fn test_duplicate_slug_is_rejected() {
        let pool = test_pool().await;
        let data = SubjectCreate {
            title: "Math".into(),
            slug: "math".into(),
        };
        create(&pool, data.clone()).await.unwrap();

        let err = create(&pool, data).await.unwrap_err();
        assert!(matches!(err, RepoError::Duplicate(_)));
    }

    #[tokio::test]
    async fn test_update_partial() {
        let pool = test_pool().await;
        let subject = create(
            &pool,
            SubjectCreate {
                title: "Musik".into(),
                slug: "music".into(),
            },
        )
        .await
        .unwrap();

        let updated = update(
            &pool,
            subject.id,
            SubjectUpdate {
                title: Some("Music".into()),
                slug: None,
            },
        )
        .await
        .unwrap();
        assert_eq!(updated.title, "Music");
        assert_eq!(updated.slug, "music");
    }

    #[tokio::test]
    async fn test_update_missing_returns_not_found() {
        let pool = test_pool().await;
        let err = update(
            &pool,
            99,
            SubjectUpdate {
                title: Some("x".into()),
                slug: None,
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, RepoError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_counts_follow_courses() {
        let pool = test_pool().await;
        let subject = create(
            &pool,
            SubjectCreate {
                title: "Physics".into(),
                slug: "physics".into(),
            },
        )
        .await
        .unwrap();

        sqlx::query("INSERT INTO course (subject_id, title) VALUES (?, 'a'), (?, 'b')")
            .bind(subject.id)
            .bind(subject.id)
            .execute(&pool)
            .await
            .unwrap();

        assert_eq!(course_count(&pool, subject.id).await.unwrap(), 2);
        let with_counts = find_all_with_counts(&pool).await.unwrap();
        assert_eq!(with_counts[0].course_count, 2);
    }
}
