//! Scoped order assignment
//!
//! Rows that hold a position inside a parent (modules within a course,
//! contents within a module) get their `sort_order` assigned here. An
//! omitted position becomes MAX(existing) + 1 among sibling rows, with
//! the first row starting at 0. Callers run the scan inside the same
//! transaction as the INSERT so both happen against one snapshot.

use super::repository::RepoResult;

/// Where a row's position lives: the table, the order column, and the
/// columns that narrow the scan to sibling rows.
#[derive(Debug, Clone, Copy)]
pub struct OrderScope<'a> {
    pub table: &'static str,
    pub order_column: &'static str,
    pub scope: &'a [(&'static str, i64)],
}

/// Resolve the position for a new row.
///
/// An explicit position is returned as-is without touching the
/// database. Otherwise the current maximum within the scope is
/// scanned; an empty scope yields 0.
pub async fn next_order<'e, E>(
    executor: E,
    scope: &OrderScope<'_>,
    explicit: Option<i64>,
) -> RepoResult<i64>
where
    E: sqlx::Executor<'e, Database = sqlx::Sqlite>,
{
    if let Some(position) = explicit {
        return Ok(position);
    }

    let mut sql = format!("SELECT MAX({}) FROM {}", scope.order_column, scope.table);
    if !scope.scope.is_empty() {
        let filters: Vec<String> = scope
            .scope
            .iter()
            .map(|(column, _)| format!("{column} = ?"))
            .collect();
        sql.push_str(" WHERE ");
        sql.push_str(&filters.join(" AND "));
    }

    let mut query = sqlx::query_scalar::<_, Option<i64>>(&sql);
    for (_, value) in scope.scope {
        query = query.bind(*value);
    }

    // MAX over zero rows is NULL, which means "no siblings yet"
    let max = query.fetch_one(executor).await?;
    Ok(max.map_or(0, |m| m + 1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::SqlitePool;
    use sqlx::sqlite::SqlitePoolOptions;

    async fn test_pool() -> SqlitePool {
        // Single connection so the in-memory database is shared
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        sqlx::query(
            "CREATE TABLE module (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                course_id INTEGER NOT NULL,
                title TEXT NOT NULL,
                sort_order INTEGER NOT NULL DEFAULT 0
            )",
        )
        .execute(&pool)
        .await
        .unwrap();
        pool
    }

    async fn insert_module(
        pool: &SqlitePool,
        course_id: i64,
        title: &str,
        explicit: Option<i64>,
    ) -> i64 {
        let scope = OrderScope {
            table: "module",
            order_column: "sort_order",
            scope: &[("course_id", course_id)],
        };
        let order = next_order(pool, &scope, explicit).await.unwrap();
        sqlx::query("INSERT INTO module (course_id, title, sort_order) VALUES (?, ?, ?)")
            .bind(course_id)
            .bind(title)
            .bind(order)
            .execute(pool)
            .await
            .unwrap();
        order
    }

    #[tokio::test]
    async fn test_first_row_starts_at_zero() {
        let pool = test_pool().await;
        assert_eq!(insert_module(&pool, 1, "a", None).await, 0);
    }

    #[tokio::test]
    async fn test_sequential_inserts_count_up() {
        let pool = test_pool().await;
        for expected in 0..5 {
            assert_eq!(insert_module(&pool, 1, "m", None).await, expected);
        }
    }

    #[tokio::test]
    async fn test_scopes_are_independent() {
        let pool = test_pool().await;
        insert_module(&pool, 1, "a", None).await;
        insert_module(&pool, 1, "b", None).await;
        insert_module(&pool, 1, "c", None).await;

        // A different course starts its own sequence
        assert_eq!(insert_module(&pool, 2, "x", None).await, 0);
        assert_eq!(insert_module(&pool, 2, "y", None).await, 1);
        assert_eq!(insert_module(&pool, 1, "d", None).await, 3);
    }

    #[tokio::test]
    async fn test_explicit_position_passed_through() {
        let pool = test_pool().await;
        assert_eq!(insert_module(&pool, 1, "a", Some(5)).await, 5);
        // Auto-assignment continues after the gap
        assert_eq!(insert_module(&pool, 1, "b", None).await, 6);
    }

    #[tokio::test]
    async fn test_explicit_position_skips_the_scan() {
        let pool = test_pool().await;
        pool.close().await;

        // With the pool closed any query would fail, so Ok proves
        // the explicit path never hits the database
        let scope = OrderScope {
            table: "module",
            order_column: "sort_order",
            scope: &[("course_id", 1)],
        };
        assert_eq!(next_order(&pool, &scope, Some(7)).await.unwrap(), 7);
        assert!(next_order(&pool, &scope, None).await.is_err());
    }

    #[tokio::test]
    async fn test_resolution_is_idempotent_without_insert() {
        let pool = test_pool().await;
        insert_module(&pool, 1, "a", None).await;

        let scope = OrderScope {
            table: "module",
            order_column: "sort_order",
            scope: &[("course_id", 1)],
        };
        let first = next_order(&pool, &scope, None).await.unwrap();
        let second = next_order(&pool, &scope, None).await.unwrap();
        assert_eq!(first, 1);
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_empty_scope_uses_global_max() {
        let pool = test_pool().await;
        insert_module(&pool, 1, "a", None).await;
        insert_module(&pool, 2, "b", None).await;
        sqlx::query("UPDATE module SET sort_order = 9 WHERE course_id = 2")
            .execute(&pool)
            .await
            .unwrap();

        let scope = OrderScope {
            table: "module",
            order_column: "sort_order",
            scope: &[],
        };
        assert_eq!(next_order(&pool, &scope, None).await.unwrap(), 10);
    }

    #[tokio::test]
    async fn test_works_inside_transaction() {
        let pool = test_pool().await;
        insert_module(&pool, 1, "a", None).await;

        let mut tx = pool.begin().await.unwrap();
        let scope = OrderScope {
            table: "module",
            order_column: "sort_order",
            scope: &[("course_id", 1)],
        };
        let order = next_order(&mut *tx, &scope, None).await.unwrap();
        sqlx::query("INSERT INTO module (course_id, title, sort_order) VALUES (1, 'b', ?)")
            .bind(order)
            .execute(&mut *tx)
            .await
            .unwrap();
        tx.commit().await.unwrap();

        assert_eq!(order, 1);
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM module")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(count, 2);
    }
}
