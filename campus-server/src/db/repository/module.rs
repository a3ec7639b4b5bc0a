//! Module Repository
//!
//! Positions are assigned through `db::ordering` inside the insert
//! transaction, so concurrent appends in one course cannot read the
//! same MAX.

use super::{RepoError, RepoResult, content};
use crate::db::ordering::{OrderScope, next_order};
use shared::models::{Module, ModuleCreate, ModuleEdit, ModuleUpdate};
use sqlx::SqlitePool;
use std::collections::HashMap;

const COLUMNS: &str = "id, course_id, title, description, sort_order";

pub async fn find_by_course(pool: &SqlitePool, course_id: i64) -> RepoResult<Vec<Module>> {
    let modules = sqlx::query_as::<_, Module>(&format!(
        "SELECT {COLUMNS} FROM module WHERE course_id = ? ORDER BY sort_order, id"
    ))
    .bind(course_id)
    .fetch_all(pool)
    .await?;
    Ok(modules)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Module>> {
    let module = sqlx::query_as::<_, Module>(&format!("SELECT {COLUMNS} FROM module WHERE id = ?"))
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(module)
}

/// Fetch a module only when its course belongs to the given owner
pub async fn find_owned(pool: &SqlitePool, id: i64, owner_id: i64) -> RepoResult<Option<Module>> {
    let module = sqlx::query_as::<_, Module>(
        "SELECT m.id, m.course_id, m.title, m.description, m.sort_order
         FROM module m
         JOIN course c ON c.id = m.course_id
         WHERE m.id = ? AND c.owner_id = ?",
    )
    .bind(id)
    .bind(owner_id)
    .fetch_optional(pool)
    .await?;
    Ok(module)
}

pub async fn create(pool: &SqlitePool, course_id: i64, data: ModuleCreate) -> RepoResult<Module> {
    let mut tx = pool.begin().await?;
    let scope = OrderScope {
        table: "module",
        order_column: "sort_order",
        scope: &[("course_id", course_id)],
    };
    let order = next_order(&mut *tx, &scope, data.sort_order).await?;
    let id = sqlx::query_scalar::<_, i64>(
        "INSERT INTO module (course_id, title, description, sort_order)
         VALUES (?, ?, ?, ?) RETURNING id",
    )
    .bind(course_id)
    .bind(&data.title)
    .bind(&data.description)
    .bind(order)
    .fetch_one(&mut *tx)
    .await?;
    tx.commit().await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create module".into()))
}

pub async fn update(pool: &SqlitePool, id: i64, data: ModuleUpdate) -> RepoResult<Module> {
    let rows = sqlx::query(
        "UPDATE module SET title = COALESCE(?1, title),
             description = COALESCE(?2, description),
             sort_order = COALESCE(?3, sort_order)
         WHERE id = ?4",
    )
    .bind(&data.title)
    .bind(&data.description)
    .bind(data.sort_order)
    .bind(id)
    .execute(pool)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Module {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Module {id} not found")))
}

/// Delete a module with its contents and their item rows
pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let mut tx = pool.begin().await?;
    content::delete_items_for_module(&mut tx, id).await?;
    let rows = sqlx::query("DELETE FROM module WHERE id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?;
    tx.commit().await?;
    Ok(rows.rows_affected() > 0)
}

/// Apply new positions keyed by module id.
///
/// Membership of every id in the course is checked by the caller; the
/// `course_id` filter here is a backstop against races.
pub async fn reorder(
    pool: &SqlitePool,
    course_id: i64,
    orders: &HashMap<i64, i64>,
) -> RepoResult<()> {
    let mut tx = pool.begin().await?;
    for (module_id, position) in orders {
        sqlx::query("UPDATE module SET sort_order = ? WHERE id = ? AND course_id = ?")
            .bind(position)
            .bind(module_id)
            .bind(course_id)
            .execute(&mut *tx)
            .await?;
    }
    tx.commit().await?;
    Ok(())
}

/// Bulk edit in one transaction: rows with an id update, rows without
/// insert (appended in turn), `delete: true` removes.
pub async fn sync_for_course(
    pool: &SqlitePool,
    course_id: i64,
    edits: &[ModuleEdit],
) -> RepoResult<Vec<Module>> {
    let mut tx = pool.begin().await?;
    for edit in edits {
        match edit.id {
            Some(id) if edit.delete => {
                content::delete_items_for_module(&mut tx, id).await?;
                sqlx::query("DELETE FROM module WHERE id = ? AND course_id = ?")
                    .bind(id)
                    .bind(course_id)
                    .execute(&mut *tx)
                    .await?;
            }
            Some(id) => {
                sqlx::query(
                    "UPDATE module SET title = ?, description = ? WHERE id = ? AND course_id = ?",
                )
                .bind(&edit.title)
                .bind(&edit.description)
                .bind(id)
                .bind(course_id)
                .execute(&mut *tx)
                .await?;
            }
            // A row that never existed and is marked deleted is a no-op
            None if edit.delete => {}
            None => {
                let scope = OrderScope {
                    table: "module",
                    order_column: "sort_order",
                    scope: &[("course_id", course_id)],
                };
                let order = next_order(&mut *tx, &scope, None).await?;
                sqlx::query(
                    "INSERT INTO module (course_id, title, description, sort_order)
                     VALUES (?, ?, ?, ?)",
                )
                .bind(course_id)
                .bind(&edit.title)
                .bind(&edit.description)
                .bind(order)
                .execute(&mut *tx)
                .await?;
            }
        }
    }
    tx.commit().await?;

    find_by_course(pool, course_id).await
}
