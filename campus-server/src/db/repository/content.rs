//! Content Repository
//!
//! Content rows carry an (item_type, item_id) pair into one of four
//! item tables. The pair never crosses the API boundary: reads resolve
//! it into a [`ContentItem`] variant, writes decompose a variant into
//! the matching table. Foreign keys cannot cover a polymorphic pair,
//! so item cleanup is explicit wherever content rows go away.

use super::{RepoError, RepoResult};
use crate::db::ordering::{OrderScope, next_order};
use shared::models::{
    ContentCreate, ContentItem, ContentItemCreate, ContentUpdate, ContentWithItem, FileItem,
    ImageItem, TextItem, VideoItem,
};
use shared::util::now_millis;
use sqlx::{SqliteConnection, SqlitePool};
use std::collections::HashMap;

/// Discriminator values with their item tables
const ITEM_TABLES: [(&str, &str); 4] = [
    ("text", "text_item"),
    ("file", "file_item"),
    ("image", "image_item"),
    ("video", "video_item"),
];

const ITEM_COLUMNS: &str = "id, owner_id, title, created_at, updated_at";

#[derive(Debug, sqlx::FromRow)]
struct ContentRow {
    id: i64,
    module_id: i64,
    item_type: String,
    item_id: i64,
    sort_order: i64,
}

fn item_table(item_type: &str) -> RepoResult<&'static str> {
    ITEM_TABLES
        .iter()
        .find(|(kind, _)| *kind == item_type)
        .map(|(_, table)| *table)
        .ok_or_else(|| RepoError::Database(format!("Unknown item type: {item_type}")))
}

fn resolve(row: ContentRow, item: ContentItem) -> ContentWithItem {
    ContentWithItem {
        id: row.id,
        module_id: row.module_id,
        sort_order: row.sort_order,
        item,
    }
}

async fn find_row(pool: &SqlitePool, id: i64) -> RepoResult<Option<ContentRow>> {
    let row = sqlx::query_as::<_, ContentRow>(
        "SELECT id, module_id, item_type, item_id, sort_order FROM content WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}

async fn load_item(pool: &SqlitePool, item_type: &str, item_id: i64) -> RepoResult<ContentItem> {
    let missing = || RepoError::NotFound(format!("Item {item_type}:{item_id} not found"));
    match item_type {
        "text" => {
            let item = sqlx::query_as::<_, TextItem>(&format!(
                "SELECT {ITEM_COLUMNS}, body FROM text_item WHERE id = ?"
            ))
            .bind(item_id)
            .fetch_optional(pool)
            .await?
            .ok_or_else(missing)?;
            Ok(ContentItem::Text(item))
        }
        "file" => {
            let item = sqlx::query_as::<_, FileItem>(&format!(
                "SELECT {ITEM_COLUMNS}, file_url FROM file_item WHERE id = ?"
            ))
            .bind(item_id)
            .fetch_optional(pool)
            .await?
            .ok_or_else(missing)?;
            Ok(ContentItem::File(item))
        }
        "image" => {
            let item = sqlx::query_as::<_, ImageItem>(&format!(
                "SELECT {ITEM_COLUMNS}, file_url FROM image_item WHERE id = ?"
            ))
            .bind(item_id)
            .fetch_optional(pool)
            .await?
            .ok_or_else(missing)?;
            Ok(ContentItem::Image(item))
        }
        "video" => {
            let item = sqlx::query_as::<_, VideoItem>(&format!(
                "SELECT {ITEM_COLUMNS}, url FROM video_item WHERE id = ?"
            ))
            .bind(item_id)
            .fetch_optional(pool)
            .await?
            .ok_or_else(missing)?;
            Ok(ContentItem::Video(item))
        }
        other => Err(RepoError::Database(format!("Unknown item type: {other}"))),
    }
}

pub async fn find_by_module(
    pool: &SqlitePool,
    module_id: i64,
) -> RepoResult<Vec<ContentWithItem>> {
    let rows = sqlx::query_as::<_, ContentRow>(
        "SELECT id, module_id, item_type, item_id, sort_order
         FROM content WHERE module_id = ? ORDER BY sort_order, id",
    )
    .bind(module_id)
    .fetch_all(pool)
    .await?;

    let mut contents = Vec::with_capacity(rows.len());
    for row in rows {
        let item = load_item(pool, &row.item_type, row.item_id).await?;
        contents.push(resolve(row, item));
    }
    Ok(contents)
}

/// Content ids within a module (reorder membership check)
pub async fn ids_for_module(pool: &SqlitePool, module_id: i64) -> RepoResult<Vec<i64>> {
    let ids = sqlx::query_scalar::<_, i64>("SELECT id FROM content WHERE module_id = ?")
        .bind(module_id)
        .fetch_all(pool)
        .await?;
    Ok(ids)
}

/// Fetch a content row only when its course belongs to the given owner
pub async fn find_owned(
    pool: &SqlitePool,
    id: i64,
    owner_id: i64,
) -> RepoResult<Option<ContentWithItem>> {
    let row = sqlx::query_as::<_, ContentRow>(
        "SELECT c.id, c.module_id, c.item_type, c.item_id, c.sort_order
         FROM content c
         JOIN module m ON m.id = c.module_id
         JOIN course k ON k.id = m.course_id
         WHERE c.id = ? AND k.owner_id = ?",
    )
    .bind(id)
    .bind(owner_id)
    .fetch_optional(pool)
    .await?;

    match row {
        Some(row) => {
            let item = load_item(pool, &row.item_type, row.item_id).await?;
            Ok(Some(resolve(row, item)))
        }
        None => Ok(None),
    }
}

pub async fn create(
    pool: &SqlitePool,
    module_id: i64,
    owner_id: i64,
    data: ContentCreate,
) -> RepoResult<ContentWithItem> {
    let mut tx = pool.begin().await?;
    let now = now_millis();
    let (item_type, item_id) = insert_item(&mut tx, owner_id, &data.item, now).await?;
    let scope = OrderScope {
        table: "content",
        order_column: "sort_order",
        scope: &[("module_id", module_id)],
    };
    let order = next_order(&mut *tx, &scope, data.sort_order).await?;
    let id = sqlx::query_scalar::<_, i64>(
        "INSERT INTO content (module_id, item_type, item_id, sort_order)
         VALUES (?, ?, ?, ?) RETURNING id",
    )
    .bind(module_id)
    .bind(item_type)
    .bind(item_id)
    .bind(order)
    .fetch_one(&mut *tx)
    .await?;
    tx.commit().await?;

    let item = load_item(pool, item_type, item_id).await?;
    Ok(ContentWithItem {
        id,
        module_id,
        sort_order: order,
        item,
    })
}

async fn insert_item(
    conn: &mut SqliteConnection,
    owner_id: i64,
    item: &ContentItemCreate,
    now: i64,
) -> RepoResult<(&'static str, i64)> {
    // Every item table has the shape (owner_id, title, payload, timestamps)
    let (kind, sql, title, payload) = match item {
        ContentItemCreate::Text { title, body } => (
            "text",
            "INSERT INTO text_item (owner_id, title, body, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?) RETURNING id",
            title,
            body,
        ),
        ContentItemCreate::File { title, file_url } => (
            "file",
            "INSERT INTO file_item (owner_id, title, file_url, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?) RETURNING id",
            title,
            file_url,
        ),
        ContentItemCreate::Image { title, file_url } => (
            "image",
            "INSERT INTO image_item (owner_id, title, file_url, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?) RETURNING id",
            title,
            file_url,
        ),
        ContentItemCreate::Video { title, url } => (
            "video",
            "INSERT INTO video_item (owner_id, title, url, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?) RETURNING id",
            title,
            url,
        ),
    };

    let id = sqlx::query_scalar::<_, i64>(sql)
        .bind(owner_id)
        .bind(title)
        .bind(payload)
        .bind(now)
        .bind(now)
        .fetch_one(&mut *conn)
        .await?;
    Ok((kind, id))
}

/// Update title and payload of the stored item. The type is immutable:
/// only the payload field matching the stored type is applied.
pub async fn update(pool: &SqlitePool, id: i64, data: ContentUpdate) -> RepoResult<ContentWithItem> {
    let row = find_row(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Content {id} not found")))?;

    let (payload_column, payload) = match row.item_type.as_str() {
        "text" => ("body", data.body.as_deref()),
        "file" | "image" => ("file_url", data.file_url.as_deref()),
        "video" => ("url", data.url.as_deref()),
        other => return Err(RepoError::Database(format!("Unknown item type: {other}"))),
    };
    let table = item_table(&row.item_type)?;

    let sql = format!(
        "UPDATE {table} SET title = COALESCE(?1, title),
             {payload_column} = COALESCE(?2, {payload_column}),
             updated_at = ?3
         WHERE id = ?4"
    );
    sqlx::query(&sql)
        .bind(&data.title)
        .bind(payload)
        .bind(now_millis())
        .bind(row.item_id)
        .execute(pool)
        .await?;

    let item = load_item(pool, &row.item_type, row.item_id).await?;
    Ok(resolve(row, item))
}

/// Delete a content row together with its item row
pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let Some(row) = find_row(pool, id).await? else {
        return Ok(false);
    };

    let mut tx = pool.begin().await?;
    delete_item(&mut tx, &row.item_type, row.item_id).await?;
    sqlx::query("DELETE FROM content WHERE id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?;
    tx.commit().await?;
    Ok(true)
}

/// Apply new positions keyed by content id.
///
/// Membership of every id in the module is checked by the caller; the
/// `module_id` filter here is a backstop against races.
pub async fn reorder(
    pool: &SqlitePool,
    module_id: i64,
    orders: &HashMap<i64, i64>,
) -> RepoResult<()> {
    let mut tx = pool.begin().await?;
    for (content_id, position) in orders {
        sqlx::query("UPDATE content SET sort_order = ? WHERE id = ? AND module_id = ?")
            .bind(position)
            .bind(content_id)
            .bind(module_id)
            .execute(&mut *tx)
            .await?;
    }
    tx.commit().await?;
    Ok(())
}

pub(crate) async fn delete_item(
    conn: &mut SqliteConnection,
    item_type: &str,
    item_id: i64,
) -> RepoResult<()> {
    let table = item_table(item_type)?;
    sqlx::query(&format!("DELETE FROM {table} WHERE id = ?"))
        .bind(item_id)
        .execute(&mut *conn)
        .await?;
    Ok(())
}

pub(crate) async fn delete_items_for_module(
    conn: &mut SqliteConnection,
    module_id: i64,
) -> RepoResult<()> {
    for (kind, table) in ITEM_TABLES {
        let sql = format!(
            "DELETE FROM {table} WHERE id IN
                 (SELECT item_id FROM content WHERE item_type = '{kind}' AND module_id = ?)"
        );
        sqlx::query(&sql).bind(module_id).execute(&mut *conn).await?;
    }
    Ok(())
}

pub(crate) async fn delete_items_for_course(
    conn: &mut SqliteConnection,
    course_id: i64,
) -> RepoResult<()> {
    for (kind, table) in ITEM_TABLES {
        let sql = format!(
            "DELETE FROM {table} WHERE id IN
                 (SELECT item_id FROM content WHERE item_type = '{kind}'
                    AND module_id IN (SELECT id FROM module WHERE course_id = ?))"
        );
        sqlx::query(&sql).bind(course_id).execute(&mut *conn).await?;
    }
    Ok(())
}
