//! User Repository

use super::{RepoError, RepoResult};
use crate::auth::password;
use shared::models::{User, UserCreate, UserUpdate};
use shared::util::now_millis;
use sqlx::SqlitePool;

const COLUMNS: &str =
    "id, username, display_name, hash_pass, role, is_active, is_system, created_at, updated_at";

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<User>> {
    let users =
        sqlx::query_as::<_, User>(&format!("SELECT {COLUMNS} FROM user ORDER BY username"))
            .fetch_all(pool)
            .await?;
    Ok(users)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<User>> {
    let user = sqlx::query_as::<_, User>(&format!("SELECT {COLUMNS} FROM user WHERE id = ?"))
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(user)
}

pub async fn find_by_username(pool: &SqlitePool, username: &str) -> RepoResult<Option<User>> {
    let user = sqlx::query_as::<_, User>(&format!(
        "SELECT {COLUMNS} FROM user WHERE username = ? LIMIT 1"
    ))
    .bind(username)
    .fetch_optional(pool)
    .await?;
    Ok(user)
}

pub async fn create(pool: &SqlitePool, data: UserCreate) -> RepoResult<User> {
    let hash = password::hash_password(&data.password)
        .map_err(|e| RepoError::Database(e.to_string()))?;
    let now = now_millis();
    let id = sqlx::query_scalar::<_, i64>(
        "INSERT INTO user (username, display_name, hash_pass, role, created_at, updated_at)
         VALUES (?, ?, ?, ?, ?, ?) RETURNING id",
    )
    .bind(&data.username)
    .bind(&data.display_name)
    .bind(&hash)
    .bind(&data.role)
    .bind(now)
    .bind(now)
    .fetch_one(pool)
    .await?;
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create user".into()))
}

pub async fn update(pool: &SqlitePool, id: i64, data: UserUpdate) -> RepoResult<User> {
    let hash = match &data.password {
        Some(p) => Some(
            password::hash_password(p).map_err(|e| RepoError::Database(e.to_string()))?,
        ),
        None => None,
    };
    let rows = sqlx::query(
        "UPDATE user SET display_name = COALESCE(?1, display_name),
             hash_pass = COALESCE(?2, hash_pass),
             role = COALESCE(?3, role),
             is_active = COALESCE(?4, is_active),
             updated_at = ?5
         WHERE id = ?6",
    )
    .bind(&data.display_name)
    .bind(&hash)
    .bind(&data.role)
    .bind(data.is_active)
    .bind(now_millis())
    .bind(id)
    .execute(pool)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("User {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("User {id} not found")))
}

pub async fn count(pool: &SqlitePool) -> RepoResult<i64> {
    let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM user")
        .fetch_one(pool)
        .await?;
    Ok(count)
}

/// Seed the admin account on an empty user table.
///
/// Returns `None` when accounts already exist.
pub async fn seed_admin(pool: &SqlitePool, admin_password: &str) -> RepoResult<Option<User>> {
    if count(pool).await? > 0 {
        return Ok(None);
    }

    let hash = password::hash_password(admin_password)
        .map_err(|e| RepoError::Database(e.to_string()))?;
    let now = now_millis();
    let id = sqlx::query_scalar::<_, i64>(
        "INSERT INTO user (username, display_name, hash_pass, role, is_system, created_at, updated_at)
         VALUES ('admin', 'Administrator', ?, 'admin', 1, ?, ?) RETURNING id",
    )
    .bind(&hash)
    .bind(now)
    .bind(now)
    .fetch_one(pool)
    .await?;

    tracing::info!("Seeded admin account (id {id})");
    find_by_id(pool, id).await
}
