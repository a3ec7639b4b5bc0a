//! User Handlers

use axum::{
    Json,
    extract::{Path, State},
};

use crate::auth::{get_default_permissions, is_valid_role};
use crate::core::ServerState;
use crate::db::repository::user;
use crate::utils::validation::{
    MAX_TITLE_LEN, MAX_USERNAME_LEN, validate_optional_text, validate_password,
    validate_required_text,
};
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{User, UserCreate, UserInfo, UserUpdate};

fn user_info(user: User) -> UserInfo {
    let permissions = get_default_permissions(&user.role);
    UserInfo {
        id: user.id,
        username: user.username,
        display_name: user.display_name,
        role: user.role,
        permissions,
        is_active: user.is_active,
    }
}

/// GET /api/users - all accounts
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<UserInfo>>> {
    let users = user::find_all(state.pool()).await?;
    Ok(Json(users.into_iter().map(user_info).collect()))
}

/// POST /api/users - create an account
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<UserCreate>,
) -> AppResult<Json<UserInfo>> {
    validate_required_text(&payload.username, "username", MAX_USERNAME_LEN)?;
    validate_password(&payload.password)?;
    validate_optional_text(&payload.display_name, "display_name", MAX_TITLE_LEN)?;
    if !is_valid_role(&payload.role) {
        return Err(AppError::new(ErrorCode::RoleInvalid));
    }

    if user::find_by_username(state.pool(), &payload.username)
        .await?
        .is_some()
    {
        return Err(AppError::new(ErrorCode::UsernameExists));
    }

    let created = user::create(state.pool(), payload).await?;
    tracing::info!("User created: {} ({})", created.username, created.role);
    Ok(Json(user_info(created)))
}

/// PUT /api/users/{id} - update an account
///
/// The seeded admin account cannot be demoted or deactivated.
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<UserUpdate>,
) -> AppResult<Json<UserInfo>> {
    let target = user::find_by_id(state.pool(), id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::UserNotFound))?;

    if target.is_system {
        let demoted = matches!(&payload.role, Some(role) if role != "admin");
        let deactivated = payload.is_active == Some(false);
        if demoted || deactivated {
            return Err(AppError::new(ErrorCode::SeedAdminProtected));
        }
    }

    if let Some(role) = &payload.role
        && !is_valid_role(role)
    {
        return Err(AppError::new(ErrorCode::RoleInvalid));
    }
    if let Some(password) = &payload.password {
        validate_password(password)?;
    }
    validate_optional_text(&payload.display_name, "display_name", MAX_TITLE_LEN)?;

    let updated = user::update(state.pool(), id, payload).await?;
    Ok(Json(user_info(updated)))
}
