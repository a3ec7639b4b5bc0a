//! Authentication Handlers

use std::time::Duration;

use axum::{Json, extract::State};

use crate::auth::{CurrentUser, get_default_permissions, password};
use crate::core::ServerState;
use crate::db::repository::user;
use crate::security_log;
use shared::error::{AppError, ErrorCode};
use shared::models::{LoginRequest, LoginResponse, User, UserInfo};

/// Fixed delay for authentication to prevent timing attacks
const AUTH_FIXED_DELAY_MS: u64 = 500;

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

/// POST /api/auth/login - authenticate and issue a JWT
///
/// Failures answer with one unified message so usernames cannot be
/// enumerated; the fixed delay runs before any outcome is revealed.
pub async fn login(
    State(state): State<ServerState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let found = user::find_by_username(state.pool(), req.username.trim()).await?;

    tokio::time::sleep(Duration::from_millis(AUTH_FIXED_DELAY_MS)).await;

    let account = match found {
        Some(account) => account,
        None => {
            security_log!(
                "WARN",
                "login_failed",
                username = req.username.clone(),
                reason = "user_not_found"
            );
            return Err(AppError::invalid_credentials());
        }
    };

    if !account.is_active {
        security_log!(
            "WARN",
            "login_failed",
            username = account.username.clone(),
            reason = "account_disabled"
        );
        return Err(AppError::new(ErrorCode::AccountDisabled));
    }

    let password_valid = password::verify_password(&req.password, &account.hash_pass)
        .map_err(|e| AppError::internal(format!("Password verification failed: {}", e)))?;

    if !password_valid {
        security_log!(
            "WARN",
            "login_failed",
            username = account.username.clone(),
            reason = "invalid_credentials"
        );
        return Err(AppError::invalid_credentials());
    }

    let permissions = get_default_permissions(&account.role);
    let token = state
        .get_jwt_service()
        .generate_token(account.id, &account.username, &account.role, &permissions)
        .map_err(|e| AppError::internal(format!("Failed to generate token: {}", e)))?;

    tracing::info!(
        user_id = account.id,
        username = %account.username,
        role = %account.role,
        "User logged in"
    );

    Ok(Json(LoginResponse {
        token,
        user: user_info(account),
    }))
}

/// GET /api/auth/me - fresh account info for the token holder
pub async fn me(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> Result<Json<UserInfo>, AppError> {
    let account = user::find_by_id(state.pool(), user.id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::UserNotFound))?;
    Ok(Json(user_info(account)))
}
