//! Auth API Handlers

use axum::{Extension, Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};
use shared::models::UserPublic;

use crate::auth::{CurrentUser, hash_password, verify_password};
use crate::core::ServerState;
use crate::utils::{AppError, AppResult};

/// 注册请求
#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    pub email: String,
    pub password: String,
    pub name: Option<String>,
}

/// 登录请求
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// 更新个人资料请求
#[derive(Debug, Deserialize)]
pub struct UpdateMeRequest {
    pub name: Option<String>,
    pub password: Option<String>,
}

/// 令牌 + 用户信息响应
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: UserPublic,
}

/// POST /auth/signup - 注册新用户
pub async fn signup(
    State(state): State<ServerState>,
    Json(payload): Json<SignupRequest>,
) -> AppResult<(StatusCode, Json<AuthResponse>)> {
    if payload.email.trim().is_empty() || payload.password.is_empty() {
        return Err(AppError::validation("email and password required"));
    }
    if state.db.user_by_email(&payload.email).is_some() {
        return Err(AppError::conflict("email already exists"));
    }

    let hash = hash_password(&payload.password)
        .map_err(|e| AppError::internal(format!("Password hashing failed: {}", e)))?;
    let user = state.db.create_user(payload.email, payload.name, hash);
    state.user_file.persist_logged(&state.db);

    let token = state
        .jwt_service
        .generate_token(&user)
        .map_err(|e| AppError::internal(e.to_string()))?;

    tracing::info!(user_id = user.id, email = %user.email, "User registered");

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            token,
            user: UserPublic::from(&user),
        }),
    ))
}

/// POST /auth/login - 登录
pub async fn login(
    State(state): State<ServerState>,
    Json(payload): Json<LoginRequest>,
) -> AppResult<Json<AuthResponse>> {
    if payload.email.trim().is_empty() || payload.password.is_empty() {
        return Err(AppError::validation("email and password required"));
    }

    let user = state
        .db
        .user_by_email(&payload.email)
        .ok_or_else(AppError::invalid_credentials)?;

    if !verify_password(&payload.password, &user.password_hash) {
        tracing::warn!(target: "security", email = %payload.email, "Login failed");
        return Err(AppError::invalid_credentials());
    }

    let token = state
        .jwt_service
        .generate_token(&user)
        .map_err(|e| AppError::internal(e.to_string()))?;

    Ok(Json(AuthResponse {
        token,
        user: UserPublic::from(&user),
    }))
}

/// GET /auth/me - 当前用户资料
pub async fn me(
    State(state): State<ServerState>,
    Extension(current): Extension<CurrentUser>,
) -> AppResult<Json<UserPublic>> {
    let user = state
        .db
        .user_by_email(&current.email)
        .ok_or_else(|| AppError::not_found("User not found"))?;
    Ok(Json(UserPublic::from(&user)))
}

/// PATCH /auth/me - 更新姓名或密码
pub async fn update_me(
    State(state): State<ServerState>,
    Extension(current): Extension<CurrentUser>,
    Json(payload): Json<UpdateMeRequest>,
) -> AppResult<Json<UserPublic>> {
    let password_hash = match payload.password.as_deref() {
        Some(p) if !p.is_empty() => Some(
            hash_password(p)
                .map_err(|e| AppError::internal(format!("Password hashing failed: {}", e)))?,
        ),
        _ => None,
    };

    let user = state
        .db
        .update_user_profile(&current.email, payload.name, password_hash)
        .ok_or_else(|| AppError::not_found("User not found"))?;
    state.user_file.persist_logged(&state.db);

    Ok(Json(UserPublic::from(&user)))
}
