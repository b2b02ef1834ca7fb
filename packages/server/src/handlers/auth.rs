use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use sea_orm::*;
use tracing::instrument;

use crate::entity::{role, user};
use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthUser;
use crate::extractors::request::AppJson;
use crate::models::auth::{
    LoginRequest, LoginResponse, MeResponse, RegisterRequest, RegisterResponse,
    validate_login_request, validate_register_request,
};
use crate::state::AppState;
use crate::utils::account::{authenticate, role_permissions, token_owner};
use crate::utils::{hash, jwt};

#[utoipa::path(
    post,
    path = "/register",
    tag = "Auth",
    operation_id = "register",
    summary = "Register a new account",
    description = "Every account starts as a `student`. Teachers are promoted out of band.",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Student account created", body = RegisterResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 409, description = "Username taken (USERNAME_TAKEN)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(username = %payload.username))]
pub async fn register(
    State(state): State<AppState>,
    AppJson(payload): AppJson<RegisterRequest>,
) -> Result<impl IntoResponse, AppError> {
    validate_register_request(&payload)?;

    let password = hash::hash_password(&payload.password)
        .map_err(|e| AppError::Internal(format!("Password hash error: {e}")))?;

    let account = user::ActiveModel {
        username: Set(payload.username.trim().to_string()),
        password: Set(password),
        role: Set(role::DEFAULT_ROLE.to_string()),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    }
    .insert(&state.db)
    .await
    .map_err(|e| match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => AppError::UsernameTaken,
        _ => AppError::from(e),
    })?;

    tracing::info!(user_id = account.id, "Student account registered");
    Ok((StatusCode::CREATED, Json(RegisterResponse::from(account))))
}

#[utoipa::path(
    post,
    path = "/login",
    tag = "Auth",
    operation_id = "login",
    summary = "Log in and obtain a bearer token",
    description = "The token carries the role and its permissions as they stand at login time.",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Logged in", body = LoginResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Bad credentials (INVALID_CREDENTIALS)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(username = %payload.username))]
pub async fn login(
    State(state): State<AppState>,
    AppJson(payload): AppJson<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    validate_login_request(&payload)?;

    let account = authenticate(&state.db, &payload.username, &payload.password).await?;
    let permissions = role_permissions(&state.db, &account.role).await?;

    let auth = &state.config.auth;
    let token = jwt::sign(
        account.id,
        &account.username,
        &account.role,
        permissions.clone(),
        &auth.jwt_secret,
        auth.token_ttl_hours,
    )
    .map_err(|e| AppError::Internal(format!("JWT sign error: {e}")))?;

    Ok(Json(LoginResponse {
        token,
        username: account.username,
        role: account.role,
        permissions,
    }))
}

#[utoipa::path(
    get,
    path = "/me",
    tag = "Auth",
    operation_id = "me",
    summary = "Current account",
    description = "Reads role and permissions from the database, so a promotion shows up before the token is reissued. `roles_enforced` reports whether permission checks are active.",
    responses(
        (status = 200, description = "Authenticated account", body = MeResponse),
        (status = 401, description = "Unauthorized or account removed (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user), fields(user_id = auth_user.user_id))]
pub async fn me(
    auth_user: AuthUser,
    State(state): State<AppState>,
) -> Result<Json<MeResponse>, AppError> {
    let account = token_owner(&state.db, auth_user.user_id).await?;
    let permissions = role_permissions(&state.db, &account.role).await?;

    Ok(Json(MeResponse {
        id: account.id,
        username: account.username,
        role: account.role,
        permissions,
        roles_enforced: auth_user.roles_enforced,
    }))
}
