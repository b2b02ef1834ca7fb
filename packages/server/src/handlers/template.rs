use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use sea_orm::*;
use tracing::instrument;

use crate::entity::activity_template;
use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthUser;
use crate::extractors::request::{AppJson, AppPath};
use crate::models::shared::DEFAULT_TOTAL_SCORE;
use crate::models::template::*;
use crate::state::AppState;
use crate::utils::activity::find_template;

#[utoipa::path(
    post,
    path = "/",
    tag = "Templates",
    operation_id = "createTemplate",
    summary = "Create an activity template",
    description = "Requires `template:create` permission when role enforcement is on.",
    request_body = CreateTemplateRequest,
    responses(
        (status = 201, description = "Template created", body = TemplateResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, payload), fields(title = %payload.title))]
pub async fn create_template(
    auth_user: AuthUser,
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateTemplateRequest>,
) -> Result<impl IntoResponse, AppError> {
    auth_user.require_permission("template:create")?;
    validate_create_template(&payload)?;

    let model = activity_template::ActiveModel {
        title: Set(payload.title.trim().to_string()),
        description: Set(payload.description),
        instructions: Set(payload.instructions),
        due_date: Set(payload.due_date),
        evaluation: Set(payload.evaluation),
        total_score: Set(payload.total_score.unwrap_or(DEFAULT_TOTAL_SCORE)),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    }
    .insert(&state.db)
    .await?;

    Ok((StatusCode::CREATED, Json(TemplateResponse::from(model))))
}

#[utoipa::path(
    get,
    path = "/",
    tag = "Templates",
    operation_id = "listTemplates",
    summary = "List activity templates",
    responses(
        (status = 200, description = "List of templates", body = Vec<TemplateResponse>),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, _auth_user))]
pub async fn list_templates(
    _auth_user: AuthUser,
    State(state): State<AppState>,
) -> Result<Json<Vec<TemplateResponse>>, AppError> {
    let rows = activity_template::Entity::find()
        .order_by_asc(activity_template::Column::Id)
        .all(&state.db)
        .await?;
    Ok(Json(rows.into_iter().map(Into::into).collect()))
}

#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Templates",
    operation_id = "getTemplate",
    summary = "Get an activity template by ID",
    params(("id" = i32, Path, description = "Template ID")),
    responses(
        (status = 200, description = "Template details", body = TemplateResponse),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "Template not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, _auth_user))]
pub async fn get_template(
    _auth_user: AuthUser,
    State(state): State<AppState>,
    AppPath(id): AppPath<i32>,
) -> Result<Json<TemplateResponse>, AppError> {
    Ok(Json(find_template(&state.db, id).await?.into()))
}
