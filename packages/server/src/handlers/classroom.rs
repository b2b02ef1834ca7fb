use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use sea_orm::*;
use tracing::instrument;

use crate::entity::{classroom, team};
use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthUser;
use crate::extractors::request::{AppJson, AppPath};
use crate::models::classroom::*;
use crate::state::AppState;
use crate::utils::activity::find_classroom;

#[utoipa::path(
    post,
    path = "/",
    tag = "Classes",
    operation_id = "createClass",
    summary = "Create a class",
    description = "Requires `class:create` permission when role enforcement is on.",
    request_body = CreateClassroomRequest,
    responses(
        (status = 201, description = "Class created", body = ClassroomResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, payload), fields(name = %payload.name))]
pub async fn create_classroom(
    auth_user: AuthUser,
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateClassroomRequest>,
) -> Result<impl IntoResponse, AppError> {
    auth_user.require_permission("class:create")?;
    validate_create_classroom(&payload)?;

    let model = classroom::ActiveModel {
        name: Set(payload.name.trim().to_string()),
        description: Set(payload.description),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    }
    .insert(&state.db)
    .await?;

    Ok((StatusCode::CREATED, Json(ClassroomResponse::from(model))))
}

#[utoipa::path(
    get,
    path = "/",
    tag = "Classes",
    operation_id = "listClasses",
    summary = "List classes",
    responses(
        (status = 200, description = "List of classes", body = Vec<ClassroomResponse>),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, _auth_user))]
pub async fn list_classrooms(
    _auth_user: AuthUser,
    State(state): State<AppState>,
) -> Result<Json<Vec<ClassroomResponse>>, AppError> {
    let rows = classroom::Entity::find()
        .order_by_asc(classroom::Column::Id)
        .all(&state.db)
        .await?;
    Ok(Json(rows.into_iter().map(Into::into).collect()))
}

#[utoipa::path(
    get,
    path = "/{class_id}",
    tag = "Classes",
    operation_id = "getClass",
    summary = "Get a class by ID",
    params(("class_id" = i32, Path, description = "Class ID")),
    responses(
        (status = 200, description = "Class details", body = ClassroomResponse),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "Class not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, _auth_user))]
pub async fn get_classroom(
    _auth_user: AuthUser,
    State(state): State<AppState>,
    AppPath(class_id): AppPath<i32>,
) -> Result<Json<ClassroomResponse>, AppError> {
    Ok(Json(find_classroom(&state.db, class_id).await?.into()))
}

#[utoipa::path(
    post,
    path = "/{class_id}/teams",
    tag = "Classes",
    operation_id = "createTeam",
    summary = "Create a team in a class",
    description = "Requires `class:manage` permission when role enforcement is on.",
    params(("class_id" = i32, Path, description = "Class ID")),
    request_body = CreateTeamRequest,
    responses(
        (status = 201, description = "Team created", body = TeamResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Class not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, payload), fields(name = %payload.name))]
pub async fn create_team(
    auth_user: AuthUser,
    State(state): State<AppState>,
    AppPath(class_id): AppPath<i32>,
    AppJson(payload): AppJson<CreateTeamRequest>,
) -> Result<impl IntoResponse, AppError> {
    auth_user.require_permission("class:manage")?;
    validate_create_team(&payload)?;

    find_classroom(&state.db, class_id).await?;
    let model = team::ActiveModel {
        name: Set(payload.name.trim().to_string()),
        classroom_id: Set(class_id),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    }
    .insert(&state.db)
    .await?;

    Ok((StatusCode::CREATED, Json(TeamResponse::from(model))))
}

#[utoipa::path(
    get,
    path = "/{class_id}/teams",
    tag = "Classes",
    operation_id = "listTeams",
    summary = "List the teams of a class",
    params(("class_id" = i32, Path, description = "Class ID")),
    responses(
        (status = 200, description = "List of teams", body = Vec<TeamResponse>),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "Class not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, _auth_user))]
pub async fn list_teams(
    _auth_user: AuthUser,
    State(state): State<AppState>,
    AppPath(class_id): AppPath<i32>,
) -> Result<Json<Vec<TeamResponse>>, AppError> {
    find_classroom(&state.db, class_id).await?;

    let rows = team::Entity::find()
        .filter(team::Column::ClassroomId.eq(class_id))
        .order_by_asc(team::Column::Id)
        .all(&state.db)
        .await?;
    Ok(Json(rows.into_iter().map(Into::into).collect()))
}
