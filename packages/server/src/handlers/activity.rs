use axum::Json;
use axum::extract::rejection::PathRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use sea_orm::*;
use tracing::instrument;

use crate::entity::activity;
use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthUser;
use crate::extractors::request::{AppJson, AppPath};
use crate::models::activity::*;
use crate::models::shared::{DEFAULT_TOTAL_SCORE, validate_scores};
use crate::models::template::TemplateResponse;
use crate::state::AppState;
use crate::utils::activity::{
    activity_response, activity_responses, find_activity, find_classroom, find_template,
    resolve_teams, set_activity_teams,
};

#[utoipa::path(
    post,
    path = "/",
    tag = "Activities",
    operation_id = "createActivity",
    summary = "Create a new activity",
    description = "Creates an activity in a class and assigns it to one or more teams. Requires `activity:create` permission when role enforcement is on. The team list must be non-empty. If any team does not exist nothing is persisted.",
    request_body = CreateActivityRequest,
    responses(
        (status = 201, description = "Activity created", body = ActivityResponse),
        (status = 400, description = "Invalid or missing data, empty team list (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Class or one or more teams not found (NOT_FOUND)", body = ErrorBody),
        (status = 500, description = "Unexpected error (INTERNAL_ERROR)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, payload), fields(title = %payload.title, classroom_id = payload.classroom_id))]
pub async fn create_activity(
    auth_user: AuthUser,
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateActivityRequest>,
) -> Result<impl IntoResponse, AppError> {
    auth_user.require_permission("activity:create")?;
    validate_create_activity(&payload)?;

    let txn = state.db.begin().await?;
    find_classroom(&txn, payload.classroom_id).await?;
    let team_ids = resolve_teams(&txn, &payload.team_id).await?;

    let now = chrono::Utc::now();
    let new_activity = activity::ActiveModel {
        title: Set(payload.title.trim().to_string()),
        description: Set(payload.description),
        instructions: Set(payload.instructions),
        classroom_id: Set(payload.classroom_id),
        due_date: Set(payload.due_date),
        evaluation: Set(payload.evaluation),
        total_score: Set(payload.total_score.unwrap_or(DEFAULT_TOTAL_SCORE)),
        submission_status: Set(payload.submission_status),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };

    let model = new_activity.insert(&txn).await?;
    set_activity_teams(&txn, model.id, &team_ids).await?;
    txn.commit().await?;

    tracing::info!(activity_id = model.id, teams = team_ids.len(), "Activity created");
    Ok((
        StatusCode::CREATED,
        Json(ActivityResponse::new(model, team_ids)),
    ))
}

#[utoipa::path(
    get,
    path = "/{class_id}/activities",
    tag = "Activities",
    operation_id = "listClassActivities",
    summary = "List all activities of a class",
    description = "Returns every activity whose owning class matches, ordered by ID. A class without activities yields an empty list.",
    params(("class_id" = i32, Path, description = "Class ID")),
    responses(
        (status = 200, description = "List of activities", body = Vec<ActivityResponse>),
        (status = 400, description = "Class ID not provided (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 500, description = "Unexpected error (INTERNAL_ERROR)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, _auth_user))]
pub async fn list_class_activities(
    _auth_user: AuthUser,
    State(state): State<AppState>,
    AppPath(class_id): AppPath<i32>,
) -> Result<Json<Vec<ActivityResponse>>, AppError> {
    let models = activity::Entity::find()
        .filter(activity::Column::ClassroomId.eq(class_id))
        .order_by_asc(activity::Column::Id)
        .all(&state.db)
        .await?;

    Ok(Json(activity_responses(&state.db, models).await?))
}

#[utoipa::path(
    post,
    path = "/{class_id}/activities/from_template",
    tag = "Activities",
    operation_id = "createActivityFromTemplate",
    summary = "Create activity from template",
    description = "Copies an activity template into a new activity owned by the class. `team_ids`, `due_date`, `evaluation` and `total_score` override the template when present. Requires `activity:create` permission when role enforcement is on.",
    params(("class_id" = i32, Path, description = "Class ID")),
    request_body = CreateFromTemplateRequest,
    responses(
        (status = 201, description = "Activity created", body = FromTemplateResponse),
        (status = 400, description = "Template ID or Class ID not provided (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Template, class or team not found (NOT_FOUND)", body = ErrorBody),
        (status = 500, description = "Unexpected error (INTERNAL_ERROR)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, class_id, payload))]
pub async fn create_activity_from_template(
    auth_user: AuthUser,
    State(state): State<AppState>,
    class_id: Result<Path<i32>, PathRejection>,
    AppJson(payload): AppJson<CreateFromTemplateRequest>,
) -> Result<impl IntoResponse, AppError> {
    auth_user.require_permission("activity:create")?;
    let Path(class_id) = class_id.map_err(|_| missing_template_or_class())?;
    let template_id = validate_create_from_template(&payload)?;

    let txn = state.db.begin().await?;
    let class = find_classroom(&txn, class_id).await?;
    let template = find_template(&txn, template_id).await?;
    let team_ids = resolve_teams(&txn, &payload.team_ids).await?;

    let due_date = payload.due_date.or(template.due_date);
    let evaluation = payload.evaluation.or(template.evaluation);
    let total_score = payload.total_score.unwrap_or(template.total_score);
    validate_scores(total_score, evaluation)?;

    let now = chrono::Utc::now();
    let new_activity = activity::ActiveModel {
        title: Set(template.title.clone()),
        description: Set(template.description.clone()),
        instructions: Set(template.instructions.clone()),
        classroom_id: Set(class.id),
        due_date: Set(due_date),
        evaluation: Set(evaluation),
        total_score: Set(total_score),
        submission_status: Set(false),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };

    let model = new_activity.insert(&txn).await?;
    set_activity_teams(&txn, model.id, &team_ids).await?;
    txn.commit().await?;

    tracing::info!(activity_id = model.id, template_id, "Activity created from template");
    Ok((
        StatusCode::CREATED,
        Json(FromTemplateResponse {
            success: "Activity created from template",
            activity: ActivityResponse::new(model, team_ids),
            template: TemplateResponse::from(template),
        }),
    ))
}

#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Activities",
    operation_id = "getActivity",
    summary = "Get an activity by ID",
    params(("id" = i32, Path, description = "Activity ID")),
    responses(
        (status = 200, description = "Activity details", body = ActivityResponse),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "Activity not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, _auth_user))]
pub async fn get_activity(
    _auth_user: AuthUser,
    State(state): State<AppState>,
    AppPath(id): AppPath<i32>,
) -> Result<Json<ActivityResponse>, AppError> {
    let model = find_activity(&state.db, id).await?;
    Ok(Json(activity_response(&state.db, model).await?))
}

#[utoipa::path(
    patch,
    path = "/{id}",
    tag = "Activities",
    operation_id = "updateActivity",
    summary = "Update an existing activity",
    description = "Partially updates an activity using PATCH semantics. `team_id` replaces the team set. `submission_status` toggles the submitted flag. Requires `activity:edit` permission when role enforcement is on. An empty payload returns the current resource unchanged.",
    params(("id" = i32, Path, description = "Activity ID")),
    request_body = UpdateActivityRequest,
    responses(
        (status = 200, description = "Activity updated", body = ActivityResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Activity or team not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, payload))]
pub async fn update_activity(
    auth_user: AuthUser,
    State(state): State<AppState>,
    AppPath(id): AppPath<i32>,
    AppJson(payload): AppJson<UpdateActivityRequest>,
) -> Result<Json<ActivityResponse>, AppError> {
    auth_user.require_permission("activity:edit")?;
    validate_update_activity(&payload)?;

    if payload == UpdateActivityRequest::default() {
        let existing = find_activity(&state.db, id).await?;
        return Ok(Json(activity_response(&state.db, existing).await?));
    }

    let txn = state.db.begin().await?;
    let existing = find_activity(&txn, id).await?;

    // Cross-field score validation against existing values
    let effective_total = payload.total_score.unwrap_or(existing.total_score);
    let effective_evaluation = payload.evaluation.unwrap_or(existing.evaluation);
    validate_scores(effective_total, effective_evaluation)?;

    let team_ids = match payload.team_id {
        Some(ref ids) => Some(resolve_teams(&txn, ids).await?),
        None => None,
    };

    let mut active: activity::ActiveModel = existing.into();

    if let Some(ref title) = payload.title {
        active.title = Set(title.trim().to_string());
    }
    if let Some(description) = payload.description {
        active.description = Set(description);
    }
    if let Some(instructions) = payload.instructions {
        active.instructions = Set(instructions);
    }
    if let Some(due_date) = payload.due_date {
        active.due_date = Set(due_date);
    }
    if let Some(evaluation) = payload.evaluation {
        active.evaluation = Set(evaluation);
    }
    if let Some(total_score) = payload.total_score {
        active.total_score = Set(total_score);
    }
    if let Some(submission_status) = payload.submission_status {
        active.submission_status = Set(submission_status);
    }
    active.updated_at = Set(chrono::Utc::now());

    let model = active.update(&txn).await?;
    if let Some(ref ids) = team_ids {
        set_activity_teams(&txn, model.id, ids).await?;
    }
    let response = activity_response(&txn, model).await?;
    txn.commit().await?;

    Ok(Json(response))
}

#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Activities",
    operation_id = "deleteActivity",
    summary = "Delete an activity by ID",
    description = "Permanently deletes an activity and its team assignments. Requires `activity:delete` permission when role enforcement is on.",
    params(("id" = i32, Path, description = "Activity ID")),
    responses(
        (status = 204, description = "Activity deleted"),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Activity not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user))]
pub async fn delete_activity(
    auth_user: AuthUser,
    State(state): State<AppState>,
    AppPath(id): AppPath<i32>,
) -> Result<impl IntoResponse, AppError> {
    auth_user.require_permission("activity:delete")?;

    let txn = state.db.begin().await?;
    find_activity(&txn, id).await?;
    set_activity_teams(&txn, id, &[]).await?;
    activity::Entity::delete_by_id(id).exec(&txn).await?;
    txn.commit().await?;

    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    put,
    path = "/{id}/evaluation",
    tag = "Activities",
    operation_id = "addEvaluation",
    summary = "Grade an activity",
    description = "Sets the awarded score. Must lie between 0 and the activity's `total_score`. Requires `activity:grade` permission when role enforcement is on.",
    params(("id" = i32, Path, description = "Activity ID")),
    request_body = EvaluationRequest,
    responses(
        (status = 200, description = "Activity graded", body = ActivityResponse),
        (status = 400, description = "Evaluation out of range (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Activity not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, payload), fields(evaluation = payload.evaluation))]
pub async fn add_evaluation(
    auth_user: AuthUser,
    State(state): State<AppState>,
    AppPath(id): AppPath<i32>,
    AppJson(payload): AppJson<EvaluationRequest>,
) -> Result<Json<ActivityResponse>, AppError> {
    auth_user.require_permission("activity:grade")?;
    set_evaluation(&state.db, id, Some(payload.evaluation)).await
}

#[utoipa::path(
    delete,
    path = "/{id}/evaluation",
    tag = "Activities",
    operation_id = "deleteEvaluation",
    summary = "Remove an activity's grade",
    params(("id" = i32, Path, description = "Activity ID")),
    responses(
        (status = 200, description = "Grade removed", body = ActivityResponse),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Activity not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user))]
pub async fn delete_evaluation(
    auth_user: AuthUser,
    State(state): State<AppState>,
    AppPath(id): AppPath<i32>,
) -> Result<Json<ActivityResponse>, AppError> {
    auth_user.require_permission("activity:grade")?;
    set_evaluation(&state.db, id, None).await
}

async fn set_evaluation(
    db: &DatabaseConnection,
    id: i32,
    evaluation: Option<i32>,
) -> Result<Json<ActivityResponse>, AppError> {
    let txn = db.begin().await?;
    let existing = find_activity(&txn, id).await?;
    validate_scores(existing.total_score, evaluation)?;

    let mut active: activity::ActiveModel = existing.into();
    active.evaluation = Set(evaluation);
    active.updated_at = Set(chrono::Utc::now());
    let model = active.update(&txn).await?;

    let response = activity_response(&txn, model).await?;
    txn.commit().await?;
    Ok(Json(response))
}
