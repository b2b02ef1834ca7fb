use axum::Json;
use axum::extract::State;
use tracing::instrument;

use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthUser;
use crate::extractors::request::AppPath;
use crate::models::activity::ActivityResponse;
use crate::state::AppState;
use crate::utils::activity::{activity_responses, find_classroom, find_team, find_team_activities};

#[utoipa::path(
    get,
    path = "/{class_id}/teams/{team_id}/activities",
    tag = "Team Activities",
    operation_id = "listTeamActivities",
    summary = "List all activities of a team",
    description = "Returns the activities of the class that are assigned to the team, ordered by ID. The class and the team are checked separately so the 404 names whichever is missing.",
    params(
        ("class_id" = i32, Path, description = "Class ID"),
        ("team_id" = i32, Path, description = "Team ID"),
    ),
    responses(
        (status = 200, description = "List of activities", body = Vec<ActivityResponse>),
        (status = 400, description = "Class ID or team ID missing or invalid (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "Class or team not found (NOT_FOUND)", body = ErrorBody),
        (status = 500, description = "Unexpected error (INTERNAL_ERROR)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, _auth_user))]
pub async fn list_team_activities(
    _auth_user: AuthUser,
    State(state): State<AppState>,
    AppPath((class_id, team_id)): AppPath<(i32, i32)>,
) -> Result<Json<Vec<ActivityResponse>>, AppError> {
    team_scoped(&state, class_id, team_id, false).await
}

#[utoipa::path(
    get,
    path = "/{class_id}/teams/{team_id}/submitted_activities",
    tag = "Team Activities",
    operation_id = "listSubmittedTeamActivities",
    summary = "List all submitted activities of a team",
    description = "Same as listTeamActivities, restricted to activities whose `submission_status` is true.",
    params(
        ("class_id" = i32, Path, description = "Class ID"),
        ("team_id" = i32, Path, description = "Team ID"),
    ),
    responses(
        (status = 200, description = "List of submitted activities", body = Vec<ActivityResponse>),
        (status = 400, description = "Class ID or team ID missing or invalid (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "Class or team not found (NOT_FOUND)", body = ErrorBody),
        (status = 500, description = "Unexpected error (INTERNAL_ERROR)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, _auth_user))]
pub async fn list_submitted_activities(
    _auth_user: AuthUser,
    State(state): State<AppState>,
    AppPath((class_id, team_id)): AppPath<(i32, i32)>,
) -> Result<Json<Vec<ActivityResponse>>, AppError> {
    team_scoped(&state, class_id, team_id, true).await
}

async fn team_scoped(
    state: &AppState,
    class_id: i32,
    team_id: i32,
    submitted_only: bool,
) -> Result<Json<Vec<ActivityResponse>>, AppError> {
    find_classroom(&state.db, class_id).await?;
    find_team(&state.db, team_id).await?;

    let models = find_team_activities(&state.db, class_id, team_id, submitted_only).await?;
    Ok(Json(activity_responses(&state.db, models).await?))
}
