use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::shared::{
    DEFAULT_TOTAL_SCORE, double_option, validate_scores, validate_title, validate_unique_ids,
};
use super::template::TemplateResponse;
use crate::entity::activity;
use crate::error::AppError;

/// Request body for creating an activity directly.
#[derive(Deserialize, utoipa::ToSchema)]
pub struct CreateActivityRequest {
    #[schema(example = "Photosynthesis lab report")]
    pub title: String,
    /// Markdown description.
    #[serde(default)]
    pub description: String,
    pub instructions: Option<String>,
    /// Owning class.
    #[schema(example = 1)]
    pub classroom_id: i32,
    /// Teams the activity is assigned to. Must be non-empty.
    #[serde(default)]
    #[schema(example = json!([1, 2]))]
    pub team_id: Vec<i32>,
    pub due_date: Option<DateTime<Utc>>,
    pub evaluation: Option<i32>,
    /// Maximum attainable score. Default: 100.
    pub total_score: Option<i32>,
    #[serde(default)]
    pub submission_status: bool,
}

pub fn validate_create_activity(payload: &CreateActivityRequest) -> Result<(), AppError> {
    validate_title(&payload.title, "Title")?;
    validate_scores(
        payload.total_score.unwrap_or(DEFAULT_TOTAL_SCORE),
        payload.evaluation,
    )?;
    validate_team_ids(&payload.team_id)
}

/// A team list must be present, non-empty and free of duplicates.
pub fn validate_team_ids(team_ids: &[i32]) -> Result<(), AppError> {
    if team_ids.is_empty() {
        return Err(AppError::Validation(
            "Invalid or empty Team IDs provided".into(),
        ));
    }
    validate_unique_ids(team_ids, "team")
}

/// Partial update of an activity.
#[derive(Deserialize, Default, PartialEq, utoipa::ToSchema)]
pub struct UpdateActivityRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub instructions: Option<Option<String>>,
    /// Replaces the whole team set when present.
    pub team_id: Option<Vec<i32>>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<DateTime<Utc>>)]
    pub due_date: Option<Option<DateTime<Utc>>>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<i32>)]
    pub evaluation: Option<Option<i32>>,
    pub total_score: Option<i32>,
    pub submission_status: Option<bool>,
}

pub fn validate_update_activity(payload: &UpdateActivityRequest) -> Result<(), AppError> {
    if let Some(ref title) = payload.title {
        validate_title(title, "Title")?;
    }
    if let Some(ref team_ids) = payload.team_id {
        validate_team_ids(team_ids)?;
    }
    Ok(())
}

/// Request body for creating an activity from a template.
#[derive(Deserialize, Default, utoipa::ToSchema)]
pub struct CreateFromTemplateRequest {
    #[schema(example = 3)]
    pub template_id: Option<i32>,
    /// Optional teams to assign.
    #[serde(default)]
    pub team_ids: Vec<i32>,
    pub due_date: Option<DateTime<Utc>>,
    pub evaluation: Option<i32>,
    pub total_score: Option<i32>,
}

/// Raised for a missing `template_id` and for a class ID that does not parse.
pub fn missing_template_or_class() -> AppError {
    AppError::Validation("Template ID or Class ID not provided".into())
}

pub fn validate_create_from_template(payload: &CreateFromTemplateRequest) -> Result<i32, AppError> {
    let template_id = payload
        .template_id
        .ok_or_else(missing_template_or_class)?;
    validate_unique_ids(&payload.team_ids, "team")?;
    Ok(template_id)
}

/// Request body for grading an activity.
#[derive(Deserialize, utoipa::ToSchema)]
pub struct EvaluationRequest {
    #[schema(example = 87)]
    pub evaluation: i32,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct ActivityResponse {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub instructions: Option<String>,
    pub classroom_id: i32,
    /// Assigned team IDs, ascending.
    #[serde(rename = "team_id")]
    #[schema(example = json!([1, 2]))]
    pub team_ids: Vec<i32>,
    pub due_date: Option<DateTime<Utc>>,
    pub evaluation: Option<i32>,
    pub total_score: i32,
    pub submission_status: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ActivityResponse {
    pub fn new(m: activity::Model, team_ids: Vec<i32>) -> Self {
        Self {
            id: m.id,
            title: m.title,
            description: m.description,
            instructions: m.instructions,
            classroom_id: m.classroom_id,
            team_ids,
            due_date: m.due_date,
            evaluation: m.evaluation,
            total_score: m.total_score,
            submission_status: m.submission_status,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct FromTemplateResponse {
    #[schema(example = "Activity created from template")]
    pub success: &'static str,
    pub activity: ActivityResponse,
    pub template: TemplateResponse,
}
