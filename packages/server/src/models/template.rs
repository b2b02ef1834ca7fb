use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::shared::{DEFAULT_TOTAL_SCORE, validate_scores, validate_title};
use crate::entity::activity_template;
use crate::error::AppError;

#[derive(Deserialize, utoipa::ToSchema)]
pub struct CreateTemplateRequest {
    #[schema(example = "Weekly reading reflection")]
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub instructions: Option<String>,
    pub due_date: Option<DateTime<Utc>>,
    pub evaluation: Option<i32>,
    pub total_score: Option<i32>,
}

pub fn validate_create_template(payload: &CreateTemplateRequest) -> Result<(), AppError> {
    validate_title(&payload.title, "Title")?;
    validate_scores(
        payload.total_score.unwrap_or(DEFAULT_TOTAL_SCORE),
        payload.evaluation,
    )
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct TemplateResponse {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub instructions: Option<String>,
    pub due_date: Option<DateTime<Utc>>,
    pub evaluation: Option<i32>,
    pub total_score: i32,
    pub created_at: DateTime<Utc>,
}

impl From<activity_template::Model> for TemplateResponse {
    fn from(m: activity_template::Model) -> Self {
        Self {
            id: m.id,
            title: m.title,
            description: m.description,
            instructions: m.instructions,
            due_date: m.due_date,
            evaluation: m.evaluation,
            total_score: m.total_score,
            created_at: m.created_at,
        }
    }
}
