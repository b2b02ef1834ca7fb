use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::shared::validate_title;
use crate::entity::{classroom, team};
use crate::error::AppError;

#[derive(Deserialize, utoipa::ToSchema)]
pub struct CreateClassroomRequest {
    #[schema(example = "Biology 101")]
    pub name: String,
    #[serde(default)]
    pub description: String,
}

pub fn validate_create_classroom(payload: &CreateClassroomRequest) -> Result<(), AppError> {
    validate_title(&payload.name, "Name")
}

#[derive(Deserialize, utoipa::ToSchema)]
pub struct CreateTeamRequest {
    #[schema(example = "Team Chlorophyll")]
    pub name: String,
}

pub fn validate_create_team(payload: &CreateTeamRequest) -> Result<(), AppError> {
    validate_title(&payload.name, "Name")
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct ClassroomResponse {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

impl From<classroom::Model> for ClassroomResponse {
    fn from(m: classroom::Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            description: m.description,
            created_at: m.created_at,
        }
    }
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct TeamResponse {
    pub id: i32,
    pub name: String,
    pub classroom_id: i32,
    pub created_at: DateTime<Utc>,
}

impl From<team::Model> for TeamResponse {
    fn from(m: team::Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            classroom_id: m.classroom_id,
            created_at: m.created_at,
        }
    }
}
