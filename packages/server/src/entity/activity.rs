use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "activity")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub description: String, // in Markdown
    #[sea_orm(column_type = "Text", nullable)]
    pub instructions: Option<String>,

    pub classroom_id: i32,
    #[sea_orm(belongs_to, from = "classroom_id", to = "id")]
    pub classroom: HasOne<super::classroom::Entity>,

    #[sea_orm(has_many, via = "activity_team")]
    pub teams: HasMany<super::team::Entity>,

    pub due_date: Option<DateTimeUtc>,
    /// Awarded score, bounded by `total_score`. NULL until graded.
    pub evaluation: Option<i32>,
    pub total_score: i32,
    #[sea_orm(default_value = false)]
    pub submission_status: bool,

    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
