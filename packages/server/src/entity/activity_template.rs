use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Reusable blueprint. Activities copy these fields on instantiation and keep
/// no reference back to the template.
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "activity_template")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub description: String, // in Markdown
    #[sea_orm(column_type = "Text", nullable)]
    pub instructions: Option<String>,
    pub due_date: Option<DateTimeUtc>,
    pub evaluation: Option<i32>,
    pub total_score: i32,

    pub created_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
