use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "team")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub name: String,

    pub classroom_id: i32,
    #[sea_orm(belongs_to, from = "classroom_id", to = "id")]
    pub classroom: HasOne<super::classroom::Entity>,

    #[sea_orm(has_many, via = "activity_team")]
    pub activities: HasMany<super::activity::Entity>,

    pub created_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
