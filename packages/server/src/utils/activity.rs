use std::collections::{BTreeSet, HashMap};

use sea_orm::sea_query::Query as SeaQuery;
use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, QuerySelect, Set};

use crate::entity::{activity, activity_team, activity_template, classroom, team};
use crate::error::AppError;
use crate::models::activity::ActivityResponse;

/// Look up a class by ID, returning 404 if not found.
pub async fn find_classroom<C: ConnectionTrait>(
    db: &C,
    id: i32,
) -> Result<classroom::Model, AppError> {
    classroom::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Class not found".into()))
}

/// Look up a team by ID, returning 404 if not found.
pub async fn find_team<C: ConnectionTrait>(db: &C, id: i32) -> Result<team::Model, AppError> {
    team::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Team not found".into()))
}

/// Look up an activity template by ID, returning 404 if not found.
pub async fn find_template<C: ConnectionTrait>(
    db: &C,
    id: i32,
) -> Result<activity_template::Model, AppError> {
    activity_template::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Template not found".into()))
}

/// Look up an activity by ID, returning 404 if not found.
pub async fn find_activity<C: ConnectionTrait>(
    db: &C,
    id: i32,
) -> Result<activity::Model, AppError> {
    activity::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Activity not found".into()))
}

/// Check that every requested team exists. Returns the IDs sorted ascending,
/// or 404 listing the ones that are missing.
pub async fn resolve_teams<C: ConnectionTrait>(
    db: &C,
    team_ids: &[i32],
) -> Result<Vec<i32>, AppError> {
    let requested: BTreeSet<i32> = team_ids.iter().copied().collect();
    if requested.is_empty() {
        return Ok(Vec::new());
    }

    let found: BTreeSet<i32> = team::Entity::find()
        .filter(team::Column::Id.is_in(requested.iter().copied()))
        .select_only()
        .column(team::Column::Id)
        .into_tuple::<i32>()
        .all(db)
        .await?
        .into_iter()
        .collect();

    let missing: Vec<String> = requested
        .difference(&found)
        .map(|id| id.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(AppError::NotFound(format!(
            "One or more teams not found: {}",
            missing.join(", ")
        )));
    }

    Ok(requested.into_iter().collect())
}

/// Replace the team set of an activity. Callers resolve the IDs first.
pub async fn set_activity_teams<C: ConnectionTrait>(
    db: &C,
    activity_id: i32,
    team_ids: &[i32],
) -> Result<(), AppError> {
    activity_team::Entity::delete_many()
        .filter(activity_team::Column::ActivityId.eq(activity_id))
        .exec(db)
        .await?;

    if team_ids.is_empty() {
        return Ok(());
    }

    let links = team_ids.iter().map(|&team_id| activity_team::ActiveModel {
        activity_id: Set(activity_id),
        team_id: Set(team_id),
    });
    activity_team::Entity::insert_many(links)
        .exec_without_returning(db)
        .await?;

    Ok(())
}

/// Team IDs grouped by activity, each list sorted ascending.
pub async fn team_ids_by_activity<C: ConnectionTrait>(
    db: &C,
    activity_ids: &[i32],
) -> Result<HashMap<i32, Vec<i32>>, AppError> {
    let mut grouped: HashMap<i32, Vec<i32>> = HashMap::new();
    if activity_ids.is_empty() {
        return Ok(grouped);
    }

    let links = activity_team::Entity::find()
        .filter(activity_team::Column::ActivityId.is_in(activity_ids.iter().copied()))
        .order_by_asc(activity_team::Column::TeamId)
        .all(db)
        .await?;

    for link in links {
        grouped.entry(link.activity_id).or_default().push(link.team_id);
    }
    Ok(grouped)
}

/// Serialize a single activity together with its teams.
pub async fn activity_response<C: ConnectionTrait>(
    db: &C,
    model: activity::Model,
) -> Result<ActivityResponse, AppError> {
    let mut teams = team_ids_by_activity(db, &[model.id]).await?;
    let team_ids = teams.remove(&model.id).unwrap_or_default();
    Ok(ActivityResponse::new(model, team_ids))
}

/// Serialize a list of activities, loading all team links in one query.
pub async fn activity_responses<C: ConnectionTrait>(
    db: &C,
    models: Vec<activity::Model>,
) -> Result<Vec<ActivityResponse>, AppError> {
    let ids: Vec<i32> = models.iter().map(|m| m.id).collect();
    let mut teams = team_ids_by_activity(db, &ids).await?;

    Ok(models
        .into_iter()
        .map(|m| {
            let team_ids = teams.remove(&m.id).unwrap_or_default();
            ActivityResponse::new(m, team_ids)
        })
        .collect())
}

/// Activities of a class that are assigned to the given team, ordered by ID.
pub async fn find_team_activities<C: ConnectionTrait>(
    db: &C,
    class_id: i32,
    team_id: i32,
    submitted_only: bool,
) -> Result<Vec<activity::Model>, AppError> {
    let mut select = activity::Entity::find()
        .filter(activity::Column::ClassroomId.eq(class_id))
        .filter(
            activity::Column::Id.in_subquery(
                SeaQuery::select()
                    .column(activity_team::Column::ActivityId)
                    .from(activity_team::Entity)
                    .and_where(activity_team::Column::TeamId.eq(team_id))
                    .to_owned(),
            ),
        );

    if submitted_only {
        select = select.filter(activity::Column::SubmissionStatus.eq(true));
    }

    Ok(select.order_by_asc(activity::Column::Id).all(db).await?)
}
