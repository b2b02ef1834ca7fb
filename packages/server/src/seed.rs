use sea_orm::sea_query::{Index, IndexCreateStatement, OnConflict};
use sea_orm::*;
use tracing::info;

use crate::entity::{activity, activity_team, role, role_permission};

/// Default roles seeded on startup.
const DEFAULT_ROLES: &[&str] = &["teacher", "student"];

/// Default role-permission mappings seeded on startup.
const DEFAULT_MAPPINGS: &[(&str, &str)] = &[
    ("teacher", "class:create"),
    ("teacher", "class:manage"),
    ("teacher", "template:create"),
    ("teacher", "activity:create"),
    ("teacher", "activity:edit"),
    ("teacher", "activity:delete"),
    ("teacher", "activity:grade"),
];

/// Seed the `role` and `role_permission` tables with defaults.
pub async fn seed_role_permissions(db: &DatabaseConnection) -> Result<(), DbErr> {
    let mut roles_inserted = 0u32;
    for &name in DEFAULT_ROLES {
        let model = role::ActiveModel {
            name: Set(name.to_string()),
        };

        let result = role::Entity::insert(model)
            .on_conflict(OnConflict::column(role::Column::Name).do_nothing().to_owned())
            .exec_without_returning(db)
            .await;

        match result {
            Ok(n) if n > 0 => roles_inserted += 1,
            Ok(_) | Err(DbErr::RecordNotInserted) => {}
            Err(e) => return Err(e),
        }
    }

    if roles_inserted > 0 {
        info!("Seeded {} new roles", roles_inserted);
    }

    let mut perms_inserted = 0u32;
    for &(role, permission) in DEFAULT_MAPPINGS {
        let model = role_permission::ActiveModel {
            role: Set(role.to_string()),
            permission: Set(permission.to_string()),
        };

        let result = role_permission::Entity::insert(model)
            .on_conflict(
                OnConflict::columns([
                    role_permission::Column::Role,
                    role_permission::Column::Permission,
                ])
                .do_nothing()
                .to_owned(),
            )
            .exec_without_returning(db)
            .await;

        match result {
            Ok(n) if n > 0 => perms_inserted += 1,
            Ok(_) | Err(DbErr::RecordNotInserted) => {}
            Err(e) => return Err(e),
        }
    }

    if perms_inserted > 0 {
        info!("Seeded {} new role-permission mappings", perms_inserted);
    }

    Ok(())
}

/// Ensure secondary indexes used by the listing endpoints exist.
///
/// SeaORM's schema-sync doesn't create non-unique indexes on plain columns,
/// so we create them manually on startup.
pub async fn ensure_indexes(db: &DatabaseConnection) -> Result<(), DbErr> {
    // SELECT ... FROM activity WHERE classroom_id = ?
    create_index(
        db,
        "idx_activity_classroom",
        Index::create()
            .if_not_exists()
            .name("idx_activity_classroom")
            .table(activity::Entity)
            .col(activity::Column::ClassroomId)
            .to_owned(),
    )
    .await?;

    // SELECT activity_id FROM activity_team WHERE team_id = ?
    create_index(
        db,
        "idx_activity_team_team",
        Index::create()
            .if_not_exists()
            .name("idx_activity_team_team")
            .table(activity_team::Entity)
            .col(activity_team::Column::TeamId)
            .to_owned(),
    )
    .await
}

async fn create_index(
    db: &DatabaseConnection,
    name: &str,
    stmt: IndexCreateStatement,
) -> Result<(), DbErr> {
    let stmt = db.get_database_backend().build(&stmt);
    db.execute_raw(stmt).await?;
    info!("Ensured index {} exists", name);
    Ok(())
}
