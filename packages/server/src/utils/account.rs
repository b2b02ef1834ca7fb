use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder};

use crate::entity::{role_permission, user};
use crate::error::AppError;
use crate::utils::hash;

/// Permissions granted to a role, sorted by name.
pub async fn role_permissions<C: ConnectionTrait>(
    db: &C,
    role: &str,
) -> Result<Vec<String>, AppError> {
    Ok(role_permission::Entity::find()
        .filter(role_permission::Column::Role.eq(role))
        .order_by_asc(role_permission::Column::Permission)
        .all(db)
        .await?
        .into_iter()
        .map(|rp| rp.permission)
        .collect())
}

/// Resolve a username/password pair to its account.
///
/// Unknown usernames and wrong passwords both yield `InvalidCredentials`.
pub async fn authenticate<C: ConnectionTrait>(
    db: &C,
    username: &str,
    password: &str,
) -> Result<user::Model, AppError> {
    let Some(account) = user::Entity::find()
        .filter(user::Column::Username.eq(username.trim()))
        .one(db)
        .await?
    else {
        return Err(AppError::InvalidCredentials);
    };

    let matches = hash::verify_password(password, &account.password)
        .map_err(|e| AppError::Internal(format!("Password verify error: {e}")))?;
    if matches {
        Ok(account)
    } else {
        Err(AppError::InvalidCredentials)
    }
}

/// Load the account behind a verified token. A deleted account invalidates the token.
pub async fn token_owner<C: ConnectionTrait>(db: &C, user_id: i32) -> Result<user::Model, AppError> {
    user::Entity::find_by_id(user_id)
        .one(db)
        .await?
        .ok_or(AppError::TokenInvalid)
}
