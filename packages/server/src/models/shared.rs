use std::collections::HashSet;

use serde::{Deserialize, Deserializer};

use crate::error::AppError;

/// Upper bound accepted for `total_score`.
pub const MAX_TOTAL_SCORE: i32 = 100_000;

/// Score assigned when a create request leaves `total_score` out.
pub const DEFAULT_TOTAL_SCORE: i32 = 100;

/// Serde helper for PATCH semantics on nullable fields.
///
/// * JSON field absent  => `None`          (don't update)
/// * JSON field = null  => `Some(None)`    (set to NULL)
/// * JSON field = value => `Some(Some(v))` (set to value)
pub fn double_option<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Some(Option::deserialize(deserializer)?))
}

/// Validate a trimmed title or name (1-256 Unicode characters).
pub fn validate_title(title: &str, field: &str) -> Result<(), AppError> {
    let title = title.trim();
    if title.is_empty() || title.chars().count() > 256 {
        return Err(AppError::Validation(format!(
            "{field} must be 1-256 characters"
        )));
    }
    Ok(())
}

/// Reject ID lists that name the same entity twice.
pub fn validate_unique_ids(ids: &[i32], name: &str) -> Result<(), AppError> {
    let mut seen = HashSet::with_capacity(ids.len());
    for &id in ids {
        if !seen.insert(id) {
            return Err(AppError::Validation(format!("Duplicate {name} ID: {id}")));
        }
    }
    Ok(())
}

/// Validate `total_score` and an optional awarded `evaluation` against each other.
pub fn validate_scores(total_score: i32, evaluation: Option<i32>) -> Result<(), AppError> {
    if !(1..=MAX_TOTAL_SCORE).contains(&total_score) {
        return Err(AppError::Validation(format!(
            "total_score must be between 1 and {MAX_TOTAL_SCORE}"
        )));
    }
    if let Some(evaluation) = evaluation
        && !(0..=total_score).contains(&evaluation)
    {
        return Err(AppError::Validation(format!(
            "evaluation must be between 0 and total_score ({total_score})"
        )));
    }
    Ok(())
}
