//! Pre-write uniqueness checks.
//!
//! Each check asks the store which record currently holds the key and
//! rejects with `Conflict` unless it is absent or is the record being
//! updated. The database carries matching unique indexes, so a request that
//! races past a check still fails with a conflict at write time.

use crate::error::CoreError;
use crate::reviews::ReviewTarget;
use crate::store::{CategoryLookup, ReviewLookup, UserLookup};
use crate::types::DbId;

fn held_by_other(holder: Option<DbId>, exclude: Option<DbId>) -> bool {
    matches!(holder, Some(id) if Some(id) != exclude)
}

/// `email` is expected already lower-cased.
pub async fn ensure_email_available<S>(
    store: &S,
    email: &str,
    exclude: Option<DbId>,
) -> Result<(), CoreError>
where
    S: UserLookup + ?Sized,
{
    if held_by_other(store.user_id_by_email(email).await?, exclude) {
        return Err(CoreError::Conflict(
            "A user with this email already exists".to_string(),
        ));
    }
    Ok(())
}

pub async fn ensure_category_name_available<S>(
    store: &S,
    name: &str,
    exclude: Option<DbId>,
) -> Result<(), CoreError>
where
    S: CategoryLookup + ?Sized,
{
    if held_by_other(store.category_id_by_name(name).await?, exclude) {
        return Err(CoreError::Conflict(format!(
            "A category named '{name}' already exists"
        )));
    }
    Ok(())
}

/// A user may review each target once.
pub async fn ensure_review_absent<S>(
    store: &S,
    user_id: DbId,
    target: ReviewTarget,
) -> Result<(), CoreError>
where
    S: ReviewLookup + ?Sized,
{
    if store.review_id_for(user_id, target).await?.is_some() {
        return Err(CoreError::Conflict(format!(
            "You have already reviewed this {}",
            target.entity().to_lowercase()
        )));
    }
    Ok(())
}
