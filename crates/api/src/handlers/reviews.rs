//! Handlers for the `/reviews` resource.

use axum::extract::State;
use axum::http::StatusCode;
use salon_core::error::CoreError;
use salon_core::reviews::RatingStats;
use salon_core::schema::common::IdParams;
use salon_core::schema::review::{
    CreateReviewInput, ReviewListQuery, ReviewStatsQuery, UpdateReviewInput,
};
use salon_core::uniqueness::ensure_review_absent;
use salon_db::models::review::{NewReview, Review};
use salon_db::repositories::ReviewRepo;
use salon_db::store::PgStore;

use super::not_found;
use crate::error::{AppError, AppResult};
use crate::extract::{ValidJson, ValidPath, ValidQuery, Validated};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::ensure_owner_or_admin;
use crate::response::{self, CreatedResponse, JsonResponse};
use crate::state::AppState;

/// GET /api/v1/reviews
pub async fn list(
    State(state): State<AppState>,
    ValidQuery(params): ValidQuery<ReviewListQuery>,
) -> AppResult<JsonResponse<Vec<Review>>> {
    let reviews = ReviewRepo::list(&state.pool, &params).await?;
    Ok(response::ok(reviews))
}

/// GET /api/v1/reviews/stats?target_type=&target_id=
pub async fn stats(
    State(state): State<AppState>,
    ValidQuery(params): ValidQuery<ReviewStatsQuery>,
) -> AppResult<JsonResponse<RatingStats>> {
    let stats = ReviewRepo::stats(&state.pool, params.target).await?;
    Ok(response::ok(stats))
}

/// GET /api/v1/reviews/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    ValidPath(IdParams { id }): ValidPath<IdParams>,
) -> AppResult<JsonResponse<Review>> {
    let review = ReviewRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found("Review", id))?;
    Ok(response::ok(review))
}

/// POST /api/v1/reviews
///
/// One review per user and target. The verified badge is earned from a
/// delivered order or a completed appointment, never requested.
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidJson(input): ValidJson<CreateReviewInput>,
) -> AppResult<CreatedResponse<Review>> {
    let target = input.target;
    if !ReviewRepo::target_exists(&state.pool, target).await? {
        return Err(not_found(target.entity(), target.id()));
    }
    ensure_review_absent(&PgStore::new(&state.pool), auth.user_id, target).await?;

    let is_verified = ReviewRepo::author_has_history(&state.pool, auth.user_id, target).await?;
    let review = ReviewRepo::create(
        &state.pool,
        &NewReview {
            user_id: auth.user_id,
            target,
            rating: input.rating,
            comment: input.comment,
            is_verified,
        },
    )
    .await?;
    tracing::info!(
        review_id = %review.id,
        target_type = %review.target_type,
        target_id = %review.target_id,
        is_verified,
        "Review created",
    );

    Ok(response::created(review, "Review created successfully"))
}

/// PUT /api/v1/reviews/{id} (author or admin; `is_verified` admin only)
pub async fn update(
    State(state): State<AppState>,
    auth: AuthUser,
    input: Validated<IdParams, (), UpdateReviewInput>,
) -> AppResult<JsonResponse<Review>> {
    let id = input.params.id;
    if input.body.is_verified.is_some() && !auth.is_admin() {
        return Err(AppError::Core(CoreError::Forbidden(
            "Only administrators can change verification".into(),
        )));
    }

    let existing = ReviewRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found("Review", id))?;
    ensure_owner_or_admin(&auth, existing.user_id)?;

    let review = ReviewRepo::update(&state.pool, id, &input.body)
        .await?
        .ok_or_else(|| not_found("Review", id))?;
    tracing::info!(review_id = %id, "Review updated");
    Ok(response::ok_with(review, "Review updated successfully"))
}

/// DELETE /api/v1/reviews/{id} (author or admin, hard delete)
pub async fn delete(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidPath(IdParams { id }): ValidPath<IdParams>,
) -> AppResult<StatusCode> {
    let existing = ReviewRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found("Review", id))?;
    ensure_owner_or_admin(&auth, existing.user_id)?;

    if ReviewRepo::delete(&state.pool, id).await? {
        tracing::info!(review_id = %id, deleted_by = %auth.user_id, "Review deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found("Review", id))
    }
}
