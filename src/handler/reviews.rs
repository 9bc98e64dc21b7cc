use std::sync::Arc;

use axum::{
    extract::{Path, Query},
    http::StatusCode,
    response::IntoResponse,
    Extension, Json,
};
use validator::Validate;

use crate::{
    db::{jobdb::JobExt, proposaldb::ProposalExt, reviewdb::ReviewExt, userdb::UserExt},
    dtos::{
        reviewdtos::{average_rating, CreateReviewDto, UserReviewsResponseDto},
        ApiResponse, PageQueryDto,
    },
    error::HttpError,
    middleware::JWTAuthMiddeware,
    models::jobmodel::JobStatus,
    service::policy,
    AppState,
};

/// Reviews run between the two parties of a completed job, one per
/// direction per job.
pub async fn create_review(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
    Json(body): Json<CreateReviewDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate().map_err(|e| HttpError::validation(&e))?;

    let job = app_state
        .db_client
        .get_job(body.job_id)
        .await
        .map_err(HttpError::from_db_error)?
        .ok_or_else(|| HttpError::not_found("Job not found"))?;

    if job.status != JobStatus::Completed {
        return Err(HttpError::state_violation(
            "Job must be completed before reviewing",
        ));
    }

    let accepted_freelancer = app_state
        .db_client
        .get_accepted_freelancer(job.id)
        .await
        .map_err(HttpError::from_db_error)?;

    let reviewed_user_id = policy::review_counterpart(auth.user.id, &job, accepted_freelancer)
        .ok_or_else(|| {
            HttpError::forbidden("Only the client and the hired freelancer may review this job")
        })?;

    // The caller names the party they are reviewing; anything other than
    // the job's actual counterpart is rejected rather than corrected.
    if body.reviewed_user_id != reviewed_user_id {
        return Err(HttpError::forbidden(
            "You can only review the other party to this job",
        ));
    }

    if app_state
        .db_client
        .get_review_for_job(body.job_id, auth.user.id)
        .await
        .map_err(HttpError::from_db_error)?
        .is_some()
    {
        return Err(HttpError::conflict("You have already reviewed this job"));
    }

    let review = app_state
        .db_client
        .create_review(
            body.job_id,
            auth.user.id,
            reviewed_user_id,
            body.rating,
            body.comment,
        )
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                HttpError::conflict("You have already reviewed this job")
            }
            _ => HttpError::from_db_error(e),
        })?;

    let review = app_state
        .db_client
        .get_review_with_names(review.id)
        .await
        .map_err(HttpError::from_db_error)?
        .ok_or_else(|| HttpError::server_error("Review not found after insert"))?;

    let response = ApiResponse::success("Review submitted", review);
    Ok((StatusCode::CREATED, Json(response)))
}

pub async fn get_user_reviews(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(user_id): Path<i64>,
    Query(query): Query<PageQueryDto>,
) -> Result<impl IntoResponse, HttpError> {
    let (limit, offset) = query.resolve(20);

    app_state
        .db_client
        .get_user_by_id(user_id)
        .await
        .map_err(HttpError::from_db_error)?
        .ok_or_else(|| HttpError::not_found("User not found"))?;

    let reviews = app_state
        .db_client
        .get_user_reviews(user_id, limit, offset)
        .await
        .map_err(HttpError::from_db_error)?;

    let ratings = app_state
        .db_client
        .get_user_ratings(user_id)
        .await
        .map_err(HttpError::from_db_error)?;

    let total_reviews = app_state
        .db_client
        .count_user_reviews(user_id)
        .await
        .map_err(HttpError::from_db_error)?;

    Ok(Json(UserReviewsResponseDto {
        status: "success".to_string(),
        reviews,
        average_rating: average_rating(&ratings),
        total_reviews,
    }))
}
