use std::sync::Arc;

use axum::{
    extract::{Path, Query},
    http::StatusCode,
    response::IntoResponse,
    Extension, Json,
};
use bigdecimal::BigDecimal;
use validator::Validate;

use crate::{
    db::jobdb::JobExt,
    dtos::{
        jobdtos::{CreateJobDto, JobListQueryDto, JobListResponseDto, UpdateJobStatusDto},
        ApiResponse,
    },
    error::HttpError,
    middleware::JWTAuthMiddeware,
    service::policy,
    AppState,
};

pub async fn create_job(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
    Json(body): Json<CreateJobDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate().map_err(|e| HttpError::validation(&e))?;

    if !policy::can_post_job(auth.user.role) {
        return Err(HttpError::forbidden("Only clients can post jobs"));
    }

    let budget = BigDecimal::try_from(body.budget)
        .map_err(|_| HttpError::bad_request("Valid budget amount is required"))?;

    let job = app_state
        .db_client
        .create_job(auth.user.id, body.title, body.description, budget, body.image_path)
        .await
        .map_err(HttpError::from_db_error)?;

    let job = app_state
        .db_client
        .get_job_with_client(job.id)
        .await
        .map_err(HttpError::from_db_error)?
        .ok_or_else(|| HttpError::server_error("Job not found after insert"))?;

    let response = ApiResponse::success("Job created", job);
    Ok((StatusCode::CREATED, Json(response)))
}

pub async fn list_jobs(
    Extension(app_state): Extension<Arc<AppState>>,
    Query(query): Query<JobListQueryDto>,
) -> Result<impl IntoResponse, HttpError> {
    let limit = query.limit.unwrap_or(20).clamp(1, 100);
    let offset = query.offset.unwrap_or(0).max(0);

    let jobs = app_state
        .db_client
        .list_jobs(query.status, query.client_id, limit, offset)
        .await
        .map_err(HttpError::from_db_error)?;

    let total = app_state
        .db_client
        .count_jobs(query.status, query.client_id)
        .await
        .map_err(HttpError::from_db_error)?;

    Ok(Json(JobListResponseDto {
        status: "success".to_string(),
        jobs,
        total,
        limit,
        offset,
    }))
}

pub async fn get_job(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(job_id): Path<i64>,
) -> Result<impl IntoResponse, HttpError> {
    let job = app_state
        .db_client
        .get_job_with_client(job_id)
        .await
        .map_err(HttpError::from_db_error)?
        .ok_or_else(|| HttpError::not_found("Job not found"))?;

    Ok(Json(ApiResponse::success("Job", job)))
}

pub async fn update_job_status(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
    Path(job_id): Path<i64>,
    Json(body): Json<UpdateJobStatusDto>,
) -> Result<impl IntoResponse, HttpError> {
    let job = app_state
        .db_client
        .get_job(job_id)
        .await
        .map_err(HttpError::from_db_error)?
        .ok_or_else(|| HttpError::not_found("Job not found"))?;

    if !policy::can_act_on_job(&auth.user, &job) {
        return Err(HttpError::forbidden("You do not own this job"));
    }

    let job = app_state
        .db_client
        .update_job_status(job_id, body.status)
        .await
        .map_err(HttpError::from_db_error)?;

    Ok(Json(ApiResponse::success("Job status updated", job)))
}
