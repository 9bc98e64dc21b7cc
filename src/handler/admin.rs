use std::sync::Arc;

use axum::{
    extract::{Path, Query},
    response::IntoResponse,
    Extension, Json,
};

use crate::{
    db::{jobdb::JobExt, userdb::UserExt},
    dtos::{
        jobdtos::{JobListQueryDto, JobListResponseDto},
        userdtos::{FilterUserDto, UserListResponseDto},
        PageQueryDto, Response,
    },
    error::HttpError,
    middleware::JWTAuthMiddeware,
    AppState,
};

pub async fn list_users(
    Extension(app_state): Extension<Arc<AppState>>,
    Query(query): Query<PageQueryDto>,
) -> Result<impl IntoResponse, HttpError> {
    let (limit, offset) = query.resolve(50);

    let users = app_state
        .db_client
        .get_users(limit, offset)
        .await
        .map_err(HttpError::from_db_error)?;

    let total = app_state
        .db_client
        .count_users()
        .await
        .map_err(HttpError::from_db_error)?;

    Ok(Json(UserListResponseDto {
        status: "success".to_string(),
        users: users.iter().map(FilterUserDto::filter_user).collect(),
        total,
        limit,
        offset,
    }))
}

pub async fn list_jobs(
    Extension(app_state): Extension<Arc<AppState>>,
    Query(query): Query<JobListQueryDto>,
) -> Result<impl IntoResponse, HttpError> {
    let limit = query.limit.unwrap_or(50).clamp(1, 100);
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

pub async fn delete_user(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
    Path(user_id): Path<i64>,
) -> Result<impl IntoResponse, HttpError> {
    if user_id == auth.user.id {
        return Err(HttpError::forbidden("You cannot delete your own account"));
    }

    let deleted = app_state
        .db_client
        .delete_user(user_id)
        .await
        .map_err(HttpError::from_db_error)?;

    if deleted == 0 {
        return Err(HttpError::not_found("User not found"));
    }

    Ok(Json(Response {
        status: "success",
        message: "User deleted".to_string(),
    }))
}

pub async fn delete_job(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(job_id): Path<i64>,
) -> Result<impl IntoResponse, HttpError> {
    let deleted = app_state
        .db_client
        .delete_job(job_id)
        .await
        .map_err(HttpError::from_db_error)?;

    if deleted == 0 {
        return Err(HttpError::not_found("Job not found"));
    }

    Ok(Json(Response {
        status: "success",
        message: "Job deleted".to_string(),
    }))
}
