use std::sync::Arc;

use axum::{
    extract::Path,
    http::StatusCode,
    response::IntoResponse,
    Extension, Json,
};
use validator::Validate;

use crate::{
    db::{
        applicationdb::{ApplicationExt, NewApplicationDetails},
        jobdb::JobExt,
    },
    dtos::{
        engagementdtos::{CreateApplicationDto, UpdateApplicationStatusDto},
        ApiResponse,
    },
    error::HttpError,
    middleware::JWTAuthMiddeware,
    models::{engagementmodel::EngagementStatus, jobmodel::JobStatus},
    service::{lifecycle, policy},
    AppState,
};

pub async fn create_application(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
    Json(body): Json<CreateApplicationDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate().map_err(|e| HttpError::validation(&e))?;

    if !policy::can_submit_engagement(auth.user.role) {
        return Err(HttpError::forbidden("Only freelancers can apply to jobs"));
    }

    let job = app_state
        .db_client
        .get_job(body.job_id)
        .await
        .map_err(HttpError::from_db_error)?
        .ok_or_else(|| HttpError::not_found("Job not found"))?;

    if job.client_id == auth.user.id {
        return Err(HttpError::forbidden("You cannot apply to your own job"));
    }

    if job.status != JobStatus::Open {
        return Err(HttpError::state_violation(
            "Job is not accepting applications",
        ));
    }

    let previous = app_state
        .db_client
        .get_latest_application(body.job_id, auth.user.id)
        .await
        .map_err(HttpError::from_db_error)?;

    if !lifecycle::may_reapply(previous.as_ref()) {
        return Err(HttpError::conflict(
            "You have already applied for this job",
        ));
    }

    let application = app_state
        .db_client
        .create_application_with_details(
            body.job_id,
            auth.user.id,
            NewApplicationDetails {
                resume_path: body.resume_path,
                eligibility_path: body.eligibility_path,
                biodata_path: body.biodata_path,
                cover_letter: body.cover_letter,
                additional_info: body.additional_info,
            },
        )
        .await
        .map_err(HttpError::from_db_error)?;

    let response = ApiResponse::success("Application submitted", application);
    Ok((StatusCode::CREATED, Json(response)))
}

pub async fn get_job_applications(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
    Path(job_id): Path<i64>,
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

    let applications = app_state
        .db_client
        .get_job_applications(job_id)
        .await
        .map_err(HttpError::from_db_error)?;

    Ok(Json(ApiResponse::success("Job applications", applications)))
}

pub async fn get_application_details(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
    Path(application_id): Path<i64>,
) -> Result<impl IntoResponse, HttpError> {
    let details = app_state
        .db_client
        .get_application_details(application_id)
        .await
        .map_err(HttpError::from_db_error)?
        .ok_or_else(|| HttpError::not_found("Application not found"))?;

    if !policy::can_view_application(&auth.user, details.user_id, details.client_id) {
        return Err(HttpError::forbidden(
            "You are not allowed to view this application",
        ));
    }

    Ok(Json(ApiResponse::success("Application details", details)))
}

pub async fn update_application_status(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
    Path(application_id): Path<i64>,
    Json(body): Json<UpdateApplicationStatusDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate().map_err(|e| HttpError::validation(&e))?;

    let application = app_state
        .db_client
        .get_application(application_id)
        .await
        .map_err(HttpError::from_db_error)?
        .ok_or_else(|| HttpError::not_found("Application not found"))?;

    let job = app_state
        .db_client
        .get_job(application.job_id)
        .await
        .map_err(HttpError::from_db_error)?
        .ok_or_else(|| HttpError::not_found("Job not found"))?;

    if !policy::can_act_on_job(&auth.user, &job) {
        return Err(HttpError::forbidden("You do not own this job"));
    }

    if application.status != EngagementStatus::Pending {
        return Err(HttpError::state_violation(
            "Application has already been resolved",
        ));
    }

    // allow_reapply only matters on rejection; it is never set on accept.
    let allow_reapply =
        body.status == EngagementStatus::Rejected && body.allow_reapply.unwrap_or(false);

    let application = app_state
        .db_client
        .update_application_status(application_id, body.status, body.feedback, allow_reapply)
        .await
        .map_err(HttpError::from_db_error)?;

    Ok(Json(ApiResponse::success(
        "Application status updated",
        application,
    )))
}
