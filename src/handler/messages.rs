use std::sync::Arc;

use axum::{
    extract::Path,
    http::StatusCode,
    response::IntoResponse,
    Extension, Json,
};
use validator::Validate;

use crate::{
    db::{jobdb::JobExt, messagedb::MessageExt, proposaldb::ProposalExt},
    dtos::{messagedtos::SendMessageDto, ApiResponse},
    error::HttpError,
    middleware::JWTAuthMiddeware,
    service::policy,
    AppState,
};

/// A job thread is between the client and the accepted freelancer. An
/// admin may write into a thread, but never be written to unless they
/// are a genuine party.
pub async fn send_message(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
    Json(body): Json<SendMessageDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate().map_err(|e| HttpError::validation(&e))?;

    if body.receiver_id == auth.user.id {
        return Err(HttpError::bad_request(
            "You cannot send a message to yourself",
        ));
    }

    let job = app_state
        .db_client
        .get_job(body.job_id)
        .await
        .map_err(HttpError::from_db_error)?
        .ok_or_else(|| HttpError::not_found("Job not found"))?;

    let accepted_freelancer = app_state
        .db_client
        .get_accepted_freelancer(job.id)
        .await
        .map_err(HttpError::from_db_error)?;

    if !policy::may_use_job_thread(&auth.user, &job, accepted_freelancer) {
        return Err(HttpError::forbidden(
            "You are not a participant in this job",
        ));
    }

    if !policy::is_party_to_job(body.receiver_id, &job, accepted_freelancer) {
        return Err(HttpError::forbidden(
            "Receiver is not a participant in this job",
        ));
    }

    let message = app_state
        .db_client
        .create_message(body.job_id, auth.user.id, body.receiver_id, body.message)
        .await
        .map_err(HttpError::from_db_error)?;

    let message = app_state
        .db_client
        .get_message_with_names(message.id)
        .await
        .map_err(HttpError::from_db_error)?
        .ok_or_else(|| HttpError::server_error("Message not found after insert"))?;

    let response = ApiResponse::success("Message sent", message);
    Ok((StatusCode::CREATED, Json(response)))
}

pub async fn get_job_messages(
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

    let accepted_freelancer = app_state
        .db_client
        .get_accepted_freelancer(job.id)
        .await
        .map_err(HttpError::from_db_error)?;

    if !policy::may_use_job_thread(&auth.user, &job, accepted_freelancer) {
        return Err(HttpError::forbidden(
            "You are not a participant in this job",
        ));
    }

    let messages = app_state
        .db_client
        .get_job_messages(job_id)
        .await
        .map_err(HttpError::from_db_error)?;

    Ok(Json(ApiResponse::success("Job messages", messages)))
}
