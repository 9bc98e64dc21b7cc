use std::sync::Arc;

use axum::{
    extract::Path,
    http::StatusCode,
    response::IntoResponse,
    Extension, Json,
};
use bigdecimal::BigDecimal;
use validator::Validate;

use crate::{
    db::{jobdb::JobExt, proposaldb::ProposalExt},
    dtos::{
        engagementdtos::{CreateProposalDto, UpdateProposalStatusDto},
        ApiResponse,
    },
    error::HttpError,
    middleware::JWTAuthMiddeware,
    models::{engagementmodel::EngagementStatus, jobmodel::JobStatus},
    service::{lifecycle, policy},
    AppState,
};

pub async fn create_proposal(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
    Json(body): Json<CreateProposalDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate().map_err(|e| HttpError::validation(&e))?;

    if !policy::can_submit_engagement(auth.user.role) {
        return Err(HttpError::forbidden(
            "Only freelancers can submit proposals",
        ));
    }

    let job = app_state
        .db_client
        .get_job(body.job_id)
        .await
        .map_err(HttpError::from_db_error)?
        .ok_or_else(|| HttpError::not_found("Job not found"))?;

    if job.client_id == auth.user.id {
        return Err(HttpError::forbidden(
            "You cannot submit a proposal for your own job",
        ));
    }

    if job.status != JobStatus::Open {
        return Err(HttpError::state_violation(
            "Job is not accepting proposals",
        ));
    }

    let bid_amount = BigDecimal::try_from(body.bid_amount)
        .map_err(|_| HttpError::bad_request("Valid bid amount is required"))?;

    let proposal = app_state
        .db_client
        .create_proposal(body.job_id, auth.user.id, bid_amount, body.cover_letter)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                HttpError::conflict("You have already submitted a proposal for this job")
            }
            _ => HttpError::from_db_error(e),
        })?;

    let proposal = app_state
        .db_client
        .get_proposal_with_freelancer(proposal.id)
        .await
        .map_err(HttpError::from_db_error)?
        .ok_or_else(|| HttpError::server_error("Proposal not found after insert"))?;

    let response = ApiResponse::success("Proposal submitted", proposal);
    Ok((StatusCode::CREATED, Json(response)))
}

pub async fn get_my_proposals(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
) -> Result<impl IntoResponse, HttpError> {
    let proposals = app_state
        .db_client
        .get_my_proposals(auth.user.id)
        .await
        .map_err(HttpError::from_db_error)?;

    Ok(Json(ApiResponse::success("Your proposals", proposals)))
}

pub async fn get_job_proposals(
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

    let proposals = app_state
        .db_client
        .get_job_proposals(job_id)
        .await
        .map_err(HttpError::from_db_error)?;

    Ok(Json(ApiResponse::success("Job proposals", proposals)))
}

/// Resolving a proposal. Acceptance cascades: the job moves to
/// in_progress and every other pending proposal is rejected, all in one
/// transaction.
pub async fn update_proposal_status(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
    Path(proposal_id): Path<i64>,
    Json(body): Json<UpdateProposalStatusDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate().map_err(|e| HttpError::validation(&e))?;

    let proposal = app_state
        .db_client
        .get_proposal(proposal_id)
        .await
        .map_err(HttpError::from_db_error)?
        .ok_or_else(|| HttpError::not_found("Proposal not found"))?;

    let job = app_state
        .db_client
        .get_job(proposal.job_id)
        .await
        .map_err(HttpError::from_db_error)?
        .ok_or_else(|| HttpError::not_found("Job not found"))?;

    if !policy::can_act_on_job(&auth.user, &job) {
        return Err(HttpError::forbidden("You do not own this job"));
    }

    if proposal.status != EngagementStatus::Pending {
        return Err(HttpError::state_violation(
            "Proposal has already been resolved",
        ));
    }

    let proposal = match body.status {
        EngagementStatus::Accepted => {
            if job.status != JobStatus::Open {
                return Err(HttpError::state_violation(
                    "Job is no longer accepting proposals",
                ));
            }

            let siblings = app_state
                .db_client
                .get_proposals_for_job(proposal.job_id)
                .await
                .map_err(HttpError::from_db_error)?;

            let plan = lifecycle::plan_acceptance(&proposal, &siblings);

            app_state
                .db_client
                .apply_acceptance(&plan)
                .await
                .map_err(HttpError::from_db_error)?
        }
        _ => app_state
            .db_client
            .update_proposal_status(proposal_id, body.status)
            .await
            .map_err(HttpError::from_db_error)?,
    };

    Ok(Json(ApiResponse::success("Proposal status updated", proposal)))
}
