use std::sync::Arc;

use axum::{
    extract::Path,
    http::StatusCode,
    response::IntoResponse,
    Extension, Json,
};
use validator::Validate;

use crate::{
    db::{jobdb::JobExt, questiondb::QuestionExt},
    dtos::{
        questiondtos::{AnswerQuestionDto, PostQuestionDto, ReactDto, ReactionResponseDto},
        ApiResponse, Response,
    },
    error::HttpError,
    middleware::JWTAuthMiddeware,
    models::questionmodel::ReactionTarget,
    service::policy,
    AppState,
};

// Sentinel asker id for anonymous viewers; matches no user row.
const ANONYMOUS_VIEWER: i64 = -1;

pub async fn post_question(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
    Json(body): Json<PostQuestionDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate().map_err(|e| HttpError::validation(&e))?;

    app_state
        .db_client
        .get_job(body.job_id)
        .await
        .map_err(HttpError::from_db_error)?
        .ok_or_else(|| HttpError::not_found("Job not found"))?;

    let question = app_state
        .db_client
        .create_question(body.job_id, auth.user.id, body.content, body.is_public)
        .await
        .map_err(HttpError::from_db_error)?;

    let response = ApiResponse::success("Question posted", question);
    Ok((StatusCode::CREATED, Json(response)))
}

/// Public endpoint; an attached identity widens what is visible.
pub async fn get_job_questions(
    Extension(app_state): Extension<Arc<AppState>>,
    auth: Option<Extension<JWTAuthMiddeware>>,
    Path(job_id): Path<i64>,
) -> Result<impl IntoResponse, HttpError> {
    let job = app_state
        .db_client
        .get_job(job_id)
        .await
        .map_err(HttpError::from_db_error)?
        .ok_or_else(|| HttpError::not_found("Job not found"))?;

    let (viewer_id, sees_all) = match &auth {
        Some(Extension(auth)) => (
            auth.user.id,
            policy::can_act_on_job(&auth.user, &job),
        ),
        None => (ANONYMOUS_VIEWER, false),
    };

    let questions = app_state
        .db_client
        .get_job_questions(job_id, viewer_id, sees_all)
        .await
        .map_err(HttpError::from_db_error)?;

    Ok(Json(ApiResponse::success("Job questions", questions)))
}

pub async fn get_my_job_questions(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
) -> Result<impl IntoResponse, HttpError> {
    let questions = app_state
        .db_client
        .get_my_job_questions(auth.user.id)
        .await
        .map_err(HttpError::from_db_error)?;

    Ok(Json(ApiResponse::success(
        "Questions on your jobs",
        questions,
    )))
}

pub async fn answer_question(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
    Path(question_id): Path<i64>,
    Json(body): Json<AnswerQuestionDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate().map_err(|e| HttpError::validation(&e))?;

    let question = app_state
        .db_client
        .get_question(question_id)
        .await
        .map_err(HttpError::from_db_error)?
        .ok_or_else(|| HttpError::not_found("Question not found"))?;

    let job = app_state
        .db_client
        .get_job(question.job_id)
        .await
        .map_err(HttpError::from_db_error)?
        .ok_or_else(|| HttpError::not_found("Job not found"))?;

    if !policy::can_act_on_job(&auth.user, &job) {
        return Err(HttpError::forbidden(
            "Only the job owner may answer questions",
        ));
    }

    let question = app_state
        .db_client
        .answer_question(question_id, body.answer)
        .await
        .map_err(HttpError::from_db_error)?;

    Ok(Json(ApiResponse::success("Question answered", question)))
}

pub async fn react_to_question(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
    Path(question_id): Path<i64>,
    Json(body): Json<ReactDto>,
) -> Result<impl IntoResponse, HttpError> {
    let question = app_state
        .db_client
        .get_question(question_id)
        .await
        .map_err(HttpError::from_db_error)?
        .ok_or_else(|| HttpError::not_found("Question not found"))?;

    if body.target == ReactionTarget::Answer && question.answer.is_none() {
        return Err(HttpError::state_violation(
            "Question has no answer to react to",
        ));
    }

    if !question.is_public {
        let job = app_state
            .db_client
            .get_job(question.job_id)
            .await
            .map_err(HttpError::from_db_error)?
            .ok_or_else(|| HttpError::not_found("Job not found"))?;

        if !policy::can_view_question(&auth.user, &question, job.client_id) {
            return Err(HttpError::forbidden("This question is private"));
        }
    }

    let outcome = app_state
        .db_client
        .react_to_question(auth.user.id, question_id, body.target, body.reaction)
        .await
        .map_err(HttpError::from_db_error)?;

    Ok(Json(ReactionResponseDto {
        status: "success".to_string(),
        outcome,
    }))
}

pub async fn delete_question(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
    Path(question_id): Path<i64>,
) -> Result<impl IntoResponse, HttpError> {
    let question = app_state
        .db_client
        .get_question(question_id)
        .await
        .map_err(HttpError::from_db_error)?
        .ok_or_else(|| HttpError::not_found("Question not found"))?;

    if !policy::can_delete_question(&auth.user, &question) {
        return Err(HttpError::forbidden(
            "Only the asker may delete this question",
        ));
    }

    app_state
        .db_client
        .delete_question(question_id)
        .await
        .map_err(HttpError::from_db_error)?;

    Ok(Json(Response {
        status: "success",
        message: "Question deleted".to_string(),
    }))
}
