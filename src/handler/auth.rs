use std::sync::Arc;

use axum::{
    http::{header, StatusCode},
    response::IntoResponse,
    Extension, Json,
};
use axum_extra::extract::cookie::Cookie;
use validator::Validate;

use crate::{
    db::userdb::UserExt,
    dtos::{
        userdtos::{FilterUserDto, LoginUserDto, RegisterUserDto, UserLoginResponseDto},
        ApiResponse,
    },
    error::{ErrorMessage, HttpError},
    middleware::JWTAuthMiddeware,
    utils::{password, token},
    AppState,
};

pub async fn register(
    Extension(app_state): Extension<Arc<AppState>>,
    Json(body): Json<RegisterUserDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate().map_err(|e| HttpError::validation(&e))?;

    if let Some(_existing) = app_state
        .db_client
        .get_user_by_email(&body.email)
        .await
        .map_err(HttpError::from_db_error)?
    {
        return Err(HttpError::conflict(ErrorMessage::EmailExist.to_string()));
    }

    let hashed = password::hash(&body.password)
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let user = app_state
        .db_client
        .save_user(body.name, body.email, hashed, body.role)
        .await
        .map_err(HttpError::from_db_error)?;

    let response = ApiResponse::success(
        "Registration successful",
        FilterUserDto::filter_user(&user),
    );

    Ok((StatusCode::CREATED, Json(response)))
}

pub async fn login(
    Extension(app_state): Extension<Arc<AppState>>,
    Json(body): Json<LoginUserDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate().map_err(|e| HttpError::validation(&e))?;

    let user = app_state
        .db_client
        .get_user_by_email(&body.email)
        .await
        .map_err(HttpError::from_db_error)?
        .ok_or_else(|| HttpError::unauthorized(ErrorMessage::WrongCredentials.to_string()))?;

    let password_matches = password::compare(&body.password, &user.password)
        .map_err(|_| HttpError::unauthorized(ErrorMessage::WrongCredentials.to_string()))?;

    if !password_matches {
        return Err(HttpError::unauthorized(
            ErrorMessage::WrongCredentials.to_string(),
        ));
    }

    let token = token::create_token(
        user.id,
        &user.email,
        user.role,
        app_state.env.jwt_secret.as_bytes(),
        app_state.env.jwt_maxage,
    )
    .map_err(|e| HttpError::server_error(e.to_string()))?;

    let cookie = Cookie::build(("token", token.clone()))
        .path("/")
        .http_only(true)
        .build();

    let response = Json(UserLoginResponseDto {
        status: "success".to_string(),
        user: FilterUserDto::filter_user(&user),
        token,
    });

    Ok((
        [(header::SET_COOKIE, cookie.to_string())],
        response,
    ))
}

pub async fn me(
    Extension(auth): Extension<JWTAuthMiddeware>,
) -> Result<impl IntoResponse, HttpError> {
    let response = ApiResponse::success(
        "Authenticated user",
        FilterUserDto::filter_user(&auth.user),
    );
    Ok(Json(response))
}
