use std::collections::BTreeMap;
use std::fmt;

use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;

#[derive(Debug, PartialEq)]
pub enum ErrorMessage {
    EmailExist,
    WrongCredentials,
    TokenNotProvided,
    InvalidToken,
    UserNoLongerExist,
    PermissionDenied,
    HashingError,
    ExceededMaxPasswordLength(usize),
}

impl ErrorMessage {
    pub fn to_str(&self) -> String {
        match self {
            ErrorMessage::EmailExist => "Email already registered".to_string(),
            ErrorMessage::WrongCredentials => "Invalid email or password".to_string(),
            ErrorMessage::TokenNotProvided => "Authentication required".to_string(),
            ErrorMessage::InvalidToken => "Invalid or expired token".to_string(),
            ErrorMessage::UserNoLongerExist => {
                "User belonging to this token no longer exists".to_string()
            }
            ErrorMessage::PermissionDenied => "Insufficient permissions".to_string(),
            ErrorMessage::HashingError => "Error while hashing password".to_string(),
            ErrorMessage::ExceededMaxPasswordLength(max) => {
                format!("Password must not be more than {} characters", max)
            }
        }
    }
}

impl fmt::Display for ErrorMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_str())
    }
}

/// Stable machine-checkable error discriminant carried in every error body.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    NotFound,
    Forbidden,
    Unauthorized,
    BadRequest,
    ValidationFailed,
    Conflict,
    StateViolation,
    Internal,
}

#[derive(Debug)]
pub struct HttpError {
    pub message: String,
    pub status: StatusCode,
    pub kind: ErrorKind,
    pub fields: Option<BTreeMap<String, String>>,
}

impl HttpError {
    pub fn new(message: impl Into<String>, status: StatusCode, kind: ErrorKind) -> Self {
        HttpError {
            message: message.into(),
            status,
            kind,
            fields: None,
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        HttpError::new(message, StatusCode::NOT_FOUND, ErrorKind::NotFound)
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        HttpError::new(message, StatusCode::FORBIDDEN, ErrorKind::Forbidden)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        HttpError::new(message, StatusCode::UNAUTHORIZED, ErrorKind::Unauthorized)
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        HttpError::new(message, StatusCode::CONFLICT, ErrorKind::Conflict)
    }

    /// Action is valid in general but not for the entity's current
    /// lifecycle state (proposing on a closed job, reviewing an
    /// uncompleted one). 400-class, distinct from Conflict.
    pub fn state_violation(message: impl Into<String>) -> Self {
        HttpError::new(message, StatusCode::BAD_REQUEST, ErrorKind::StateViolation)
    }

    pub fn server_error(message: impl Into<String>) -> Self {
        HttpError::new(
            message,
            StatusCode::INTERNAL_SERVER_ERROR,
            ErrorKind::Internal,
        )
    }

    /// Plain 400 for a single malformed value outside the field-level
    /// validation path (self-addressed messages, unrepresentable
    /// amounts). Carries no field map.
    pub fn bad_request(message: impl Into<String>) -> Self {
        HttpError::new(message, StatusCode::BAD_REQUEST, ErrorKind::BadRequest)
    }

    /// Field-level validation failure; every failing field is reported.
    pub fn validation(errors: &validator::ValidationErrors) -> Self {
        let mut fields = BTreeMap::new();
        for (field, errs) in errors.field_errors() {
            let message = errs
                .iter()
                .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
                .collect::<Vec<_>>()
                .join("; ");
            let message = if message.is_empty() {
                format!("{} is invalid", field)
            } else {
                message
            };
            fields.insert(field.to_string(), message);
        }
        HttpError {
            message: "Validation failed".to_string(),
            status: StatusCode::UNPROCESSABLE_ENTITY,
            kind: ErrorKind::ValidationFailed,
            fields: Some(fields),
        }
    }

    pub fn from_db_error(e: sqlx::Error) -> Self {
        tracing::error!("database error: {}", e);
        match e {
            sqlx::Error::RowNotFound => HttpError::not_found("Resource not found"),
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                HttpError::conflict("Duplicate submission")
            }
            _ => HttpError::server_error("Internal server error"),
        }
    }
}

impl fmt::Display for HttpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "HttpError: message: {}, status: {}",
            self.message, self.status
        )
    }
}

impl std::error::Error for HttpError {}

impl IntoResponse for HttpError {
    fn into_response(self) -> axum::response::Response {
        let mut body = serde_json::json!({
            "status": "fail",
            "kind": self.kind,
            "message": self.message,
        });
        if let Some(fields) = &self.fields {
            body["errors"] = serde_json::json!(fields);
        }
        (self.status, Json(body)).into_response()
    }
}

impl From<sqlx::Error> for HttpError {
    fn from(e: sqlx::Error) -> Self {
        HttpError::from_db_error(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[derive(Validate)]
    struct Probe {
        #[validate(length(min = 5, message = "Title must be at least 5 characters"))]
        title: String,
        #[validate(range(min = 1.0, message = "Valid budget amount is required"))]
        budget: f64,
    }

    #[test]
    fn validation_reports_every_failing_field() {
        let probe = Probe {
            title: "abc".to_string(),
            budget: 0.0,
        };
        let err = HttpError::validation(&probe.validate().unwrap_err());

        assert_eq!(err.kind, ErrorKind::ValidationFailed);
        assert_eq!(err.status, StatusCode::UNPROCESSABLE_ENTITY);
        let fields = err.fields.unwrap();
        assert_eq!(fields.len(), 2);
        assert_eq!(fields["title"], "Title must be at least 5 characters");
        assert_eq!(fields["budget"], "Valid budget amount is required");
    }

    #[test]
    fn state_violation_is_400_and_distinct_from_conflict() {
        let state = HttpError::state_violation("Job is not accepting proposals");
        let dup = HttpError::conflict("You have already submitted a proposal for this job");

        assert_eq!(state.status, StatusCode::BAD_REQUEST);
        assert_eq!(state.kind, ErrorKind::StateViolation);
        assert_eq!(dup.status, StatusCode::CONFLICT);
        assert_ne!(state.kind, dup.kind);
    }

    #[test]
    fn bad_request_is_plain_400_without_field_map() {
        let err = HttpError::bad_request("You cannot send a message to yourself");
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.kind, ErrorKind::BadRequest);
        assert!(err.fields.is_none());
    }

    #[test]
    fn kind_serializes_snake_case() {
        let json = serde_json::to_string(&ErrorKind::StateViolation).unwrap();
        assert_eq!(json, "\"state_violation\"");
    }
}
