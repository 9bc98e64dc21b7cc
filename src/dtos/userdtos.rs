use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use validator::{Validate, ValidationError};

use crate::models::usermodel::{User, UserRole};

fn validate_signup_role(role: &UserRole) -> Result<(), ValidationError> {
    if *role == UserRole::Admin {
        let mut error = ValidationError::new("invalid_role");
        error.message = Some(Cow::from("Valid role (client or freelancer) is required"));
        return Err(error);
    }
    Ok(())
}

#[derive(Validate, Debug, Clone, Serialize, Deserialize)]
pub struct RegisterUserDto {
    #[validate(length(min = 2, message = "Name must be at least 2 characters"))]
    pub name: String,

    #[validate(
        length(min = 1, message = "Email is required"),
        email(message = "Valid email is required")
    )]
    pub email: String,

    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,

    #[validate(custom = "validate_signup_role")]
    pub role: UserRole,
}

#[derive(Validate, Debug, Clone, Serialize, Deserialize)]
pub struct LoginUserDto {
    #[validate(
        length(min = 1, message = "Email is required"),
        email(message = "Valid email is required")
    )]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct FilterUserDto {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub role: UserRole,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

impl FilterUserDto {
    pub fn filter_user(user: &User) -> Self {
        FilterUserDto {
            id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
            role: user.role,
            created_at: user.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct UserLoginResponseDto {
    pub status: String,
    pub user: FilterUserDto,
    pub token: String,
}

#[derive(Debug, Serialize)]
pub struct UserListResponseDto {
    pub status: String,
    pub users: Vec<FilterUserDto>,
    pub total: i64,
    pub limit: i64,
    pub offset: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admin_self_signup_is_rejected() {
        let dto = RegisterUserDto {
            name: "Eve".to_string(),
            email: "eve@example.com".to_string(),
            password: "secret1".to_string(),
            role: UserRole::Admin,
        };
        let errors = dto.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("role"));
    }

    #[test]
    fn client_signup_passes_validation() {
        let dto = RegisterUserDto {
            name: "Carol".to_string(),
            email: "carol@example.com".to_string(),
            password: "secret1".to_string(),
            role: UserRole::Client,
        };
        assert!(dto.validate().is_ok());
    }
}
