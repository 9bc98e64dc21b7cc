use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::jobmodel::JobStatus;

#[derive(Validate, Debug, Clone, Serialize, Deserialize)]
pub struct CreateJobDto {
    #[validate(length(min = 5, message = "Title must be at least 5 characters"))]
    pub title: String,

    #[validate(length(min = 20, message = "Description must be at least 20 characters"))]
    pub description: String,

    #[validate(range(min = 0.01, message = "Valid budget amount is required"))]
    pub budget: f64,

    pub image_path: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateJobStatusDto {
    pub status: JobStatus,
}

#[derive(Debug, Deserialize)]
pub struct JobListQueryDto {
    pub status: Option<JobStatus>,
    pub client_id: Option<i64>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// A job row joined with its owner, as returned by every job read.
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow)]
pub struct JobResponseDto {
    pub id: i64,
    pub client_id: i64,
    pub title: String,
    pub description: String,
    pub budget: BigDecimal,
    pub status: JobStatus,
    pub image_path: Option<String>,
    pub client_name: String,
    pub client_email: String,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct JobListResponseDto {
    pub status: String,
    pub jobs: Vec<JobResponseDto>,
    pub total: i64,
    pub limit: i64,
    pub offset: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_title_and_description_are_both_reported() {
        let dto = CreateJobDto {
            title: "Fix".to_string(),
            description: "too short".to_string(),
            budget: 100.0,
            image_path: None,
        };
        let errors = dto.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("title"));
        assert!(fields.contains_key("description"));
    }

    #[test]
    fn job_response_carries_owner_identity() {
        let row = JobResponseDto {
            id: 1,
            client_id: 1,
            title: "Build a landing page".to_string(),
            description: "Single page with a signup form and basic analytics.".to_string(),
            budget: BigDecimal::from(500),
            status: JobStatus::Open,
            image_path: None,
            client_name: "Carol".to_string(),
            client_email: "carol@example.com".to_string(),
            created_at: Utc::now(),
        };
        let json = serde_json::to_value(&row).unwrap();
        assert_eq!(json["client_name"], "Carol");
        assert_eq!(json["client_email"], "carol@example.com");
    }

    #[test]
    fn zero_budget_is_rejected() {
        let dto = CreateJobDto {
            title: "Build a landing page".to_string(),
            description: "Single page with a signup form and basic analytics.".to_string(),
            budget: 0.0,
            image_path: None,
        };
        let errors = dto.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("budget"));
    }
}
