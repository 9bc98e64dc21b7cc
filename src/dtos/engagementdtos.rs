use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use validator::{Validate, ValidationError};

use crate::models::engagementmodel::EngagementStatus;
use crate::models::jobmodel::JobStatus;

fn validate_resolution(status: &EngagementStatus) -> Result<(), ValidationError> {
    if *status == EngagementStatus::Pending {
        let mut error = ValidationError::new("invalid_status");
        error.message = Some(Cow::from("Status must be accepted or rejected"));
        return Err(error);
    }
    Ok(())
}

#[derive(Validate, Debug, Clone, Serialize, Deserialize)]
pub struct CreateProposalDto {
    pub job_id: i64,

    #[validate(range(min = 0.01, message = "Valid bid amount is required"))]
    pub bid_amount: f64,

    #[validate(length(min = 10, message = "Cover letter must be at least 10 characters"))]
    pub cover_letter: String,
}

#[derive(Validate, Debug, Clone, Serialize, Deserialize)]
pub struct UpdateProposalStatusDto {
    #[validate(custom = "validate_resolution")]
    pub status: EngagementStatus,
}

/// A proposal joined with its author.
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow)]
pub struct ProposalResponseDto {
    pub id: i64,
    pub job_id: i64,
    pub freelancer_id: i64,
    pub bid_amount: BigDecimal,
    pub cover_letter: String,
    pub status: EngagementStatus,
    pub freelancer_name: String,
    pub freelancer_email: String,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

/// A freelancer's own proposal joined with the job it targets.
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow)]
pub struct MyProposalDto {
    pub id: i64,
    pub job_id: i64,
    pub bid_amount: BigDecimal,
    pub cover_letter: String,
    pub status: EngagementStatus,
    pub job_title: String,
    pub job_status: JobStatus,
    pub client_name: String,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

#[derive(Validate, Debug, Clone, Serialize, Deserialize)]
pub struct CreateApplicationDto {
    pub job_id: i64,
    pub resume_path: Option<String>,
    pub eligibility_path: Option<String>,
    pub biodata_path: Option<String>,
    #[validate(length(min = 10, message = "Cover letter must be at least 10 characters"))]
    pub cover_letter: Option<String>,
    pub additional_info: Option<String>,
}

#[derive(Validate, Debug, Clone, Serialize, Deserialize)]
pub struct UpdateApplicationStatusDto {
    #[validate(custom = "validate_resolution")]
    pub status: EngagementStatus,
    pub feedback: Option<String>,
    pub allow_reapply: Option<bool>,
}

/// An application joined with its applicant.
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow)]
pub struct ApplicationResponseDto {
    pub id: i64,
    pub job_id: i64,
    pub user_id: i64,
    pub status: EngagementStatus,
    pub feedback: Option<String>,
    pub allow_reapply: bool,
    pub applicant_name: String,
    pub applicant_email: String,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

/// Application, its detail record, applicant and job in one row.
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow)]
pub struct ApplicationDetailsDto {
    pub id: i64,
    pub job_id: i64,
    pub user_id: i64,
    pub status: EngagementStatus,
    pub feedback: Option<String>,
    pub allow_reapply: bool,
    pub resume_path: Option<String>,
    pub eligibility_path: Option<String>,
    pub biodata_path: Option<String>,
    pub cover_letter: Option<String>,
    pub additional_info: Option<String>,
    pub applicant_name: String,
    pub applicant_email: String,
    pub job_title: String,
    pub client_id: i64,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pending_is_not_a_resolution() {
        let dto = UpdateProposalStatusDto {
            status: EngagementStatus::Pending,
        };
        let errors = dto.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("status"));

        let dto = UpdateProposalStatusDto {
            status: EngagementStatus::Accepted,
        };
        assert!(dto.validate().is_ok());
    }

    #[test]
    fn short_cover_letter_is_rejected() {
        let dto = CreateProposalDto {
            job_id: 1,
            bid_amount: 250.0,
            cover_letter: "hi".to_string(),
        };
        let errors = dto.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("cover_letter"));
    }

    #[test]
    fn proposal_response_carries_freelancer_identity() {
        let row = ProposalResponseDto {
            id: 1,
            job_id: 10,
            freelancer_id: 7,
            bid_amount: BigDecimal::from(250),
            cover_letter: "I have shipped three of these.".to_string(),
            status: EngagementStatus::Pending,
            freelancer_name: "Frank".to_string(),
            freelancer_email: "frank@example.com".to_string(),
            created_at: Utc::now(),
        };
        let json = serde_json::to_value(&row).unwrap();
        assert_eq!(json["freelancer_name"], "Frank");
        assert_eq!(json["freelancer_email"], "frank@example.com");
    }

    #[test]
    fn application_cover_letter_is_optional_but_checked_when_present() {
        let dto = CreateApplicationDto {
            job_id: 1,
            resume_path: None,
            eligibility_path: None,
            biodata_path: None,
            cover_letter: None,
            additional_info: None,
        };
        assert!(dto.validate().is_ok());

        let dto = CreateApplicationDto {
            cover_letter: Some("short".to_string()),
            ..dto
        };
        assert!(dto.validate().is_err());
    }
}
