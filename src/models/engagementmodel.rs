use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::BigDecimal;

/// Shared by proposals and applications; both start pending and are
/// resolved by the job's client (or an admin).
#[derive(Debug, Serialize, Deserialize, Clone, Copy, sqlx::Type, PartialEq)]
#[sqlx(type_name = "engagement_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum EngagementStatus {
    Pending,
    Accepted,
    Rejected,
}

impl EngagementStatus {
    pub fn to_str(&self) -> &str {
        match self {
            EngagementStatus::Pending => "pending",
            EngagementStatus::Accepted => "accepted",
            EngagementStatus::Rejected => "rejected",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Proposal {
    pub id: i64,
    pub job_id: i64,
    pub freelancer_id: i64,
    pub bid_amount: BigDecimal,
    pub cover_letter: String,
    pub status: EngagementStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Application {
    pub id: i64,
    pub job_id: i64,
    pub user_id: i64,
    pub status: EngagementStatus,
    pub feedback: Option<String>,
    pub allow_reapply: bool,
    pub created_at: DateTime<Utc>,
}

/// 1:1 child of an application, created in the same transaction.
/// Document paths are opaque strings produced by the upload collaborator.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct ApplicationDetails {
    pub id: i64,
    pub application_id: i64,
    pub resume_path: Option<String>,
    pub eligibility_path: Option<String>,
    pub biodata_path: Option<String>,
    pub cover_letter: Option<String>,
    pub additional_info: Option<String>,
    pub created_at: DateTime<Utc>,
}
