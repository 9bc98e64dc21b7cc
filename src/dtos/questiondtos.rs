use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::questionmodel::{ReactionOutcome, ReactionTarget, ReactionType};

fn default_public() -> bool {
    true
}

#[derive(Validate, Debug, Clone, Serialize, Deserialize)]
pub struct PostQuestionDto {
    pub job_id: i64,

    #[validate(length(min = 1, message = "Question content is required"))]
    pub content: String,

    #[serde(default = "default_public")]
    pub is_public: bool,
}

#[derive(Validate, Debug, Clone, Serialize, Deserialize)]
pub struct AnswerQuestionDto {
    #[validate(length(min = 1, message = "Answer is required"))]
    pub answer: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReactDto {
    #[serde(rename = "type")]
    pub reaction: ReactionType,
    pub target: ReactionTarget,
}

/// A question joined with its asker and per-target reaction tallies.
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow)]
pub struct QuestionResponseDto {
    pub id: i64,
    pub job_id: i64,
    pub user_id: i64,
    pub content: String,
    pub is_public: bool,
    pub answer: Option<String>,
    pub replied_at: Option<DateTime<Utc>>,
    pub asker_name: String,
    pub question_likes: i64,
    pub question_dislikes: i64,
    pub answer_likes: i64,
    pub answer_dislikes: i64,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

/// Questions across all jobs a client owns, for their inbox view.
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow)]
pub struct MyJobQuestionDto {
    pub id: i64,
    pub job_id: i64,
    pub user_id: i64,
    pub content: String,
    pub is_public: bool,
    pub answer: Option<String>,
    pub replied_at: Option<DateTime<Utc>>,
    pub asker_name: String,
    pub job_title: String,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct ReactionResponseDto {
    pub status: String,
    pub outcome: ReactionOutcome,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn question_defaults_to_public() {
        let dto: PostQuestionDto =
            serde_json::from_str(r#"{"job_id": 1, "content": "Is the deadline firm?"}"#).unwrap();
        assert!(dto.is_public);

        let dto: PostQuestionDto = serde_json::from_str(
            r#"{"job_id": 1, "content": "Budget flexible?", "is_public": false}"#,
        )
        .unwrap();
        assert!(!dto.is_public);
    }

    #[test]
    fn reaction_wire_format_uses_type_key() {
        let dto: ReactDto =
            serde_json::from_str(r#"{"type": "like", "target": "answer"}"#).unwrap();
        assert_eq!(dto.reaction, ReactionType::Like);
        assert_eq!(dto.target, ReactionTarget::Answer);
    }
}
