use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Question {
    pub id: i64,
    pub job_id: i64,
    pub user_id: i64,
    pub content: String,
    pub is_public: bool,
    pub answer: Option<String>,
    pub replied_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, sqlx::Type, PartialEq)]
#[sqlx(type_name = "reaction_type", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ReactionType {
    Like,
    Dislike,
}

impl ReactionType {
    pub fn to_str(&self) -> &str {
        match self {
            ReactionType::Like => "like",
            ReactionType::Dislike => "dislike",
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, sqlx::Type, PartialEq)]
#[sqlx(type_name = "reaction_target", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ReactionTarget {
    Question,
    Answer,
}

impl ReactionTarget {
    pub fn to_str(&self) -> &str {
        match self {
            ReactionTarget::Question => "question",
            ReactionTarget::Answer => "answer",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct QuestionReaction {
    pub id: i64,
    pub user_id: i64,
    pub question_id: i64,
    pub reaction: ReactionType,
    pub target: ReactionTarget,
    pub created_at: DateTime<Utc>,
}

/// What a reaction request did; callers must be able to tell the three
/// outcomes apart.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum ReactionOutcome {
    Added,
    Updated,
    Removed,
}

/// Reactions are unique per (user, question, target). Re-sending the same
/// type toggles the reaction off; a different type replaces it.
pub fn plan_reaction(existing: Option<ReactionType>, requested: ReactionType) -> ReactionOutcome {
    match existing {
        None => ReactionOutcome::Added,
        Some(current) if current == requested => ReactionOutcome::Removed,
        Some(_) => ReactionOutcome::Updated,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_reaction_is_added() {
        assert_eq!(
            plan_reaction(None, ReactionType::Like),
            ReactionOutcome::Added
        );
    }

    #[test]
    fn repeating_same_type_toggles_off() {
        assert_eq!(
            plan_reaction(Some(ReactionType::Like), ReactionType::Like),
            ReactionOutcome::Removed
        );
        assert_eq!(
            plan_reaction(Some(ReactionType::Dislike), ReactionType::Dislike),
            ReactionOutcome::Removed
        );
    }

    #[test]
    fn different_type_replaces() {
        assert_eq!(
            plan_reaction(Some(ReactionType::Like), ReactionType::Dislike),
            ReactionOutcome::Updated
        );
    }
}
