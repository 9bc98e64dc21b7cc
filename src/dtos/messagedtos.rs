use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Validate, Debug, Clone, Serialize, Deserialize)]
pub struct SendMessageDto {
    pub job_id: i64,
    pub receiver_id: i64,

    #[validate(length(min = 1, message = "Message is required"))]
    pub message: String,
}

/// A message joined with both participant names.
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow)]
pub struct MessageResponseDto {
    pub id: i64,
    pub job_id: i64,
    pub sender_id: i64,
    pub receiver_id: i64,
    pub message: String,
    pub sender_name: String,
    pub receiver_name: String,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn wire_format_carries_party_names() {
        let row = MessageResponseDto {
            id: 1,
            job_id: 10,
            sender_id: 1,
            receiver_id: 7,
            message: "Can you start Monday?".to_string(),
            sender_name: "Carol".to_string(),
            receiver_name: "Frank".to_string(),
            created_at: Utc::now(),
        };
        let json = serde_json::to_value(&row).unwrap();
        assert_eq!(json["sender_name"], "Carol");
        assert_eq!(json["receiver_name"], "Frank");
        assert!(json.get("createdAt").is_some());
    }
}
