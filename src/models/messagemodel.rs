use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Messages are immutable once created; there is no edit or delete path.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Message {
    pub id: i64,
    pub job_id: i64,
    pub sender_id: i64,
    pub receiver_id: i64,
    pub message: String,
    pub created_at: DateTime<Utc>,
}
