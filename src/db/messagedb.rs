// db/messagedb.rs
use async_trait::async_trait;
use sqlx::Error;

use super::db::DBClient;
use crate::dtos::messagedtos::MessageResponseDto;
use crate::models::messagemodel::Message;

#[async_trait]
pub trait MessageExt {
    async fn create_message(
        &self,
        job_id: i64,
        sender_id: i64,
        receiver_id: i64,
        message: String,
    ) -> Result<Message, Error>;

    /// One message joined with both participant names, as creation
    /// responses return it.
    async fn get_message_with_names(
        &self,
        message_id: i64,
    ) -> Result<Option<MessageResponseDto>, Error>;

    /// Full thread for a job, oldest first.
    async fn get_job_messages(&self, job_id: i64) -> Result<Vec<MessageResponseDto>, Error>;
}

#[async_trait]
impl MessageExt for DBClient {
    async fn create_message(
        &self,
        job_id: i64,
        sender_id: i64,
        receiver_id: i64,
        message: String,
    ) -> Result<Message, Error> {
        sqlx::query_as::<_, Message>(
            r#"
            INSERT INTO messages (job_id, sender_id, receiver_id, message)
            VALUES ($1, $2, $3, $4)
            RETURNING id, job_id, sender_id, receiver_id, message, created_at
            "#,
        )
        .bind(job_id)
        .bind(sender_id)
        .bind(receiver_id)
        .bind(message)
        .fetch_one(&self.pool)
        .await
    }

    async fn get_message_with_names(
        &self,
        message_id: i64,
    ) -> Result<Option<MessageResponseDto>, Error> {
        sqlx::query_as::<_, MessageResponseDto>(
            r#"
            SELECT
                m.id, m.job_id, m.sender_id, m.receiver_id, m.message, m.created_at,
                s.name AS sender_name, r.name AS receiver_name
            FROM messages m
            JOIN users s ON s.id = m.sender_id
            JOIN users r ON r.id = m.receiver_id
            WHERE m.id = $1
            "#,
        )
        .bind(message_id)
        .fetch_optional(&self.pool)
        .await
    }

    async fn get_job_messages(&self, job_id: i64) -> Result<Vec<MessageResponseDto>, Error> {
        sqlx::query_as::<_, MessageResponseDto>(
            r#"
            SELECT
                m.id, m.job_id, m.sender_id, m.receiver_id, m.message, m.created_at,
                s.name AS sender_name, r.name AS receiver_name
            FROM messages m
            JOIN users s ON s.id = m.sender_id
            JOIN users r ON r.id = m.receiver_id
            WHERE m.job_id = $1
            ORDER BY m.created_at ASC, m.id ASC
            "#,
        )
        .bind(job_id)
        .fetch_all(&self.pool)
        .await
    }
}
