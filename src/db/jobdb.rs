// db/jobdb.rs
use async_trait::async_trait;
use sqlx::{types::BigDecimal, Error};

use super::db::DBClient;
use crate::dtos::jobdtos::JobResponseDto;
use crate::models::jobmodel::{Job, JobStatus};

#[async_trait]
pub trait JobExt {
    async fn create_job(
        &self,
        client_id: i64,
        title: String,
        description: String,
        budget: BigDecimal,
        image_path: Option<String>,
    ) -> Result<Job, Error>;

    async fn get_job(&self, job_id: i64) -> Result<Option<Job>, Error>;

    async fn get_job_with_client(&self, job_id: i64) -> Result<Option<JobResponseDto>, Error>;

    async fn list_jobs(
        &self,
        status: Option<JobStatus>,
        client_id: Option<i64>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<JobResponseDto>, Error>;

    async fn count_jobs(
        &self,
        status: Option<JobStatus>,
        client_id: Option<i64>,
    ) -> Result<i64, Error>;

    async fn update_job_status(&self, job_id: i64, status: JobStatus) -> Result<Job, Error>;

    async fn delete_job(&self, job_id: i64) -> Result<u64, Error>;
}

#[async_trait]
impl JobExt for DBClient {
    async fn create_job(
        &self,
        client_id: i64,
        title: String,
        description: String,
        budget: BigDecimal,
        image_path: Option<String>,
    ) -> Result<Job, Error> {
        sqlx::query_as::<_, Job>(
            r#"
            INSERT INTO jobs (client_id, title, description, budget, image_path)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, client_id, title, description, budget, status, image_path, created_at
            "#,
        )
        .bind(client_id)
        .bind(title)
        .bind(description)
        .bind(budget)
        .bind(image_path)
        .fetch_one(&self.pool)
        .await
    }

    async fn get_job(&self, job_id: i64) -> Result<Option<Job>, Error> {
        sqlx::query_as::<_, Job>(
            r#"
            SELECT id, client_id, title, description, budget, status, image_path, created_at
            FROM jobs
            WHERE id = $1
            "#,
        )
        .bind(job_id)
        .fetch_optional(&self.pool)
        .await
    }

    async fn get_job_with_client(&self, job_id: i64) -> Result<Option<JobResponseDto>, Error> {
        sqlx::query_as::<_, JobResponseDto>(
            r#"
            SELECT
                j.id, j.client_id, j.title, j.description, j.budget,
                j.status, j.image_path, j.created_at,
                u.name AS client_name, u.email AS client_email
            FROM jobs j
            JOIN users u ON u.id = j.client_id
            WHERE j.id = $1
            "#,
        )
        .bind(job_id)
        .fetch_optional(&self.pool)
        .await
    }

    async fn list_jobs(
        &self,
        status: Option<JobStatus>,
        client_id: Option<i64>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<JobResponseDto>, Error> {
        sqlx::query_as::<_, JobResponseDto>(
            r#"
            SELECT
                j.id, j.client_id, j.title, j.description, j.budget,
                j.status, j.image_path, j.created_at,
                u.name AS client_name, u.email AS client_email
            FROM jobs j
            JOIN users u ON u.id = j.client_id
            WHERE ($1::job_status IS NULL OR j.status = $1)
              AND ($2::BIGINT IS NULL OR j.client_id = $2)
            ORDER BY j.created_at DESC
            LIMIT $3 OFFSET $4
            "#,
        )
        .bind(status)
        .bind(client_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
    }

    async fn count_jobs(
        &self,
        status: Option<JobStatus>,
        client_id: Option<i64>,
    ) -> Result<i64, Error> {
        sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*) FROM jobs
            WHERE ($1::job_status IS NULL OR status = $1)
              AND ($2::BIGINT IS NULL OR client_id = $2)
            "#,
        )
        .bind(status)
        .bind(client_id)
        .fetch_one(&self.pool)
        .await
    }

    async fn update_job_status(&self, job_id: i64, status: JobStatus) -> Result<Job, Error> {
        sqlx::query_as::<_, Job>(
            r#"
            UPDATE jobs
            SET status = $2
            WHERE id = $1
            RETURNING id, client_id, title, description, budget, status, image_path, created_at
            "#,
        )
        .bind(job_id)
        .bind(status)
        .fetch_one(&self.pool)
        .await
    }

    async fn delete_job(&self, job_id: i64) -> Result<u64, Error> {
        let result = sqlx::query("DELETE FROM jobs WHERE id = $1")
            .bind(job_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }
}
