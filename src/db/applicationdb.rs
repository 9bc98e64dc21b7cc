// db/applicationdb.rs
use async_trait::async_trait;
use sqlx::Error;

use super::db::DBClient;
use crate::dtos::engagementdtos::{ApplicationDetailsDto, ApplicationResponseDto};
use crate::models::engagementmodel::{Application, EngagementStatus};

pub struct NewApplicationDetails {
    pub resume_path: Option<String>,
    pub eligibility_path: Option<String>,
    pub biodata_path: Option<String>,
    pub cover_letter: Option<String>,
    pub additional_info: Option<String>,
}

#[async_trait]
pub trait ApplicationExt {
    /// Inserts the application and its detail record in one transaction,
    /// so a half-written submission never becomes visible.
    async fn create_application_with_details(
        &self,
        job_id: i64,
        user_id: i64,
        details: NewApplicationDetails,
    ) -> Result<Application, Error>;

    async fn get_application(&self, application_id: i64) -> Result<Option<Application>, Error>;

    /// The applicant's most recent application for this job, used by the
    /// reapplication gate.
    async fn get_latest_application(
        &self,
        job_id: i64,
        user_id: i64,
    ) -> Result<Option<Application>, Error>;

    async fn get_job_applications(
        &self,
        job_id: i64,
    ) -> Result<Vec<ApplicationResponseDto>, Error>;

    async fn get_application_details(
        &self,
        application_id: i64,
    ) -> Result<Option<ApplicationDetailsDto>, Error>;

    async fn update_application_status(
        &self,
        application_id: i64,
        status: EngagementStatus,
        feedback: Option<String>,
        allow_reapply: bool,
    ) -> Result<Application, Error>;
}

#[async_trait]
impl ApplicationExt for DBClient {
    async fn create_application_with_details(
        &self,
        job_id: i64,
        user_id: i64,
        details: NewApplicationDetails,
    ) -> Result<Application, Error> {
        let mut tx = self.pool.begin().await?;

        let application = sqlx::query_as::<_, Application>(
            r#"
            INSERT INTO applications (job_id, user_id)
            VALUES ($1, $2)
            RETURNING id, job_id, user_id, status, feedback, allow_reapply, created_at
            "#,
        )
        .bind(job_id)
        .bind(user_id)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query(
            r#"
            INSERT INTO application_details
                (application_id, resume_path, eligibility_path, biodata_path, cover_letter, additional_info)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(application.id)
        .bind(details.resume_path)
        .bind(details.eligibility_path)
        .bind(details.biodata_path)
        .bind(details.cover_letter)
        .bind(details.additional_info)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(application)
    }

    async fn get_application(&self, application_id: i64) -> Result<Option<Application>, Error> {
        sqlx::query_as::<_, Application>(
            r#"
            SELECT id, job_id, user_id, status, feedback, allow_reapply, created_at
            FROM applications
            WHERE id = $1
            "#,
        )
        .bind(application_id)
        .fetch_optional(&self.pool)
        .await
    }

    async fn get_latest_application(
        &self,
        job_id: i64,
        user_id: i64,
    ) -> Result<Option<Application>, Error> {
        sqlx::query_as::<_, Application>(
            r#"
            SELECT id, job_id, user_id, status, feedback, allow_reapply, created_at
            FROM applications
            WHERE job_id = $1 AND user_id = $2
            ORDER BY created_at DESC, id DESC
            LIMIT 1
            "#,
        )
        .bind(job_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
    }

    async fn get_job_applications(
        &self,
        job_id: i64,
    ) -> Result<Vec<ApplicationResponseDto>, Error> {
        sqlx::query_as::<_, ApplicationResponseDto>(
            r#"
            SELECT
                a.id, a.job_id, a.user_id, a.status, a.feedback, a.allow_reapply, a.created_at,
                u.name AS applicant_name, u.email AS applicant_email
            FROM applications a
            JOIN users u ON u.id = a.user_id
            WHERE a.job_id = $1
            ORDER BY a.created_at DESC
            "#,
        )
        .bind(job_id)
        .fetch_all(&self.pool)
        .await
    }

    async fn get_application_details(
        &self,
        application_id: i64,
    ) -> Result<Option<ApplicationDetailsDto>, Error> {
        sqlx::query_as::<_, ApplicationDetailsDto>(
            r#"
            SELECT
                a.id, a.job_id, a.user_id, a.status, a.feedback, a.allow_reapply, a.created_at,
                d.resume_path, d.eligibility_path, d.biodata_path, d.cover_letter, d.additional_info,
                u.name AS applicant_name, u.email AS applicant_email,
                j.title AS job_title, j.client_id
            FROM applications a
            JOIN application_details d ON d.application_id = a.id
            JOIN users u ON u.id = a.user_id
            JOIN jobs j ON j.id = a.job_id
            WHERE a.id = $1
            "#,
        )
        .bind(application_id)
        .fetch_optional(&self.pool)
        .await
    }

    async fn update_application_status(
        &self,
        application_id: i64,
        status: EngagementStatus,
        feedback: Option<String>,
        allow_reapply: bool,
    ) -> Result<Application, Error> {
        sqlx::query_as::<_, Application>(
            r#"
            UPDATE applications
            SET status = $2, feedback = $3, allow_reapply = $4
            WHERE id = $1
            RETURNING id, job_id, user_id, status, feedback, allow_reapply, created_at
            "#,
        )
        .bind(application_id)
        .bind(status)
        .bind(feedback)
        .bind(allow_reapply)
        .fetch_one(&self.pool)
        .await
    }
}
