// db/proposaldb.rs
use async_trait::async_trait;
use sqlx::{types::BigDecimal, Error};

use super::db::DBClient;
use crate::dtos::engagementdtos::{MyProposalDto, ProposalResponseDto};
use crate::models::engagementmodel::{EngagementStatus, Proposal};
use crate::service::lifecycle::AcceptancePlan;

#[async_trait]
pub trait ProposalExt {
    async fn create_proposal(
        &self,
        job_id: i64,
        freelancer_id: i64,
        bid_amount: BigDecimal,
        cover_letter: String,
    ) -> Result<Proposal, Error>;

    async fn get_proposal(&self, proposal_id: i64) -> Result<Option<Proposal>, Error>;

    /// One proposal joined with its author, as creation responses
    /// return it.
    async fn get_proposal_with_freelancer(
        &self,
        proposal_id: i64,
    ) -> Result<Option<ProposalResponseDto>, Error>;

    /// Raw sibling rows for one job, used to plan an acceptance cascade.
    async fn get_proposals_for_job(&self, job_id: i64) -> Result<Vec<Proposal>, Error>;

    async fn get_job_proposals(&self, job_id: i64) -> Result<Vec<ProposalResponseDto>, Error>;

    async fn get_my_proposals(&self, freelancer_id: i64) -> Result<Vec<MyProposalDto>, Error>;

    /// The freelancer whose proposal on this job was accepted, if any.
    async fn get_accepted_freelancer(&self, job_id: i64) -> Result<Option<i64>, Error>;

    async fn update_proposal_status(
        &self,
        proposal_id: i64,
        status: EngagementStatus,
    ) -> Result<Proposal, Error>;

    /// Executes an acceptance plan in one transaction: the winning row is
    /// accepted, the job moves along, and every planned sibling is
    /// rejected. Either all of it lands or none of it does.
    async fn apply_acceptance(&self, plan: &AcceptancePlan) -> Result<Proposal, Error>;
}

#[async_trait]
impl ProposalExt for DBClient {
    async fn create_proposal(
        &self,
        job_id: i64,
        freelancer_id: i64,
        bid_amount: BigDecimal,
        cover_letter: String,
    ) -> Result<Proposal, Error> {
        sqlx::query_as::<_, Proposal>(
            r#"
            INSERT INTO proposals (job_id, freelancer_id, bid_amount, cover_letter)
            VALUES ($1, $2, $3, $4)
            RETURNING id, job_id, freelancer_id, bid_amount, cover_letter, status, created_at
            "#,
        )
        .bind(job_id)
        .bind(freelancer_id)
        .bind(bid_amount)
        .bind(cover_letter)
        .fetch_one(&self.pool)
        .await
    }

    async fn get_proposal(&self, proposal_id: i64) -> Result<Option<Proposal>, Error> {
        sqlx::query_as::<_, Proposal>(
            r#"
            SELECT id, job_id, freelancer_id, bid_amount, cover_letter, status, created_at
            FROM proposals
            WHERE id = $1
            "#,
        )
        .bind(proposal_id)
        .fetch_optional(&self.pool)
        .await
    }

    async fn get_proposal_with_freelancer(
        &self,
        proposal_id: i64,
    ) -> Result<Option<ProposalResponseDto>, Error> {
        sqlx::query_as::<_, ProposalResponseDto>(
            r#"
            SELECT
                p.id, p.job_id, p.freelancer_id, p.bid_amount, p.cover_letter,
                p.status, p.created_at,
                u.name AS freelancer_name, u.email AS freelancer_email
            FROM proposals p
            JOIN users u ON u.id = p.freelancer_id
            WHERE p.id = $1
            "#,
        )
        .bind(proposal_id)
        .fetch_optional(&self.pool)
        .await
    }

    async fn get_proposals_for_job(&self, job_id: i64) -> Result<Vec<Proposal>, Error> {
        sqlx::query_as::<_, Proposal>(
            r#"
            SELECT id, job_id, freelancer_id, bid_amount, cover_letter, status, created_at
            FROM proposals
            WHERE job_id = $1
            ORDER BY created_at ASC
            "#,
        )
        .bind(job_id)
        .fetch_all(&self.pool)
        .await
    }

    async fn get_job_proposals(&self, job_id: i64) -> Result<Vec<ProposalResponseDto>, Error> {
        sqlx::query_as::<_, ProposalResponseDto>(
            r#"
            SELECT
                p.id, p.job_id, p.freelancer_id, p.bid_amount, p.cover_letter,
                p.status, p.created_at,
                u.name AS freelancer_name, u.email AS freelancer_email
            FROM proposals p
            JOIN users u ON u.id = p.freelancer_id
            WHERE p.job_id = $1
            ORDER BY p.created_at DESC
            "#,
        )
        .bind(job_id)
        .fetch_all(&self.pool)
        .await
    }

    async fn get_my_proposals(&self, freelancer_id: i64) -> Result<Vec<MyProposalDto>, Error> {
        sqlx::query_as::<_, MyProposalDto>(
            r#"
            SELECT
                p.id, p.job_id, p.bid_amount, p.cover_letter, p.status, p.created_at,
                j.title AS job_title, j.status AS job_status,
                u.name AS client_name
            FROM proposals p
            JOIN jobs j ON j.id = p.job_id
            JOIN users u ON u.id = j.client_id
            WHERE p.freelancer_id = $1
            ORDER BY p.created_at DESC
            "#,
        )
        .bind(freelancer_id)
        .fetch_all(&self.pool)
        .await
    }

    async fn get_accepted_freelancer(&self, job_id: i64) -> Result<Option<i64>, Error> {
        sqlx::query_scalar::<_, i64>(
            r#"
            SELECT freelancer_id FROM proposals
            WHERE job_id = $1 AND status = 'accepted'::engagement_status
            "#,
        )
        .bind(job_id)
        .fetch_optional(&self.pool)
        .await
    }

    async fn update_proposal_status(
        &self,
        proposal_id: i64,
        status: EngagementStatus,
    ) -> Result<Proposal, Error> {
        sqlx::query_as::<_, Proposal>(
            r#"
            UPDATE proposals
            SET status = $2
            WHERE id = $1
            RETURNING id, job_id, freelancer_id, bid_amount, cover_letter, status, created_at
            "#,
        )
        .bind(proposal_id)
        .bind(status)
        .fetch_one(&self.pool)
        .await
    }

    async fn apply_acceptance(&self, plan: &AcceptancePlan) -> Result<Proposal, Error> {
        let mut tx = self.pool.begin().await?;

        let accepted = sqlx::query_as::<_, Proposal>(
            r#"
            UPDATE proposals
            SET status = 'accepted'::engagement_status
            WHERE id = $1
            RETURNING id, job_id, freelancer_id, bid_amount, cover_letter, status, created_at
            "#,
        )
        .bind(plan.accept)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query("UPDATE jobs SET status = $2 WHERE id = $1")
            .bind(plan.job_id)
            .bind(plan.job_to)
            .execute(&mut *tx)
            .await?;

        if !plan.reject.is_empty() {
            sqlx::query(
                r#"
                UPDATE proposals
                SET status = 'rejected'::engagement_status
                WHERE id = ANY($1)
                "#,
            )
            .bind(&plan.reject)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(accepted)
    }
}
