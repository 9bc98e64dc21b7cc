// db/reviewdb.rs
use async_trait::async_trait;
use sqlx::Error;

use super::db::DBClient;
use crate::dtos::reviewdtos::ReviewResponseDto;
use crate::models::reviewmodel::Review;

#[async_trait]
pub trait ReviewExt {
    async fn create_review(
        &self,
        job_id: i64,
        reviewer_id: i64,
        reviewed_user_id: i64,
        rating: i32,
        comment: String,
    ) -> Result<Review, Error>;

    /// One review joined with reviewer name and job title, as creation
    /// responses return it.
    async fn get_review_with_names(
        &self,
        review_id: i64,
    ) -> Result<Option<ReviewResponseDto>, Error>;

    /// Duplicate check before insert; the unique index backstops races.
    async fn get_review_for_job(
        &self,
        job_id: i64,
        reviewer_id: i64,
    ) -> Result<Option<Review>, Error>;

    async fn get_user_reviews(
        &self,
        user_id: i64,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<ReviewResponseDto>, Error>;

    async fn get_user_ratings(&self, user_id: i64) -> Result<Vec<i32>, Error>;

    async fn count_user_reviews(&self, user_id: i64) -> Result<i64, Error>;
}

#[async_trait]
impl ReviewExt for DBClient {
    async fn create_review(
        &self,
        job_id: i64,
        reviewer_id: i64,
        reviewed_user_id: i64,
        rating: i32,
        comment: String,
    ) -> Result<Review, Error> {
        sqlx::query_as::<_, Review>(
            r#"
            INSERT INTO reviews (job_id, reviewer_id, reviewed_user_id, rating, comment)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, job_id, reviewer_id, reviewed_user_id, rating, comment, created_at
            "#,
        )
        .bind(job_id)
        .bind(reviewer_id)
        .bind(reviewed_user_id)
        .bind(rating)
        .bind(comment)
        .fetch_one(&self.pool)
        .await
    }

    async fn get_review_with_names(
        &self,
        review_id: i64,
    ) -> Result<Option<ReviewResponseDto>, Error> {
        sqlx::query_as::<_, ReviewResponseDto>(
            r#"
            SELECT
                rv.id, rv.job_id, rv.reviewer_id, rv.reviewed_user_id,
                rv.rating, rv.comment, rv.created_at,
                u.name AS reviewer_name,
                j.title AS job_title
            FROM reviews rv
            JOIN users u ON u.id = rv.reviewer_id
            JOIN jobs j ON j.id = rv.job_id
            WHERE rv.id = $1
            "#,
        )
        .bind(review_id)
        .fetch_optional(&self.pool)
        .await
    }

    async fn get_review_for_job(
        &self,
        job_id: i64,
        reviewer_id: i64,
    ) -> Result<Option<Review>, Error> {
        sqlx::query_as::<_, Review>(
            r#"
            SELECT id, job_id, reviewer_id, reviewed_user_id, rating, comment, created_at
            FROM reviews
            WHERE job_id = $1 AND reviewer_id = $2
            "#,
        )
        .bind(job_id)
        .bind(reviewer_id)
        .fetch_optional(&self.pool)
        .await
    }

    async fn get_user_reviews(
        &self,
        user_id: i64,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<ReviewResponseDto>, Error> {
        sqlx::query_as::<_, ReviewResponseDto>(
            r#"
            SELECT
                rv.id, rv.job_id, rv.reviewer_id, rv.reviewed_user_id,
                rv.rating, rv.comment, rv.created_at,
                u.name AS reviewer_name,
                j.title AS job_title
            FROM reviews rv
            JOIN users u ON u.id = rv.reviewer_id
            JOIN jobs j ON j.id = rv.job_id
            WHERE rv.reviewed_user_id = $1
            ORDER BY rv.created_at DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(user_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
    }

    async fn get_user_ratings(&self, user_id: i64) -> Result<Vec<i32>, Error> {
        sqlx::query_scalar::<_, i32>("SELECT rating FROM reviews WHERE reviewed_user_id = $1")
            .bind(user_id)
            .fetch_all(&self.pool)
            .await
    }

    async fn count_user_reviews(&self, user_id: i64) -> Result<i64, Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM reviews WHERE reviewed_user_id = $1")
            .bind(user_id)
            .fetch_one(&self.pool)
            .await
    }
}
