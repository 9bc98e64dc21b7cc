// db/questiondb.rs
use async_trait::async_trait;
use sqlx::Error;

use super::db::DBClient;
use crate::dtos::questiondtos::{MyJobQuestionDto, QuestionResponseDto};
use crate::models::questionmodel::{
    plan_reaction, Question, ReactionOutcome, ReactionTarget, ReactionType,
};

const REACTION_COUNTS: &str = r#"
    (SELECT COUNT(*) FROM question_reactions r
        WHERE r.question_id = q.id
          AND r.target = 'question'::reaction_target
          AND r.reaction = 'like'::reaction_type) AS question_likes,
    (SELECT COUNT(*) FROM question_reactions r
        WHERE r.question_id = q.id
          AND r.target = 'question'::reaction_target
          AND r.reaction = 'dislike'::reaction_type) AS question_dislikes,
    (SELECT COUNT(*) FROM question_reactions r
        WHERE r.question_id = q.id
          AND r.target = 'answer'::reaction_target
          AND r.reaction = 'like'::reaction_type) AS answer_likes,
    (SELECT COUNT(*) FROM question_reactions r
        WHERE r.question_id = q.id
          AND r.target = 'answer'::reaction_target
          AND r.reaction = 'dislike'::reaction_type) AS answer_dislikes
"#;

#[async_trait]
pub trait QuestionExt {
    async fn create_question(
        &self,
        job_id: i64,
        user_id: i64,
        content: String,
        is_public: bool,
    ) -> Result<Question, Error>;

    async fn get_question(&self, question_id: i64) -> Result<Option<Question>, Error>;

    /// Questions on a job visible to the viewer: public ones, the
    /// viewer's own, or everything when the viewer owns the job (or is
    /// an admin). Anonymous viewers pass a sentinel id that matches no
    /// row.
    async fn get_job_questions(
        &self,
        job_id: i64,
        viewer_id: i64,
        viewer_sees_all: bool,
    ) -> Result<Vec<QuestionResponseDto>, Error>;

    /// Questions across every job the client owns.
    async fn get_my_job_questions(&self, client_id: i64) -> Result<Vec<MyJobQuestionDto>, Error>;

    async fn answer_question(&self, question_id: i64, answer: String) -> Result<Question, Error>;

    async fn delete_question(&self, question_id: i64) -> Result<u64, Error>;

    /// Toggle semantics: reacting with the stored type removes it, a
    /// different type replaces it, and no stored reaction inserts one.
    /// The existing row is read and resolved inside one transaction.
    async fn react_to_question(
        &self,
        user_id: i64,
        question_id: i64,
        target: ReactionTarget,
        requested: ReactionType,
    ) -> Result<ReactionOutcome, Error>;
}

#[async_trait]
impl QuestionExt for DBClient {
    async fn create_question(
        &self,
        job_id: i64,
        user_id: i64,
        content: String,
        is_public: bool,
    ) -> Result<Question, Error> {
        sqlx::query_as::<_, Question>(
            r#"
            INSERT INTO questions (job_id, user_id, content, is_public)
            VALUES ($1, $2, $3, $4)
            RETURNING id, job_id, user_id, content, is_public, answer, replied_at, created_at
            "#,
        )
        .bind(job_id)
        .bind(user_id)
        .bind(content)
        .bind(is_public)
        .fetch_one(&self.pool)
        .await
    }

    async fn get_question(&self, question_id: i64) -> Result<Option<Question>, Error> {
        sqlx::query_as::<_, Question>(
            r#"
            SELECT id, job_id, user_id, content, is_public, answer, replied_at, created_at
            FROM questions
            WHERE id = $1
            "#,
        )
        .bind(question_id)
        .fetch_optional(&self.pool)
        .await
    }

    async fn get_job_questions(
        &self,
        job_id: i64,
        viewer_id: i64,
        viewer_sees_all: bool,
    ) -> Result<Vec<QuestionResponseDto>, Error> {
        let sql = format!(
            r#"
            SELECT
                q.id, q.job_id, q.user_id, q.content, q.is_public,
                q.answer, q.replied_at, q.created_at,
                u.name AS asker_name,
                {REACTION_COUNTS}
            FROM questions q
            JOIN users u ON u.id = q.user_id
            WHERE q.job_id = $1
              AND (q.is_public = TRUE OR q.user_id = $2 OR $3)
            ORDER BY q.created_at DESC
            "#
        );

        sqlx::query_as::<_, QuestionResponseDto>(&sql)
            .bind(job_id)
            .bind(viewer_id)
            .bind(viewer_sees_all)
            .fetch_all(&self.pool)
            .await
    }

    async fn get_my_job_questions(&self, client_id: i64) -> Result<Vec<MyJobQuestionDto>, Error> {
        sqlx::query_as::<_, MyJobQuestionDto>(
            r#"
            SELECT
                q.id, q.job_id, q.user_id, q.content, q.is_public,
                q.answer, q.replied_at, q.created_at,
                u.name AS asker_name,
                j.title AS job_title
            FROM questions q
            JOIN users u ON u.id = q.user_id
            JOIN jobs j ON j.id = q.job_id
            WHERE j.client_id = $1
            ORDER BY q.created_at DESC
            "#,
        )
        .bind(client_id)
        .fetch_all(&self.pool)
        .await
    }

    async fn answer_question(&self, question_id: i64, answer: String) -> Result<Question, Error> {
        sqlx::query_as::<_, Question>(
            r#"
            UPDATE questions
            SET answer = $2, replied_at = NOW()
            WHERE id = $1
            RETURNING id, job_id, user_id, content, is_public, answer, replied_at, created_at
            "#,
        )
        .bind(question_id)
        .bind(answer)
        .fetch_one(&self.pool)
        .await
    }

    async fn delete_question(&self, question_id: i64) -> Result<u64, Error> {
        let result = sqlx::query("DELETE FROM questions WHERE id = $1")
            .bind(question_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    async fn react_to_question(
        &self,
        user_id: i64,
        question_id: i64,
        target: ReactionTarget,
        requested: ReactionType,
    ) -> Result<ReactionOutcome, Error> {
        let mut tx = self.pool.begin().await?;

        let existing = sqlx::query_scalar::<_, ReactionType>(
            r#"
            SELECT reaction FROM question_reactions
            WHERE user_id = $1 AND question_id = $2 AND target = $3
            FOR UPDATE
            "#,
        )
        .bind(user_id)
        .bind(question_id)
        .bind(target)
        .fetch_optional(&mut *tx)
        .await?;

        let outcome = plan_reaction(existing, requested);

        match outcome {
            ReactionOutcome::Added => {
                sqlx::query(
                    r#"
                    INSERT INTO question_reactions (user_id, question_id, reaction, target)
                    VALUES ($1, $2, $3, $4)
                    "#,
                )
                .bind(user_id)
                .bind(question_id)
                .bind(requested)
                .bind(target)
                .execute(&mut *tx)
                .await?;
            }
            ReactionOutcome::Updated => {
                sqlx::query(
                    r#"
                    UPDATE question_reactions
                    SET reaction = $4
                    WHERE user_id = $1 AND question_id = $2 AND target = $3
                    "#,
                )
                .bind(user_id)
                .bind(question_id)
                .bind(target)
                .bind(requested)
                .execute(&mut *tx)
                .await?;
            }
            ReactionOutcome::Removed => {
                sqlx::query(
                    r#"
                    DELETE FROM question_reactions
                    WHERE user_id = $1 AND question_id = $2 AND target = $3
                    "#,
                )
                .bind(user_id)
                .bind(question_id)
                .bind(target)
                .execute(&mut *tx)
                .await?;
            }
        }

        tx.commit().await?;
        Ok(outcome)
    }
}
