//! Repository for the `responses` table.

use sqlx::PgPool;
use vitals_core::types::DbId;

use crate::models::response::{CreateSurveyResponse, DimensionAnswer, SurveyResponse};

/// Column list for responses queries.
const COLUMNS: &str = "id, respondent_id, question_id, organization_id, score, created_at";

/// Provides access to per-question answers.
pub struct ResponseRepo;

impl ResponseRepo {
    /// Record an answer, returning the created row.
    pub async fn create(
        pool: &PgPool,
        input: &CreateSurveyResponse,
    ) -> Result<SurveyResponse, sqlx::Error> {
        let query = format!(
            "INSERT INTO responses (respondent_id, question_id, organization_id, score)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, SurveyResponse>(&query)
            .bind(input.respondent_id)
            .bind(input.question_id)
            .bind(input.organization_id)
            .bind(input.score)
            .fetch_one(pool)
            .await
    }

    /// List answers to any of the given questions, optionally within one
    /// organization.
    pub async fn list_by_questions(
        pool: &PgPool,
        question_ids: &[DbId],
        organization_id: Option<DbId>,
    ) -> Result<Vec<SurveyResponse>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM responses
             WHERE question_id = ANY($1)
               AND ($2::uuid IS NULL OR organization_id = $2)
             ORDER BY created_at ASC"
        );
        sqlx::query_as::<_, SurveyResponse>(&query)
            .bind(question_ids)
            .bind(organization_id)
            .fetch_all(pool)
            .await
    }

    /// Every answer to a survey paired with its question's dimension.
    pub async fn dimension_answers(
        pool: &PgPool,
        survey_id: DbId,
        organization_id: Option<DbId>,
    ) -> Result<Vec<DimensionAnswer>, sqlx::Error> {
        sqlx::query_as::<_, DimensionAnswer>(
            "SELECT q.dimension, r.score
             FROM responses r
             JOIN questions q ON q.id = r.question_id
             WHERE q.survey_id = $1
               AND ($2::uuid IS NULL OR r.organization_id = $2)",
        )
        .bind(survey_id)
        .bind(organization_id)
        .fetch_all(pool)
        .await
    }
}
