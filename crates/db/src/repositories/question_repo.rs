//! Repository for the `questions` table.

use sqlx::PgPool;

use crate::models::question::{CreateQuestion, Question};

/// Column list for questions queries.
const COLUMNS: &str = "id, survey_id, dimension, text, sort_order, created_at";

/// Provides access to survey questions.
pub struct QuestionRepo;

impl QuestionRepo {
    /// Create a question, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateQuestion) -> Result<Question, sqlx::Error> {
        let query = format!(
            "INSERT INTO questions (survey_id, dimension, text, sort_order)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Question>(&query)
            .bind(input.survey_id)
            .bind(&input.dimension)
            .bind(&input.text)
            .bind(input.sort_order.unwrap_or(0))
            .fetch_one(pool)
            .await
    }
}
