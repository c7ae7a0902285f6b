//! Repository for the `respondents` table.

use sqlx::PgPool;
use vitals_core::types::DbId;

use crate::models::respondent::{CreateRespondent, Respondent};

/// Column list for respondents queries.
const COLUMNS: &str = "id, survey_id, organization_id, user_id, completed_at, created_at";

/// Provides access to survey respondents.
pub struct RespondentRepo;

impl RespondentRepo {
    /// Create a respondent, returning the created row.
    pub async fn create(
        pool: &PgPool,
        input: &CreateRespondent,
    ) -> Result<Respondent, sqlx::Error> {
        let query = format!(
            "INSERT INTO respondents (survey_id, organization_id, user_id, completed_at)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Respondent>(&query)
            .bind(input.survey_id)
            .bind(input.organization_id)
            .bind(input.user_id)
            .bind(input.completed_at)
            .fetch_one(pool)
            .await
    }

    /// List respondents across all tenants, optionally narrowed to one
    /// organization and/or survey. Newest first.
    pub async fn list_all(
        pool: &PgPool,
        organization_id: Option<DbId>,
        survey_id: Option<DbId>,
    ) -> Result<Vec<Respondent>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM respondents
             WHERE ($1::uuid IS NULL OR organization_id = $1)
               AND ($2::uuid IS NULL OR survey_id = $2)
             ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, Respondent>(&query)
            .bind(organization_id)
            .bind(survey_id)
            .fetch_all(pool)
            .await
    }

    /// Count a survey's respondents, optionally within one organization.
    pub async fn count_by_survey(
        pool: &PgPool,
        survey_id: DbId,
        organization_id: Option<DbId>,
    ) -> Result<i64, sqlx::Error> {
        let row: (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM respondents
             WHERE survey_id = $1
               AND ($2::uuid IS NULL OR organization_id = $2)",
        )
        .bind(survey_id)
        .bind(organization_id)
        .fetch_one(pool)
        .await?;
        Ok(row.0)
    }
}
