//! Repository for the `surveys` table.

use sqlx::PgPool;
use vitals_core::scoring::DEFAULT_MINIMUM_THRESHOLD;
use vitals_core::types::DbId;

use crate::models::survey::{CreateSurvey, Survey};

/// Column list for surveys queries.
const COLUMNS: &str =
    "id, organization_id, title, description, minimum_threshold, is_active, created_at";

/// Provides access to surveys.
pub struct SurveyRepo;

impl SurveyRepo {
    /// Create a survey, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateSurvey) -> Result<Survey, sqlx::Error> {
        let threshold = input.minimum_threshold.unwrap_or(DEFAULT_MINIMUM_THRESHOLD);
        let query = format!(
            "INSERT INTO surveys (organization_id, title, description, minimum_threshold)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Survey>(&query)
            .bind(input.organization_id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(threshold)
            .fetch_one(pool)
            .await
    }

    /// Find a survey by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Survey>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM surveys WHERE id = $1");
        sqlx::query_as::<_, Survey>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List every survey across all organizations, newest first.
    pub async fn list_all(pool: &PgPool) -> Result<Vec<Survey>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM surveys ORDER BY created_at DESC");
        sqlx::query_as::<_, Survey>(&query).fetch_all(pool).await
    }
}
