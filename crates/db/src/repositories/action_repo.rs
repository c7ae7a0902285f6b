//! Repository for the `actions` table.

use sqlx::types::Json;
use sqlx::PgPool;
use vitals_core::actions::{
    completion_for_stage, sync_completion, ActionComment, DEFAULT_PRIORITY,
};
use vitals_core::types::DbId;

use crate::models::action::{Action, CreateAction, UpdateAction};

/// Column list for actions queries.
const COLUMNS: &str = "id, survey_id, dimension, tier, title, description, priority, assignee, \
    target_date, is_completed, workflow_stage, evidence_urls, comments, organization_id, \
    created_at, updated_at";

/// Provides CRUD operations for remediation actions.
pub struct ActionRepo;

impl ActionRepo {
    /// Create an action for a survey, returning the stored row.
    ///
    /// The database assigns the id and timestamps. The completion flag is
    /// derived from the initial workflow stage.
    pub async fn create(
        pool: &PgPool,
        survey_id: DbId,
        input: &CreateAction,
    ) -> Result<Action, sqlx::Error> {
        let priority = input.priority.as_deref().unwrap_or(DEFAULT_PRIORITY);
        let is_completed = completion_for_stage(input.workflow_stage.as_deref());
        let query = format!(
            "INSERT INTO actions
                (survey_id, dimension, tier, title, description, priority, assignee,
                 target_date, is_completed, workflow_stage, evidence_urls, organization_id)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Action>(&query)
            .bind(survey_id)
            .bind(&input.dimension)
            .bind(&input.tier)
            .bind(&input.title)
            .bind(&input.description)
            .bind(priority)
            .bind(&input.assignee)
            .bind(input.target_date)
            .bind(is_completed)
            .bind(&input.workflow_stage)
            .bind(&input.evidence_urls)
            .bind(input.organization_id)
            .fetch_one(pool)
            .await
    }

    /// Find an action by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Action>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM actions WHERE id = $1");
        sqlx::query_as::<_, Action>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all actions for a survey, newest first.
    pub async fn list_by_survey(
        pool: &PgPool,
        survey_id: DbId,
    ) -> Result<Vec<Action>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM actions
             WHERE survey_id = $1
             ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, Action>(&query)
            .bind(survey_id)
            .fetch_all(pool)
            .await
    }

    /// Merge the supplied fields into an action and bump `updated_at`.
    ///
    /// Returns `None` if no action has this id. Nullable columns are
    /// written whenever they are supplied, so an explicit `null` clears
    /// them. The stage/completion pair is reconciled with
    /// [`sync_completion`] against the row locked inside the same
    /// transaction, so a concurrent update cannot leave the pair split.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateAction,
    ) -> Result<Option<Action>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let current: Option<(Option<String>, bool)> = sqlx::query_as(
            "SELECT workflow_stage, is_completed FROM actions WHERE id = $1 FOR UPDATE",
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?;
        let Some((current_stage, current_completed)) = current else {
            return Ok(None);
        };

        let synced = sync_completion(
            current_stage.as_deref(),
            current_completed,
            input.workflow_stage.as_ref().map(|s| s.as_deref()),
            input.is_completed,
        );

        let query = format!(
            "UPDATE actions SET
                dimension = COALESCE($2, dimension),
                tier = COALESCE($3, tier),
                title = COALESCE($4, title),
                description = CASE WHEN $5 THEN $6 ELSE description END,
                priority = COALESCE($7, priority),
                assignee = CASE WHEN $8 THEN $9 ELSE assignee END,
                target_date = CASE WHEN $10 THEN $11 ELSE target_date END,
                is_completed = $12,
                workflow_stage = $13,
                evidence_urls = COALESCE($14, evidence_urls),
                comments = COALESCE($15, comments),
                organization_id = CASE WHEN $16 THEN $17 ELSE organization_id END,
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let action = sqlx::query_as::<_, Action>(&query)
            .bind(id)
            .bind(&input.dimension)
            .bind(&input.tier)
            .bind(&input.title)
            .bind(input.description.is_some())
            .bind(input.description.as_ref().and_then(|v| v.as_deref()))
            .bind(&input.priority)
            .bind(input.assignee.is_some())
            .bind(input.assignee.as_ref().and_then(|v| v.as_deref()))
            .bind(input.target_date.is_some())
            .bind(input.target_date.flatten())
            .bind(synced.is_completed)
            .bind(&synced.workflow_stage)
            .bind(&input.evidence_urls)
            .bind(input.comments.clone().map(Json))
            .bind(input.organization_id.is_some())
            .bind(input.organization_id.flatten())
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(Some(action))
    }

    /// Prepend a comment in a single statement, so concurrent commenters
    /// never overwrite each other.
    pub async fn append_comment(
        pool: &PgPool,
        id: DbId,
        comment: &ActionComment,
    ) -> Result<Option<Action>, sqlx::Error> {
        let query = format!(
            "UPDATE actions SET
                comments = jsonb_build_array($2::jsonb) || comments,
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Action>(&query)
            .bind(id)
            .bind(Json(comment.clone()))
            .fetch_optional(pool)
            .await
    }

    /// Append an evidence URL in a single statement.
    pub async fn append_evidence(
        pool: &PgPool,
        id: DbId,
        url: &str,
    ) -> Result<Option<Action>, sqlx::Error> {
        let query = format!(
            "UPDATE actions SET
                evidence_urls = array_append(evidence_urls, $2),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Action>(&query)
            .bind(id)
            .bind(url)
            .fetch_optional(pool)
            .await
    }

    /// Delete an action by ID. Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM actions WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
