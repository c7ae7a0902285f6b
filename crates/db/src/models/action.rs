//! Remediation action model.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use vitals_core::actions::{ActionComment, ActionRecord};
use vitals_core::types::{DbId, Timestamp};

/// A row from the `actions` table.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Action {
    pub id: DbId,
    pub survey_id: DbId,
    pub dimension: String,
    /// `critical` or `at_risk`.
    pub tier: String,
    pub title: String,
    pub description: Option<String>,
    /// `low`, `medium` or `high`.
    pub priority: String,
    pub assignee: Option<String>,
    pub target_date: Option<NaiveDate>,
    pub is_completed: bool,
    /// `todo`, `in_progress`, `review` or `done`.
    pub workflow_stage: Option<String>,
    pub evidence_urls: Vec<String>,
    /// Newest first.
    pub comments: Json<Vec<ActionComment>>,
    pub organization_id: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl ActionRecord for Action {
    fn dimension(&self) -> &str {
        &self.dimension
    }

    fn tier(&self) -> &str {
        &self.tier
    }

    fn priority(&self) -> &str {
        &self.priority
    }

    fn is_completed(&self) -> bool {
        self.is_completed
    }

    fn updated_at(&self) -> Timestamp {
        self.updated_at
    }
}

/// DTO for creating an action. The survey comes from the route.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateAction {
    pub dimension: String,
    pub tier: String,
    pub title: String,
    pub description: Option<String>,
    pub priority: Option<String>,
    pub assignee: Option<String>,
    pub target_date: Option<NaiveDate>,
    pub workflow_stage: Option<String>,
    #[serde(default)]
    pub evidence_urls: Vec<String>,
    pub organization_id: Option<DbId>,
}

/// DTO for a partial update.
///
/// An absent field leaves the stored value unchanged. The nullable columns
/// use `Option<Option<T>>` so that an explicit `null` clears them:
/// `None` is absent, `Some(None)` is `null`.
///
/// `evidence_urls` and `comments` replace the stored lists wholesale; use
/// the append operations on [`crate::repositories::ActionRepo`] to add a
/// single entry.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateAction {
    pub dimension: Option<String>,
    pub tier: Option<String>,
    pub title: Option<String>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub description: Option<Option<String>>,
    pub priority: Option<String>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub assignee: Option<Option<String>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub target_date: Option<Option<NaiveDate>>,
    pub is_completed: Option<bool>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub workflow_stage: Option<Option<String>>,
    pub evidence_urls: Option<Vec<String>>,
    pub comments: Option<Vec<ActionComment>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub organization_id: Option<Option<DbId>>,
}
