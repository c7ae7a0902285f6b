//! Survey model.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use vitals_core::types::{DbId, Timestamp};

/// A row from the `surveys` table.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Survey {
    pub id: DbId,
    pub organization_id: Option<DbId>,
    pub title: String,
    pub description: Option<String>,
    /// Minimum acceptable dimension score on the 0-5 scale.
    pub minimum_threshold: f64,
    pub is_active: bool,
    pub created_at: Timestamp,
}

/// DTO for creating a survey.
#[derive(Debug, Deserialize)]
pub struct CreateSurvey {
    pub organization_id: Option<DbId>,
    pub title: String,
    pub description: Option<String>,
    pub minimum_threshold: Option<f64>,
}
