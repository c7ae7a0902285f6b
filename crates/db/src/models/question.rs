//! Survey question model.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use vitals_core::types::{DbId, Timestamp};

/// A row from the `questions` table.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Question {
    pub id: DbId,
    pub survey_id: DbId,
    pub dimension: String,
    pub text: String,
    pub sort_order: i32,
    pub created_at: Timestamp,
}

/// DTO for creating a question.
#[derive(Debug, Deserialize)]
pub struct CreateQuestion {
    pub survey_id: DbId,
    pub dimension: String,
    pub text: String,
    pub sort_order: Option<i32>,
}
