//! Per-question answer model.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use vitals_core::types::{DbId, Timestamp};

/// A row from the `responses` table: one respondent's answer to one question.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct SurveyResponse {
    pub id: DbId,
    pub respondent_id: DbId,
    pub question_id: DbId,
    pub organization_id: Option<DbId>,
    /// Answer on the 1-5 scale.
    pub score: i16,
    pub created_at: Timestamp,
}

/// DTO for recording an answer.
#[derive(Debug, Deserialize)]
pub struct CreateSurveyResponse {
    pub respondent_id: DbId,
    pub question_id: DbId,
    pub organization_id: Option<DbId>,
    pub score: i16,
}

/// An answer joined with its question's dimension, used for scoring.
#[derive(Debug, Clone, FromRow)]
pub struct DimensionAnswer {
    pub dimension: String,
    pub score: i16,
}
