//! Survey respondent model.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use vitals_core::types::{DbId, Timestamp};

/// A row from the `respondents` table.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Respondent {
    pub id: DbId,
    pub survey_id: DbId,
    pub organization_id: Option<DbId>,
    pub user_id: Option<DbId>,
    pub completed_at: Option<Timestamp>,
    pub created_at: Timestamp,
}

/// DTO for creating a respondent.
#[derive(Debug, Deserialize)]
pub struct CreateRespondent {
    pub survey_id: DbId,
    pub organization_id: Option<DbId>,
    pub user_id: Option<DbId>,
    pub completed_at: Option<Timestamp>,
}
