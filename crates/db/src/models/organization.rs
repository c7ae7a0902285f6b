//! Organization (tenant) model.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use vitals_core::types::{DbId, Timestamp};

/// A row from the `organizations` table.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Organization {
    pub id: DbId,
    pub name: String,
    pub created_at: Timestamp,
}

/// DTO for creating an organization.
#[derive(Debug, Deserialize)]
pub struct CreateOrganization {
    pub name: String,
}
