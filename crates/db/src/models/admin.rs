//! Platform administrator model.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use vitals_core::types::{DbId, Timestamp};

/// A row from the `admins` table.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Admin {
    pub id: DbId,
    pub email: String,
    pub display_name: String,
    pub is_active: bool,
    pub created_at: Timestamp,
}

/// DTO for creating an admin.
#[derive(Debug, Deserialize)]
pub struct CreateAdmin {
    pub email: String,
    pub display_name: String,
}
