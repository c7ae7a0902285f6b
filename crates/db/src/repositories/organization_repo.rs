//! Repository for the `organizations` table.

use sqlx::PgPool;

use crate::models::organization::{CreateOrganization, Organization};

/// Column list for organizations queries.
const COLUMNS: &str = "id, name, created_at";

/// Provides access to organizations.
pub struct OrganizationRepo;

impl OrganizationRepo {
    /// Create an organization, returning the created row.
    pub async fn create(
        pool: &PgPool,
        input: &CreateOrganization,
    ) -> Result<Organization, sqlx::Error> {
        let query = format!("INSERT INTO organizations (name) VALUES ($1) RETURNING {COLUMNS}");
        sqlx::query_as::<_, Organization>(&query)
            .bind(&input.name)
            .fetch_one(pool)
            .await
    }

    /// List every organization, alphabetically.
    pub async fn list_all(pool: &PgPool) -> Result<Vec<Organization>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM organizations ORDER BY name ASC");
        sqlx::query_as::<_, Organization>(&query)
            .fetch_all(pool)
            .await
    }
}
