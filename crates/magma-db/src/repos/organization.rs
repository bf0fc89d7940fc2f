//! Organization repository.

use chrono::Utc;
use magma_core::entities::Organization;
use magma_core::enums::{AuditAction, EntityType};
use magma_core::ids::PREFIX_ORGANIZATION;

use crate::error::DatabaseError;
use crate::helpers::parse_datetime;
use crate::repos::audit;
use crate::service::MagmaService;

fn row_to_organization(row: &libsql::Row) -> Result<Organization, DatabaseError> {
    Ok(Organization {
        id: row.get::<String>(0)?,
        name: row.get::<String>(1)?,
        created_at: parse_datetime(&row.get::<String>(2)?)?,
    })
}

/// Look up an organization by ID on `conn`.
///
/// # Errors
///
/// Returns `DatabaseError` if the query fails.
pub async fn find_organization(
    conn: &libsql::Connection,
    id: &str,
) -> Result<Option<Organization>, DatabaseError> {
    let mut rows = conn
        .query(
            "SELECT id, name, created_at FROM organizations WHERE id = ?1",
            [id],
        )
        .await?;
    match rows.next().await? {
        Some(row) => Ok(Some(row_to_organization(&row)?)),
        None => Ok(None),
    }
}

impl MagmaService {
    /// # Errors
    ///
    /// Returns `DatabaseError::InvalidState` for a blank name, or
    /// `DatabaseError` if the INSERT fails.
    pub async fn create_organization(&self, name: &str) -> Result<Organization, DatabaseError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(DatabaseError::InvalidState(
                "organization name is required".into(),
            ));
        }
        let now = Utc::now();
        let id = self.db().generate_id(PREFIX_ORGANIZATION).await?;
        let conn = self.db().conn();

        conn.execute(
            "INSERT INTO organizations (id, name, created_at) VALUES (?1, ?2, ?3)",
            libsql::params![id.as_str(), name, now.to_rfc3339()],
        )
        .await?;

        audit::record(
            conn,
            Some(&id),
            EntityType::Organization,
            &id,
            AuditAction::Created,
            None,
        )
        .await?;

        Ok(Organization {
            id,
            name: name.to_string(),
            created_at: now,
        })
    }

    /// # Errors
    ///
    /// Returns `DatabaseError::NoResult` if no organization has this ID.
    pub async fn get_organization(&self, id: &str) -> Result<Organization, DatabaseError> {
        find_organization(self.db().conn(), id)
            .await?
            .ok_or(DatabaseError::NoResult)
    }

    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn list_organizations(&self) -> Result<Vec<Organization>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                "SELECT id, name, created_at FROM organizations ORDER BY created_at, id",
                (),
            )
            .await?;
        let mut results = Vec::new();
        while let Some(row) = rows.next().await? {
            results.push(row_to_organization(&row)?);
        }
        Ok(results)
    }
}
