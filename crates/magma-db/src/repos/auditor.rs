//! Auditor repository.

use magma_core::entities::Auditor;

use crate::error::DatabaseError;
use crate::helpers::{get_opt_string, parse_datetime, parse_json, to_json_text};
use crate::service::MagmaService;

const SELECT_COLS: &str =
    "id, organization_id, project_id, name, description, schedule, is_active, instructions, created_at";

fn row_to_auditor(row: &libsql::Row) -> Result<Auditor, DatabaseError> {
    Ok(Auditor {
        id: row.get::<String>(0)?,
        organization_id: row.get::<String>(1)?,
        project_id: row.get::<String>(2)?,
        name: row.get::<String>(3)?,
        description: row.get::<String>(4)?,
        schedule: get_opt_string(row, 5)?,
        is_active: row.get::<i64>(6)? != 0,
        instructions: parse_json(&row.get::<String>(7)?)?,
        created_at: parse_datetime(&row.get::<String>(8)?)?,
    })
}

/// Insert an auditor row on `conn`.
///
/// # Errors
///
/// Returns `DatabaseError` if the instructions cannot be encoded or the INSERT fails.
pub async fn insert_auditor(
    conn: &libsql::Connection,
    auditor: &Auditor,
) -> Result<(), DatabaseError> {
    let instructions = to_json_text(&auditor.instructions)?;
    conn.execute(
        &format!("INSERT INTO auditors ({SELECT_COLS}) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)"),
        libsql::params![
            auditor.id.as_str(),
            auditor.organization_id.as_str(),
            auditor.project_id.as_str(),
            auditor.name.as_str(),
            auditor.description.as_str(),
            auditor.schedule.as_deref(),
            i64::from(auditor.is_active),
            instructions,
            auditor.created_at.to_rfc3339()
        ],
    )
    .await?;
    Ok(())
}

impl MagmaService {
    /// Auditors of a project, in creation order.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn list_auditors(&self, project_id: &str) -> Result<Vec<Auditor>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {SELECT_COLS} FROM auditors WHERE project_id = ?1 ORDER BY rowid"),
                [project_id],
            )
            .await?;
        let mut results = Vec::new();
        while let Some(row) = rows.next().await? {
            results.push(row_to_auditor(&row)?);
        }
        Ok(results)
    }

    /// Auditors whose instructions target `document_id`.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails or a row holds malformed instructions.
    pub async fn auditors_for_document(
        &self,
        project_id: &str,
        document_id: &str,
    ) -> Result<Vec<Auditor>, DatabaseError> {
        let auditors = self.list_auditors(project_id).await?;
        Ok(auditors
            .into_iter()
            .filter(|a| {
                a.instructions
                    .targets
                    .iter()
                    .any(|t| t.document_id == document_id)
            })
            .collect())
    }
}
