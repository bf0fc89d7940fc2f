//! Evidence request repository.

use magma_core::entities::EvidenceRequest;

use crate::error::DatabaseError;
use crate::helpers::{
    get_opt_string, parse_datetime, parse_enum, parse_json, parse_optional_datetime, to_json_text,
};
use crate::service::MagmaService;

const SELECT_COLS: &str = "id, organization_id, project_id, document_id, title, description, \
     required_type, suggested_sources, acceptance_criteria, assigned_to, priority, due_date, \
     status, created_by, created_at";

fn row_to_evidence_request(row: &libsql::Row) -> Result<EvidenceRequest, DatabaseError> {
    let due_date = get_opt_string(row, 11)?;
    Ok(EvidenceRequest {
        id: row.get::<String>(0)?,
        organization_id: row.get::<String>(1)?,
        project_id: row.get::<String>(2)?,
        document_id: row.get::<String>(3)?,
        title: row.get::<String>(4)?,
        description: row.get::<String>(5)?,
        required_type: parse_enum(&row.get::<String>(6)?)?,
        suggested_sources: parse_json(&row.get::<String>(7)?)?,
        acceptance_criteria: row.get::<String>(8)?,
        assigned_to: get_opt_string(row, 9)?,
        priority: parse_enum(&row.get::<String>(10)?)?,
        due_date: parse_optional_datetime(due_date.as_deref())?,
        status: parse_enum(&row.get::<String>(12)?)?,
        created_by: row.get::<String>(13)?,
        created_at: parse_datetime(&row.get::<String>(14)?)?,
    })
}

/// Insert an evidence request row on `conn`.
///
/// # Errors
///
/// Returns `DatabaseError` if the sources cannot be encoded or the INSERT fails.
pub async fn insert_evidence_request(
    conn: &libsql::Connection,
    request: &EvidenceRequest,
) -> Result<(), DatabaseError> {
    let sources = to_json_text(&request.suggested_sources)?;
    conn.execute(
        &format!(
            "INSERT INTO evidence_requests ({SELECT_COLS})
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15)"
        ),
        libsql::params![
            request.id.as_str(),
            request.organization_id.as_str(),
            request.project_id.as_str(),
            request.document_id.as_str(),
            request.title.as_str(),
            request.description.as_str(),
            request.required_type.as_str(),
            sources,
            request.acceptance_criteria.as_str(),
            request.assigned_to.as_deref(),
            request.priority.as_str(),
            request.due_date.map(|d| d.to_rfc3339()),
            request.status.as_str(),
            request.created_by.as_str(),
            request.created_at.to_rfc3339()
        ],
    )
    .await?;
    Ok(())
}

impl MagmaService {
    /// Evidence requests of a project, in creation order.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn list_evidence_requests(
        &self,
        project_id: &str,
    ) -> Result<Vec<EvidenceRequest>, DatabaseError> {
        self.query_evidence_requests("project_id", project_id).await
    }

    /// Evidence requests owned by one document, in creation order.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn evidence_requests_for_document(
        &self,
        document_id: &str,
    ) -> Result<Vec<EvidenceRequest>, DatabaseError> {
        self.query_evidence_requests("document_id", document_id).await
    }

    async fn query_evidence_requests(
        &self,
        column: &str,
        value: &str,
    ) -> Result<Vec<EvidenceRequest>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!(
                    "SELECT {SELECT_COLS} FROM evidence_requests
                     WHERE {column} = ?1 ORDER BY rowid"
                ),
                [value],
            )
            .await?;
        let mut results = Vec::new();
        while let Some(row) = rows.next().await? {
            results.push(row_to_evidence_request(&row)?);
        }
        Ok(results)
    }
}
