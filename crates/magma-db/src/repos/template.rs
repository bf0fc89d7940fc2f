//! Documentation template repository.
//!
//! A template stores the page tree of a project as `{"pages": [...]}` for
//! consumers that predate the document forest.

use magma_core::entities::DocumentationTemplate;
use magma_core::payloads::PagesPayload;

use crate::error::DatabaseError;
use crate::helpers::{parse_datetime, parse_json, to_json_text};
use crate::service::MagmaService;

fn row_to_template(row: &libsql::Row) -> Result<DocumentationTemplate, DatabaseError> {
    let payload: PagesPayload = parse_json(&row.get::<String>(3)?)?;
    Ok(DocumentationTemplate {
        id: row.get::<String>(0)?,
        organization_id: row.get::<String>(1)?,
        project_id: row.get::<String>(2)?,
        pages: payload.pages,
        created_at: parse_datetime(&row.get::<String>(4)?)?,
    })
}

/// Insert a documentation template row on `conn`.
///
/// # Errors
///
/// Returns `DatabaseError` if the page tree cannot be encoded or the INSERT fails.
pub async fn insert_template(
    conn: &libsql::Connection,
    template: &DocumentationTemplate,
) -> Result<(), DatabaseError> {
    let payload = to_json_text(&PagesPayload {
        pages: template.pages.clone(),
    })?;
    conn.execute(
        "INSERT INTO documentation_templates (id, organization_id, project_id, template, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        libsql::params![
            template.id.as_str(),
            template.organization_id.as_str(),
            template.project_id.as_str(),
            payload,
            template.created_at.to_rfc3339()
        ],
    )
    .await?;
    Ok(())
}

impl MagmaService {
    /// The most recent documentation template of a project, if any.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails or the stored tree is malformed.
    pub async fn get_documentation_template(
        &self,
        project_id: &str,
    ) -> Result<Option<DocumentationTemplate>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                "SELECT id, organization_id, project_id, template, created_at
                 FROM documentation_templates WHERE project_id = ?1
                 ORDER BY rowid DESC LIMIT 1",
                [project_id],
            )
            .await?;
        match rows.next().await? {
            Some(row) => Ok(Some(row_to_template(&row)?)),
            None => Ok(None),
        }
    }
}
