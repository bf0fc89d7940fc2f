//! Evidence repository.

use magma_core::entities::Evidence;

use crate::error::DatabaseError;
use crate::helpers::{get_opt_string, parse_datetime, parse_json, parse_optional_datetime, to_json_text};
use crate::service::MagmaService;

const SELECT_COLS: &str = "id, organization_id, project_id, document_id, name, description, type, \
     source_id, source_type, source_method, source_query, date_collected, date_expires, context, \
     value_type, value, content_hash, group_name, tags, collection_id, created_at";

fn row_to_evidence(row: &libsql::Row) -> Result<Evidence, DatabaseError> {
    let expires = get_opt_string(row, 12)?;
    Ok(Evidence {
        id: row.get::<String>(0)?,
        organization_id: row.get::<String>(1)?,
        project_id: row.get::<String>(2)?,
        document_id: row.get::<String>(3)?,
        name: row.get::<String>(4)?,
        description: row.get::<String>(5)?,
        evidence_type: row.get::<String>(6)?,
        source_id: row.get::<String>(7)?,
        source_type: row.get::<String>(8)?,
        source_method: row.get::<String>(9)?,
        source_query: row.get::<String>(10)?,
        date_collected: parse_datetime(&row.get::<String>(11)?)?,
        date_expires: parse_optional_datetime(expires.as_deref())?,
        context: row.get::<String>(13)?,
        value_type: row.get::<String>(14)?,
        value: parse_json(&row.get::<String>(15)?)?,
        content_hash: row.get::<String>(16)?,
        group_name: row.get::<String>(17)?,
        tags: parse_json(&row.get::<String>(18)?)?,
        collection_id: get_opt_string(row, 19)?,
        created_at: parse_datetime(&row.get::<String>(20)?)?,
    })
}

/// Insert an evidence row on `conn`.
///
/// # Errors
///
/// Returns `DatabaseError` if encoding or the INSERT fails.
pub async fn insert_evidence(
    conn: &libsql::Connection,
    evidence: &Evidence,
) -> Result<(), DatabaseError> {
    let value = to_json_text(&evidence.value)?;
    let tags = to_json_text(&evidence.tags)?;
    conn.execute(
        &format!(
            "INSERT INTO evidence ({SELECT_COLS})
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16,
                     ?17, ?18, ?19, ?20, ?21)"
        ),
        libsql::params_from_iter(vec![
            libsql::Value::from(evidence.id.clone()),
            libsql::Value::from(evidence.organization_id.clone()),
            libsql::Value::from(evidence.project_id.clone()),
            libsql::Value::from(evidence.document_id.clone()),
            libsql::Value::from(evidence.name.clone()),
            libsql::Value::from(evidence.description.clone()),
            libsql::Value::from(evidence.evidence_type.clone()),
            libsql::Value::from(evidence.source_id.clone()),
            libsql::Value::from(evidence.source_type.clone()),
            libsql::Value::from(evidence.source_method.clone()),
            libsql::Value::from(evidence.source_query.clone()),
            libsql::Value::from(evidence.date_collected.to_rfc3339()),
            libsql::Value::from(evidence.date_expires.map(|d| d.to_rfc3339())),
            libsql::Value::from(evidence.context.clone()),
            libsql::Value::from(evidence.value_type.clone()),
            libsql::Value::from(value),
            libsql::Value::from(evidence.content_hash.clone()),
            libsql::Value::from(evidence.group_name.clone()),
            libsql::Value::from(tags),
            libsql::Value::from(evidence.collection_id.clone()),
            libsql::Value::from(evidence.created_at.to_rfc3339()),
        ]),
    )
    .await?;
    Ok(())
}

impl MagmaService {
    /// Evidence of a project, in creation order.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn list_evidence(&self, project_id: &str) -> Result<Vec<Evidence>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {SELECT_COLS} FROM evidence WHERE project_id = ?1 ORDER BY rowid"),
                [project_id],
            )
            .await?;
        let mut results = Vec::new();
        while let Some(row) = rows.next().await? {
            results.push(row_to_evidence(&row)?);
        }
        Ok(results)
    }
}
