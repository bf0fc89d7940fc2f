//! Collection repository.

use magma_core::entities::Collection;

use crate::error::DatabaseError;
use crate::helpers::{parse_datetime, parse_json, to_json_text};
use crate::service::MagmaService;

const SELECT_COLS: &str = "id, organization_id, project_id, name, description, type, agent_type, \
     agent_reasoning, agent_prompt, agent_context, content, content_hash, sources, created_at";

fn row_to_collection(row: &libsql::Row) -> Result<Collection, DatabaseError> {
    Ok(Collection {
        id: row.get::<String>(0)?,
        organization_id: row.get::<String>(1)?,
        project_id: row.get::<String>(2)?,
        name: row.get::<String>(3)?,
        description: row.get::<String>(4)?,
        collection_type: row.get::<String>(5)?,
        agent_type: row.get::<String>(6)?,
        agent_reasoning: row.get::<String>(7)?,
        agent_prompt: row.get::<String>(8)?,
        agent_context: row.get::<String>(9)?,
        content: parse_json(&row.get::<String>(10)?)?,
        content_hash: row.get::<String>(11)?,
        sources: parse_json(&row.get::<String>(12)?)?,
        created_at: parse_datetime(&row.get::<String>(13)?)?,
    })
}

/// Insert a collection row on `conn`.
///
/// # Errors
///
/// Returns `DatabaseError` if encoding or the INSERT fails.
pub async fn insert_collection(
    conn: &libsql::Connection,
    collection: &Collection,
) -> Result<(), DatabaseError> {
    let content = to_json_text(&collection.content)?;
    let sources = to_json_text(&collection.sources)?;
    conn.execute(
        &format!(
            "INSERT INTO collections ({SELECT_COLS})
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14)"
        ),
        libsql::params![
            collection.id.as_str(),
            collection.organization_id.as_str(),
            collection.project_id.as_str(),
            collection.name.as_str(),
            collection.description.as_str(),
            collection.collection_type.as_str(),
            collection.agent_type.as_str(),
            collection.agent_reasoning.as_str(),
            collection.agent_prompt.as_str(),
            collection.agent_context.as_str(),
            content,
            collection.content_hash.as_str(),
            sources,
            collection.created_at.to_rfc3339()
        ],
    )
    .await?;
    Ok(())
}

impl MagmaService {
    /// Collections of a project, in creation order.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn list_collections(&self, project_id: &str) -> Result<Vec<Collection>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {SELECT_COLS} FROM collections WHERE project_id = ?1 ORDER BY rowid"),
                [project_id],
            )
            .await?;
        let mut results = Vec::new();
        while let Some(row) = rows.next().await? {
            results.push(row_to_collection(&row)?);
        }
        Ok(results)
    }
}
