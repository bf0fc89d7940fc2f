//! Document relation repository.
//!
//! Relations are directed edges. Control links are written in pairs by
//! [`insert_relation_pair`] so the graph stays symmetric.

use magma_core::entities::DocumentRelation;
use magma_core::enums::RelationType;
use magma_core::ids::PREFIX_RELATION;

use crate::error::DatabaseError;
use crate::generate_id_on;
use crate::helpers::{parse_datetime, parse_enum};
use crate::service::MagmaService;

const SELECT_COLS: &str =
    "id, organization_id, project_id, document_id, related_document_id, relation_type, created_at";

fn row_to_relation(row: &libsql::Row) -> Result<DocumentRelation, DatabaseError> {
    Ok(DocumentRelation {
        id: row.get::<String>(0)?,
        organization_id: row.get::<String>(1)?,
        project_id: row.get::<String>(2)?,
        document_id: row.get::<String>(3)?,
        related_document_id: row.get::<String>(4)?,
        relation_type: parse_enum(&row.get::<String>(5)?)?,
        created_at: parse_datetime(&row.get::<String>(6)?)?,
    })
}

/// Insert a single relation row on `conn`.
///
/// # Errors
///
/// Returns `DatabaseError` if the INSERT fails.
pub async fn insert_relation(
    conn: &libsql::Connection,
    relation: &DocumentRelation,
) -> Result<(), DatabaseError> {
    conn.execute(
        &format!("INSERT INTO document_relations ({SELECT_COLS}) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)"),
        libsql::params![
            relation.id.as_str(),
            relation.organization_id.as_str(),
            relation.project_id.as_str(),
            relation.document_id.as_str(),
            relation.related_document_id.as_str(),
            relation.relation_type.as_str(),
            relation.created_at.to_rfc3339()
        ],
    )
    .await?;
    Ok(())
}

/// Insert `template` as given plus its reverse edge (source and target
/// swapped, tag reversed). The `id` of `template` is ignored; both rows get
/// fresh IDs drawn on `conn`.
///
/// # Errors
///
/// Returns `DatabaseError` if ID generation or either INSERT fails.
pub async fn insert_relation_pair(
    conn: &libsql::Connection,
    template: &DocumentRelation,
) -> Result<[DocumentRelation; 2], DatabaseError> {
    let forward = DocumentRelation {
        id: generate_id_on(conn, PREFIX_RELATION).await?,
        ..template.clone()
    };
    let backward = DocumentRelation {
        id: generate_id_on(conn, PREFIX_RELATION).await?,
        document_id: template.related_document_id.clone(),
        related_document_id: template.document_id.clone(),
        relation_type: template.relation_type.reverse(),
        ..template.clone()
    };
    insert_relation(conn, &forward).await?;
    insert_relation(conn, &backward).await?;
    Ok([forward, backward])
}

impl MagmaService {
    /// Outgoing relations of a document, optionally filtered by tag.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn relations_for_document(
        &self,
        document_id: &str,
        relation_type: Option<RelationType>,
    ) -> Result<Vec<DocumentRelation>, DatabaseError> {
        let mut rows = match relation_type {
            Some(rt) => {
                self.db()
                    .conn()
                    .query(
                        &format!(
                            "SELECT {SELECT_COLS} FROM document_relations
                             WHERE document_id = ?1 AND relation_type = ?2
                             ORDER BY created_at, id"
                        ),
                        libsql::params![document_id, rt.as_str()],
                    )
                    .await?
            }
            None => {
                self.db()
                    .conn()
                    .query(
                        &format!(
                            "SELECT {SELECT_COLS} FROM document_relations
                             WHERE document_id = ?1 ORDER BY created_at, id"
                        ),
                        [document_id],
                    )
                    .await?
            }
        };
        let mut results = Vec::new();
        while let Some(row) = rows.next().await? {
            results.push(row_to_relation(&row)?);
        }
        Ok(results)
    }

    /// All relations of a project.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn list_relations(
        &self,
        project_id: &str,
    ) -> Result<Vec<DocumentRelation>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!(
                    "SELECT {SELECT_COLS} FROM document_relations
                     WHERE project_id = ?1 ORDER BY created_at, id"
                ),
                [project_id],
            )
            .await?;
        let mut results = Vec::new();
        while let Some(row) = rows.next().await? {
            results.push(row_to_relation(&row)?);
        }
        Ok(results)
    }
}
