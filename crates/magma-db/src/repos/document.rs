//! Document repository: the per-project page forest.

use std::collections::HashMap;

use magma_core::entities::Document;
use magma_core::responses::DocumentNode;

use crate::error::DatabaseError;
use crate::helpers::{get_opt_string, parse_datetime, parse_enum, parse_optional_json, to_json_text};
use crate::service::MagmaService;

const SELECT_COLS: &str = "id, organization_id, project_id, template_page_id, title, content, \
     parent_id, sort_order, status, version, scf_control_id, scf_framework_keys, \
     relevance_score, created_at, updated_at";

fn row_to_document(row: &libsql::Row) -> Result<Document, DatabaseError> {
    Ok(Document {
        id: row.get::<String>(0)?,
        organization_id: row.get::<String>(1)?,
        project_id: row.get::<String>(2)?,
        template_page_id: row.get::<String>(3)?,
        title: row.get::<String>(4)?,
        content: row.get::<String>(5)?,
        parent_id: get_opt_string(row, 6)?,
        sort_order: row.get::<i64>(7)?,
        status: parse_enum(&row.get::<String>(8)?)?,
        version: row.get::<i64>(9)?,
        scf_control_id: get_opt_string(row, 10)?,
        scf_framework_keys: parse_optional_json(get_opt_string(row, 11)?.as_deref())?,
        relevance_score: row.get::<Option<i64>>(12)?,
        created_at: parse_datetime(&row.get::<String>(13)?)?,
        updated_at: parse_datetime(&row.get::<String>(14)?)?,
    })
}

/// Insert a document row on `conn`.
///
/// The parent, if any, must already exist on the same connection.
///
/// # Errors
///
/// Returns `DatabaseError` if the INSERT fails.
pub async fn insert_document(
    conn: &libsql::Connection,
    doc: &Document,
) -> Result<(), DatabaseError> {
    let framework_keys = doc
        .scf_framework_keys
        .as_ref()
        .map(|keys| to_json_text(keys))
        .transpose()?;
    conn.execute(
        &format!(
            "INSERT INTO documents ({SELECT_COLS})
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15)"
        ),
        libsql::params![
            doc.id.as_str(),
            doc.organization_id.as_str(),
            doc.project_id.as_str(),
            doc.template_page_id.as_str(),
            doc.title.as_str(),
            doc.content.as_str(),
            doc.parent_id.as_deref(),
            doc.sort_order,
            doc.status.as_str(),
            doc.version,
            doc.scf_control_id.as_deref(),
            framework_keys.as_deref(),
            doc.relevance_score,
            doc.created_at.to_rfc3339(),
            doc.updated_at.to_rfc3339()
        ],
    )
    .await?;
    Ok(())
}

/// Nest `docs` under their parents. Siblings keep the order of `docs`.
///
/// A document whose parent is not in `docs` is treated as a root.
#[must_use]
pub fn build_tree(docs: Vec<Document>) -> Vec<DocumentNode> {
    let ids: std::collections::HashSet<String> = docs.iter().map(|d| d.id.clone()).collect();
    let mut roots = Vec::new();
    let mut children: HashMap<String, Vec<Document>> = HashMap::new();
    for doc in docs {
        match doc.parent_id.clone() {
            Some(parent) if ids.contains(&parent) => children.entry(parent).or_default().push(doc),
            _ => roots.push(doc),
        }
    }
    roots
        .into_iter()
        .map(|doc| attach(doc, &mut children))
        .collect()
}

fn attach(document: Document, children: &mut HashMap<String, Vec<Document>>) -> DocumentNode {
    let kids = children.remove(&document.id).unwrap_or_default();
    DocumentNode {
        children: kids.into_iter().map(|kid| attach(kid, children)).collect(),
        document,
    }
}

impl MagmaService {
    /// # Errors
    ///
    /// Returns `DatabaseError::NoResult` if no document has this ID.
    pub async fn get_document(&self, id: &str) -> Result<Document, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {SELECT_COLS} FROM documents WHERE id = ?1"),
                [id],
            )
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        row_to_document(&row)
    }

    /// All documents of a project: roots first, then grouped by parent, each
    /// group in sibling order.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn list_documents(&self, project_id: &str) -> Result<Vec<Document>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!(
                    "SELECT {SELECT_COLS} FROM documents WHERE project_id = ?1
                     ORDER BY parent_id IS NOT NULL, parent_id, sort_order, id"
                ),
                [project_id],
            )
            .await?;
        let mut results = Vec::new();
        while let Some(row) = rows.next().await? {
            results.push(row_to_document(&row)?);
        }
        Ok(results)
    }

    /// The control document created for `control_id` in a project, if any.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn find_control_document(
        &self,
        project_id: &str,
        control_id: &str,
    ) -> Result<Option<Document>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!(
                    "SELECT {SELECT_COLS} FROM documents
                     WHERE project_id = ?1 AND scf_control_id = ?2
                     ORDER BY sort_order, id LIMIT 1"
                ),
                libsql::params![project_id, control_id],
            )
            .await?;
        match rows.next().await? {
            Some(row) => Ok(Some(row_to_document(&row)?)),
            None => Ok(None),
        }
    }

    /// The project's page forest: roots ordered by `sort_order`, children nested.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn document_tree(&self, project_id: &str) -> Result<Vec<DocumentNode>, DatabaseError> {
        let docs = self.list_documents(project_id).await?;
        Ok(build_tree(docs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use magma_core::enums::DocumentStatus;
    use pretty_assertions::assert_eq;

    use crate::repos::project::insert_project;
    use crate::test_support::helpers::{test_org, test_service};

    fn doc(id: &str, parent: Option<&str>, order: i64) -> Document {
        Document {
            id: id.into(),
            organization_id: "org".into(),
            project_id: "prj".into(),
            template_page_id: format!("domain-{id}"),
            title: id.into(),
            content: String::new(),
            parent_id: parent.map(String::from),
            sort_order: order,
            status: DocumentStatus::Draft,
            version: 1,
            scf_control_id: None,
            scf_framework_keys: None,
            relevance_score: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn build_tree_nests_children_in_input_order() {
        let docs = vec![
            doc("root", None, 0),
            doc("risks", None, 3),
            doc("a", Some("root"), 1),
            doc("b", Some("root"), 2),
            doc("a1", Some("a"), 1),
        ];
        let tree = build_tree(docs);
        assert_eq!(tree.len(), 2);
        assert_eq!(tree[0].document.id, "root");
        let kids: Vec<&str> = tree[0].children.iter().map(|n| n.document.id.as_str()).collect();
        assert_eq!(kids, vec!["a", "b"]);
        assert_eq!(tree[0].children[0].children[0].document.id, "a1");
        assert_eq!(tree[0].len(), 4);
    }

    #[test]
    fn unknown_parent_becomes_root() {
        let tree = build_tree(vec![doc("orphan", Some("gone"), 1)]);
        assert_eq!(tree.len(), 1);
    }

    #[tokio::test]
    async fn insert_and_read_back_with_framework_keys() {
        let svc = test_service().await;
        let org = test_org(&svc).await;
        let now = Utc::now();
        insert_project(
            svc.db().conn(),
            &magma_core::entities::Project {
                id: "prj".into(),
                organization_id: org.id.clone(),
                name: "P".into(),
                description: String::new(),
                status: magma_core::enums::ProjectStatus::Active,
                compliance_score: 0.0,
                created_at: now,
                updated_at: now,
            },
        )
        .await
        .unwrap();

        let root = Document {
            organization_id: org.id.clone(),
            ..doc("root", None, 0)
        };
        let control = Document {
            organization_id: org.id.clone(),
            template_page_id: "control-GOV-01".into(),
            scf_control_id: Some("GOV-01".into()),
            scf_framework_keys: Some(vec!["iso27001".into(), "soc2".into()]),
            status: DocumentStatus::InProgress,
            ..doc("ctl", Some("root"), 1)
        };
        insert_document(svc.db().conn(), &root).await.unwrap();
        insert_document(svc.db().conn(), &control).await.unwrap();

        assert_eq!(svc.get_document("ctl").await.unwrap(), control);
        let found = svc.find_control_document("prj", "GOV-01").await.unwrap();
        assert_eq!(found.map(|d| d.id), Some("ctl".to_string()));

        let listed = svc.list_documents("prj").await.unwrap();
        assert_eq!(listed[0].id, "root");
        let tree = svc.document_tree("prj").await.unwrap();
        assert_eq!(tree.len(), 1);
        assert_eq!(tree[0].children.len(), 1);
    }

    #[tokio::test]
    async fn dangling_parent_is_rejected() {
        let svc = test_service().await;
        let result = insert_document(svc.db().conn(), &doc("x", Some("nope"), 1)).await;
        assert!(result.is_err());
    }
}
