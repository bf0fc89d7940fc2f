//! Project repository.

use magma_core::entities::Project;
use magma_core::enums::{AuditAction, EntityType};

use crate::error::DatabaseError;
use crate::helpers::{parse_datetime, parse_enum, project_table};
use crate::repos::audit;
use crate::service::MagmaService;

const SELECT_COLS: &str =
    "id, organization_id, name, description, status, compliance_score, created_at, updated_at";

fn row_to_project(row: &libsql::Row) -> Result<Project, DatabaseError> {
    Ok(Project {
        id: row.get::<String>(0)?,
        organization_id: row.get::<String>(1)?,
        name: row.get::<String>(2)?,
        description: row.get::<String>(3)?,
        status: parse_enum(&row.get::<String>(4)?)?,
        compliance_score: row.get::<f64>(5)?,
        created_at: parse_datetime(&row.get::<String>(6)?)?,
        updated_at: parse_datetime(&row.get::<String>(7)?)?,
    })
}

/// Insert a project row on `conn`.
///
/// # Errors
///
/// Returns `DatabaseError` if the INSERT fails.
pub async fn insert_project(
    conn: &libsql::Connection,
    project: &Project,
) -> Result<(), DatabaseError> {
    conn.execute(
        &format!("INSERT INTO projects ({SELECT_COLS}) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)"),
        libsql::params![
            project.id.as_str(),
            project.organization_id.as_str(),
            project.name.as_str(),
            project.description.as_str(),
            project.status.as_str(),
            project.compliance_score,
            project.created_at.to_rfc3339(),
            project.updated_at.to_rfc3339()
        ],
    )
    .await?;
    Ok(())
}

impl MagmaService {
    /// # Errors
    ///
    /// Returns `DatabaseError::NoResult` if no project has this ID.
    pub async fn get_project(&self, id: &str) -> Result<Project, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {SELECT_COLS} FROM projects WHERE id = ?1"),
                [id],
            )
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        row_to_project(&row)
    }

    /// Projects of an organization, newest first.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn list_projects(
        &self,
        organization_id: &str,
        limit: u32,
    ) -> Result<Vec<Project>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!(
                    "SELECT {SELECT_COLS} FROM projects WHERE organization_id = ?1
                     ORDER BY created_at DESC, id LIMIT ?2"
                ),
                libsql::params![organization_id, i64::from(limit)],
            )
            .await?;
        let mut results = Vec::new();
        while let Some(row) = rows.next().await? {
            results.push(row_to_project(&row)?);
        }
        Ok(results)
    }

    /// Delete a project. Documents, relations, evidence requests, auditors,
    /// templates, collections and evidence go with it by foreign-key cascade.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::NoResult` if no project has this ID.
    pub async fn delete_project(&self, id: &str) -> Result<(), DatabaseError> {
        let project = self.get_project(id).await?;
        let conn = self.db().conn();
        conn.execute("DELETE FROM projects WHERE id = ?1", [id]).await?;
        audit::record(
            conn,
            Some(&project.organization_id),
            EntityType::Project,
            id,
            AuditAction::Deleted,
            None,
        )
        .await?;
        Ok(())
    }

    /// Number of `entity` rows owned by a project.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::InvalidState` if `entity` is not project-owned.
    pub async fn count_for_project(
        &self,
        project_id: &str,
        entity: EntityType,
    ) -> Result<u64, DatabaseError> {
        let table = project_table(entity).ok_or_else(|| {
            DatabaseError::InvalidState(format!("{entity} rows are not owned by a project"))
        })?;
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT COUNT(*) FROM {table} WHERE project_id = ?1"),
                [project_id],
            )
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        u64::try_from(row.get::<i64>(0)?).map_err(|e| DatabaseError::Query(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use magma_core::enums::ProjectStatus;

    use crate::test_support::helpers::{count, test_org, test_service};

    fn project(org: &str) -> Project {
        Project {
            id: "prj-0000000000000001".into(),
            organization_id: org.into(),
            name: "SOC 2".into(),
            description: "desc".into(),
            status: ProjectStatus::Active,
            compliance_score: 0.0,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn insert_get_list() {
        let svc = test_service().await;
        let org = test_org(&svc).await;
        let p = project(&org.id);
        insert_project(svc.db().conn(), &p).await.unwrap();

        let fetched = svc.get_project(&p.id).await.unwrap();
        assert_eq!(fetched, p);
        assert_eq!(svc.list_projects(&org.id, 20).await.unwrap().len(), 1);
        assert!(svc.list_projects("org-other", 20).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn project_requires_existing_organization() {
        let svc = test_service().await;
        let result = insert_project(svc.db().conn(), &project("org-missing")).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn delete_records_audit_entry() {
        let svc = test_service().await;
        let org = test_org(&svc).await;
        let p = project(&org.id);
        insert_project(svc.db().conn(), &p).await.unwrap();

        svc.delete_project(&p.id).await.unwrap();
        assert!(matches!(
            svc.get_project(&p.id).await,
            Err(DatabaseError::NoResult)
        ));
        // org create + project delete
        assert_eq!(count(&svc, "audit_trail").await, 2);
    }

    #[tokio::test]
    async fn count_rejects_unowned_entities() {
        let svc = test_service().await;
        assert_eq!(
            svc.count_for_project("prj-x", EntityType::Document)
                .await
                .unwrap(),
            0
        );
        assert!(
            svc.count_for_project("prj-x", EntityType::Organization)
                .await
                .is_err()
        );
    }
}
