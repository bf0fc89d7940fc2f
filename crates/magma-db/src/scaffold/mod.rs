//! Project scaffolding from an `scf_config.v1` document.
//!
//! [`MagmaService::scaffold_project`] validates the config, then writes the
//! project, its page forest, the documentation template, control relations,
//! evidence requests, auditors, and an audit entry in one transaction. Any
//! error rolls the whole run back; a failed run leaves no rows behind. The
//! transaction runs on its own connection, so readers and other runs only
//! ever see the committed graph.
//!
//! Catalog references that do not resolve (assessment objectives, evidence
//! items, risks, threats) are skipped with a `warn!`, never an error.

pub mod auditors;
pub mod evidence;
pub mod graph;
pub mod legacy;
pub mod links;

use chrono::{DateTime, Utc};
use magma_config::ScaffoldConfig;
use magma_core::entities::Project;
use magma_core::enums::{AuditAction, EntityType, ProjectStatus};
use magma_core::errors::CoreError;
use magma_core::ids::PREFIX_PROJECT;
use magma_core::responses::{ScaffoldResponse, ScaffoldStats};
use magma_core::scf::{CatalogLookup, ScfConfig, ScfControl, narrative};
use thiserror::Error;
use tracing::{error, info, warn};

use crate::error::DatabaseError;
use crate::generate_id_on;
use crate::repos::audit;
use crate::repos::organization::find_organization;
use crate::repos::project::insert_project;
use crate::service::MagmaService;

/// How a failed run should be reported to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureClass {
    /// The config or the request is wrong; resubmitting unchanged fails again.
    InvalidInput,
    /// The organization does not exist.
    NotFound,
    /// Storage failed mid-run. Nothing was kept.
    Internal,
}

#[derive(Debug, Error)]
pub enum ScaffoldError {
    /// Rejected before the transaction opened.
    #[error("scaffold rejected: {0}")]
    Rejected(#[from] CoreError),

    /// Failed after the transaction opened; it has been rolled back.
    #[error("scaffold failed: {0}")]
    Database(#[from] DatabaseError),
}

impl ScaffoldError {
    #[must_use]
    pub const fn class(&self) -> FailureClass {
        match self {
            Self::Rejected(CoreError::NotFound { .. }) => FailureClass::NotFound,
            Self::Rejected(CoreError::Validation(_)) => FailureClass::InvalidInput,
            Self::Rejected(CoreError::Other(_)) | Self::Database(_) => FailureClass::Internal,
        }
    }
}

/// Shared state of one scaffolding run.
pub struct BuildContext<'a> {
    pub conn: &'a libsql::Connection,
    pub organization_id: &'a str,
    pub project_id: &'a str,
    pub now: DateTime<Utc>,
    pub settings: &'a ScaffoldConfig,
}

impl BuildContext<'_> {
    /// Draw an ID on the run's transaction.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the ID query fails.
    pub async fn new_id(&self, prefix: &str) -> Result<String, DatabaseError> {
        generate_id_on(self.conn, prefix).await
    }
}

impl MagmaService {
    /// Create a project in `organization_id` from `config`.
    ///
    /// # Errors
    ///
    /// - [`ScaffoldError::Rejected`] with `CoreError::Validation` for an
    ///   unsupported version, blank project name, empty or unselected control
    ///   list, or an `organization_id` that does not match.
    /// - [`ScaffoldError::Rejected`] with `CoreError::NotFound` if the
    ///   organization does not exist.
    /// - [`ScaffoldError::Database`] if any write fails. The transaction has
    ///   been rolled back.
    pub async fn scaffold_project(
        &self,
        organization_id: &str,
        config: &ScfConfig,
    ) -> Result<ScaffoldResponse, ScaffoldError> {
        config.validate()?;
        config.check_organization(organization_id)?;
        let selected = config.selected_controls()?;

        let tx = self.db().begin_write().await?;
        match self.scaffold_in(&tx, organization_id, config, &selected).await {
            Ok(response) => {
                tx.commit().await.map_err(DatabaseError::from)?;
                info!(
                    project = %response.project.id,
                    documents = response.stats.documents,
                    evidence_requests = response.stats.evidence_requests,
                    auditors = response.stats.auditors,
                    "scaffolding committed"
                );
                Ok(response)
            }
            Err(e) => {
                match e.class() {
                    FailureClass::Internal => error!(error = %e, "scaffolding failed; rolling back"),
                    _ => warn!(error = %e, "scaffolding rejected"),
                }
                if let Err(rollback) = tx.rollback().await {
                    error!(error = %rollback, "rollback failed");
                }
                Err(e)
            }
        }
    }

    /// Look up the organization on `tx`, then run every write on it.
    async fn scaffold_in(
        &self,
        tx: &libsql::Connection,
        organization_id: &str,
        config: &ScfConfig,
        selected: &[&ScfControl],
    ) -> Result<ScaffoldResponse, ScaffoldError> {
        let organization = find_organization(tx, organization_id)
            .await?
            .ok_or_else(|| CoreError::NotFound {
                entity_type: EntityType::Organization.as_str().to_string(),
                id: organization_id.to_string(),
            })?;

        info!(
            organization = %organization.id,
            project = %config.project_name,
            controls = selected.len(),
            "scaffolding project from SCF config"
        );
        Ok(run(tx, self.scaffold_config(), &organization.id, config, selected).await?)
    }
}

/// Every write of a scaffolding run, in order, on `conn`.
async fn run(
    conn: &libsql::Connection,
    settings: &ScaffoldConfig,
    organization_id: &str,
    config: &ScfConfig,
    selected: &[&ScfControl],
) -> Result<ScaffoldResponse, DatabaseError> {
    let now = Utc::now();
    let description = match config.description.trim() {
        "" => narrative::project_description(config, selected),
        explicit => explicit.to_string(),
    };
    let project = Project {
        id: generate_id_on(conn, PREFIX_PROJECT).await?,
        organization_id: organization_id.to_string(),
        name: config.project_name.clone(),
        description,
        status: ProjectStatus::Active,
        compliance_score: 0.0,
        created_at: now,
        updated_at: now,
    };
    insert_project(conn, &project).await?;

    let ctx = BuildContext {
        conn,
        organization_id,
        project_id: &project.id,
        now,
        settings,
    };
    let lookup = CatalogLookup::resolve(config);

    let graph = graph::build(&ctx, config, selected).await?;
    if settings.write_legacy_template {
        legacy::write_template(&ctx, &graph.pages).await?;
    }
    let relations = links::link_controls(&ctx, &graph).await?;
    let evidence_requests = evidence::generate_evidence_requests(&ctx, &graph, &lookup).await?;
    let auditors = auditors::generate_auditors(&ctx, &graph, &lookup).await?;

    let stats = ScaffoldStats {
        controls: u32::try_from(selected.len())
            .map_err(|e| DatabaseError::InvalidState(format!("control count: {e}")))?,
        documents: graph.documents,
        evidence_requests,
        auditors,
    };
    audit::record(
        conn,
        Some(organization_id),
        EntityType::Project,
        &project.id,
        AuditAction::Scaffolded,
        Some(serde_json::json!({
            "controls": stats.controls,
            "documents": stats.documents,
            "evidence_requests": stats.evidence_requests,
            "auditors": stats.auditors,
            "relations": relations,
        })),
    )
    .await?;

    Ok(ScaffoldResponse { project, stats })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    use crate::test_support::helpers::{config, control, count, test_org, test_service};

    #[rstest]
    #[case(ScaffoldError::Rejected(CoreError::validation("bad")), FailureClass::InvalidInput)]
    #[case(
        ScaffoldError::Rejected(CoreError::NotFound { entity_type: "organization".into(), id: "org-x".into() }),
        FailureClass::NotFound
    )]
    #[case(ScaffoldError::Database(DatabaseError::NoResult), FailureClass::Internal)]
    fn errors_map_to_failure_classes(#[case] error: ScaffoldError, #[case] class: FailureClass) {
        assert_eq!(error.class(), class);
    }

    #[tokio::test]
    async fn single_control_run() {
        let svc = test_service().await;
        let org = test_org(&svc).await;
        let response = svc
            .scaffold_project(&org.id, &config(vec![control("AC-01", "Access Control")]))
            .await
            .unwrap();

        // root, domain, control
        assert_eq!(response.stats.documents, 3);
        assert_eq!(response.stats.controls, 1);
        assert_eq!(response.project.name, "SOC 2 Readiness");
        assert_eq!(count(&svc, "projects").await, 1);
        assert_eq!(count(&svc, "documentation_templates").await, 1);
        // org create + scaffolded
        assert_eq!(count(&svc, "audit_trail").await, 2);
    }

    #[tokio::test]
    async fn validation_runs_before_organization_lookup() {
        let svc = test_service().await;
        let mut cfg = config(vec![control("AC-01", "Access Control")]);
        cfg.project_name = String::new();
        let err = svc.scaffold_project("org-missing", &cfg).await.unwrap_err();
        assert_eq!(err.class(), FailureClass::InvalidInput);
    }
}
