//! Default documentation seeding.
//!
//! Fills an existing project with documents from a [`DocumentationBundle`],
//! each with its collections, evidence, and evidence requests. Collection
//! content and evidence values get a content fingerprint. The run is one
//! transaction.

use chrono::{DateTime, Utc};
use magma_core::entities::{Collection, Document, Evidence, EvidenceRequest};
use magma_core::enums::{AuditAction, EntityType};
use magma_core::fingerprint::fingerprint_value;
use magma_core::ids::{PREFIX_COLLECTION, PREFIX_DOCUMENT, PREFIX_EVIDENCE, PREFIX_EVIDENCE_REQUEST};
use magma_core::payloads::SuggestedSource;
use magma_core::responses::SeedStats;
use magma_core::seed::{DocumentationBundle, SeedDocument, SeedEvidence};
use tracing::{error, info};

use crate::error::DatabaseError;
use crate::generate_id_on;
use crate::repos::audit;
use crate::repos::collection::insert_collection;
use crate::repos::document::insert_document;
use crate::repos::evidence::insert_evidence;
use crate::repos::evidence_request::insert_evidence_request;
use crate::service::MagmaService;

/// Evidence with this value type points at a collection of the same document.
const COLLECTION_VALUE_TYPE: &str = "collection";

/// IDs fixed for the whole seeding run.
struct SeedScope<'a> {
    conn: &'a libsql::Connection,
    organization_id: &'a str,
    project_id: &'a str,
    template_page_id: &'a str,
    now: DateTime<Utc>,
}

impl MagmaService {
    /// Seed `project_id` with the documents of `bundle`.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::NoResult` if the project does not exist,
    /// `DatabaseError::InvalidState` if it belongs to another organization or
    /// an evidence `date_collected` is not RFC 3339, and `DatabaseError` for
    /// any failed write. Nothing is kept on error.
    pub async fn seed_default_documentation(
        &self,
        organization_id: &str,
        project_id: &str,
        bundle: &DocumentationBundle,
    ) -> Result<SeedStats, DatabaseError> {
        let project = self.get_project(project_id).await?;
        if project.organization_id != organization_id {
            return Err(DatabaseError::InvalidState(format!(
                "project {project_id} does not belong to organization {organization_id}"
            )));
        }

        let tx = self.db().begin_write().await?;
        let scope = SeedScope {
            conn: &tx,
            organization_id,
            project_id,
            template_page_id: &bundle.template_page_id,
            now: Utc::now(),
        };
        match seed_all(&scope, bundle).await {
            Ok(stats) => {
                tx.commit().await?;
                info!(
                    project = project_id,
                    documents = stats.documents,
                    collections = stats.collections,
                    evidence = stats.evidence,
                    evidence_requests = stats.evidence_requests,
                    "seeded default documentation"
                );
                Ok(stats)
            }
            Err(e) => {
                error!(error = %e, project = project_id, "seeding failed; rolling back");
                if let Err(rollback) = tx.rollback().await {
                    error!(error = %rollback, "rollback failed");
                }
                Err(e)
            }
        }
    }
}

async fn seed_all(
    scope: &SeedScope<'_>,
    bundle: &DocumentationBundle,
) -> Result<SeedStats, DatabaseError> {
    let mut stats = SeedStats::default();
    for seed in &bundle.documents {
        seed_document(scope, seed, &mut stats).await?;
    }
    audit::record(
        scope.conn,
        Some(scope.organization_id),
        EntityType::Project,
        scope.project_id,
        AuditAction::Seeded,
        Some(serde_json::to_value(stats)?),
    )
    .await?;
    Ok(stats)
}

async fn seed_document(
    scope: &SeedScope<'_>,
    seed: &SeedDocument,
    stats: &mut SeedStats,
) -> Result<(), DatabaseError> {
    let document = Document {
        id: generate_id_on(scope.conn, PREFIX_DOCUMENT).await?,
        organization_id: scope.organization_id.to_string(),
        project_id: scope.project_id.to_string(),
        template_page_id: scope.template_page_id.to_string(),
        title: seed.title.clone(),
        content: seed.content.clone(),
        parent_id: None,
        sort_order: 1,
        status: seed.status,
        version: 1,
        scf_control_id: None,
        scf_framework_keys: None,
        relevance_score: None,
        created_at: scope.now,
        updated_at: scope.now,
    };
    insert_document(scope.conn, &document).await?;
    stats.documents += 1;

    // Collections first: evidence may point at them.
    let mut collections: Vec<(&str, String)> = Vec::with_capacity(seed.collections.len());
    for c in &seed.collections {
        let collection = Collection {
            id: generate_id_on(scope.conn, PREFIX_COLLECTION).await?,
            organization_id: scope.organization_id.to_string(),
            project_id: scope.project_id.to_string(),
            name: c.name.clone(),
            description: c.description.clone(),
            collection_type: c.collection_type.clone(),
            agent_type: c.agent_type.clone(),
            agent_reasoning: c.agent_reasoning.clone(),
            agent_prompt: c.agent_prompt.clone(),
            agent_context: c.agent_context.clone(),
            content: c.content.clone(),
            content_hash: fingerprint_value(&c.content),
            sources: c.sources.clone(),
            created_at: scope.now,
        };
        insert_collection(scope.conn, &collection).await?;
        stats.collections += 1;
        collections.push((c.name.as_str(), collection.id));
    }

    for e in &seed.evidence {
        let evidence = Evidence {
            id: generate_id_on(scope.conn, PREFIX_EVIDENCE).await?,
            organization_id: scope.organization_id.to_string(),
            project_id: scope.project_id.to_string(),
            document_id: document.id.clone(),
            name: e.name.clone(),
            description: e.description.clone(),
            evidence_type: e.evidence_type.clone(),
            source_id: e.source_id.clone(),
            source_type: e.source_type.clone(),
            source_method: e.source_method.clone(),
            source_query: e.source_query.clone(),
            date_collected: parse_rfc3339(&e.date_collected).ok_or_else(|| {
                DatabaseError::InvalidState(format!(
                    "evidence '{}' has invalid date_collected '{}'",
                    e.name, e.date_collected
                ))
            })?,
            date_expires: e.date_expires.as_deref().and_then(parse_rfc3339),
            context: e.context.clone(),
            value_type: e.value_type.clone(),
            value: e.value.clone(),
            content_hash: fingerprint_value(&e.value),
            group_name: e.group.clone(),
            tags: e.tags.clone(),
            collection_id: linked_collection(e, &collections),
            created_at: scope.now,
        };
        insert_evidence(scope.conn, &evidence).await?;
        stats.evidence += 1;
    }

    for r in &seed.evidence_requests {
        let request = EvidenceRequest {
            id: generate_id_on(scope.conn, PREFIX_EVIDENCE_REQUEST).await?,
            organization_id: scope.organization_id.to_string(),
            project_id: scope.project_id.to_string(),
            document_id: document.id.clone(),
            title: r.title.clone(),
            description: r.description.clone(),
            required_type: r.required_type,
            suggested_sources: r
                .suggested_sources
                .iter()
                .map(|name| SuggestedSource::Named { name: name.clone() })
                .collect(),
            acceptance_criteria: r.acceptance_criteria.clone(),
            assigned_to: (!r.assigned_to.trim().is_empty()).then(|| r.assigned_to.clone()),
            priority: r.priority,
            due_date: parse_rfc3339(&r.due_date),
            status: r.status,
            created_by: r.created_by.clone(),
            created_at: scope.now,
        };
        insert_evidence_request(scope.conn, &request).await?;
        stats.evidence_requests += 1;
    }
    Ok(())
}

/// The first collection, in bundle order, whose name appears in the
/// evidence name or description.
fn linked_collection(evidence: &SeedEvidence, collections: &[(&str, String)]) -> Option<String> {
    if evidence.value_type != COLLECTION_VALUE_TYPE {
        return None;
    }
    collections
        .iter()
        .find(|(name, _)| {
            !name.is_empty()
                && (evidence.name.contains(name) || evidence.description.contains(name))
        })
        .map(|(_, id)| id.clone())
}

fn parse_rfc3339(s: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn evidence(name: &str, description: &str, value_type: &str) -> SeedEvidence {
        SeedEvidence {
            name: name.into(),
            description: description.into(),
            value_type: value_type.into(),
            ..SeedEvidence::default()
        }
    }

    #[test]
    fn links_first_matching_collection() {
        let collections = vec![
            ("", "col-blank".to_string()),
            ("Onboarding", "col-1".to_string()),
            ("Onboarding Checklist", "col-2".to_string()),
        ];
        let e = evidence("Onboarding Checklist export", "", "collection");
        assert_eq!(linked_collection(&e, &collections), Some("col-1".into()));

        let by_description = evidence("Export", "Taken from Onboarding", "collection");
        assert_eq!(linked_collection(&by_description, &collections), Some("col-1".into()));
    }

    #[test]
    fn only_collection_values_are_linked() {
        let collections = vec![("Onboarding", "col-1".to_string())];
        let e = evidence("Onboarding export", "", "text");
        assert_eq!(linked_collection(&e, &collections), None);
        let unmatched = evidence("Payroll", "", "collection");
        assert_eq!(linked_collection(&unmatched, &collections), None);
    }

    #[test]
    fn rfc3339_dates_parse_and_garbage_is_dropped() {
        assert!(parse_rfc3339("2025-01-31T10:00:00Z").is_some());
        assert!(parse_rfc3339("2025-01-31").is_none());
        assert!(parse_rfc3339("").is_none());
    }
}
