//! Evidence request generator.

use magma_core::entities::EvidenceRequest;
use magma_core::enums::{EvidenceRequestStatus, Priority, RequiredEvidenceType};
use magma_core::ids::PREFIX_EVIDENCE_REQUEST;
use magma_core::payloads::SuggestedSource;
use magma_core::scf::CatalogLookup;
use tracing::warn;

use super::BuildContext;
use super::graph::DocumentGraph;
use crate::error::DatabaseError;
use crate::repos::evidence_request::insert_evidence_request;

/// One evidence request per (control, resolved evidence item). Returns the
/// number written.
///
/// # Errors
///
/// Returns `DatabaseError` if ID generation or any INSERT fails.
pub async fn generate_evidence_requests<'c>(
    ctx: &BuildContext<'_>,
    graph: &DocumentGraph<'c>,
    lookup: &CatalogLookup<'c>,
) -> Result<u32, DatabaseError> {
    let mut written = 0;
    for (control, doc) in &graph.controls {
        let evidence = lookup.evidence_for(*control);
        for missing in &evidence.missing {
            warn!(control = %control.object_id, evidence_id = *missing, "evidence item not in config; request skipped");
        }
        for item in evidence.found {
            let request = EvidenceRequest {
                id: ctx.new_id(PREFIX_EVIDENCE_REQUEST).await?,
                organization_id: ctx.organization_id.to_string(),
                project_id: ctx.project_id.to_string(),
                document_id: doc.id.clone(),
                title: format!("{} - {}", item.object_id, item.artifact),
                description: item.description.clone(),
                required_type: RequiredEvidenceType::Any,
                suggested_sources: vec![SuggestedSource::Scf {
                    evidence_id: item.object_id.clone(),
                    area_of_focus: item.area_of_focus.clone(),
                    artifact: item.artifact.clone(),
                    control_ids: vec![control.object_id.clone()],
                }],
                acceptance_criteria: format!(
                    "Evidence must demonstrate that control {} is implemented and maintained using artifact '{}'.",
                    control.object_id, item.artifact
                ),
                assigned_to: None,
                priority: Priority::from_control_flag(control.priority),
                due_date: None,
                status: EvidenceRequestStatus::Pending,
                created_by: ctx.settings.created_by.clone(),
                created_at: ctx.now,
            };
            insert_evidence_request(ctx.conn, &request).await?;
            written += 1;
        }
    }
    Ok(written)
}
