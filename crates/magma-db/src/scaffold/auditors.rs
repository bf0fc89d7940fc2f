//! Auditor generator: one auditor per control page with at least one
//! resolvable assessment objective.

use magma_core::entities::Auditor;
use magma_core::ids::PREFIX_AUDITOR;
use magma_core::payloads::{AuditRequirement, AuditTarget, AuditorInstructions};
use magma_core::scf::lookup::unique_ids;
use magma_core::scf::{CatalogLookup, truncate_chars};
use tracing::{debug, warn};

use super::BuildContext;
use super::graph::DocumentGraph;
use crate::error::DatabaseError;
use crate::repos::auditor::insert_auditor;

/// Returns the number of auditors written.
///
/// # Errors
///
/// Returns `DatabaseError` if ID generation, encoding, or any INSERT fails.
pub async fn generate_auditors<'c>(
    ctx: &BuildContext<'_>,
    graph: &DocumentGraph<'c>,
    lookup: &CatalogLookup<'c>,
) -> Result<u32, DatabaseError> {
    let mut written = 0;
    for (control, doc) in &graph.controls {
        let objectives = lookup.objectives_for(*control);
        for missing in &objectives.missing {
            warn!(control = %control.object_id, objective_id = *missing, "assessment objective not in config; requirement skipped");
        }
        if objectives.is_empty() {
            if !control.assessment_objective_ids.is_empty() {
                debug!(control = %control.object_id, "no resolvable assessment objectives; no auditor");
            }
            continue;
        }

        let context = format!(
            "Control: {}\nSCF evidence IDs: {}",
            control.object_id,
            unique_ids(&control.evidence_request_ids).join(", ")
        );
        let objective_ids: Vec<&str> = objectives
            .found
            .iter()
            .map(|ao| ao.object_id.as_str())
            .collect();
        let requirements = objectives
            .found
            .iter()
            .map(|ao| AuditRequirement::for_objective(&ao.object_id, &ao.statement, &context))
            .collect();
        let target = AuditTarget {
            control_id: control.object_id.clone(),
            document_id: doc.id.clone(),
        };
        let Some(instructions) =
            AuditorInstructions::for_control(requirements, ctx.settings.passing_score, target)
        else {
            continue;
        };

        let auditor = Auditor {
            id: ctx.new_id(PREFIX_AUDITOR).await?,
            organization_id: ctx.organization_id.to_string(),
            project_id: ctx.project_id.to_string(),
            name: format!(
                "{} - {}",
                control.object_id,
                truncate_chars(&control.title, ctx.settings.auditor_name_max_len)
            ),
            description: format!(
                "AI auditor for control {} covering assessment objectives {}",
                control.object_id,
                objective_ids.join(", ")
            ),
            schedule: None,
            is_active: true,
            instructions,
            created_at: ctx.now,
        };
        insert_auditor(ctx.conn, &auditor).await?;
        written += 1;
    }
    Ok(written)
}
