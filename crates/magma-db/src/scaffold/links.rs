//! Relation linker: control pages to the risk and threat pages they cite.

use std::collections::HashMap;

use magma_core::entities::{Document, DocumentRelation};
use magma_core::enums::RelationType;
use magma_core::scf::lookup::unique_ids;

use super::BuildContext;
use super::graph::DocumentGraph;
use crate::error::DatabaseError;
use crate::repos::relation::insert_relation_pair;

/// Link every control page to its resolved risk and threat pages. Each link
/// is written as a forward and a reverse edge. Returns the number of rows.
///
/// # Errors
///
/// Returns `DatabaseError` if any INSERT fails.
pub async fn link_controls(
    ctx: &BuildContext<'_>,
    graph: &DocumentGraph<'_>,
) -> Result<u32, DatabaseError> {
    let mut rows = 0;
    for (control, control_doc) in &graph.controls {
        rows += link(
            ctx,
            control_doc,
            unique_ids(&control.risk_ids),
            &graph.risks,
            RelationType::RiskToControl,
        )
        .await?;
        rows += link(
            ctx,
            control_doc,
            unique_ids(&control.threat_ids),
            &graph.threats,
            RelationType::ThreatToControl,
        )
        .await?;
    }
    Ok(rows)
}

async fn link(
    ctx: &BuildContext<'_>,
    control_doc: &Document,
    ids: Vec<&str>,
    pages: &HashMap<String, Document>,
    relation_type: RelationType,
) -> Result<u32, DatabaseError> {
    let mut rows = 0;
    for id in ids {
        let Some(page) = pages.get(id) else {
            continue;
        };
        let relation = DocumentRelation {
            id: String::new(),
            organization_id: ctx.organization_id.to_string(),
            project_id: ctx.project_id.to_string(),
            document_id: page.id.clone(),
            related_document_id: control_doc.id.clone(),
            relation_type,
            created_at: ctx.now,
        };
        insert_relation_pair(ctx.conn, &relation).await?;
        rows += 2;
    }
    Ok(rows)
}
