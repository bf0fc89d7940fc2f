//! Documentation template mirror of the page forest.

use magma_core::entities::DocumentationTemplate;
use magma_core::ids::PREFIX_TEMPLATE;
use magma_core::payloads::DocumentPage;

use super::BuildContext;
use crate::error::DatabaseError;
use crate::repos::template::insert_template;

/// Persist `root` as the project's documentation template.
///
/// # Errors
///
/// Returns `DatabaseError` if ID generation, encoding, or the INSERT fails.
pub async fn write_template(
    ctx: &BuildContext<'_>,
    root: &DocumentPage,
) -> Result<DocumentationTemplate, DatabaseError> {
    let template = DocumentationTemplate {
        id: ctx.new_id(PREFIX_TEMPLATE).await?,
        organization_id: ctx.organization_id.to_string(),
        project_id: ctx.project_id.to_string(),
        pages: vec![root.clone()],
        created_at: ctx.now,
    };
    insert_template(ctx.conn, &template).await?;
    Ok(template)
}
