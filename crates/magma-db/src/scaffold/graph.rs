//! Document graph builder.
//!
//! Writes the page forest of a new project:
//!
//! ```text
//! Controls Overview (0)          Risks (n+1)        Threats (n+2)
//! ├── Domain A (1)               ├── R-1 (1)        └── T-1 (1)
//! │   ├── CTL-01 (1)             └── R-2 (2)
//! │   └── CTL-02 (2)
//! └── Domain B (2) ... (n)
//! ```
//!
//! Root-level pages share one order counter; children count from 1 within
//! their parent. The same tree is mirrored into [`DocumentPage`]s for the
//! documentation template.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use magma_core::entities::{Document, ScfRisk, ScfThreat};
use magma_core::enums::DocumentStatus;
use magma_core::ids::PREFIX_DOCUMENT;
use magma_core::payloads::DocumentPage;
use magma_core::scf::{
    CONTROLS_OVERVIEW_TAG, RISKS_OVERVIEW_TAG, ScfConfig, ScfControl, THREATS_OVERVIEW_TAG,
    control_tag, domain_tag, narrative, risk_tag, threat_tag,
};
use tracing::{debug, warn};

use super::BuildContext;
use crate::error::DatabaseError;
use crate::repos::catalog::{find_risks, find_threats};
use crate::repos::document::insert_document;

const CONTROLS_OVERVIEW_TITLE: &str = "Controls Overview";
const RISKS_TITLE: &str = "Risks";
const RISKS_CONTENT: &str = "Risks relevant to this project derived from selected SCF controls.";
const THREATS_TITLE: &str = "Threats";
const THREATS_CONTENT: &str = "Threats relevant to this project derived from selected SCF controls.";

/// Running sibling order within one parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SiblingOrder(i64);

impl SiblingOrder {
    #[must_use]
    pub const fn starting_at(first: i64) -> Self {
        Self(first)
    }

    /// Hand out the current position and advance.
    pub const fn next(&mut self) -> i64 {
        let current = self.0;
        self.0 += 1;
        current
    }
}

/// Everything the later scaffolding steps need from the page forest.
#[derive(Debug)]
pub struct DocumentGraph<'c> {
    pub root: Document,
    /// Control pages in creation order, with the control each was built from.
    pub controls: Vec<(&'c ScfControl, Document)>,
    /// Risk pages by risk ID.
    pub risks: HashMap<String, Document>,
    /// Threat pages by threat ID.
    pub threats: HashMap<String, Document>,
    /// Template mirror of the forest, rooted at the controls overview.
    pub pages: DocumentPage,
    /// Documents written, overview pages included.
    pub documents: u32,
}

/// A catalog entry rendered as a child page of the risks or threats section.
struct CatalogEntry {
    object_id: String,
    title: String,
    description: String,
}

impl From<ScfRisk> for CatalogEntry {
    fn from(risk: ScfRisk) -> Self {
        Self {
            object_id: risk.object_id,
            title: risk.title,
            description: risk.description,
        }
    }
}

impl From<ScfThreat> for CatalogEntry {
    fn from(threat: ScfThreat) -> Self {
        Self {
            object_id: threat.object_id,
            title: threat.title,
            description: threat.description,
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Section {
    Risks,
    Threats,
}

impl Section {
    const fn tag(self) -> &'static str {
        match self {
            Self::Risks => RISKS_OVERVIEW_TAG,
            Self::Threats => THREATS_OVERVIEW_TAG,
        }
    }

    const fn title(self) -> &'static str {
        match self {
            Self::Risks => RISKS_TITLE,
            Self::Threats => THREATS_TITLE,
        }
    }

    const fn content(self) -> &'static str {
        match self {
            Self::Risks => RISKS_CONTENT,
            Self::Threats => THREATS_CONTENT,
        }
    }

    fn child_tag(self, object_id: &str) -> String {
        match self {
            Self::Risks => risk_tag(object_id),
            Self::Threats => threat_tag(object_id),
        }
    }
}

/// Output of one risks/threats section.
struct SectionPages {
    children: HashMap<String, Document>,
    page: DocumentPage,
    documents: u32,
}

/// Write the page forest for `selected` and return it.
///
/// # Errors
///
/// Returns `DatabaseError` on any ID generation or INSERT failure. The caller
/// owns the transaction and rolls it back.
pub async fn build<'c>(
    ctx: &BuildContext<'_>,
    config: &ScfConfig,
    selected: &[&'c ScfControl],
) -> Result<DocumentGraph<'c>, DatabaseError> {
    let mut root_order = SiblingOrder::starting_at(0);
    let overview = narrative::overview_markdown(config, selected);
    let root = ctx
        .document(
            CONTROLS_OVERVIEW_TAG,
            CONTROLS_OVERVIEW_TITLE,
            &overview,
            None,
            root_order.next(),
            DocumentStatus::Draft,
        )
        .await?;
    insert_document(ctx.conn, &root).await?;
    let mut documents = 1u32;
    let mut pages = DocumentPage::new(CONTROLS_OVERVIEW_TAG, CONTROLS_OVERVIEW_TITLE, overview, 0);

    let mut by_domain: BTreeMap<&str, Vec<&'c ScfControl>> = BTreeMap::new();
    for &control in selected {
        by_domain.entry(control.domain_name()).or_default().push(control);
    }

    let mut controls = Vec::with_capacity(selected.len());
    for (domain, mut members) in by_domain {
        let tag = domain_tag(domain);
        let content = narrative::domain_markdown(domain);
        let order = root_order.next();
        let domain_doc = ctx
            .document(&tag, domain, &content, Some(&root), order, DocumentStatus::Draft)
            .await?;
        insert_document(ctx.conn, &domain_doc).await?;
        documents += 1;
        let mut domain_page = DocumentPage::new(tag, domain, content, order);

        members.sort_by(|a, b| a.object_id.cmp(&b.object_id));
        let mut control_order = SiblingOrder::starting_at(1);
        for control in members {
            let title = format!("{} - {}", control.object_id, control.title);
            let order = control_order.next();
            let mut doc = ctx
                .document(
                    &control_tag(&control.object_id),
                    &title,
                    &narrative::control_markdown(control),
                    Some(&domain_doc),
                    order,
                    DocumentStatus::InProgress,
                )
                .await?;
            let frameworks = control.coverage_keys();
            doc.scf_control_id = Some(control.object_id.clone());
            doc.scf_framework_keys = (!frameworks.is_empty()).then_some(frameworks);
            doc.relevance_score = Some(0);
            insert_document(ctx.conn, &doc).await?;
            documents += 1;
            domain_page
                .children
                .push(DocumentPage::new(control_tag(&control.object_id), title, "", order));
            controls.push((control, doc));
        }
        debug!(domain, controls = domain_page.children.len(), "created domain section");
        pages.children.push(domain_page);
    }

    let mut risks = HashMap::new();
    let risk_ids = distinct_ids(selected.iter().flat_map(|c| &c.risk_ids));
    if !risk_ids.is_empty() {
        let ids: Vec<&str> = risk_ids.iter().copied().collect();
        let found = find_risks(ctx.conn, &ids).await?;
        let section = build_section(
            ctx,
            Section::Risks,
            &risk_ids,
            found.into_iter().map(CatalogEntry::from).collect(),
            root_order.next(),
        )
        .await?;
        documents += section.documents;
        risks = section.children;
        pages.children.push(section.page);
    }

    let mut threats = HashMap::new();
    let threat_ids = distinct_ids(selected.iter().flat_map(|c| &c.threat_ids));
    if !threat_ids.is_empty() {
        let ids: Vec<&str> = threat_ids.iter().copied().collect();
        let found = find_threats(ctx.conn, &ids).await?;
        let section = build_section(
            ctx,
            Section::Threats,
            &threat_ids,
            found.into_iter().map(CatalogEntry::from).collect(),
            root_order.next(),
        )
        .await?;
        documents += section.documents;
        threats = section.children;
        pages.children.push(section.page);
    }

    Ok(DocumentGraph {
        root,
        controls,
        risks,
        threats,
        pages,
        documents,
    })
}

/// Write one root-level section and a child page per resolved entry.
///
/// `entries` come back from the catalog sorted by ID, so children are
/// ordered by ID. Requested IDs missing from the catalog are skipped.
async fn build_section(
    ctx: &BuildContext<'_>,
    section: Section,
    requested: &BTreeSet<&str>,
    entries: Vec<CatalogEntry>,
    order: i64,
) -> Result<SectionPages, DatabaseError> {
    let overview = ctx
        .document(
            section.tag(),
            section.title(),
            section.content(),
            None,
            order,
            DocumentStatus::Draft,
        )
        .await?;
    insert_document(ctx.conn, &overview).await?;
    let mut page = DocumentPage::new(section.tag(), section.title(), section.content(), order);
    let mut documents = 1u32;

    let resolved: BTreeSet<&str> = entries.iter().map(|e| e.object_id.as_str()).collect();
    for missing in requested.difference(&resolved) {
        warn!(section = section.tag(), id = *missing, "catalog entry not found; page skipped");
    }

    let mut children = HashMap::with_capacity(entries.len());
    let mut child_order = SiblingOrder::starting_at(1);
    for entry in entries {
        let tag = section.child_tag(&entry.object_id);
        let title = format!("{} - {}", entry.object_id, entry.title);
        let order = child_order.next();
        let doc = ctx
            .document(
                &tag,
                &title,
                &entry.description,
                Some(&overview),
                order,
                DocumentStatus::Draft,
            )
            .await?;
        insert_document(ctx.conn, &doc).await?;
        documents += 1;
        page.children
            .push(DocumentPage::new(tag, title, entry.description, order));
        children.insert(entry.object_id, doc);
    }
    debug!(section = section.tag(), pages = children.len(), "created catalog section");

    Ok(SectionPages {
        children,
        page,
        documents,
    })
}

/// Distinct non-empty IDs, sorted.
fn distinct_ids<'a>(ids: impl IntoIterator<Item = &'a String>) -> BTreeSet<&'a str> {
    ids.into_iter()
        .map(String::as_str)
        .filter(|id| !id.is_empty())
        .collect()
}

impl BuildContext<'_> {
    /// A fresh document in this build's project. Not yet persisted.
    async fn document(
        &self,
        tag: &str,
        title: &str,
        content: &str,
        parent: Option<&Document>,
        sort_order: i64,
        status: DocumentStatus,
    ) -> Result<Document, DatabaseError> {
        Ok(Document {
            id: self.new_id(PREFIX_DOCUMENT).await?,
            organization_id: self.organization_id.to_string(),
            project_id: self.project_id.to_string(),
            template_page_id: tag.to_string(),
            title: title.to_string(),
            content: content.to_string(),
            parent_id: parent.map(|p| p.id.clone()),
            sort_order,
            status,
            version: 1,
            scf_control_id: None,
            scf_framework_keys: None,
            relevance_score: None,
            created_at: self.now,
            updated_at: self.now,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sibling_order_counts_up_from_start() {
        let mut order = SiblingOrder::starting_at(1);
        assert_eq!(order.next(), 1);
        assert_eq!(order.next(), 2);
        assert_eq!(order, SiblingOrder::starting_at(3));
    }

    #[test]
    fn distinct_ids_sorts_and_drops_blanks() {
        let ids = vec!["R-2".to_string(), String::new(), "R-1".to_string(), "R-2".to_string()];
        let set = distinct_ids(&ids);
        assert_eq!(set.into_iter().collect::<Vec<_>>(), vec!["R-1", "R-2"]);
    }
}
