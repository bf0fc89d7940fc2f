//! Default documentation seeding integration tests.

use magma_config::ScaffoldConfig;
use magma_core::entities::Project;
use magma_core::enums::{DocumentStatus, Priority};
use magma_core::fingerprint::fingerprint_value;
use magma_core::payloads::SuggestedSource;
use magma_core::scf::{SUPPORTED_VERSION, ScfConfig, ScfControl};
use magma_core::seed::DocumentationBundle;
use magma_db::error::DatabaseError;
use magma_db::service::MagmaService;
use pretty_assertions::assert_eq;
use serde_json::json;

async fn test_service() -> MagmaService {
    MagmaService::new_local(":memory:", ScaffoldConfig::default())
        .await
        .unwrap()
}

async fn count(svc: &MagmaService, table: &str) -> i64 {
    let mut rows = svc
        .db()
        .conn()
        .query(&format!("SELECT COUNT(*) FROM {table}"), ())
        .await
        .unwrap();
    rows.next().await.unwrap().unwrap().get::<i64>(0).unwrap()
}

/// An organization with one freshly scaffolded project.
async fn scaffolded(svc: &MagmaService) -> (String, Project) {
    let org = svc.create_organization("Acme").await.unwrap();
    let cfg = ScfConfig {
        version: SUPPORTED_VERSION.into(),
        project_name: "SOC 2 Readiness".into(),
        controls: vec![ScfControl {
            object_id: "AC-01".into(),
            title: "Access policy".into(),
            domain: "Access Control".into(),
            selected: true,
            ..ScfControl::default()
        }],
        ..ScfConfig::default()
    };
    let response = svc.scaffold_project(&org.id, &cfg).await.unwrap();
    (org.id, response.project)
}

fn bundle(date_collected: &str) -> DocumentationBundle {
    serde_json::from_value(json!({
        "template_page_id": "soc2-policies",
        "documents": [
            {
                "title": "Access Control Policy",
                "content": "# Access Control Policy",
                "status": "in_progress",
                "collections": [
                    {
                        "name": "Quarterly access review",
                        "description": "Reviewer sign-offs",
                        "type": "checklist",
                        "agent_type": "reviewer",
                        "content": {"items": ["admins", "contractors"], "quarter": 2.0},
                        "sources": [{"system": "okta"}]
                    }
                ],
                "evidence": [
                    {
                        "name": "Quarterly access review export",
                        "description": "Export of the review",
                        "type": "document",
                        "source_type": "manual",
                        "date_collected": date_collected,
                        "date_expires": "not a date",
                        "value_type": "collection",
                        "value": {"rows": 12, "owner": "it"},
                        "group": "access",
                        "tags": ["q2"]
                    },
                    {
                        "name": "MFA screenshot",
                        "date_collected": "2026-03-01T00:00:00Z",
                        "date_expires": "2027-03-01T00:00:00Z",
                        "value_type": "text",
                        "value": "enabled"
                    }
                ],
                "evidence_requests": [
                    {
                        "title": "Upload access review",
                        "description": "Latest quarterly review",
                        "suggested_sources": ["okta", "hr_system"],
                        "acceptance_criteria": "Signed by the system owner",
                        "assigned_to": "  ",
                        "priority": "high",
                        "due_date": "2026-06-30T00:00:00Z",
                        "created_by": "seed"
                    }
                ]
            },
            {
                "title": "Incident Response Plan"
            }
        ]
    }))
    .unwrap()
}

// ---------------------------------------------------------------------------
// Seeding
// ---------------------------------------------------------------------------

#[tokio::test]
async fn seeds_documents_with_their_attachments() {
    let svc = test_service().await;
    let (org_id, project) = scaffolded(&svc).await;
    let docs_before = svc.list_documents(&project.id).await.unwrap().len();

    let stats = svc
        .seed_default_documentation(&org_id, &project.id, &bundle("2026-04-01T09:30:00Z"))
        .await
        .unwrap();
    assert_eq!(stats.documents, 2);
    assert_eq!(stats.collections, 1);
    assert_eq!(stats.evidence, 2);
    assert_eq!(stats.evidence_requests, 1);

    let docs = svc.list_documents(&project.id).await.unwrap();
    assert_eq!(docs.len(), docs_before + 2);
    let policy = docs
        .iter()
        .find(|d| d.title == "Access Control Policy")
        .unwrap();
    assert_eq!(policy.template_page_id, "soc2-policies");
    assert_eq!(policy.status, DocumentStatus::InProgress);
    assert_eq!(policy.sort_order, 1);
    assert_eq!(policy.version, 1);
    assert!(policy.is_root());
    let plan = docs
        .iter()
        .find(|d| d.title == "Incident Response Plan")
        .unwrap();
    assert_eq!(plan.status, DocumentStatus::Draft);
}

#[tokio::test]
async fn collections_and_evidence_are_fingerprinted_and_linked() {
    let svc = test_service().await;
    let (org_id, project) = scaffolded(&svc).await;
    svc.seed_default_documentation(&org_id, &project.id, &bundle("2026-04-01T09:30:00Z"))
        .await
        .unwrap();

    let collections = svc.list_collections(&project.id).await.unwrap();
    assert_eq!(collections.len(), 1);
    let collection = &collections[0];
    assert_eq!(collection.collection_type, "checklist");
    assert_eq!(collection.content_hash, fingerprint_value(&collection.content));
    // integral floats hash the same as their integer spelling
    assert_eq!(
        collection.content_hash,
        fingerprint_value(&json!({"quarter": 2, "items": ["admins", "contractors"]}))
    );

    let evidence = svc.list_evidence(&project.id).await.unwrap();
    assert_eq!(evidence.len(), 2);
    let export = &evidence[0];
    assert_eq!(export.name, "Quarterly access review export");
    assert_eq!(export.collection_id.as_deref(), Some(collection.id.as_str()));
    assert_eq!(export.date_expires, None);
    assert_eq!(export.group_name, "access");
    assert_eq!(export.tags, vec!["q2".to_string()]);
    assert_eq!(export.content_hash, fingerprint_value(&json!({"owner": "it", "rows": 12})));
    assert_eq!(export.date_collected.to_rfc3339(), "2026-04-01T09:30:00+00:00");

    let screenshot = &evidence[1];
    assert_eq!(screenshot.collection_id, None);
    assert!(screenshot.date_expires.is_some());
}

#[tokio::test]
async fn seeded_requests_keep_named_sources() {
    let svc = test_service().await;
    let (org_id, project) = scaffolded(&svc).await;
    svc.seed_default_documentation(&org_id, &project.id, &bundle("2026-04-01T09:30:00Z"))
        .await
        .unwrap();

    let requests = svc.list_evidence_requests(&project.id).await.unwrap();
    assert_eq!(requests.len(), 1);
    let request = &requests[0];
    assert_eq!(request.title, "Upload access review");
    assert_eq!(request.priority, Priority::High);
    assert_eq!(request.assigned_to, None);
    assert_eq!(request.created_by, "seed");
    assert_eq!(
        request.suggested_sources,
        vec![
            SuggestedSource::Named { name: "okta".into() },
            SuggestedSource::Named { name: "hr_system".into() },
        ]
    );
    assert_eq!(
        request.due_date.map(|d| d.to_rfc3339()),
        Some("2026-06-30T00:00:00+00:00".to_string())
    );
}

// ---------------------------------------------------------------------------
// Failures
// ---------------------------------------------------------------------------

#[tokio::test]
async fn bad_collected_date_rolls_back_everything() {
    let svc = test_service().await;
    let (org_id, project) = scaffolded(&svc).await;
    let docs_before = count(&svc, "documents").await;
    let audit_before = count(&svc, "audit_trail").await;

    let err = svc
        .seed_default_documentation(&org_id, &project.id, &bundle("last tuesday"))
        .await
        .unwrap_err();
    assert!(matches!(err, DatabaseError::InvalidState(_)), "{err}");

    assert_eq!(count(&svc, "documents").await, docs_before);
    assert_eq!(count(&svc, "collections").await, 0);
    assert_eq!(count(&svc, "evidence").await, 0);
    assert_eq!(count(&svc, "audit_trail").await, audit_before);
}

#[tokio::test]
async fn foreign_project_is_refused() {
    let svc = test_service().await;
    let (_, project) = scaffolded(&svc).await;
    let other = svc.create_organization("Globex").await.unwrap();

    let err = svc
        .seed_default_documentation(&other.id, &project.id, &bundle("2026-04-01T09:30:00Z"))
        .await
        .unwrap_err();
    assert!(matches!(err, DatabaseError::InvalidState(_)), "{err}");
    assert_eq!(count(&svc, "collections").await, 0);
}

#[tokio::test]
async fn missing_project_is_no_result() {
    let svc = test_service().await;
    let org = svc.create_organization("Acme").await.unwrap();
    let err = svc
        .seed_default_documentation(&org.id, "prj-missing", &DocumentationBundle::default())
        .await
        .unwrap_err();
    assert!(matches!(err, DatabaseError::NoResult), "{err}");
}
