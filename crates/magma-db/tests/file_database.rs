//! File-backed databases: state survives reopening and migrations rerun cleanly.

use magma_config::ScaffoldConfig;
use magma_core::entities::ScfRisk;
use magma_core::scf::{SUPPORTED_VERSION, ScfConfig, ScfControl};
use magma_db::service::MagmaService;
use pretty_assertions::assert_eq;
use tempfile::TempDir;

async fn open(dir: &TempDir) -> MagmaService {
    let path = dir.path().join("magma.db");
    MagmaService::new_local(path.to_str().unwrap(), ScaffoldConfig::default())
        .await
        .unwrap()
}

#[tokio::test]
async fn scaffolded_project_survives_reopen() {
    let dir = TempDir::new().unwrap();

    let (org_id, project_id) = {
        let svc = open(&dir).await;
        let org = svc.create_organization("Acme").await.unwrap();
        svc.upsert_risks(&[ScfRisk {
            object_id: "R-1".into(),
            grouping: String::new(),
            title: "Weak access".into(),
            description: "Accounts linger".into(),
            nist_function: String::new(),
            materiality: String::new(),
        }])
        .await
        .unwrap();
        let cfg = ScfConfig {
            version: SUPPORTED_VERSION.into(),
            project_name: "SOC 2 Readiness".into(),
            controls: vec![ScfControl {
                object_id: "IAC-01".into(),
                title: "Identity management".into(),
                domain: "Identification & Authentication".into(),
                selected: true,
                risk_ids: vec!["R-1".into()],
                ..ScfControl::default()
            }],
            ..ScfConfig::default()
        };
        let response = svc.scaffold_project(&org.id, &cfg).await.unwrap();
        (org.id, response.project.id)
    };

    let svc = open(&dir).await;
    let project = svc.get_project(&project_id).await.unwrap();
    assert_eq!(project.organization_id, org_id);
    assert_eq!(svc.list_documents(&project_id).await.unwrap().len(), 5);
    assert_eq!(svc.list_relations(&project_id).await.unwrap().len(), 2);
    assert_eq!(svc.get_risk("R-1").await.unwrap().title, "Weak access");
}
