//! Scaffolding runs against a shared file database while other callers read and write.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use magma_config::ScaffoldConfig;
use magma_core::scf::{SUPPORTED_VERSION, ScfConfig, ScfControl};
use magma_db::scaffold::FailureClass;
use magma_db::service::MagmaService;
use pretty_assertions::assert_eq;
use tempfile::TempDir;

const CONTROLS: usize = 150;
const DOMAINS: usize = 5;
/// Overview root, one page per domain, one per control.
const DOCUMENTS_PER_RUN: i64 = (1 + DOMAINS + CONTROLS) as i64;

async fn open(dir: &TempDir) -> MagmaService {
    let path = dir.path().join("magma.db");
    MagmaService::new_local(path.to_str().unwrap(), ScaffoldConfig::default())
        .await
        .unwrap()
}

fn large_config(name: &str) -> ScfConfig {
    let controls = (0..CONTROLS)
        .map(|i| ScfControl {
            object_id: format!("CTL-{i:03}"),
            title: format!("Control {i}"),
            domain: format!("Domain {}", i % DOMAINS),
            selected: true,
            ..ScfControl::default()
        })
        .collect();
    ScfConfig {
        version: SUPPORTED_VERSION.into(),
        project_name: name.into(),
        controls,
        ..ScfConfig::default()
    }
}

async fn count(svc: &MagmaService, sql: &str) -> i64 {
    let mut rows = svc.db().conn().query(sql, ()).await.unwrap();
    rows.next().await.unwrap().unwrap().get::<i64>(0).unwrap()
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_runs_commit_independently_and_readers_see_whole_graphs() {
    let dir = TempDir::new().unwrap();
    let svc = Arc::new(open(&dir).await);
    let org = svc.create_organization("Acme").await.unwrap();

    // Fails the closing audit entry of the "Doomed" run, after all its pages exist.
    svc.db()
        .conn()
        .execute_batch(
            "CREATE TRIGGER fail_doomed BEFORE INSERT ON audit_trail
             WHEN NEW.entity_id IN (SELECT id FROM projects WHERE name = 'Doomed')
             BEGIN SELECT RAISE(ABORT, 'doomed'); END;",
        )
        .await
        .unwrap();

    let done = Arc::new(AtomicBool::new(false));
    let reader = {
        let svc = Arc::clone(&svc);
        let done = Arc::clone(&done);
        tokio::spawn(async move {
            let mut observed = Vec::new();
            while !done.load(Ordering::Acquire) {
                observed.push(count(&svc, "SELECT count(*) FROM documents").await);
                tokio::task::yield_now().await;
            }
            observed
        })
    };

    let names = ["Alpha", "Beta", "Doomed", "Gamma"];
    let runs: Vec<_> = names
        .iter()
        .map(|name| {
            let svc = Arc::clone(&svc);
            let org_id = org.id.clone();
            let cfg = large_config(name);
            tokio::spawn(async move { svc.scaffold_project(&org_id, &cfg).await })
        })
        .collect();
    let writer = {
        let svc = Arc::clone(&svc);
        tokio::spawn(async move { svc.create_organization("Globex").await })
    };

    let mut committed = Vec::new();
    for (name, run) in names.iter().zip(runs) {
        match run.await.unwrap() {
            Ok(response) => committed.push(response.project.id),
            Err(e) => {
                assert_eq!(*name, "Doomed", "unexpected failure: {e}");
                assert_eq!(e.class(), FailureClass::Internal);
            }
        }
    }
    writer.await.unwrap().unwrap();
    done.store(true, Ordering::Release);
    let observed = reader.await.unwrap();

    assert_eq!(committed.len(), 3);
    for project_id in &committed {
        let docs = svc.list_documents(project_id).await.unwrap();
        assert_eq!(docs.len() as i64, DOCUMENTS_PER_RUN);
    }
    assert!(!observed.is_empty());
    for seen in &observed {
        assert_eq!(seen % DOCUMENTS_PER_RUN, 0, "reader saw a partial graph: {seen}");
    }
    assert_eq!(
        count(&svc, "SELECT count(*) FROM documents").await,
        3 * DOCUMENTS_PER_RUN
    );
    assert_eq!(
        count(&svc, "SELECT count(*) FROM projects WHERE name = 'Doomed'").await,
        0
    );
    assert_eq!(count(&svc, "SELECT count(*) FROM organizations").await, 2);
}

#[tokio::test]
async fn uncommitted_run_is_invisible_to_the_shared_connection() {
    let dir = TempDir::new().unwrap();
    let svc = open(&dir).await;
    let org = svc.create_organization("Acme").await.unwrap();

    let tx = svc.db().begin_write().await.unwrap();
    tx.execute(
        "INSERT INTO projects (id, organization_id, name) VALUES ('prj-pending', ?1, 'Pending')",
        [org.id.as_str()],
    )
    .await
    .unwrap();

    assert_eq!(count(&svc, "SELECT count(*) FROM projects").await, 0);
    tx.rollback().await.unwrap();
    assert_eq!(count(&svc, "SELECT count(*) FROM projects").await, 0);
}
