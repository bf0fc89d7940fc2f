//! Shared test utilities for magma-db unit tests.

pub(crate) mod helpers {
    use magma_config::ScaffoldConfig;
    use magma_core::entities::Organization;
    use magma_core::scf::{ScfConfig, ScfControl, SUPPORTED_VERSION};

    use crate::service::MagmaService;

    /// Create an in-memory `MagmaService` with default scaffold settings.
    pub async fn test_service() -> MagmaService {
        MagmaService::new_local(":memory:", ScaffoldConfig::default())
            .await
            .unwrap()
    }

    /// Create an organization and return it.
    pub async fn test_org(svc: &MagmaService) -> Organization {
        svc.create_organization("Acme").await.unwrap()
    }

    /// Count rows in `table`.
    pub async fn count(svc: &MagmaService, table: &str) -> i64 {
        let mut rows = svc
            .db()
            .conn()
            .query(&format!("SELECT COUNT(*) FROM {table}"), ())
            .await
            .unwrap();
        rows.next().await.unwrap().unwrap().get::<i64>(0).unwrap()
    }

    /// A selected control in `domain`.
    pub fn control(id: &str, domain: &str) -> ScfControl {
        ScfControl {
            object_id: id.into(),
            title: format!("{id} title"),
            domain: domain.into(),
            selected: true,
            ..ScfControl::default()
        }
    }

    /// A valid config around `controls`.
    pub fn config(controls: Vec<ScfControl>) -> ScfConfig {
        ScfConfig {
            version: SUPPORTED_VERSION.into(),
            project_name: "SOC 2 Readiness".into(),
            controls,
            ..ScfConfig::default()
        }
    }
}
