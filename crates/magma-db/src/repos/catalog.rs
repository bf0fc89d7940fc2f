//! SCF risk and threat catalog.
//!
//! The catalog is global reference data, not scoped to an organization.
//! Imports upsert by `object_id`; scaffolding reads by ID set.

use magma_core::entities::{ScfRisk, ScfThreat};

use crate::error::DatabaseError;
use crate::service::MagmaService;

const RISK_COLS: &str = "object_id, grouping, title, description, nist_function, materiality";
const THREAT_COLS: &str = "object_id, grouping, title, description, materiality";

fn row_to_risk(row: &libsql::Row) -> Result<ScfRisk, DatabaseError> {
    Ok(ScfRisk {
        object_id: row.get::<String>(0)?,
        grouping: row.get::<String>(1)?,
        title: row.get::<String>(2)?,
        description: row.get::<String>(3)?,
        nist_function: row.get::<String>(4)?,
        materiality: row.get::<String>(5)?,
    })
}

fn row_to_threat(row: &libsql::Row) -> Result<ScfThreat, DatabaseError> {
    Ok(ScfThreat {
        object_id: row.get::<String>(0)?,
        grouping: row.get::<String>(1)?,
        title: row.get::<String>(2)?,
        description: row.get::<String>(3)?,
        materiality: row.get::<String>(4)?,
    })
}

/// `?1, ?2, ... ?n`
fn placeholders(n: usize) -> String {
    (1..=n).map(|i| format!("?{i}")).collect::<Vec<_>>().join(", ")
}

fn id_params(ids: &[&str]) -> Vec<libsql::Value> {
    ids.iter()
        .map(|id| libsql::Value::Text((*id).to_string()))
        .collect()
}

/// Risks whose `object_id` is in `ids`, ordered by ID. Unknown IDs are absent
/// from the result.
///
/// # Errors
///
/// Returns `DatabaseError` if the query fails.
pub async fn find_risks(
    conn: &libsql::Connection,
    ids: &[&str],
) -> Result<Vec<ScfRisk>, DatabaseError> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }
    let sql = format!(
        "SELECT {RISK_COLS} FROM scf_risks WHERE object_id IN ({}) ORDER BY object_id",
        placeholders(ids.len())
    );
    let mut rows = conn.query(&sql, libsql::params_from_iter(id_params(ids))).await?;
    let mut results = Vec::new();
    while let Some(row) = rows.next().await? {
        results.push(row_to_risk(&row)?);
    }
    Ok(results)
}

/// Threats whose `object_id` is in `ids`, ordered by ID.
///
/// # Errors
///
/// Returns `DatabaseError` if the query fails.
pub async fn find_threats(
    conn: &libsql::Connection,
    ids: &[&str],
) -> Result<Vec<ScfThreat>, DatabaseError> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }
    let sql = format!(
        "SELECT {THREAT_COLS} FROM scf_threats WHERE object_id IN ({}) ORDER BY object_id",
        placeholders(ids.len())
    );
    let mut rows = conn.query(&sql, libsql::params_from_iter(id_params(ids))).await?;
    let mut results = Vec::new();
    while let Some(row) = rows.next().await? {
        results.push(row_to_threat(&row)?);
    }
    Ok(results)
}

impl MagmaService {
    /// Insert or replace catalog risks. Returns the number written.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if any write fails; the batch is rolled back.
    pub async fn upsert_risks(&self, risks: &[ScfRisk]) -> Result<usize, DatabaseError> {
        let tx = self.db().begin_write().await?;
        for risk in risks.iter().filter(|r| !r.object_id.is_empty()) {
            tx.execute(
                &format!(
                    "INSERT INTO scf_risks ({RISK_COLS}) VALUES (?1, ?2, ?3, ?4, ?5, ?6)
                     ON CONFLICT(object_id) DO UPDATE SET
                        grouping = excluded.grouping,
                        title = excluded.title,
                        description = excluded.description,
                        nist_function = excluded.nist_function,
                        materiality = excluded.materiality"
                ),
                libsql::params![
                    risk.object_id.as_str(),
                    risk.grouping.as_str(),
                    risk.title.as_str(),
                    risk.description.as_str(),
                    risk.nist_function.as_str(),
                    risk.materiality.as_str()
                ],
            )
            .await?;
        }
        tx.commit().await?;
        let written = risks.iter().filter(|r| !r.object_id.is_empty()).count();
        tracing::info!(written, "upserted SCF risks");
        Ok(written)
    }

    /// Insert or replace catalog threats. Returns the number written.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if any write fails; the batch is rolled back.
    pub async fn upsert_threats(&self, threats: &[ScfThreat]) -> Result<usize, DatabaseError> {
        let tx = self.db().begin_write().await?;
        for threat in threats.iter().filter(|t| !t.object_id.is_empty()) {
            tx.execute(
                &format!(
                    "INSERT INTO scf_threats ({THREAT_COLS}) VALUES (?1, ?2, ?3, ?4, ?5)
                     ON CONFLICT(object_id) DO UPDATE SET
                        grouping = excluded.grouping,
                        title = excluded.title,
                        description = excluded.description,
                        materiality = excluded.materiality"
                ),
                libsql::params![
                    threat.object_id.as_str(),
                    threat.grouping.as_str(),
                    threat.title.as_str(),
                    threat.description.as_str(),
                    threat.materiality.as_str()
                ],
            )
            .await?;
        }
        tx.commit().await?;
        let written = threats.iter().filter(|t| !t.object_id.is_empty()).count();
        tracing::info!(written, "upserted SCF threats");
        Ok(written)
    }

    /// # Errors
    ///
    /// Returns `DatabaseError::NoResult` if the risk is not in the catalog.
    pub async fn get_risk(&self, object_id: &str) -> Result<ScfRisk, DatabaseError> {
        find_risks(self.db().conn(), &[object_id])
            .await?
            .into_iter()
            .next()
            .ok_or(DatabaseError::NoResult)
    }

    /// # Errors
    ///
    /// Returns `DatabaseError::NoResult` if the threat is not in the catalog.
    pub async fn get_threat(&self, object_id: &str) -> Result<ScfThreat, DatabaseError> {
        find_threats(self.db().conn(), &[object_id])
            .await?
            .into_iter()
            .next()
            .ok_or(DatabaseError::NoResult)
    }
}
