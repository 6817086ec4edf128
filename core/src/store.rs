//! SQLite scenario history.
//!
//! RULE: Only store.rs talks to the database. The engine never calls
//! into the store; the runner records a run after computing it.

use crate::{
    config::Settings,
    engine::CalculationResults,
    error::{TcoError, TcoResult},
    types::{Currency, RunId, VendorId},
};
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};

pub struct ScenarioStore {
    conn: Connection,
}

/// A recorded run, fully rehydrated.
#[derive(Debug, Clone)]
pub struct ScenarioRun {
    pub run_id:         RunId,
    pub label:          Option<String>,
    pub created_at:     DateTime<Utc>,
    pub engine_version: String,
    pub vendors:        Vec<VendorId>,
    pub settings:       Settings,
    pub results:        CalculationResults,
}

#[derive(Debug, Clone)]
pub struct ScenarioRunSummary {
    pub run_id:     RunId,
    pub label:      Option<String>,
    pub created_at: String,
}

impl ScenarioStore {
    /// Open (or create) the scenario database at `path`.
    pub fn open(path: &str) -> TcoResult<Self> {
        let conn = Connection::open(path)?;
        conn.execute_batch("PRAGMA journal_mode=WAL;")?;
        conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        Ok(Self { conn })
    }

    /// Open an in-memory database (used in tests).
    pub fn in_memory() -> TcoResult<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        Ok(Self { conn })
    }

    /// Apply all schema migrations in order.
    pub fn migrate(&self) -> TcoResult<()> {
        self.conn
            .execute_batch(include_str!("../../migrations/001_scenarios.sql"))?;
        Ok(())
    }

    // ── Runs ───────────────────────────────────────────────────

    /// Record one calculation. `settings` should be the resolved value
    /// the results were computed with.
    pub fn record_run(
        &self,
        label: Option<&str>,
        vendors: &[VendorId],
        settings: &Settings,
        results: &CalculationResults,
    ) -> TcoResult<RunId> {
        let run_id = uuid::Uuid::new_v4().to_string();
        let created_at = Utc::now().to_rfc3339();

        let tx = self.conn.unchecked_transaction()?;
        tx.execute(
            "INSERT INTO scenario_run
                (run_id, label, created_at, engine_version, vendors_json, settings_json, results_json)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                run_id,
                label,
                created_at,
                env!("CARGO_PKG_VERSION"),
                serde_json::to_string(vendors)?,
                serde_json::to_string(settings)?,
                serde_json::to_string(results)?,
            ],
        )?;

        for (position, vendor) in results.vendors.iter().enumerate() {
            tx.execute(
                "INSERT INTO scenario_vendor
                    (run_id, position, vendor_id, three_year_tco, total_initial_cost, total_annual_cost, roi)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                params![
                    run_id,
                    position as i64,
                    vendor.id,
                    vendor.tco.three_year_tco,
                    vendor.tco.total_initial_cost,
                    vendor.tco.total_annual_cost,
                    vendor.roi.as_ref().map(|r| r.roi),
                ],
            )?;
        }
        tx.commit()?;

        log::info!(
            "store: recorded run {run_id} ({} vendors)",
            results.vendors.len()
        );
        Ok(run_id)
    }

    pub fn load_run(&self, run_id: &str) -> TcoResult<ScenarioRun> {
        let row = self
            .conn
            .query_row(
                "SELECT run_id, label, created_at, engine_version, vendors_json, settings_json, results_json
                 FROM scenario_run WHERE run_id = ?1",
                params![run_id],
                |row| {
                    Ok((
                        row.get::<_, String>(0)?,
                        row.get::<_, Option<String>>(1)?,
                        row.get::<_, String>(2)?,
                        row.get::<_, String>(3)?,
                        row.get::<_, String>(4)?,
                        row.get::<_, String>(5)?,
                        row.get::<_, String>(6)?,
                    ))
                },
            )
            .optional()?;

        let Some((run_id, label, created_at, engine_version, vendors, settings, results)) = row
        else {
            return Err(TcoError::RunNotFound { run_id: run_id.to_string() });
        };

        let created_at = DateTime::parse_from_rfc3339(&created_at)
            .map_err(|e| anyhow::anyhow!("Bad created_at '{created_at}' on run {run_id}: {e}"))?
            .with_timezone(&Utc);

        Ok(ScenarioRun {
            run_id,
            label,
            created_at,
            engine_version,
            vendors: serde_json::from_str(&vendors)?,
            settings: serde_json::from_str(&settings)?,
            results: serde_json::from_str(&results)?,
        })
    }

    pub fn run_count(&self) -> TcoResult<i64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM scenario_run", [], |row| row.get(0))?;
        Ok(count)
    }

    /// Most recent runs first.
    pub fn recent_runs(&self, limit: usize) -> TcoResult<Vec<ScenarioRunSummary>> {
        let mut stmt = self.conn.prepare(
            "SELECT run_id, label, created_at FROM scenario_run
             ORDER BY created_at DESC, rowid DESC LIMIT ?1",
        )?;
        let runs = stmt
            .query_map(params![limit as i64], |row| {
                Ok(ScenarioRunSummary {
                    run_id:     row.get(0)?,
                    label:      row.get(1)?,
                    created_at: row.get(2)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(runs)
    }

    // ── Vendor history ─────────────────────────────────────────

    /// Every recorded TCO for `vendor_id`, in recording order.
    pub fn vendor_tco_history(&self, vendor_id: &str) -> TcoResult<Vec<(RunId, Currency)>> {
        let mut stmt = self.conn.prepare(
            "SELECT run_id, three_year_tco FROM scenario_vendor
             WHERE vendor_id = ?1 ORDER BY id ASC",
        )?;
        let history = stmt
            .query_map(params![vendor_id], |row| Ok((row.get(0)?, row.get(1)?)))?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(history)
    }
}
