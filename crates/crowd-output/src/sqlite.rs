//! SQLite output backend (feature `sqlite`).
//!
//! Creates a single `telemetry.db` file in the configured output directory
//! with three tables: `network_agents`, `sidewalk_agents` and
//! `tick_summaries`.

use std::path::Path;

use rusqlite::Connection;

use crate::writer::TelemetryWriter;
use crate::{NetworkAgentRow, OutputResult, SidewalkAgentRow, TickSummaryRow};

/// Writes telemetry to an SQLite database.
pub struct SqliteWriter {
    conn:     Connection,
    finished: bool,
}

impl SqliteWriter {
    /// Open (or create) `telemetry.db` in `dir` and initialise the schema.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let conn = Connection::open(dir.join("telemetry.db"))?;

        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous  = NORMAL;
             CREATE TABLE IF NOT EXISTS network_agents (
                 tick     INTEGER NOT NULL,
                 actor_id INTEGER NOT NULL,
                 kind     TEXT    NOT NULL,
                 edge     INTEGER NOT NULL,
                 lane     INTEGER NOT NULL,
                 segment  INTEGER NOT NULL,
                 offset   REAL    NOT NULL
             );
             CREATE TABLE IF NOT EXISTS sidewalk_agents (
                 tick     INTEGER NOT NULL,
                 actor_id INTEGER NOT NULL,
                 polygon  INTEGER NOT NULL,
                 segment  INTEGER NOT NULL,
                 offset   REAL    NOT NULL,
                 reverse  INTEGER NOT NULL
             );
             CREATE TABLE IF NOT EXISTS tick_summaries (
                 tick               INTEGER PRIMARY KEY,
                 elapsed_secs       REAL    NOT NULL,
                 spawned            INTEGER NOT NULL,
                 spawn_failures     INTEGER NOT NULL,
                 out_of_bounds      INTEGER NOT NULL,
                 below_floor        INTEGER NOT NULL,
                 dead_end           INTEGER NOT NULL,
                 actor_lost         INTEGER NOT NULL,
                 active_vehicles    INTEGER NOT NULL,
                 active_pedestrians INTEGER NOT NULL,
                 ego_present        INTEGER NOT NULL
             );",
        )?;

        Ok(Self { conn, finished: false })
    }
}

impl TelemetryWriter for SqliteWriter {
    fn write_network(&mut self, rows: &[NetworkAgentRow]) -> OutputResult<()> {
        if rows.is_empty() {
            return Ok(());
        }
        let tx = self.conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare_cached(
                "INSERT INTO network_agents \
                 (tick, actor_id, kind, edge, lane, segment, offset) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            )?;
            for row in rows {
                stmt.execute(rusqlite::params![
                    row.tick as i64,
                    row.actor_id,
                    row.kind,
                    row.edge,
                    row.lane,
                    row.segment,
                    row.offset as f64,
                ])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn write_sidewalk(&mut self, rows: &[SidewalkAgentRow]) -> OutputResult<()> {
        if rows.is_empty() {
            return Ok(());
        }
        let tx = self.conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare_cached(
                "INSERT INTO sidewalk_agents \
                 (tick, actor_id, polygon, segment, offset, reverse) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            )?;
            for row in rows {
                stmt.execute(rusqlite::params![
                    row.tick as i64,
                    row.actor_id,
                    row.polygon,
                    row.segment,
                    row.offset as f64,
                    row.reverse as i64,
                ])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()> {
        self.conn.execute(
            "INSERT INTO tick_summaries \
             (tick, elapsed_secs, spawned, spawn_failures, out_of_bounds, below_floor, \
              dead_end, actor_lost, active_vehicles, active_pedestrians, ego_present) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
            rusqlite::params![
                row.tick as i64,
                row.elapsed_secs,
                row.spawned,
                row.spawn_failures,
                row.out_of_bounds,
                row.below_floor,
                row.dead_end,
                row.actor_lost,
                row.active_vehicles,
                row.active_pedestrians,
                row.ego_present as i64,
            ],
        )?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
        Ok(())
    }
}
