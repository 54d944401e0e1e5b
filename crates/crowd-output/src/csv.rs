//! CSV output backend.
//!
//! Creates three files in the configured output directory:
//! - `network_agents.csv`
//! - `sidewalk_agents.csv`
//! - `tick_summaries.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::writer::TelemetryWriter;
use crate::{NetworkAgentRow, OutputResult, SidewalkAgentRow, TickSummaryRow};

pub const NETWORK_HEADER: [&str; 7] = ["tick", "actor_id", "kind", "edge", "lane", "segment", "offset"];
pub const SIDEWALK_HEADER: [&str; 6] = ["tick", "actor_id", "polygon", "segment", "offset", "reverse"];
pub const SUMMARY_HEADER: [&str; 11] = [
    "tick",
    "elapsed_secs",
    "spawned",
    "spawn_failures",
    "out_of_bounds",
    "below_floor",
    "dead_end",
    "actor_lost",
    "active_vehicles",
    "active_pedestrians",
    "ego_present",
];

/// Writes telemetry to three CSV files.
pub struct CsvWriter {
    network:   Writer<File>,
    sidewalk:  Writer<File>,
    summaries: Writer<File>,
    finished:  bool,
}

impl CsvWriter {
    /// Create the three CSV files in `dir` and write the header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut network = Writer::from_path(dir.join("network_agents.csv"))?;
        network.write_record(NETWORK_HEADER)?;

        let mut sidewalk = Writer::from_path(dir.join("sidewalk_agents.csv"))?;
        sidewalk.write_record(SIDEWALK_HEADER)?;

        let mut summaries = Writer::from_path(dir.join("tick_summaries.csv"))?;
        summaries.write_record(SUMMARY_HEADER)?;

        Ok(Self { network, sidewalk, summaries, finished: false })
    }
}

impl TelemetryWriter for CsvWriter {
    fn write_network(&mut self, rows: &[NetworkAgentRow]) -> OutputResult<()> {
        for row in rows {
            self.network.write_record(&[
                row.tick.to_string(),
                row.actor_id.to_string(),
                row.kind.to_owned(),
                row.edge.to_string(),
                row.lane.to_string(),
                row.segment.to_string(),
                format!("{:.3}", row.offset),
            ])?;
        }
        Ok(())
    }

    fn write_sidewalk(&mut self, rows: &[SidewalkAgentRow]) -> OutputResult<()> {
        for row in rows {
            self.sidewalk.write_record(&[
                row.tick.to_string(),
                row.actor_id.to_string(),
                row.polygon.to_string(),
                row.segment.to_string(),
                format!("{:.3}", row.offset),
                (row.reverse as u8).to_string(),
            ])?;
        }
        Ok(())
    }

    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()> {
        self.summaries.write_record(&[
            row.tick.to_string(),
            format!("{:.3}", row.elapsed_secs),
            row.spawned.to_string(),
            row.spawn_failures.to_string(),
            row.out_of_bounds.to_string(),
            row.below_floor.to_string(),
            row.dead_end.to_string(),
            row.actor_lost.to_string(),
            row.active_vehicles.to_string(),
            row.active_pedestrians.to_string(),
            (row.ego_present as u8).to_string(),
        ])?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.network.flush()?;
        self.sidewalk.flush()?;
        self.summaries.flush()?;
        Ok(())
    }
}
