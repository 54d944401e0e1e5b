//! The `TelemetryWriter` trait implemented by all backend writers.

use crate::{NetworkAgentRow, OutputResult, SidewalkAgentRow, TickSummaryRow};

/// Trait implemented by the CSV and SQLite writers.
///
/// Errors are returned here but stored by [`TelemetryObserver`][crate::TelemetryObserver],
/// whose callbacks cannot fail.
pub trait TelemetryWriter {
    /// Route heads of the active vehicles for one tick.
    fn write_network(&mut self, rows: &[NetworkAgentRow]) -> OutputResult<()>;

    /// Route heads of the active pedestrians for one tick.
    fn write_sidewalk(&mut self, rows: &[SidewalkAgentRow]) -> OutputResult<()>;

    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()>;

    /// Flush and close all underlying handles.  Idempotent.
    fn finish(&mut self) -> OutputResult<()>;
}
