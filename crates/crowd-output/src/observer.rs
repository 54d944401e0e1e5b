//! `TelemetryObserver<W>`: bridges `CrowdObserver` to a `TelemetryWriter`.

use log::warn;

use crowd_core::{CrowdConfig, Tick};
use crowd_sim::{CrowdObserver, CrowdTelemetry, TickStats};

use crate::row::{NetworkAgentRow, SidewalkAgentRow, TickSummaryRow};
use crate::writer::TelemetryWriter;
use crate::{OutputError, OutputResult};

/// A [`CrowdObserver`] that writes route heads and tick summaries to any
/// [`TelemetryWriter`] backend.
///
/// Errors from the writer are stored internally because `CrowdObserver`
/// methods have no return value.  After the run returns, check for errors
/// with [`take_error`][Self::take_error].
pub struct TelemetryObserver<W: TelemetryWriter> {
    writer:       W,
    tick_rate_hz: f32,
    last_error:   Option<OutputError>,
}

impl<W: TelemetryWriter> TelemetryObserver<W> {
    pub fn new(writer: W, config: &CrowdConfig) -> Self {
        Self { writer, tick_rate_hz: config.tick_rate_hz, last_error: None }
    }

    /// Take the stored write error (if any).  `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Unwrap the inner writer (e.g. to inspect files after the run).
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                warn!("telemetry write failed: {e}");
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: TelemetryWriter> CrowdObserver for TelemetryObserver<W> {
    fn on_telemetry(&mut self, telemetry: &CrowdTelemetry) {
        let tick = telemetry.tick;
        if !telemetry.network.is_empty() {
            let rows: Vec<NetworkAgentRow> =
                telemetry.network.iter().map(|r| NetworkAgentRow::new(tick, r)).collect();
            let result = self.writer.write_network(&rows);
            self.store_err(result);
        }
        if !telemetry.sidewalk.is_empty() {
            let rows: Vec<SidewalkAgentRow> =
                telemetry.sidewalk.iter().map(|r| SidewalkAgentRow::new(tick, r)).collect();
            let result = self.writer.write_sidewalk(&rows);
            self.store_err(result);
        }
    }

    fn on_tick_end(&mut self, stats: &TickStats) {
        let row = TickSummaryRow::new(stats, self.tick_rate_hz);
        let result = self.writer.write_tick_summary(&row);
        self.store_err(result);
    }

    fn on_run_end(&mut self, _final_tick: Tick) {
        let result = self.writer.finish();
        self.store_err(result);
    }
}
