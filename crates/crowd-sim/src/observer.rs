//! Controller observer trait for progress reporting and telemetry sinks.

use crowd_core::Tick;

use crate::telemetry::{CrowdTelemetry, TickStats};

/// Callbacks invoked by [`CrowdController::step`][crate::CrowdController::step]
/// at key points in the tick.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// # Example: progress printer
///
/// ```rust,ignore
/// struct ProgressPrinter { interval: u64 }
///
/// impl CrowdObserver for ProgressPrinter {
///     fn on_tick_end(&mut self, stats: &TickStats) {
///         if stats.tick.0 % self.interval == 0 {
///             println!("{}: {} cars", stats.tick, stats.active_vehicles);
///         }
///     }
/// }
/// ```
pub trait CrowdObserver {
    /// Called at the very start of each tick, before any processing.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called once per tick after the world has acknowledged the batch, with
    /// the route head of every active agent.
    fn on_telemetry(&mut self, _telemetry: &CrowdTelemetry) {}

    /// Called at the end of each successful tick.
    fn on_tick_end(&mut self, _stats: &TickStats) {}

    /// Called once after a run loop exits.
    fn on_run_end(&mut self, _final_tick: Tick) {}
}

/// A [`CrowdObserver`] that does nothing.
pub struct NoopObserver;

impl CrowdObserver for NoopObserver {}
