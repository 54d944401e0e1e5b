//! `crowd-output`: telemetry writers for the crowd controller.
//!
//! Two backends are provided behind Cargo features:
//!
//! | Feature   | Backend | Files created                                                   |
//! |-----------|---------|-----------------------------------------------------------------|
//! | *(none)*  | CSV     | `network_agents.csv`, `sidewalk_agents.csv`, `tick_summaries.csv` |
//! | `sqlite`  | SQLite  | `telemetry.db`                                                  |
//!
//! Both backends implement [`TelemetryWriter`] and are driven by
//! [`TelemetryObserver`], which implements `crowd_sim::CrowdObserver`.
//!
//! # Usage
//!
//! ```rust,ignore
//! use crowd_output::{CsvWriter, TelemetryObserver};
//!
//! let writer = CsvWriter::new(Path::new("./output"))?;
//! let mut obs = TelemetryObserver::new(writer, &config);
//! controller.run_ticks(1_000, &mut obs)?;
//! if let Some(e) = obs.take_error() { eprintln!("output error: {e}"); }
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod writer;

#[cfg(feature = "sqlite")]
pub mod sqlite;


pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use observer::TelemetryObserver;
pub use row::{NetworkAgentRow, SidewalkAgentRow, TickSummaryRow};
pub use writer::TelemetryWriter;

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteWriter;
