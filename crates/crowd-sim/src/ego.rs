//! Ego telemetry hand-off.
//!
//! An external producer publishes the ego vehicle's state at its own rate;
//! the tick reads the latest value without blocking for long.  The ego is
//! never commanded, it only constrains everyone else.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::{Duration, Instant};

use crowd_core::Vec2;
use crowd_rvo::{AgentParams, SolverAgent};

/// One ego sample.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EgoTelemetry {
    pub position:      Vec2,
    pub velocity:      Vec2,
    /// Heading angle in degrees, counter-clockwise from +x.
    pub yaw_deg:       f32,
    /// Footprint rectangle, counter-clockwise from rear-left.
    pub corners:       [Vec2; 4],
    pub pref_velocity: Vec2,
}

impl EgoTelemetry {
    pub fn solver_agent(&self) -> SolverAgent {
        SolverAgent {
            params:        AgentParams::VEHICLE,
            position:      self.position,
            velocity:      self.velocity,
            heading:       Vec2::from_yaw_deg(self.yaw_deg),
            corners:       self.corners,
            pref_velocity: self.pref_velocity,
        }
    }
}

/// Result of reading the inbox.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum EgoReading {
    Fresh(EgoTelemetry),
    /// A sample exists but is older than the allowed age.
    Stale(Duration),
    Missing,
}

/// Latest-value-wins mailbox shared between the ego producer and the tick.
#[derive(Clone, Default)]
pub struct EgoInbox {
    inner: Arc<Mutex<Option<(EgoTelemetry, Instant)>>>,
}

impl EgoInbox {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the stored sample.
    pub fn publish(&self, telemetry: EgoTelemetry) {
        let mut slot = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        *slot = Some((telemetry, Instant::now()));
    }

    /// Drop the stored sample (ego left the scene).
    pub fn clear(&self) {
        *self.inner.lock().unwrap_or_else(PoisonError::into_inner) = None;
    }

    /// Latest sample, subject to `max_age`.  `None` accepts any age.
    pub fn read(&self, max_age: Option<Duration>) -> EgoReading {
        let slot = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        match *slot {
            None => EgoReading::Missing,
            Some((telemetry, at)) => {
                let age = at.elapsed();
                match max_age {
                    Some(max) if age > max => EgoReading::Stale(age),
                    _ => EgoReading::Fresh(telemetry),
                }
            }
        }
    }
}
