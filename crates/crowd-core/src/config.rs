//! Top-level controller configuration.
//!
//! Typically loaded from a JSON file by the application crate (feature
//! `serde`) and passed to `CrowdControllerBuilder`.

use crate::{AgentKind, Bounds, CrowdError, CrowdResult, SimClock, Vec2};

/// Uniform preferred-speed distribution: `base + U[0, spread)` m/s.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpeedRange {
    pub base:   f32,
    pub spread: f32,
}

impl SpeedRange {
    pub const fn new(base: f32, spread: f32) -> Self {
        Self { base, spread }
    }

    /// Largest speed this range can produce.
    pub fn max(&self) -> f32 {
        self.base + self.spread
    }
}

/// Controller configuration.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CrowdConfig {
    /// Target number of vehicles on the lane network.
    pub num_network_agents: usize,

    /// Target number of pedestrians on the sidewalks.
    pub num_sidewalk_agents: usize,

    /// Minimum number of route points a path must hold before targets are read.
    pub path_min_points: usize,

    /// Spacing between consecutive route points, metres.
    pub path_interval: f32,

    /// Operating area; agents outside it are removed.
    pub bounds: Bounds,

    /// Agents whose vertical position drops below this have fallen out of
    /// the world and are removed.
    pub elevation_floor: f32,

    /// Height above the route point at which new actors are placed.
    pub spawn_height: f32,

    /// Fixed update rate shared with the external world.
    pub tick_rate_hz: f32,

    /// Upper bound on the end-of-tick world barrier, milliseconds.
    pub world_tick_timeout_ms: u64,

    /// Master RNG seed.  The same seed always produces identical runs
    /// against a deterministic world.
    pub seed: u64,

    /// Path index a vehicle steers toward.
    pub vehicle_lookahead: usize,

    /// Path index a pedestrian walks toward.
    pub pedestrian_lookahead: usize,

    /// Ego telemetry older than this is ignored.  `None` accepts any age
    /// (last value written wins).
    pub ego_max_age_ms: Option<u64>,

    /// Random paths drawn per spawn attempt before giving up for this tick
    /// (paths starting outside `bounds` are redrawn).
    pub max_path_attempts: u32,

    /// Vehicle preferred-speed distribution.
    pub vehicle_speed: SpeedRange,

    /// Pedestrian preferred-speed distribution.
    pub pedestrian_speed: SpeedRange,
}

impl Default for CrowdConfig {
    fn default() -> Self {
        Self {
            num_network_agents:    20,
            num_sidewalk_agents:   20,
            path_min_points:       20,
            path_interval:         1.0,
            bounds:                Bounds::new(Vec2::new(-300.0, -300.0), Vec2::new(300.0, 300.0)),
            elevation_floor:       -10.0,
            spawn_height:          0.5,
            tick_rate_hz:          100.0,
            world_tick_timeout_ms: 2_000,
            seed:                  0,
            vehicle_lookahead:     2,
            pedestrian_lookahead:  0,
            ego_max_age_ms:        None,
            max_path_attempts:     10,
            vehicle_speed:         SpeedRange::new(5.0, 1.5),
            pedestrian_speed:      SpeedRange::new(0.5, 1.5),
        }
    }
}

impl CrowdConfig {
    /// Target pool size for `kind`.
    pub fn target(&self, kind: AgentKind) -> usize {
        match kind {
            AgentKind::Vehicle    => self.num_network_agents,
            AgentKind::Pedestrian => self.num_sidewalk_agents,
        }
    }

    /// Path lookahead index for `kind`.
    pub fn lookahead(&self, kind: AgentKind) -> usize {
        match kind {
            AgentKind::Vehicle    => self.vehicle_lookahead,
            AgentKind::Pedestrian => self.pedestrian_lookahead,
        }
    }

    /// Preferred-speed distribution for `kind`.
    pub fn speed_range(&self, kind: AgentKind) -> SpeedRange {
        match kind {
            AgentKind::Vehicle    => self.vehicle_speed,
            AgentKind::Pedestrian => self.pedestrian_speed,
        }
    }

    /// Total solver slots: one per pooled agent plus one for the ego vehicle.
    pub fn slot_count(&self) -> usize {
        self.num_network_agents + self.num_sidewalk_agents + 1
    }

    /// Construct a `SimClock` pre-configured for this run.
    pub fn make_clock(&self) -> SimClock {
        SimClock::new(self.tick_rate_hz)
    }

    /// Reject configurations the controller cannot run with.
    pub fn validate(&self) -> CrowdResult<()> {
        let err = |msg: String| Err(CrowdError::Config(msg));

        if self.path_min_points < 2 {
            return err(format!("path_min_points must be >= 2, got {}", self.path_min_points));
        }
        if !(self.path_interval > 0.0) {
            return err(format!("path_interval must be positive, got {}", self.path_interval));
        }
        if !(self.tick_rate_hz > 0.0) {
            return err(format!("tick_rate_hz must be positive, got {}", self.tick_rate_hz));
        }
        if !self.bounds.is_valid() {
            return err(format!(
                "bounds min {} exceeds max {}",
                self.bounds.min, self.bounds.max
            ));
        }
        for kind in AgentKind::ALL {
            let lookahead = self.lookahead(kind);
            if lookahead >= self.path_min_points {
                return err(format!(
                    "{kind} lookahead {lookahead} must be below path_min_points {}",
                    self.path_min_points
                ));
            }
            let speed = self.speed_range(kind);
            if !(speed.base > 0.0) || speed.spread < 0.0 {
                return err(format!("{kind} speed range {speed:?} is not positive"));
            }
        }
        if self.max_path_attempts == 0 {
            return err("max_path_attempts must be at least 1".to_owned());
        }
        Ok(())
    }
}
