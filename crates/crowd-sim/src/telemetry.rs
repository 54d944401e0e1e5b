//! Per-tick outputs: counters and the published route heads.

use crowd_core::{ActorId, AgentKind, Tick};
use crowd_route::{LaneRoutePoint, SidewalkRoutePoint};

// ── Removal ───────────────────────────────────────────────────────────────────

/// Why an agent left the pool.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RemovalReason {
    /// Outside the configured operating area.
    OutOfBounds,
    /// Fell below the elevation floor.
    BelowFloor,
    /// Path could not be extended to the minimum length.
    DeadEnd,
    /// The world no longer knows the actor.
    ActorLost,
}

impl RemovalReason {
    pub fn as_str(self) -> &'static str {
        match self {
            RemovalReason::OutOfBounds => "out_of_bounds",
            RemovalReason::BelowFloor  => "below_floor",
            RemovalReason::DeadEnd     => "dead_end",
            RemovalReason::ActorLost   => "actor_lost",
        }
    }
}

// ── TickStats ─────────────────────────────────────────────────────────────────

/// Counters for one completed tick.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TickStats {
    pub tick:               Tick,
    pub spawned:            u32,
    pub spawn_failures:     u32,
    pub out_of_bounds:      u32,
    pub below_floor:        u32,
    pub dead_end:           u32,
    pub actor_lost:         u32,
    /// Pooled agents alive after the tick.
    pub active_vehicles:    u32,
    pub active_pedestrians: u32,
    /// Fresh ego telemetry took part in this tick's solve.
    pub ego_present:        bool,
    /// Commands sent in this tick's batch.
    pub commands:           u32,
}

impl TickStats {
    pub fn new(tick: Tick) -> Self {
        Self { tick, ..Self::default() }
    }

    pub fn record_removal(&mut self, reason: RemovalReason) {
        match reason {
            RemovalReason::OutOfBounds => self.out_of_bounds += 1,
            RemovalReason::BelowFloor  => self.below_floor += 1,
            RemovalReason::DeadEnd     => self.dead_end += 1,
            RemovalReason::ActorLost   => self.actor_lost += 1,
        }
    }

    pub fn removed(&self) -> u32 {
        self.out_of_bounds + self.below_floor + self.dead_end + self.actor_lost
    }

    pub fn active(&self, kind: AgentKind) -> u32 {
        match kind {
            AgentKind::Vehicle    => self.active_vehicles,
            AgentKind::Pedestrian => self.active_pedestrians,
        }
    }
}

// ── Published route heads ─────────────────────────────────────────────────────

#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NetworkAgentRecord {
    pub actor: ActorId,
    pub kind:  AgentKind,
    pub head:  LaneRoutePoint,
}

#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SidewalkAgentRecord {
    pub actor: ActorId,
    pub head:  SidewalkRoutePoint,
}

/// Route heads of every active agent, published once per tick.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CrowdTelemetry {
    pub tick:     Tick,
    pub network:  Vec<NetworkAgentRecord>,
    pub sidewalk: Vec<SidewalkAgentRecord>,
}

impl CrowdTelemetry {
    pub fn contains(&self, actor: ActorId) -> bool {
        self.network.iter().any(|r| r.actor == actor) || self.sidewalk.iter().any(|r| r.actor == actor)
    }

    pub fn len(&self) -> usize {
        self.network.len() + self.sidewalk.len()
    }

    pub fn is_empty(&self) -> bool {
        self.network.is_empty() && self.sidewalk.is_empty()
    }
}
