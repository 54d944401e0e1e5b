//! Plain data row types written by output backends.

use crowd_core::Tick;
use crowd_sim::{NetworkAgentRecord, SidewalkAgentRecord, TickStats};

/// Route head of one vehicle at a given tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NetworkAgentRow {
    pub tick:     u64,
    pub actor_id: u32,
    /// Telemetry type label (`"car"`).
    pub kind:     &'static str,
    pub edge:     u32,
    pub lane:     u8,
    pub segment:  u16,
    pub offset:   f32,
}

impl NetworkAgentRow {
    pub fn new(tick: Tick, record: &NetworkAgentRecord) -> Self {
        Self {
            tick:     tick.0,
            actor_id: record.actor.0,
            kind:     record.kind.as_str(),
            edge:     record.head.edge.0,
            lane:     record.head.lane,
            segment:  record.head.segment,
            offset:   record.head.offset,
        }
    }
}

/// Route head and walking direction of one pedestrian at a given tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SidewalkAgentRow {
    pub tick:     u64,
    pub actor_id: u32,
    pub polygon:  u32,
    pub segment:  u16,
    pub offset:   f32,
    pub reverse:  bool,
}

impl SidewalkAgentRow {
    pub fn new(tick: Tick, record: &SidewalkAgentRecord) -> Self {
        Self {
            tick:     tick.0,
            actor_id: record.actor.0,
            polygon:  record.head.polygon.0,
            segment:  record.head.segment,
            offset:   record.head.offset,
            reverse:  record.head.reverse,
        }
    }
}

/// Counters for one completed tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickSummaryRow {
    pub tick:               u64,
    pub elapsed_secs:       f64,
    pub spawned:            u32,
    pub spawn_failures:     u32,
    pub out_of_bounds:      u32,
    pub below_floor:        u32,
    pub dead_end:           u32,
    pub actor_lost:         u32,
    pub active_vehicles:    u32,
    pub active_pedestrians: u32,
    pub ego_present:        bool,
}

impl TickSummaryRow {
    pub fn new(stats: &TickStats, tick_rate_hz: f32) -> Self {
        Self {
            tick:               stats.tick.0,
            elapsed_secs:       stats.tick.0 as f64 / tick_rate_hz as f64,
            spawned:            stats.spawned,
            spawn_failures:     stats.spawn_failures,
            out_of_bounds:      stats.out_of_bounds,
            below_floor:        stats.below_floor,
            dead_end:           stats.dead_end,
            actor_lost:         stats.actor_lost,
            active_vehicles:    stats.active_vehicles,
            active_pedestrians: stats.active_pedestrians,
            ego_present:        stats.ego_present,
        }
    }
}
