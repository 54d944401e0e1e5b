//! Per-agent avoidance parameters.

use crowd_core::AgentKind;

/// Tunables the solver reads for one slot.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AgentParams {
    /// Centre-to-centre distance within which other agents are considered.
    pub neighbor_dist: f32,

    /// At most this many nearest neighbours contribute constraints.
    pub max_neighbors: usize,

    /// Planning horizon, seconds.  Solved velocities are collision-free with
    /// respect to every neighbour for this long.
    pub time_horizon: f32,

    /// Hard cap on the solved speed, m/s.
    pub max_speed: f32,
}

impl AgentParams {
    /// Cars look further ahead and plan over a shorter horizon than people.
    pub const VEHICLE: AgentParams = AgentParams {
        neighbor_dist: 25.0,
        max_neighbors: 10,
        time_horizon:  2.0,
        max_speed:     20.0,
    };

    pub const PEDESTRIAN: AgentParams = AgentParams {
        neighbor_dist: 10.0,
        max_neighbors: 10,
        time_horizon:  3.0,
        max_speed:     3.0,
    };

    /// Default parameter set for `kind`.
    pub const fn for_kind(kind: AgentKind) -> AgentParams {
        match kind {
            AgentKind::Vehicle    => Self::VEHICLE,
            AgentKind::Pedestrian => Self::PEDESTRIAN,
        }
    }
}

impl Default for AgentParams {
    fn default() -> Self {
        Self::VEHICLE
    }
}
