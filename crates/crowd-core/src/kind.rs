//! Agent kind tag shared by the solver, the world contract, and telemetry.

/// The two kinds of crowd agent.  Everything kind-specific (avoidance
/// parameters, footprint, control law, route map) dispatches on this tag.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AgentKind {
    /// Car driving on the lane network.
    Vehicle,
    /// Walker following sidewalk polygons.
    Pedestrian,
}

impl AgentKind {
    pub const ALL: [AgentKind; 2] = [AgentKind::Vehicle, AgentKind::Pedestrian];

    /// Short type label used in telemetry records.
    pub fn as_str(self) -> &'static str {
        match self {
            AgentKind::Vehicle    => "car",
            AgentKind::Pedestrian => "ped",
        }
    }
}

impl std::fmt::Display for AgentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
