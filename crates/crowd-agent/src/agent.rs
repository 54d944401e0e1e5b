//! `CrowdAgent`: one pooled vehicle or pedestrian.

use crowd_core::{ActorId, AgentKind, SlotId, Transform, Vec2};
use crowd_route::{LaneNetwork, LaneRoutePoint, Path, RouteMap, SidewalkNetwork, SidewalkRoutePoint};
use crowd_rvo::{AgentParams, SolverAgent};
use crowd_world::ActorState;

use crate::control::{Control, vehicle_control, walker_control};
use crate::footprint::{PEDESTRIAN_HALF_EXTENT, footprint_centre, footprint_corners};

// ── Lifecycle ─────────────────────────────────────────────────────────────────

/// Per-agent state machine.  `Destroyed` is terminal.
///
/// ```text
/// Spawning ──spawn ok──▶ Active ──removal predicate──▶ Removing ──batch sent──▶ Destroyed
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Lifecycle {
    Spawning,
    Active,
    Removing,
    Destroyed,
}

// ── AgentBody ─────────────────────────────────────────────────────────────────

/// Kind tag plus the path on the kind's route map.
pub enum AgentBody {
    Vehicle { path: Path<LaneNetwork> },
    Pedestrian { path: Path<SidewalkNetwork> },
}

impl AgentBody {
    pub fn kind(&self) -> AgentKind {
        match self {
            AgentBody::Vehicle { .. }    => AgentKind::Vehicle,
            AgentBody::Pedestrian { .. } => AgentKind::Pedestrian,
        }
    }

    /// World position of the path's first point.
    pub fn start_position(&self) -> Option<Vec2> {
        match self {
            AgentBody::Vehicle { path }    => path.get_position(0),
            AgentBody::Pedestrian { path } => path.get_position(0),
        }
    }

    /// Where to place a new actor: the path's first point, facing along the
    /// path, `height` above ground.
    pub fn spawn_transform(&self, height: f32) -> Option<Transform> {
        let (pos, yaw) = match self {
            AgentBody::Vehicle { path }    => (path.get_position(0)?, path.get_yaw(0)?),
            AgentBody::Pedestrian { path } => (path.get_position(0)?, path.get_yaw(0)?),
        };
        Some(Transform::new(pos.extend(height), yaw))
    }

    pub fn head(&self) -> Option<RouteHead> {
        match self {
            AgentBody::Vehicle { path }    => path.head().copied().map(RouteHead::Network),
            AgentBody::Pedestrian { path } => path.head().copied().map(RouteHead::Sidewalk),
        }
    }

    pub fn path_len(&self) -> usize {
        match self {
            AgentBody::Vehicle { path }    => path.len(),
            AgentBody::Pedestrian { path } => path.len(),
        }
    }
}

/// First remaining route point, published per agent each tick.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RouteHead {
    Network(LaneRoutePoint),
    /// Carries the walking direction in `reverse`.
    Sidewalk(SidewalkRoutePoint),
}

// ── CrowdAgent ────────────────────────────────────────────────────────────────

pub struct CrowdAgent {
    /// World handle.
    pub actor:           ActorId,
    /// Solver slot, fixed for the agent's life.
    pub slot:            SlotId,
    /// Cruising speed, m/s.
    pub preferred_speed: f32,
    pub lifecycle:       Lifecycle,
    /// World state, refreshed at the start of each tick.
    pub state:           ActorState,
    pub body:            AgentBody,
}

impl CrowdAgent {
    /// Wrap a freshly spawned actor.  Starts in `Spawning`; the pool
    /// activates it once it is registered.
    pub fn new(
        actor:           ActorId,
        slot:            SlotId,
        preferred_speed: f32,
        state:           ActorState,
        body:            AgentBody,
    ) -> Self {
        Self { actor, slot, preferred_speed, lifecycle: Lifecycle::Spawning, state, body }
    }

    #[inline]
    pub fn kind(&self) -> AgentKind {
        self.body.kind()
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.lifecycle == Lifecycle::Active
    }

    pub fn agent_params(&self) -> AgentParams {
        AgentParams::for_kind(self.kind())
    }

    #[inline]
    pub fn position(&self) -> Vec2 {
        self.state.position()
    }

    // ── Geometry ──────────────────────────────────────────────────────────

    /// Footprint half-extents: the actor's box for vehicles, a fixed square
    /// for pedestrians.
    pub fn half_extents(&self) -> Vec2 {
        match self.body {
            AgentBody::Vehicle { .. } => {
                let e = self.state.bounding_box.extent;
                Vec2::new(e.x, e.y)
            }
            AgentBody::Pedestrian { .. } => Vec2::new(PEDESTRIAN_HALF_EXTENT, PEDESTRIAN_HALF_EXTENT),
        }
    }

    pub fn footprint_centre(&self) -> Vec2 {
        let off = self.state.bounding_box.location;
        footprint_centre(self.position(), self.state.forward(), Vec2::new(off.x, off.y))
    }

    pub fn bounding_box_corners(&self) -> [Vec2; 4] {
        footprint_corners(self.footprint_centre(), self.state.forward(), self.half_extents())
    }

    // ── Steering ──────────────────────────────────────────────────────────

    /// Goal-seeking velocity toward path point `lookahead`.
    ///
    /// Tops the path up, trims the points already passed, and tops it up
    /// again.  `None` when the path dead-ends before `min_points`.
    pub fn preferred_velocity(&mut self, lookahead: usize, min_points: usize) -> Option<Vec2> {
        let position = self.position();
        let target = match &mut self.body {
            AgentBody::Vehicle { path }    => path_target(path, position, lookahead, min_points),
            AgentBody::Pedestrian { path } => path_target(path, position, lookahead, min_points),
        }?;
        Some((target - position).normalize_or_zero() * self.preferred_speed)
    }

    /// Everything the solver needs for this agent's slot.
    pub fn solver_agent(&self, pref_velocity: Vec2) -> SolverAgent {
        SolverAgent {
            params:        self.agent_params(),
            position:      self.position(),
            velocity:      self.state.velocity_2d(),
            heading:       self.state.forward(),
            corners:       self.bounding_box_corners(),
            pref_velocity,
        }
    }

    pub fn control_from_velocity(&self, solved: Vec2) -> Control {
        match self.body {
            AgentBody::Vehicle { .. } => Control::Vehicle(vehicle_control(
                solved,
                self.state.forward(),
                self.state.velocity_2d(),
            )),
            AgentBody::Pedestrian { .. } => Control::Walker(walker_control(solved, self.preferred_speed)),
        }
    }
}

fn path_target<M: RouteMap>(
    path:       &mut Path<M>,
    position:   Vec2,
    lookahead:  usize,
    min_points: usize,
) -> Option<Vec2> {
    if !path.resize(min_points) {
        return None;
    }
    path.cut(position);
    if !path.resize(min_points) {
        return None;
    }
    path.get_position(lookahead)
}
