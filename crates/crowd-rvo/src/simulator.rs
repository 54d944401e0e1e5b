//! `RvoSimulator`: the fixed slot array and the once-per-tick global solve.

use log::trace;
use rstar::{AABB, PointDistance, RTree, RTreeObject};

use crowd_core::{SlotId, Vec2};

use crate::orca::{self, Body, Line};
use crate::{AgentParams, RvoError, RvoResult};

// ── SolverAgent ───────────────────────────────────────────────────────────────

/// Everything the controller writes into a slot before a step.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SolverAgent {
    pub params:        AgentParams,
    /// Reported actor position.
    pub position:      Vec2,
    pub velocity:      Vec2,
    /// Unit forward vector.
    pub heading:       Vec2,
    /// Footprint rectangle, counter-clockwise from rear-left.
    pub corners:       [Vec2; 4],
    pub pref_velocity: Vec2,
}

impl SolverAgent {
    /// Where inert slots are parked, far outside any operating area.
    pub const PLACEHOLDER_POSITION: Vec2 = Vec2::new(10_000.0, 10_000.0);

    /// Half-extent of the placeholder's square footprint.
    pub const PLACEHOLDER_HALF_EXTENT: f32 = 1.0;

    /// Inert state for a slot without a live agent.  `params` is carried over
    /// so the slot keeps its kind's tuning.
    pub fn placeholder(params: AgentParams) -> Self {
        let p = Self::PLACEHOLDER_POSITION;
        let h = Self::PLACEHOLDER_HALF_EXTENT;
        Self {
            params,
            position:      p,
            velocity:      Vec2::ZERO,
            heading:       Vec2::new(1.0, 0.0),
            corners:       [
                p + Vec2::new(-h, h),
                p + Vec2::new(-h, -h),
                p + Vec2::new(h, -h),
                p + Vec2::new(h, h),
            ],
            pref_velocity: Vec2::ZERO,
        }
    }

    /// Centre of the footprint rectangle.
    pub fn centre(&self) -> Vec2 {
        let sum = self.corners.iter().fold(Vec2::ZERO, |acc, &c| acc + c);
        sum * 0.25
    }

    fn body(&self) -> Body {
        Body { corners: self.corners, velocity: self.velocity }
    }
}

// ── SlotState ─────────────────────────────────────────────────────────────────

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SlotState {
    pub agent:        SolverAgent,
    /// `false` for placeholder slots, which the solve ignores.
    pub live:         bool,
    /// Output of the last [`RvoSimulator::do_step`].
    pub new_velocity: Vec2,
}

impl SlotState {
    fn placeholder(params: AgentParams) -> Self {
        Self { agent: SolverAgent::placeholder(params), live: false, new_velocity: Vec2::ZERO }
    }

    /// `true` if the slot holds exactly the inert placeholder state.
    pub fn is_placeholder(&self) -> bool {
        !self.live && self.agent == SolverAgent::placeholder(self.agent.params)
    }
}

// ── R-tree entry ──────────────────────────────────────────────────────────────

/// Live slot centre stored in the per-step neighbour index.
#[derive(Clone)]
struct SlotEntry {
    point: [f32; 2],
    slot:  u32,
}

impl RTreeObject for SlotEntry {
    type Envelope = AABB<[f32; 2]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for SlotEntry {
    fn distance_2(&self, point: &[f32; 2]) -> f32 {
        let dx = self.point[0] - point[0];
        let dy = self.point[1] - point[1];
        dx * dx + dy * dy
    }
}

// ── RvoSimulator ──────────────────────────────────────────────────────────────

/// Fixed-size ORCA solver.  Slot indices never change after construction.
pub struct RvoSimulator {
    slots:     Vec<SlotState>,
    /// Seconds per tick; bounds how fast intersecting footprints must separate.
    time_step: f32,
}

impl RvoSimulator {
    /// `slot_count` placeholder slots, all with `params`.
    pub fn new(slot_count: usize, params: AgentParams, time_step: f32) -> Self {
        Self { slots: vec![SlotState::placeholder(params); slot_count], time_step }
    }

    /// One placeholder slot per entry of `params`, in order.
    pub fn from_params(params: &[AgentParams], time_step: f32) -> Self {
        Self { slots: params.iter().map(|&p| SlotState::placeholder(p)).collect(), time_step }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn time_step(&self) -> f32 {
        self.time_step
    }

    pub fn set_time_step(&mut self, time_step: f32) {
        self.time_step = time_step;
    }

    fn check(&self, slot: SlotId) -> RvoResult<usize> {
        let i = slot.index();
        if i < self.slots.len() {
            Ok(i)
        } else {
            Err(RvoError::SlotOutOfRange { slot, len: self.slots.len() })
        }
    }

    /// Write a live agent into `slot` for the next step.
    pub fn set_agent(&mut self, slot: SlotId, agent: SolverAgent) -> RvoResult<()> {
        let i = self.check(slot)?;
        self.slots[i].agent = agent;
        self.slots[i].live  = true;
        Ok(())
    }

    /// Park `slot` at the placeholder state, keeping its parameters.
    pub fn set_placeholder(&mut self, slot: SlotId) -> RvoResult<()> {
        let i = self.check(slot)?;
        let params = self.slots[i].agent.params;
        self.slots[i] = SlotState::placeholder(params);
        Ok(())
    }

    pub fn slot(&self, slot: SlotId) -> RvoResult<&SlotState> {
        let i = self.check(slot)?;
        Ok(&self.slots[i])
    }

    pub fn slots(&self) -> &[SlotState] {
        &self.slots
    }

    /// Solved velocity of `slot` from the last step.
    pub fn velocity(&self, slot: SlotId) -> RvoResult<Vec2> {
        Ok(self.slot(slot)?.new_velocity)
    }

    pub fn live_count(&self) -> usize {
        self.slots.iter().filter(|s| s.live).count()
    }

    /// One global solve over every live slot.
    ///
    /// All constraints are built from the state as written before the call;
    /// no slot sees another slot's new velocity.
    pub fn do_step(&mut self) {
        let bodies: Vec<Body> = self.slots.iter().map(|s| s.agent.body()).collect();

        let entries: Vec<SlotEntry> = self
            .slots
            .iter()
            .enumerate()
            .filter(|(_, s)| s.live)
            .map(|(i, s)| {
                let c = s.agent.centre();
                SlotEntry { point: [c.x, c.y], slot: i as u32 }
            })
            .collect();
        let live = entries.len();
        let tree = RTree::bulk_load(entries);

        let n = self.slots.len();

        #[cfg(not(feature = "parallel"))]
        let velocities: Vec<Vec2> = (0..n).map(|i| self.solve_slot(i, &bodies, &tree)).collect();

        #[cfg(feature = "parallel")]
        let velocities: Vec<Vec2> = {
            use rayon::prelude::*;
            (0..n).into_par_iter().map(|i| self.solve_slot(i, &bodies, &tree)).collect()
        };

        for (slot, v) in self.slots.iter_mut().zip(velocities) {
            slot.new_velocity = v;
        }
        trace!("rvo step: {live} live of {n} slots");
    }

    fn solve_slot(&self, i: usize, bodies: &[Body], tree: &RTree<SlotEntry>) -> Vec2 {
        let state = &self.slots[i];
        if !state.live {
            return Vec2::ZERO;
        }
        let params = state.agent.params;
        let me     = bodies[i];
        let centre = state.agent.centre();
        let query  = [centre.x, centre.y];

        // Nearest first; slot index breaks ties so the order is deterministic.
        let mut neighbours: Vec<(f32, usize)> = tree
            .locate_within_distance(query, params.neighbor_dist * params.neighbor_dist)
            .filter(|e| e.slot as usize != i)
            .map(|e| (e.distance_2(&query), e.slot as usize))
            .collect();
        neighbours.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));
        neighbours.truncate(params.max_neighbors);

        let lines: Vec<Line> = neighbours
            .iter()
            .filter_map(|&(_, j)| orca::orca_line(&me, &bodies[j], params.time_horizon, self.time_step))
            .collect();

        orca::solve(&lines, params.max_speed, state.agent.pref_velocity)
    }
}
