//! `KinematicWorld`: a deterministic, in-process world.
//!
//! Vehicles follow a kinematic bicycle model driven by throttle, brake and
//! steer; walkers move at their commanded velocity.  No physics, no
//! collisions after spawn: the world only refuses spawns whose footprint
//! overlaps an existing actor.  One `wait_for_tick` advances exactly one
//! fixed step, so runs against it are reproducible.

use std::collections::BTreeMap;
use std::time::Duration;

use log::{debug, warn};

use crowd_core::{ActorId, AgentKind, Transform, Vec2, Vec3};

use crate::{
    ActorState, Blueprint, Command, VehicleControl, WalkerControl, World, WorldError, WorldResult,
};

#[derive(Copy, Clone, Debug)]
enum Control {
    Vehicle(VehicleControl),
    Walker(WalkerControl),
}

#[derive(Clone, Debug)]
struct KinematicActor {
    kind:    AgentKind,
    state:   ActorState,
    control: Option<Control>,
}

pub struct KinematicWorld {
    vehicle_blueprints: Vec<Blueprint>,
    walker_blueprints:  Vec<Blueprint>,

    /// Ordered by id so integration order is deterministic.
    actors:  BTreeMap<ActorId, KinematicActor>,
    next_id: u32,

    /// Seconds per step.
    dt:    f32,
    frame: u64,

    last_batch:      Vec<Command>,
    spawns_blocked:  bool,
    fail_next_tick:  bool,

    // ── Vehicle model ─────────────────────────────────────────────────────
    /// Acceleration at full throttle, m/s².
    pub max_accel:     f32,
    /// Deceleration at full brake, m/s².
    pub max_decel:     f32,
    /// Front-wheel angle at full steer, degrees.
    pub max_steer_deg: f32,
}

impl KinematicWorld {
    /// A world stepping `dt` seconds per tick with the default blueprint
    /// libraries.
    pub fn new(dt: f32) -> Self {
        Self {
            vehicle_blueprints: Blueprint::defaults(AgentKind::Vehicle),
            walker_blueprints:  Blueprint::defaults(AgentKind::Pedestrian),
            actors:             BTreeMap::new(),
            next_id:            0,
            dt,
            frame:              0,
            last_batch:         Vec::new(),
            spawns_blocked:     false,
            fail_next_tick:     false,
            max_accel:          3.5,
            max_decel:          8.0,
            max_steer_deg:      45.0,
        }
    }

    /// Replace the blueprint library of `kind`.
    pub fn with_blueprints(mut self, kind: AgentKind, blueprints: Vec<Blueprint>) -> Self {
        match kind {
            AgentKind::Vehicle    => self.vehicle_blueprints = blueprints,
            AgentKind::Pedestrian => self.walker_blueprints = blueprints,
        }
        self
    }

    // ── Inspection & test hooks ───────────────────────────────────────────

    pub fn actor_count(&self) -> usize {
        self.actors.len()
    }

    pub fn actor_ids(&self) -> impl Iterator<Item = ActorId> + '_ {
        self.actors.keys().copied()
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Commands received by the most recent `apply_batch`.
    pub fn last_batch(&self) -> &[Command] {
        &self.last_batch
    }

    /// Move `actor` instantly.  Returns `false` for an unknown actor.
    pub fn teleport(&mut self, actor: ActorId, location: Vec3) -> bool {
        match self.actors.get_mut(&actor) {
            Some(a) => {
                a.state.location = location;
                true
            }
            None => false,
        }
    }

    /// Overwrite `actor`'s velocity and heading.
    pub fn set_motion(&mut self, actor: ActorId, velocity: Vec3, yaw_deg: f32) -> bool {
        match self.actors.get_mut(&actor) {
            Some(a) => {
                a.state.velocity = velocity;
                a.state.yaw_deg  = yaw_deg;
                true
            }
            None => false,
        }
    }

    /// Remove `actor` behind the controller's back (as an external script would).
    pub fn remove_actor(&mut self, actor: ActorId) -> bool {
        self.actors.remove(&actor).is_some()
    }

    /// Refuse every spawn while `blocked`.
    pub fn block_spawns(&mut self, blocked: bool) {
        self.spawns_blocked = blocked;
    }

    /// Make the next `wait_for_tick` time out.
    pub fn fail_next_tick(&mut self) {
        self.fail_next_tick = true;
    }

    // ── Integration ───────────────────────────────────────────────────────

    fn step_vehicle(&self, state: &mut ActorState, c: VehicleControl) {
        let dt    = self.dt;
        let speed = state.velocity_2d().length();
        let accel = c.throttle.clamp(0.0, 1.0) * self.max_accel
                  - c.brake.clamp(0.0, 1.0) * self.max_decel;
        let speed = (speed + accel * dt).max(0.0);

        let wheelbase = (state.bounding_box.extent.x * 1.2).max(0.5);
        let steer     = (c.steer.clamp(-1.0, 1.0) * self.max_steer_deg).to_radians();
        let yaw_rate  = speed / wheelbase * steer.tan();
        state.yaw_deg += yaw_rate.to_degrees() * dt;

        let v = state.forward() * speed;
        state.velocity = v.extend(0.0);
        state.location.x += v.x * dt;
        state.location.y += v.y * dt;
    }

    fn step_walker(&self, state: &mut ActorState, c: WalkerControl) {
        let dir = Vec2::new(c.velocity.x, c.velocity.y).normalize_or_zero();
        let v   = dir * c.speed.max(0.0);
        if v.length_sq() > 0.0 {
            state.yaw_deg = v.yaw_deg();
        }
        state.velocity = v.extend(0.0);
        state.location.x += v.x * self.dt;
        state.location.y += v.y * self.dt;
    }

    fn footprint_free(&self, centre: Vec2, radius: f32) -> bool {
        self.actors.values().all(|a| {
            let r = a.state.bounding_box.footprint_radius();
            a.state.position().distance(centre) >= r + radius
        })
    }
}

impl World for KinematicWorld {
    fn blueprints(&self, kind: AgentKind) -> &[Blueprint] {
        match kind {
            AgentKind::Vehicle    => &self.vehicle_blueprints,
            AgentKind::Pedestrian => &self.walker_blueprints,
        }
    }

    fn try_spawn(&mut self, blueprint: &Blueprint, transform: Transform) -> Option<ActorId> {
        let centre = transform.location.truncate();
        let radius = blueprint.bounding_box.footprint_radius();
        if self.spawns_blocked || !self.footprint_free(centre, radius) {
            debug!("spawn of {} at {} refused", blueprint.id, centre);
            return None;
        }

        let id = ActorId(self.next_id);
        self.next_id += 1;
        self.actors.insert(id, KinematicActor {
            kind:    blueprint.kind,
            state:   ActorState {
                location:     transform.location,
                velocity:     Vec3::ZERO,
                yaw_deg:      transform.yaw_deg,
                bounding_box: blueprint.bounding_box,
            },
            control: None,
        });
        Some(id)
    }

    fn actor_state(&self, actor: ActorId) -> Option<ActorState> {
        self.actors.get(&actor).map(|a| a.state)
    }

    fn apply_batch(&mut self, commands: Vec<Command>) -> WorldResult<()> {
        for cmd in &commands {
            match *cmd {
                Command::DestroyActor(id) => {
                    if self.actors.remove(&id).is_none() {
                        warn!("destroy for unknown actor {id}");
                    }
                }
                Command::ApplyVehicleControl(id, c) => match self.actors.get_mut(&id) {
                    Some(a) if a.kind == AgentKind::Vehicle => a.control = Some(Control::Vehicle(c)),
                    Some(_) => warn!("vehicle control sent to walker {id}"),
                    None    => warn!("vehicle control for unknown actor {id}"),
                },
                Command::ApplyWalkerControl(id, c) => match self.actors.get_mut(&id) {
                    Some(a) if a.kind == AgentKind::Pedestrian => a.control = Some(Control::Walker(c)),
                    Some(_) => warn!("walker control sent to vehicle {id}"),
                    None    => warn!("walker control for unknown actor {id}"),
                },
            }
        }
        self.last_batch = commands;
        Ok(())
    }

    fn wait_for_tick(&mut self, timeout: Duration) -> WorldResult<u64> {
        if std::mem::take(&mut self.fail_next_tick) {
            return Err(WorldError::TickTimeout(timeout));
        }

        let ids: Vec<ActorId> = self.actors.keys().copied().collect();
        for id in ids {
            let Some(actor) = self.actors.get(&id) else { continue };
            let mut state = actor.state;
            match actor.control {
                Some(Control::Vehicle(c)) => self.step_vehicle(&mut state, c),
                Some(Control::Walker(c))  => self.step_walker(&mut state, c),
                // Uncontrolled actors coast.
                None => {
                    state.location.x += state.velocity.x * self.dt;
                    state.location.y += state.velocity.y * self.dt;
                }
            }
            if let Some(actor) = self.actors.get_mut(&id) {
                actor.state = state;
            }
        }

        self.frame += 1;
        Ok(self.frame)
    }
}
