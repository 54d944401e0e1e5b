//! The `CrowdController` struct and its tick loop.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use log::{debug, trace, warn};

use crowd_agent::{CrowdAgent, Lifecycle, RouteHead};
use crowd_core::{ActorId, AgentKind, CrowdConfig, SimClock};
use crowd_rvo::RvoSimulator;
use crowd_world::{Command, World};

use crate::ego::{EgoInbox, EgoReading};
use crate::pool::AgentPool;
use crate::slots::SlotTable;
use crate::telemetry::{
    CrowdTelemetry, NetworkAgentRecord, RemovalReason, SidewalkAgentRecord, TickStats,
};
use crate::{CrowdObserver, SimResult};

/// An agent leaving the pool this tick.  Its slot is resolved through the
/// slot table when the removal completes.
struct Removal {
    actor:  ActorId,
    reason: RemovalReason,
}

// ── CrowdController ───────────────────────────────────────────────────────────

/// The fixed-rate crowd controller.
///
/// Each [`step`][Self::step] runs one tick:
///
/// 1. **Top-up**: one spawn attempt per vacant network and sidewalk slot.
/// 2. **Refresh & cull**: read every agent's world state; agents out of
///    bounds, below the floor, on a dead-end path, or lost by the world are
///    marked `Removing`, their slot is parked at the placeholder state and a
///    destroy command is queued.  Survivors compute a preferred velocity.
///    Agents that are not `Active` are parked and left alone.
/// 3. **Write slots**: live agents plus the ego (or its placeholder).
/// 4. **Solve**: exactly one [`RvoSimulator::do_step`].
/// 5. **Control**: each active agent's solved velocity becomes a vehicle or
///    walker command.
/// 6. **Commit**: the whole batch goes to the world in one call.  Removed
///    agents become `Destroyed` and their slots are freed as soon as the
///    batch is handed over, then the tick blocks on the world barrier.
/// 7. **Publish**: route heads of every active agent go to the observer.
///
/// Create via [`CrowdControllerBuilder`][crate::CrowdControllerBuilder].
pub struct CrowdController<W: World> {
    pub config: CrowdConfig,

    /// Tick counter at the rate shared with the world.
    pub clock: SimClock,

    /// The simulated world.  All actors live here.
    pub world: W,

    /// One slot per pooled agent plus the ego slot.
    pub solver: RvoSimulator,

    /// Fixed slot layout and actor lookup.
    pub slots: SlotTable,

    pub pool: AgentPool,

    /// Latest ego telemetry, written by an external producer.
    pub ego: EgoInbox,

    /// Route heads published by the last completed tick.
    pub telemetry: CrowdTelemetry,
}

impl<W: World> CrowdController<W> {
    // ── Public API ────────────────────────────────────────────────────────

    /// Run exactly `n` ticks, as fast as the world allows.
    pub fn run_ticks<O: CrowdObserver>(&mut self, n: u64, observer: &mut O) -> SimResult<()> {
        for _ in 0..n {
            self.step(observer)?;
        }
        observer.on_run_end(self.clock.current_tick);
        Ok(())
    }

    /// Tick until `stop` is set.  With `realtime`, each tick is padded to
    /// the clock period.
    pub fn run_until<O: CrowdObserver>(
        &mut self,
        stop:     &AtomicBool,
        realtime: bool,
        observer: &mut O,
    ) -> SimResult<()> {
        let period = self.clock.period();
        while !stop.load(Ordering::Relaxed) {
            let started = Instant::now();
            self.step(observer)?;
            if realtime {
                if let Some(rest) = period.checked_sub(started.elapsed()) {
                    std::thread::sleep(rest);
                }
            }
        }
        observer.on_run_end(self.clock.current_tick);
        Ok(())
    }

    /// Run one tick.  World errors (barrier timeout, lost connection) are
    /// returned; everything else is absorbed and counted.
    pub fn step<O: CrowdObserver>(&mut self, observer: &mut O) -> SimResult<TickStats> {
        let now = self.clock.current_tick;
        observer.on_tick_start(now);
        let mut stats = TickStats::new(now);

        // ── 1: top up both pools ──────────────────────────────────────────
        self.pool.top_up(&mut self.world, &self.config, &mut self.slots, &mut stats);

        // ── 2 & 3: refresh, cull, write slots ─────────────────────────────
        let mut commands = Vec::new();
        let mut removals = Vec::new();
        let mut live     = Vec::new();

        for slot in self.slots.pool_slots() {
            let Some(agent) = self.pool.get_mut(slot).filter(|a| a.is_active()) else {
                self.solver.set_placeholder(slot)?;
                continue;
            };

            let reason = match self.world.actor_state(agent.actor) {
                None => Some(RemovalReason::ActorLost),
                Some(state) => {
                    agent.state = state;
                    if !self.config.bounds.contains(state.position()) {
                        Some(RemovalReason::OutOfBounds)
                    } else if state.location.z < self.config.elevation_floor {
                        Some(RemovalReason::BelowFloor)
                    } else {
                        let lookahead = self.config.lookahead(agent.kind());
                        match agent.preferred_velocity(lookahead, self.config.path_min_points) {
                            Some(pref) => {
                                self.solver.set_agent(slot, agent.solver_agent(pref))?;
                                live.push(slot);
                                None
                            }
                            None => Some(RemovalReason::DeadEnd),
                        }
                    }
                }
            };

            if let Some(reason) = reason {
                agent.lifecycle = Lifecycle::Removing;
                if reason != RemovalReason::ActorLost {
                    commands.push(Command::DestroyActor(agent.actor));
                }
                removals.push(Removal { actor: agent.actor, reason });
                self.solver.set_placeholder(slot)?;
            }
        }

        let ego_slot = self.slots.ego();
        let max_age  = self.config.ego_max_age_ms.map(Duration::from_millis);
        match self.ego.read(max_age) {
            EgoReading::Fresh(ego) => {
                self.solver.set_agent(ego_slot, ego.solver_agent())?;
                stats.ego_present = true;
            }
            EgoReading::Stale(age) => {
                debug!("{now}: ego telemetry is {} ms old, ignored", age.as_millis());
                self.solver.set_placeholder(ego_slot)?;
            }
            EgoReading::Missing => self.solver.set_placeholder(ego_slot)?,
        }

        // ── 4: one global solve ───────────────────────────────────────────
        self.solver.do_step();

        // ── 5: velocities → controls ──────────────────────────────────────
        for &slot in &live {
            let Some(agent) = self.pool.get(slot) else { continue };
            let velocity = self.solver.velocity(slot)?;
            commands.push(agent.control_from_velocity(velocity).into_command(agent.actor));
        }

        // ── 6: commit and wait for the world ──────────────────────────────
        stats.commands = commands.len() as u32;
        let sent = self.world.apply_batch(commands);
        self.complete_removals(removals, &mut stats);
        sent?;

        let timeout = Duration::from_millis(self.config.world_tick_timeout_ms);
        if let Err(e) = self.world.wait_for_tick(timeout) {
            warn!("{now}: {e}");
            return Err(e.into());
        }

        // ── 7: publish route heads ────────────────────────────────────────
        self.telemetry = self.collect_telemetry();
        observer.on_telemetry(&self.telemetry);

        stats.active_vehicles    = self.pool.active_count(AgentKind::Vehicle) as u32;
        stats.active_pedestrians = self.pool.active_count(AgentKind::Pedestrian) as u32;
        observer.on_tick_end(&stats);

        trace!(
            "{now}: {} cars, {} peds, {} live slots, {} spawned, {} removed",
            stats.active_vehicles,
            stats.active_pedestrians,
            self.solver.live_count(),
            stats.spawned,
            stats.removed(),
        );
        self.clock.advance();
        Ok(stats)
    }

    /// The pooled agent driving `actor`, if any.
    pub fn agent(&self, actor: ActorId) -> Option<&CrowdAgent> {
        self.slots.slot_of(actor).and_then(|slot| self.pool.get(slot))
    }

    // ── Internals ─────────────────────────────────────────────────────────

    /// `Removing → Destroyed`: free the slot and release the actor binding.
    /// Runs once the batch carrying the destroy commands has been handed to
    /// the world, whether or not the world accepted it.
    fn complete_removals(&mut self, removals: Vec<Removal>, stats: &mut TickStats) {
        let now = self.clock.current_tick;
        for removal in removals {
            let Some(slot) = self.slots.unbind(removal.actor) else {
                warn!("{now}: removed actor {} had no slot", removal.actor);
                continue;
            };
            if let Some(mut agent) = self.pool.take(slot) {
                agent.lifecycle = Lifecycle::Destroyed;
            }
            stats.record_removal(removal.reason);
            debug!("{now}: removed {} from {slot} ({})", removal.actor, removal.reason.as_str());
        }
    }

    fn collect_telemetry(&self) -> CrowdTelemetry {
        let mut telemetry = CrowdTelemetry { tick: self.clock.current_tick, ..CrowdTelemetry::default() };
        for agent in self.pool.iter() {
            match agent.body.head() {
                Some(RouteHead::Network(head)) => telemetry.network.push(NetworkAgentRecord {
                    actor: agent.actor,
                    kind:  agent.kind(),
                    head,
                }),
                Some(RouteHead::Sidewalk(head)) => {
                    telemetry.sidewalk.push(SidewalkAgentRecord { actor: agent.actor, head })
                }
                None => {}
            }
        }
        telemetry
    }
}
