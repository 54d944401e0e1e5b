//! `AgentPool`: the pooled vehicles and pedestrians, indexed by slot.

use std::sync::Arc;

use log::debug;

use crowd_agent::{AgentBody, CrowdAgent, Lifecycle, SlotRngs};
use crowd_core::{AgentKind, AgentRng, CrowdConfig, SlotId, Vec3};
use crowd_route::{LaneNetwork, Path, RouteMap, SidewalkNetwork};
use crowd_world::{ActorState, World};

use crate::slots::SlotTable;
use crate::telemetry::TickStats;

pub struct AgentPool {
    /// One entry per solver slot; `None` for vacant slots and the ego slot.
    agents:       Vec<Option<CrowdAgent>>,
    rngs:         SlotRngs,
    lane_map:     Arc<LaneNetwork>,
    sidewalk_map: Arc<SidewalkNetwork>,
}

impl AgentPool {
    pub fn new(
        slot_count:   usize,
        seed:         u64,
        lane_map:     Arc<LaneNetwork>,
        sidewalk_map: Arc<SidewalkNetwork>,
    ) -> Self {
        Self {
            agents: (0..slot_count).map(|_| None).collect(),
            rngs: SlotRngs::new(slot_count, seed),
            lane_map,
            sidewalk_map,
        }
    }

    pub fn lane_map(&self) -> &Arc<LaneNetwork> {
        &self.lane_map
    }

    pub fn sidewalk_map(&self) -> &Arc<SidewalkNetwork> {
        &self.sidewalk_map
    }

    pub fn get(&self, slot: SlotId) -> Option<&CrowdAgent> {
        self.agents.get(slot.index())?.as_ref()
    }

    pub fn get_mut(&mut self, slot: SlotId) -> Option<&mut CrowdAgent> {
        self.agents.get_mut(slot.index())?.as_mut()
    }

    /// Take the agent out of `slot`, leaving it vacant.
    pub fn take(&mut self, slot: SlotId) -> Option<CrowdAgent> {
        self.agents.get_mut(slot.index())?.take()
    }

    /// Active agents in slot order.
    pub fn iter(&self) -> impl Iterator<Item = &CrowdAgent> {
        self.agents.iter().flatten().filter(|a| a.is_active())
    }

    pub fn active_count(&self, kind: AgentKind) -> usize {
        self.iter().filter(|a| a.kind() == kind).count()
    }

    // ── Top-up ────────────────────────────────────────────────────────────

    /// One spawn attempt for every vacant slot of both kinds.
    ///
    /// Failures are not errors: the slot stays vacant and is retried on the
    /// next tick.
    pub fn top_up<W: World>(
        &mut self,
        world:  &mut W,
        config: &CrowdConfig,
        slots:  &mut SlotTable,
        stats:  &mut TickStats,
    ) {
        for kind in AgentKind::ALL {
            let vacant: Vec<SlotId> = slots
                .slots_for(kind)
                .filter(|s| self.get(*s).is_none())
                .collect();
            for slot in vacant {
                if self.spawn(slot, kind, world, config, slots) {
                    stats.spawned += 1;
                } else {
                    stats.spawn_failures += 1;
                }
            }
        }
    }

    fn spawn<W: World>(
        &mut self,
        slot:   SlotId,
        kind:   AgentKind,
        world:  &mut W,
        config: &CrowdConfig,
        slots:  &mut SlotTable,
    ) -> bool {
        let rng = self.rngs.get_mut(slot);

        let body = match kind {
            AgentKind::Vehicle => draw_path(&self.lane_map, config, rng).map(|path| AgentBody::Vehicle { path }),
            AgentKind::Pedestrian => {
                draw_path(&self.sidewalk_map, config, rng).map(|path| AgentBody::Pedestrian { path })
            }
        };
        let Some(body) = body else {
            debug!("{slot}: no {kind} path inside bounds after {} draws", config.max_path_attempts);
            return false;
        };

        let Some(blueprint) = rng.choose(world.blueprints(kind)).cloned() else {
            debug!("{slot}: no {kind} blueprint available");
            return false;
        };
        let Some(transform) = body.spawn_transform(config.spawn_height) else {
            return false;
        };

        let range = config.speed_range(kind);
        let speed = if range.spread > 0.0 {
            range.base + rng.gen_range(0.0..range.spread)
        } else {
            range.base
        };

        let Some(actor) = world.try_spawn(&blueprint, transform) else {
            debug!("{slot}: {} spawn refused at {}", blueprint.id, transform.location.truncate());
            return false;
        };

        let state = world.actor_state(actor).unwrap_or(ActorState {
            location:     transform.location,
            velocity:     Vec3::ZERO,
            yaw_deg:      transform.yaw_deg,
            bounding_box: blueprint.bounding_box,
        });

        let mut agent = CrowdAgent::new(actor, slot, speed, state, body);
        slots.bind(actor, slot);
        agent.lifecycle = Lifecycle::Active;
        debug!("{slot}: spawned {kind} {actor} ({}) at {:.1} m/s", blueprint.id, speed);
        self.agents[slot.index()] = Some(agent);
        true
    }
}

/// Random path whose first point lies inside the operating area.
fn draw_path<M: RouteMap>(map: &Arc<M>, config: &CrowdConfig, rng: &mut AgentRng) -> Option<Path<M>> {
    for _ in 0..config.max_path_attempts {
        let Some(path) = Path::random(Arc::clone(map), config.path_min_points, config.path_interval, rng.fork())
        else {
            continue;
        };
        if path.get_position(0).is_some_and(|p| config.bounds.contains(p)) {
            return Some(path);
        }
    }
    None
}
