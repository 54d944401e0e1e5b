//! Integration tests for crowd-sim, driven against `KinematicWorld`.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use crowd_core::{ActorId, AgentKind, Bounds, CrowdConfig, SlotId, Tick, Vec2, Vec3};
use crowd_route::{LaneNetwork, LaneNetworkBuilder, SidewalkNetwork, SidewalkNetworkBuilder};
use crowd_world::{Command, KinematicWorld};

use crate::{
    CrowdController, CrowdControllerBuilder, CrowdObserver, CrowdTelemetry, EgoInbox,
    EgoTelemetry, NoopObserver, TickStats,
};

// ── Helpers ───────────────────────────────────────────────────────────────────

const DT: f32 = 0.1;

fn test_config(vehicles: usize, pedestrians: usize) -> CrowdConfig {
    CrowdConfig {
        num_network_agents:  vehicles,
        num_sidewalk_agents: pedestrians,
        path_min_points:     10,
        path_interval:       1.0,
        bounds:              Bounds::new(Vec2::new(-100.0, -100.0), Vec2::new(100.0, 100.0)),
        tick_rate_hz:        1.0 / DT,
        seed:                42,
        ..CrowdConfig::default()
    }
}

/// One-way single-lane loop around the square (-40,-40)..(40,40).  No dead
/// ends anywhere.
fn ring_road() -> Arc<LaneNetwork> {
    let mut b = LaneNetworkBuilder::new();
    let n = [
        b.add_node(Vec2::new(-40.0, -40.0)),
        b.add_node(Vec2::new(40.0, -40.0)),
        b.add_node(Vec2::new(40.0, 40.0)),
        b.add_node(Vec2::new(-40.0, 40.0)),
    ];
    for i in 0..4 {
        b.add_edge(n[i], n[(i + 1) % 4], 1);
    }
    Arc::new(b.build().unwrap())
}

/// One-way road (-50,0) → (50,0) that simply ends.
fn dead_end_road() -> Arc<LaneNetwork> {
    let mut b = LaneNetworkBuilder::new();
    let a = b.add_node(Vec2::new(-50.0, 0.0));
    let c = b.add_node(Vec2::new(50.0, 0.0));
    b.add_edge(a, c, 1);
    Arc::new(b.build().unwrap())
}

fn block() -> Arc<SidewalkNetwork> {
    let mut b = SidewalkNetworkBuilder::new();
    b.add_rect(Vec2::new(-20.0, -20.0), Vec2::new(20.0, 20.0));
    Arc::new(b.build().unwrap())
}

fn controller(config: CrowdConfig) -> CrowdController<KinematicWorld> {
    CrowdControllerBuilder::new(config, KinematicWorld::new(DT))
        .lane_map(ring_road())
        .sidewalk_map(block())
        .build()
        .unwrap()
}

fn step(c: &mut CrowdController<KinematicWorld>) -> TickStats {
    c.step(&mut NoopObserver).unwrap()
}

fn actor_in(c: &CrowdController<KinematicWorld>, slot: u32) -> ActorId {
    c.pool.get(SlotId(slot)).expect("slot occupied").actor
}

fn destroys(c: &CrowdController<KinematicWorld>) -> Vec<ActorId> {
    c.world
        .last_batch()
        .iter()
        .filter(|cmd| cmd.is_destroy())
        .map(Command::actor)
        .collect()
}

fn ego_at(position: Vec2) -> EgoTelemetry {
    EgoTelemetry {
        position,
        velocity:      Vec2::ZERO,
        yaw_deg:       0.0,
        corners:       crowd_agent::footprint_corners(position, Vec2::new(1.0, 0.0), Vec2::new(2.4, 1.0)),
        pref_velocity: Vec2::ZERO,
    }
}

// ── CrowdControllerBuilder validation ─────────────────────────────────────────

#[cfg(test)]
mod builder_tests {
    use super::*;
    use crate::{SimError, SlotRole};
    use crowd_rvo::AgentParams;

    #[test]
    fn slot_count_is_pool_plus_ego() {
        let config = test_config(3, 2);
        let c = controller(config.clone());
        assert_eq!(c.solver.len(), config.slot_count());
        assert_eq!(c.slots.len(), 6);
        assert_eq!(c.slots.ego(), SlotId(5));
        assert_eq!(c.slots.role(SlotId(0)), Some(SlotRole::Network));
        assert_eq!(c.slots.role(SlotId(3)), Some(SlotRole::Sidewalk));
        assert_eq!(c.slots.role(SlotId(5)), Some(SlotRole::Ego));
    }

    #[test]
    fn slots_carry_kind_params() {
        let c = controller(test_config(3, 2));
        assert_eq!(c.solver.slot(SlotId(2)).unwrap().agent.params, AgentParams::VEHICLE);
        assert_eq!(c.solver.slot(SlotId(3)).unwrap().agent.params, AgentParams::PEDESTRIAN);
        assert_eq!(c.solver.slot(SlotId(5)).unwrap().agent.params, AgentParams::VEHICLE);
    }

    #[test]
    fn every_slot_starts_as_placeholder() {
        let c = controller(test_config(3, 2));
        assert!(c.solver.slots().iter().all(|s| s.is_placeholder()));
        assert_eq!(c.clock.current_tick, Tick::ZERO);
    }

    #[test]
    fn missing_lane_map_errors() {
        let result = CrowdControllerBuilder::new(test_config(1, 0), KinematicWorld::new(DT)).build();
        assert!(matches!(result, Err(SimError::EmptyMap(AgentKind::Vehicle))));
    }

    #[test]
    fn empty_sidewalk_map_errors() {
        let result = CrowdControllerBuilder::new(test_config(0, 1), KinematicWorld::new(DT))
            .sidewalk_map(Arc::new(SidewalkNetwork::empty()))
            .build();
        assert!(matches!(result, Err(SimError::EmptyMap(AgentKind::Pedestrian))));
    }

    #[test]
    fn maps_optional_for_empty_pools() {
        let c = CrowdControllerBuilder::new(test_config(0, 0), KinematicWorld::new(DT))
            .build()
            .unwrap();
        assert_eq!(c.solver.len(), 1);
    }

    #[test]
    fn missing_blueprints_error() {
        let world = KinematicWorld::new(DT).with_blueprints(AgentKind::Vehicle, Vec::new());
        let result = CrowdControllerBuilder::new(test_config(1, 0), world)
            .lane_map(ring_road())
            .build();
        assert!(matches!(result, Err(SimError::NoBlueprints(AgentKind::Vehicle))));
    }

    #[test]
    fn invalid_config_errors() {
        let mut config = test_config(1, 0);
        config.path_min_points = 1;
        let result = CrowdControllerBuilder::new(config, KinematicWorld::new(DT))
            .lane_map(ring_road())
            .build();
        assert!(matches!(result, Err(SimError::Config(_))));
    }
}

// ── Pool top-up ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod pool_tests {
    use super::*;
    use crowd_agent::Lifecycle;
    use crowd_world::World;

    #[test]
    fn first_tick_attempts_every_vacant_slot() {
        let mut c = controller(test_config(3, 2));
        let stats = step(&mut c);
        assert_eq!(stats.spawned + stats.spawn_failures, 5);
        assert_eq!(c.world.actor_count(), stats.spawned as usize);
        assert_eq!(c.slots.bound_count(), stats.spawned as usize);
    }

    #[test]
    fn pools_reach_and_never_exceed_targets() {
        let mut c = controller(test_config(3, 2));
        for _ in 0..20 {
            let stats = step(&mut c);
            assert!(stats.active_vehicles <= 3);
            assert!(stats.active_pedestrians <= 2);
        }
        assert_eq!(c.pool.active_count(AgentKind::Vehicle), 3);
        assert_eq!(c.pool.active_count(AgentKind::Pedestrian), 2);
    }

    #[test]
    fn spawned_agents_are_active_in_their_own_slot() {
        let mut c = controller(test_config(2, 1));
        step(&mut c);
        for slot in c.slots.pool_slots() {
            let Some(agent) = c.pool.get(slot) else { continue };
            assert_eq!(agent.slot, slot);
            assert_eq!(agent.lifecycle, Lifecycle::Active);
            assert_eq!(c.slots.slot_of(agent.actor), Some(slot));
            assert_eq!(Some(agent.kind()), c.slots.role(slot).and_then(|r| r.kind()));
        }
    }

    #[test]
    fn paths_hold_minimum_points() {
        let config = test_config(2, 2);
        let min = config.path_min_points;
        let mut c = controller(config);
        for _ in 0..5 {
            step(&mut c);
        }
        assert!(c.pool.iter().all(|a| a.body.path_len() >= min));
    }

    #[test]
    fn refused_spawn_retries_next_tick() {
        let mut c = controller(test_config(1, 0));
        c.world.block_spawns(true);
        let stats = step(&mut c);
        assert_eq!(stats.spawned, 0);
        assert_eq!(stats.spawn_failures, 1);
        assert!(c.pool.get(SlotId(0)).is_none());
        assert!(c.solver.slot(SlotId(0)).unwrap().is_placeholder());

        c.world.block_spawns(false);
        let stats = step(&mut c);
        assert_eq!(stats.spawned, 1);
        assert_eq!(stats.active_vehicles, 1);
    }

    #[test]
    fn spawn_points_lie_inside_bounds() {
        let mut config = test_config(4, 0);
        // Only the bottom edge of the ring is inside.
        config.bounds = Bounds::new(Vec2::new(-45.0, -45.0), Vec2::new(45.0, -35.0));
        let mut c = controller(config.clone());
        step(&mut c);
        for agent in c.pool.iter() {
            let start = c.world.actor_state(agent.actor).unwrap().position();
            assert!(config.bounds.contains(start), "{start} outside bounds");
        }
    }
}

// ── Removal ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod removal_tests {
    use super::*;
    use crowd_world::World;

    #[test]
    fn out_of_bounds_agent_destroyed_once() {
        let mut c = controller(test_config(1, 0));
        step(&mut c);
        let actor = actor_in(&c, 0);

        assert!(c.world.teleport(actor, Vec3::new(500.0, 0.0, 0.5)));
        let stats = step(&mut c);

        assert_eq!(stats.out_of_bounds, 1);
        assert_eq!(destroys(&c), vec![actor]);
        assert!(c.world.actor_state(actor).is_none());
        assert!(!c.telemetry.contains(actor));
        assert!(c.pool.get(SlotId(0)).is_none());
        assert_eq!(c.slots.slot_of(actor), None);
        assert!(c.solver.slot(SlotId(0)).unwrap().is_placeholder());
        assert!(c.world.last_batch().iter().all(|cmd| cmd.is_destroy()));
    }

    #[test]
    fn removed_slot_is_refilled() {
        let mut c = controller(test_config(1, 0));
        step(&mut c);
        let actor = actor_in(&c, 0);
        c.world.teleport(actor, Vec3::new(500.0, 0.0, 0.5));
        step(&mut c);

        let stats = step(&mut c);
        assert_eq!(stats.spawned, 1);
        assert_ne!(actor_in(&c, 0), actor);
    }

    #[test]
    fn fallen_agent_removed() {
        let mut c = controller(test_config(1, 0));
        step(&mut c);
        let actor = actor_in(&c, 0);
        let here = c.world.actor_state(actor).unwrap().location;

        c.world.teleport(actor, Vec3::new(here.x, here.y, -50.0));
        let stats = step(&mut c);
        assert_eq!(stats.below_floor, 1);
        assert_eq!(destroys(&c), vec![actor]);
    }

    #[test]
    fn lost_actor_released_without_destroy() {
        let mut c = controller(test_config(1, 0));
        step(&mut c);
        let actor = actor_in(&c, 0);

        assert!(c.world.remove_actor(actor));
        let stats = step(&mut c);
        assert_eq!(stats.actor_lost, 1);
        assert!(destroys(&c).is_empty());
        assert!(c.pool.get(SlotId(0)).is_none());
        assert_eq!(c.slots.bound_count(), 0);
    }

    #[test]
    fn removal_completes_when_barrier_fails() {
        let mut c = controller(test_config(1, 0));
        step(&mut c);
        let actor = actor_in(&c, 0);

        c.world.teleport(actor, Vec3::new(500.0, 0.0, 0.5));
        c.world.fail_next_tick();
        assert!(c.step(&mut NoopObserver).is_err());

        // The destroy went out and the slot is already free.
        assert_eq!(destroys(&c), vec![actor]);
        assert!(c.pool.get(SlotId(0)).is_none());
        assert_eq!(c.slots.slot_of(actor), None);
        assert!(c.agent(actor).is_none());

        let stats = step(&mut c);
        assert_eq!(stats.removed(), 0);
        assert_eq!(stats.spawned, 1);
        assert_ne!(actor_in(&c, 0), actor);
    }

    #[test]
    fn non_active_agent_is_not_commanded() {
        let mut c = controller(test_config(1, 0));
        step(&mut c);
        let actor = actor_in(&c, 0);

        c.pool.get_mut(SlotId(0)).unwrap().lifecycle = crowd_agent::Lifecycle::Removing;
        let stats = step(&mut c);
        assert_eq!(stats.commands, 0);
        assert!(c.world.last_batch().iter().all(|cmd| cmd.actor() != actor));
        assert!(c.solver.slot(SlotId(0)).unwrap().is_placeholder());
        assert!(!c.telemetry.contains(actor));
    }

    #[test]
    fn dead_end_path_removes_vehicle() {
        let mut c = CrowdControllerBuilder::new(test_config(1, 0), KinematicWorld::new(DT))
            .lane_map(dead_end_road())
            .build()
            .unwrap();
        let mut dead_ends = 0;
        for _ in 0..600 {
            dead_ends += step(&mut c).dead_end;
            if dead_ends > 0 {
                break;
            }
        }
        assert!(dead_ends > 0);
    }
}

// ── Solve & control ───────────────────────────────────────────────────────────

#[cfg(test)]
mod control_tests {
    use super::*;
    use crowd_world::World;

    #[test]
    fn one_command_per_active_agent() {
        let mut c = controller(test_config(2, 2));
        for _ in 0..3 {
            step(&mut c);
        }
        let stats = step(&mut c);
        let batch = c.world.last_batch();
        assert_eq!(batch.len(), (stats.active_vehicles + stats.active_pedestrians) as usize);
        assert_eq!(stats.commands as usize, batch.len());

        for cmd in batch {
            let slot  = c.slots.slot_of(cmd.actor()).unwrap();
            let agent = c.pool.get(slot).unwrap();
            match (agent.kind(), cmd) {
                (AgentKind::Vehicle, Command::ApplyVehicleControl(_, v)) => {
                    assert!((0.0..=1.0).contains(&v.throttle));
                    assert!((0.0..=1.0).contains(&v.brake));
                    assert!((-1.0..=1.0).contains(&v.steer));
                }
                (AgentKind::Pedestrian, Command::ApplyWalkerControl(_, w)) => {
                    assert!(!w.jump);
                }
                other => panic!("unexpected command {other:?}"),
            }
        }
    }

    #[test]
    fn live_slots_match_active_agents() {
        let mut c = controller(test_config(3, 2));
        for _ in 0..10 {
            let stats = step(&mut c);
            let active = (stats.active_vehicles + stats.active_pedestrians) as usize;
            assert_eq!(c.solver.live_count(), active);
        }
    }

    #[test]
    fn vehicles_get_moving() {
        let mut c = controller(test_config(1, 0));
        for _ in 0..30 {
            step(&mut c);
        }
        let actor = actor_in(&c, 0);
        let speed = c.world.actor_state(actor).unwrap().velocity_2d().length();
        assert!(speed > 1.0, "vehicle speed {speed}");
    }

    #[test]
    fn solved_speed_within_kind_limit() {
        let mut c = controller(test_config(3, 3));
        for _ in 0..10 {
            step(&mut c);
        }
        for state in c.solver.slots().iter().filter(|s| s.live) {
            assert!(state.new_velocity.length() <= state.agent.params.max_speed + 1e-3);
        }
    }

    #[test]
    fn world_timeout_propagates() {
        use crate::SimError;
        use crowd_world::WorldError;

        let mut c = controller(test_config(1, 0));
        step(&mut c);
        c.world.fail_next_tick();
        let result = c.step(&mut NoopObserver);
        assert!(matches!(result, Err(SimError::World(WorldError::TickTimeout(_)))));
        assert_eq!(c.clock.current_tick, Tick(1));
    }
}

// ── Ego ───────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod ego_tests {
    use super::*;
    use crate::EgoReading;

    fn controller_with(config: CrowdConfig, inbox: EgoInbox) -> CrowdController<KinematicWorld> {
        CrowdControllerBuilder::new(config, KinematicWorld::new(DT))
            .lane_map(ring_road())
            .ego_inbox(inbox)
            .build()
            .unwrap()
    }

    #[test]
    fn missing_ego_parks_slot() {
        let mut c = controller(test_config(1, 0));
        let stats = step(&mut c);
        assert!(!stats.ego_present);
        assert!(c.solver.slot(c.slots.ego()).unwrap().is_placeholder());
    }

    #[test]
    fn fresh_ego_joins_solve() {
        let inbox = EgoInbox::new();
        let mut c = controller_with(test_config(1, 0), inbox.clone());
        inbox.publish(ego_at(Vec2::new(90.0, 90.0)));

        let stats = step(&mut c);
        assert!(stats.ego_present);
        let slot = c.solver.slot(c.slots.ego()).unwrap();
        assert!(slot.live);
        assert_eq!(slot.agent.position, Vec2::new(90.0, 90.0));
    }

    #[test]
    fn ego_is_never_commanded() {
        let inbox = EgoInbox::new();
        let mut c = controller_with(test_config(1, 0), inbox.clone());
        inbox.publish(ego_at(Vec2::new(90.0, 90.0)));
        let stats = step(&mut c);
        assert_eq!(c.world.last_batch().len(), stats.active_vehicles as usize);
    }

    #[test]
    fn ego_yaw_becomes_solver_heading() {
        let ego = EgoTelemetry { yaw_deg: 90.0, ..ego_at(Vec2::ZERO) };
        let heading = ego.solver_agent().heading;
        assert!(heading.x.abs() < 1e-6 && (heading.y - 1.0).abs() < 1e-6, "got {heading}");

        let ego = EgoTelemetry { yaw_deg: -135.0, ..ego_at(Vec2::ZERO) };
        let heading = ego.solver_agent().heading;
        assert!((heading.length() - 1.0).abs() < 1e-6);
        assert!((heading.yaw_deg() + 135.0).abs() < 1e-3);
    }

    #[test]
    fn stale_ego_ignored() {
        let mut config = test_config(1, 0);
        config.ego_max_age_ms = Some(1);
        let inbox = EgoInbox::new();
        let mut c = controller_with(config, inbox.clone());

        inbox.publish(ego_at(Vec2::new(90.0, 90.0)));
        std::thread::sleep(Duration::from_millis(10));
        let stats = step(&mut c);
        assert!(!stats.ego_present);
        assert!(c.solver.slot(c.slots.ego()).unwrap().is_placeholder());
    }

    #[test]
    fn inbox_latest_value_wins() {
        let inbox = EgoInbox::new();
        assert_eq!(inbox.read(None), EgoReading::Missing);
        inbox.publish(ego_at(Vec2::new(1.0, 0.0)));
        inbox.publish(ego_at(Vec2::new(2.0, 0.0)));
        match inbox.read(None) {
            EgoReading::Fresh(t) => assert_eq!(t.position, Vec2::new(2.0, 0.0)),
            other => panic!("expected fresh ego, got {other:?}"),
        }
        inbox.clear();
        assert_eq!(inbox.read(None), EgoReading::Missing);
    }

    #[test]
    fn inbox_shared_across_threads() {
        let inbox = EgoInbox::new();
        let producer = inbox.clone();
        std::thread::spawn(move || producer.publish(ego_at(Vec2::new(5.0, 5.0))))
            .join()
            .unwrap();
        assert!(matches!(inbox.read(Some(Duration::from_secs(60))), EgoReading::Fresh(_)));
    }
}

// ── Telemetry & observers ─────────────────────────────────────────────────────

#[cfg(test)]
mod telemetry_tests {
    use super::*;

    #[derive(Default)]
    struct Counter {
        starts:    usize,
        ends:      usize,
        telemetry: Vec<CrowdTelemetry>,
        run_end:   Option<Tick>,
    }

    impl CrowdObserver for Counter {
        fn on_tick_start(&mut self, _tick: Tick) {
            self.starts += 1;
        }
        fn on_telemetry(&mut self, telemetry: &CrowdTelemetry) {
            self.telemetry.push(telemetry.clone());
        }
        fn on_tick_end(&mut self, _stats: &TickStats) {
            self.ends += 1;
        }
        fn on_run_end(&mut self, final_tick: Tick) {
            self.run_end = Some(final_tick);
        }
    }

    #[test]
    fn observer_sees_every_tick() {
        let mut c = controller(test_config(2, 2));
        let mut obs = Counter::default();
        c.run_ticks(7, &mut obs).unwrap();
        assert_eq!(obs.starts, 7);
        assert_eq!(obs.ends, 7);
        assert_eq!(obs.telemetry.len(), 7);
        assert_eq!(obs.run_end, Some(Tick(7)));
    }

    #[test]
    fn telemetry_lists_active_agents_by_kind() {
        let mut c = controller(test_config(3, 2));
        let stats = (0..5).map(|_| step(&mut c)).last().unwrap();
        assert_eq!(c.telemetry.network.len(), stats.active_vehicles as usize);
        assert_eq!(c.telemetry.sidewalk.len(), stats.active_pedestrians as usize);
        assert!(c.telemetry.network.iter().all(|r| r.kind == AgentKind::Vehicle));
        for r in &c.telemetry.network {
            assert!(c.slots.slot_of(r.actor).is_some());
        }
    }

    #[test]
    fn run_until_stops_on_flag() {
        struct StopAfter<'a> {
            n:    u64,
            stop: &'a AtomicBool,
        }
        impl CrowdObserver for StopAfter<'_> {
            fn on_tick_end(&mut self, stats: &TickStats) {
                if stats.tick.0 + 1 >= self.n {
                    self.stop.store(true, Ordering::Relaxed);
                }
            }
        }

        let stop = AtomicBool::new(false);
        let mut c = controller(test_config(1, 1));
        c.run_until(&stop, false, &mut StopAfter { n: 5, stop: &stop }).unwrap();
        assert_eq!(c.clock.current_tick, Tick(5));
    }

    #[test]
    fn run_until_with_flag_set_does_nothing() {
        let stop = AtomicBool::new(true);
        let mut c = controller(test_config(1, 1));
        c.run_until(&stop, true, &mut NoopObserver).unwrap();
        assert_eq!(c.clock.current_tick, Tick::ZERO);
        assert_eq!(c.world.frame(), 0);
    }

    #[test]
    fn same_seed_same_run() {
        let run = || {
            let mut c = controller(test_config(3, 3));
            c.run_ticks(30, &mut NoopObserver).unwrap();
            let states: Vec<_> = c
                .world
                .actor_ids()
                .map(|id| crowd_world::World::actor_state(&c.world, id))
                .collect();
            (c.telemetry, states)
        };
        assert_eq!(run(), run());
    }
}

// ── SlotTable ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod slot_tests {
    use crate::{SlotRole, SlotTable};
    use crowd_core::{ActorId, AgentKind, SlotId};

    #[test]
    fn layout_is_network_sidewalk_ego() {
        let t = SlotTable::new(2, 3);
        let net: Vec<_> = t.slots_for(AgentKind::Vehicle).collect();
        let side: Vec<_> = t.slots_for(AgentKind::Pedestrian).collect();
        assert_eq!(net, vec![SlotId(0), SlotId(1)]);
        assert_eq!(side, vec![SlotId(2), SlotId(3), SlotId(4)]);
        assert_eq!(t.ego(), SlotId(5));
        assert_eq!(t.pool_slots().count(), 5);
        assert_eq!(t.role(SlotId(6)), None);
        assert_eq!(SlotRole::Ego.kind(), None);
    }

    #[test]
    fn bind_and_unbind() {
        let mut t = SlotTable::new(1, 1);
        t.bind(ActorId(40), SlotId(1));
        assert_eq!(t.slot_of(ActorId(40)), Some(SlotId(1)));
        assert_eq!(t.unbind(ActorId(40)), Some(SlotId(1)));
        assert_eq!(t.slot_of(ActorId(40)), None);
        assert_eq!(t.unbind(ActorId(40)), None);
    }

    #[test]
    fn agents_resolve_through_actor_table() {
        let mut c = super::controller(super::test_config(2, 2));
        super::step(&mut c);
        let actors: Vec<(ActorId, SlotId)> = c.pool.iter().map(|a| (a.actor, a.slot)).collect();
        assert!(!actors.is_empty());
        for (actor, slot) in actors {
            assert_eq!(c.slots.slot_of(actor), Some(slot));
            assert_eq!(c.agent(actor).map(|a| a.slot), Some(slot));
        }
        assert!(c.agent(ActorId(9_999)).is_none());
    }

    #[test]
    fn empty_pools_keep_ego() {
        let t = SlotTable::new(0, 0);
        assert_eq!(t.len(), 1);
        assert_eq!(t.ego(), SlotId(0));
        assert_eq!(t.pool_slots().count(), 0);
    }
}
