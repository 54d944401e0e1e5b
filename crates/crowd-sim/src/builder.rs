//! Fluent builder for constructing a [`CrowdController`].

use std::sync::Arc;

use log::info;

use crowd_core::{AgentKind, CrowdConfig, SlotId};
use crowd_route::{LaneNetwork, RouteMap, SidewalkNetwork};
use crowd_rvo::{AgentParams, RvoSimulator};
use crowd_world::World;

use crate::ego::EgoInbox;
use crate::pool::AgentPool;
use crate::slots::{SlotRole, SlotTable};
use crate::telemetry::CrowdTelemetry;
use crate::{CrowdController, SimError, SimResult};

/// Fluent builder for [`CrowdController<W>`].
///
/// # Required inputs
///
/// - [`CrowdConfig`]: pool targets, bounds, tick rate, seed, …
/// - `W: World`: the simulated world
///
/// # Optional inputs (have defaults)
///
/// | Method               | Default                                         |
/// |----------------------|-------------------------------------------------|
/// | `.lane_map(m)`       | `LaneNetwork::empty()` (only if no vehicles)    |
/// | `.sidewalk_map(m)`   | `SidewalkNetwork::empty()` (only if no peds)    |
/// | `.ego_inbox(i)`      | a fresh inbox nobody publishes to               |
///
/// # Example
///
/// ```rust,ignore
/// let inbox = EgoInbox::new();
/// let mut controller = CrowdControllerBuilder::new(config, KinematicWorld::new(0.01))
///     .lane_map(Arc::new(lanes))
///     .sidewalk_map(Arc::new(sidewalks))
///     .ego_inbox(inbox.clone())
///     .build()?;
/// controller.run_ticks(1_000, &mut NoopObserver)?;
/// ```
pub struct CrowdControllerBuilder<W: World> {
    config:       CrowdConfig,
    world:        W,
    lane_map:     Option<Arc<LaneNetwork>>,
    sidewalk_map: Option<Arc<SidewalkNetwork>>,
    ego:          Option<EgoInbox>,
}

impl<W: World> CrowdControllerBuilder<W> {
    pub fn new(config: CrowdConfig, world: W) -> Self {
        Self { config, world, lane_map: None, sidewalk_map: None, ego: None }
    }

    /// Lane network the vehicle pool drives on.
    pub fn lane_map(mut self, map: Arc<LaneNetwork>) -> Self {
        self.lane_map = Some(map);
        self
    }

    /// Sidewalk polygons the pedestrian pool walks along.
    pub fn sidewalk_map(mut self, map: Arc<SidewalkNetwork>) -> Self {
        self.sidewalk_map = Some(map);
        self
    }

    /// Share an inbox with the ego telemetry producer.
    pub fn ego_inbox(mut self, inbox: EgoInbox) -> Self {
        self.ego = Some(inbox);
        self
    }

    /// Validate inputs, lay out the slots, and return a ready-to-run
    /// [`CrowdController`].
    pub fn build(self) -> SimResult<CrowdController<W>> {
        let config = self.config;
        config.validate()?;

        // ── Route maps ────────────────────────────────────────────────────
        let lane_map     = self.lane_map.unwrap_or_else(|| Arc::new(LaneNetwork::empty()));
        let sidewalk_map = self.sidewalk_map.unwrap_or_else(|| Arc::new(SidewalkNetwork::empty()));
        if config.num_network_agents > 0 && lane_map.is_empty() {
            return Err(SimError::EmptyMap(AgentKind::Vehicle));
        }
        if config.num_sidewalk_agents > 0 && sidewalk_map.is_empty() {
            return Err(SimError::EmptyMap(AgentKind::Pedestrian));
        }

        for kind in AgentKind::ALL {
            if config.target(kind) > 0 && self.world.blueprints(kind).is_empty() {
                return Err(SimError::NoBlueprints(kind));
            }
        }

        // ── Slots ─────────────────────────────────────────────────────────
        let slots = SlotTable::new(config.num_network_agents, config.num_sidewalk_agents);
        if slots.len() != config.slot_count() {
            return Err(SimError::SlotCountMismatch { expected: config.slot_count(), got: slots.len() });
        }

        let params: Vec<AgentParams> = (0..slots.len() as u32)
            .map(|i| match slots.role(SlotId(i)).and_then(SlotRole::kind) {
                Some(kind) => AgentParams::for_kind(kind),
                None       => AgentParams::VEHICLE,
            })
            .collect();

        let clock  = config.make_clock();
        let solver = RvoSimulator::from_params(&params, clock.dt_secs());
        if solver.len() != slots.len() {
            return Err(SimError::SlotCountMismatch { expected: slots.len(), got: solver.len() });
        }

        let pool = AgentPool::new(slots.len(), config.seed, lane_map, sidewalk_map);

        info!(
            "crowd controller: {} network + {} sidewalk slots, ego at {}, {} Hz, seed {}",
            config.num_network_agents,
            config.num_sidewalk_agents,
            slots.ego(),
            config.tick_rate_hz,
            config.seed,
        );

        Ok(CrowdController {
            clock,
            world: self.world,
            solver,
            slots,
            pool,
            ego: self.ego.unwrap_or_default(),
            telemetry: CrowdTelemetry::default(),
            config,
        })
    }
}
