//! The `World` trait.

use std::time::Duration;

use crowd_core::{ActorId, AgentKind, Transform};

use crate::{ActorState, Blueprint, Command, WorldResult};

/// Everything the controller needs from the simulated world.
///
/// Implementations own all actors; the controller only holds `ActorId`
/// handles and goes through these calls.  Swap implementations at compile
/// time (the controller is generic over `W: World`) for an in-process world
/// in tests or a bridge to an external simulator.
pub trait World {
    /// Spawnable blueprints of `kind`.  Empty means `kind` cannot spawn.
    fn blueprints(&self, kind: AgentKind) -> &[Blueprint];

    /// Place a new actor.  `None` when the world refuses (e.g. the spawn
    /// point is occupied); the caller simply retries later.
    fn try_spawn(&mut self, blueprint: &Blueprint, transform: Transform) -> Option<ActorId>;

    /// Last simulated state of `actor`, or `None` if it no longer exists.
    fn actor_state(&self, actor: ActorId) -> Option<ActorState>;

    /// Submit one tick's commands.  Commands for unknown actors are ignored.
    fn apply_batch(&mut self, commands: Vec<Command>) -> WorldResult<()>;

    /// Block until the world has advanced one step.  Returns the world's
    /// frame number, or [`WorldError::TickTimeout`][crate::WorldError]
    /// after `timeout`.
    fn wait_for_tick(&mut self, timeout: Duration) -> WorldResult<u64>;
}
