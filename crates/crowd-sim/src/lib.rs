//! `crowd-sim`: pooled agents and the fixed-rate tick orchestrator.
//!
//! # Tick loop
//!
//! ```text
//! every 1 / tick_rate_hz seconds:
//!   ① Top-up   : one spawn attempt per vacant network and sidewalk slot.
//!   ② Cull     : refresh world state; out of bounds, below the floor,
//!                 dead-end path or lost actor → Removing, slot parked,
//!                 DestroyActor queued.
//!   ③ Slots    : live agents + ego (or its placeholder) written to the solver.
//!   ④ Solve    : RvoSimulator::do_step, exactly once.
//!   ⑤ Control  : solved velocity → VehicleControl / WalkerControl.
//!   ⑥ Commit   : one apply_batch, then wait_for_tick (bounded).
//!                 Removing → Destroyed, slot freed.
//!   ⑦ Publish  : route head of every active agent → CrowdObserver.
//! ```
//!
//! # Crate layout
//!
//! | Module         | Contents                                               |
//! |----------------|--------------------------------------------------------|
//! | [`controller`] | `CrowdController` and the tick                         |
//! | [`builder`]    | `CrowdControllerBuilder`: validation and slot layout   |
//! | [`pool`]       | `AgentPool`: per-slot agents and top-up                |
//! | [`slots`]      | `SlotTable`, `SlotRole`                                |
//! | [`ego`]        | `EgoInbox`, `EgoTelemetry`                             |
//! | [`telemetry`]  | `TickStats`, `CrowdTelemetry`, `RemovalReason`         |
//! | [`observer`]   | `CrowdObserver`, `NoopObserver`                        |
//! | [`error`]      | `SimError`, `SimResult<T>`                             |
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                 |
//! |------------|--------------------------------------------------------|
//! | `parallel` | Solves slots on Rayon's thread pool.                   |
//! | `fx-hash`  | FxHash for the actor → slot table.                     |
//! | `serde`    | `Serialize`/`Deserialize` on telemetry types.          |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use crowd_sim::{CrowdControllerBuilder, NoopObserver};
//! use crowd_world::KinematicWorld;
//!
//! let mut controller = CrowdControllerBuilder::new(config, KinematicWorld::new(0.01))
//!     .lane_map(lanes)
//!     .sidewalk_map(sidewalks)
//!     .build()?;
//! controller.run_ticks(1_000, &mut NoopObserver)?;
//! ```

pub mod builder;
pub mod controller;
pub mod ego;
pub mod error;
pub mod observer;
pub mod pool;
pub mod slots;
pub mod telemetry;

#[cfg(test)]
mod tests;

pub use builder::CrowdControllerBuilder;
pub use controller::CrowdController;
pub use ego::{EgoInbox, EgoReading, EgoTelemetry};
pub use error::{SimError, SimResult};
pub use observer::{CrowdObserver, NoopObserver};
pub use pool::AgentPool;
pub use slots::{SlotRole, SlotTable};
pub use telemetry::{
    CrowdTelemetry, NetworkAgentRecord, RemovalReason, SidewalkAgentRecord, TickStats,
};
