//! `crowd-world`: the contract between the controller and the simulated world.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                        |
//! |---------------|-----------------------------------------------------------------|
//! | [`actor`]     | `ActorState`, `BoundingBox`, `Blueprint`                        |
//! | [`command`]   | `Command`, `VehicleControl`, `WalkerControl`                    |
//! | [`world`]     | `World` trait: spawn, query, batch, tick barrier               |
//! | [`kinematic`] | `KinematicWorld`: deterministic in-process implementation      |
//! | [`error`]     | `WorldError`, `WorldResult<T>`                                  |
//!
//! # Interaction model
//!
//! The controller talks to the world only through request/ack calls:
//!
//! 1. `try_spawn` places a new actor synchronously and may refuse (spawn
//!    point occupied).  Refusal is `None`, never an error.
//! 2. `actor_state` reads the actor's last simulated state.
//! 3. `apply_batch` hands over every destroy and actuation command of one
//!    tick at once.
//! 4. `wait_for_tick` blocks until the world has advanced one step, bounded
//!    by a timeout.

pub mod actor;
pub mod command;
pub mod error;
pub mod kinematic;
pub mod world;


pub use actor::{ActorState, Blueprint, BoundingBox};
pub use command::{Command, VehicleControl, WalkerControl};
pub use error::{WorldError, WorldResult};
pub use kinematic::KinematicWorld;
pub use world::World;
