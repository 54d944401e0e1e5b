//! `crowd-core`: foundational types for the crowd avoidance controller.
//!
//! This crate is a dependency of every other `crowd-*` crate.  It has no
//! `crowd-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                                 |
//! |-----------------|----------------------------------------------------------|
//! | [`ids`]         | `ActorId`, `SlotId`, `NodeId`, `EdgeId`, `PolygonId`     |
//! | [`geom`]        | `Vec2`, `Vec3`, `Transform`, `Bounds`, angle helpers     |
//! | [`time`]        | `Tick`, `SimClock`                                       |
//! | [`config`]      | `CrowdConfig`, `SpeedRange`, validation                  |
//! | [`rng`]         | `AgentRng` (per-slot), `SimRng` (per-owner)              |
//! | [`kind`]        | `AgentKind` tag (vehicle / pedestrian)                   |
//! | [`error`]       | `CrowdError`, `CrowdResult`                              |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public data types.   |

pub mod config;
pub mod error;
pub mod geom;
pub mod ids;
pub mod kind;
pub mod rng;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{CrowdConfig, SpeedRange};
pub use error::{CrowdError, CrowdResult};
pub use geom::{Bounds, Transform, Vec2, Vec3, signed_angle_diff_deg};
pub use ids::{ActorId, EdgeId, NodeId, PolygonId, SlotId};
pub use kind::AgentKind;
pub use rng::{AgentRng, SimRng};
pub use time::{SimClock, Tick};
