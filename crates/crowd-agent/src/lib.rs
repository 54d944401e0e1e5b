//! `crowd-agent`: the agents the controller drives.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                     |
//! |---------------|--------------------------------------------------------------|
//! | [`agent`]     | `CrowdAgent`, `AgentBody` (vehicle / pedestrian), `Lifecycle`, `RouteHead` |
//! | [`footprint`] | Oriented bounding-box corners and footprint centre           |
//! | [`control`]   | Solved velocity → `VehicleControl` / `WalkerControl`         |
//! | [`rngs`]      | `SlotRngs`: one deterministic RNG per solver slot           |
//!
//! Everything kind-specific dispatches on the [`AgentBody`] tag; there is no
//! trait object or runtime type inspection.
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on `Lifecycle`, `RouteHead`. |

pub mod agent;
pub mod control;
pub mod footprint;
pub mod rngs;

#[cfg(test)]
mod tests;

pub use agent::{AgentBody, CrowdAgent, Lifecycle, RouteHead};
pub use control::{Control, vehicle_control, walker_control};
pub use footprint::{PEDESTRIAN_HALF_EXTENT, footprint_centre, footprint_corners};
pub use rngs::SlotRngs;
