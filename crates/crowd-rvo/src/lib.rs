//! `crowd-rvo`: reciprocal collision avoidance over a fixed set of slots.
//!
//! # Model
//!
//! The solver owns a fixed-size array of slots, one per pooled agent plus the
//! ego vehicle.  Each tick the controller writes every slot (live agent or
//! placeholder), then calls [`RvoSimulator::do_step`] exactly once.  The step
//! resolves all pairwise avoidance jointly with Optimal Reciprocal Collision
//! Avoidance:
//!
//! ```text
//! for every live slot i:
//!   N  = up to max_neighbors live slots within neighbor_dist   (R-tree)
//!   P  = footprint(j) ⊕ -footprint(i), the displacements that collide
//!   L  = one ORCA half-plane per neighbour from the cone over P, each
//!        side taking half the avoidance effort
//!   v' = argmin |v - pref_velocity|  s.t.  v in every L, |v| <= max_speed
//!        (2-D incremental LP; 3-D LP fallback when L is infeasible)
//! ```
//!
//! Agents are their oriented footprint rectangles.  The obstacle one agent
//! sees in another is the Minkowski sum of the two rectangles, so two boxes
//! passing side by side only constrain each other if their sweeps would
//! intersect.  Neighbours are found by bounding-box centre.  Placeholder
//! slots are inert: they are excluded from neighbour search and solve to
//! zero velocity.
//!
//! | Module          | Contents                                               |
//! |-----------------|--------------------------------------------------------|
//! | [`params`]      | `AgentParams` and the per-kind defaults                |
//! | [`orca`]        | ORCA half-plane construction, linear programs          |
//! | [`simulator`]   | `RvoSimulator`, `SolverAgent`, `SlotState`             |
//! | [`error`]       | `RvoError`, `RvoResult`                                |
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                 |
//! |------------|--------------------------------------------------------|
//! | `parallel` | Per-slot linear programs run on Rayon's thread pool.   |

pub mod error;
pub mod orca;
pub mod params;
pub mod simulator;


pub use error::{RvoError, RvoResult};
pub use orca::Line;
pub use params::AgentParams;
pub use simulator::{RvoSimulator, SlotState, SolverAgent};
