//! `crowd-route`: route maps and resizable agent paths.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                     |
//! |--------------|--------------------------------------------------------------|
//! | [`map`]      | `RouteMap` trait: the contract every path source implements |
//! | [`lane`]     | `LaneNetwork` (CSR lane graph), `LaneNetworkBuilder`         |
//! | [`sidewalk`] | `SidewalkNetwork` (closed polygon rings), builder            |
//! | [`path`]     | `Path<M>`: owned, resizable sequence of route points        |
//! | [`error`]    | `RouteError`, `RouteResult<T>`                               |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on route point types.      |

pub mod error;
pub mod lane;
pub mod map;
pub mod path;
pub mod sidewalk;


pub use error::{RouteError, RouteResult};
pub use lane::{LaneNetwork, LaneNetworkBuilder, LaneRoutePoint};
pub use map::RouteMap;
pub use path::Path;
pub use sidewalk::{SidewalkNetwork, SidewalkNetworkBuilder, SidewalkRoutePoint};
