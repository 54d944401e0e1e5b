//! Outbound commands, batched once per tick.

use crowd_core::{ActorId, Vec3};

/// Normalised vehicle actuation.
///
/// `throttle` and `brake` lie in `[0, 1]`, `steer` in `[-1, 1]` (positive
/// turns toward the vehicle's left, matching counter-clockwise yaw).
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VehicleControl {
    pub throttle: f32,
    pub steer:    f32,
    pub brake:    f32,
}

/// Direct walker command: move along `velocity`'s direction at `speed`.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WalkerControl {
    pub velocity: Vec3,
    pub speed:    f32,
    pub jump:     bool,
}

#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Command {
    DestroyActor(ActorId),
    ApplyVehicleControl(ActorId, VehicleControl),
    ApplyWalkerControl(ActorId, WalkerControl),
}

impl Command {
    /// The actor this command targets.
    pub fn actor(&self) -> ActorId {
        match *self {
            Command::DestroyActor(a)
            | Command::ApplyVehicleControl(a, _)
            | Command::ApplyWalkerControl(a, _) => a,
        }
    }

    pub fn is_destroy(&self) -> bool {
        matches!(self, Command::DestroyActor(_))
    }
}
