//! Converting a solved velocity into actuation.
//!
//! Vehicles get a proportional steering/throttle/brake law:
//!
//! ```text
//! steer    = clamp(angle(forward → v), ±45°) / 45°            ∈ [-1, 1]
//! desired  = |v|,  current = |velocity|
//! desired > current:  throttle = k2 · (desired − current) / desired
//! desired < current:  brake    = k3 · (current − desired) / current
//! ```
//!
//! with `k2 = 1.5`, `k3 = 2.5`; both outputs are clamped to `[0, 1]`.
//! Pedestrians are commanded directly at their preferred speed.

use crowd_core::{ActorId, Vec2, signed_angle_diff_deg};
use crowd_world::{Command, VehicleControl, WalkerControl};

/// Largest steering angle the law asks for, degrees.
pub const STEER_LIMIT_DEG: f32 = 45.0;

/// Throttle gain (k2).
pub const THROTTLE_GAIN: f32 = 1.5;

/// Brake gain (k3).
pub const BRAKE_GAIN: f32 = 2.5;

/// Kind-specific actuation for one agent.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Control {
    Vehicle(VehicleControl),
    Walker(WalkerControl),
}

impl Control {
    pub fn into_command(self, actor: ActorId) -> Command {
        match self {
            Control::Vehicle(c) => Command::ApplyVehicleControl(actor, c),
            Control::Walker(c)  => Command::ApplyWalkerControl(actor, c),
        }
    }
}

/// Vehicle law.  Throttle and brake are never both non-zero.
pub fn vehicle_control(solved: Vec2, forward: Vec2, current_velocity: Vec2) -> VehicleControl {
    let angle = signed_angle_diff_deg(solved, forward).clamp(-STEER_LIMIT_DEG, STEER_LIMIT_DEG);
    let steer = angle / STEER_LIMIT_DEG;

    let desired = solved.length();
    let current = current_velocity.length();

    let (throttle, brake) = if desired > current {
        (THROTTLE_GAIN * (desired - current) / desired, 0.0)
    } else if desired < current {
        (0.0, BRAKE_GAIN * (current - desired) / current)
    } else {
        (0.0, 0.0)
    };

    VehicleControl {
        throttle: throttle.clamp(0.0, 1.0),
        steer:    steer.clamp(-1.0, 1.0),
        brake:    brake.clamp(0.0, 1.0),
    }
}

/// Walker law: head along `solved` at `preferred_speed`.  A zero solved
/// velocity stops the walker.
pub fn walker_control(solved: Vec2, preferred_speed: f32) -> WalkerControl {
    match solved.try_normalize() {
        Some(dir) => WalkerControl {
            velocity: (dir * preferred_speed).extend(0.0),
            speed:    preferred_speed,
            jump:     false,
        },
        None => WalkerControl::default(),
    }
}
