//! Actor state as reported by the world, and spawnable blueprints.

use crowd_core::{AgentKind, Transform, Vec2, Vec3};

/// Oriented bounding box in the actor's local frame.
///
/// `location` is the box centre relative to the actor origin (x forward,
/// y left, z up); `extent` holds the half-sizes along those axes.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BoundingBox {
    pub location: Vec3,
    pub extent:   Vec3,
}

impl BoundingBox {
    pub fn new(location: Vec3, extent: Vec3) -> Self {
        Self { location, extent }
    }

    /// Radius of the circle circumscribing the box's ground footprint.
    pub fn footprint_radius(&self) -> f32 {
        Vec2::new(self.extent.x, self.extent.y).length()
    }
}

/// Snapshot of one actor at the end of the last world tick.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActorState {
    pub location:     Vec3,
    pub velocity:     Vec3,
    pub yaw_deg:      f32,
    pub bounding_box: BoundingBox,
}

impl ActorState {
    /// Ground-plane position.
    #[inline]
    pub fn position(&self) -> Vec2 {
        self.location.truncate()
    }

    /// Ground-plane velocity.
    #[inline]
    pub fn velocity_2d(&self) -> Vec2 {
        self.velocity.truncate()
    }

    /// Unit forward vector in the ground plane.
    #[inline]
    pub fn forward(&self) -> Vec2 {
        Vec2::from_yaw_deg(self.yaw_deg)
    }

    pub fn transform(&self) -> Transform {
        Transform::new(self.location, self.yaw_deg)
    }
}

/// A spawnable actor type: a name, its kind, and its physical footprint.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Blueprint {
    pub id:           String,
    pub kind:         AgentKind,
    pub bounding_box: BoundingBox,
}

impl Blueprint {
    pub fn new(id: impl Into<String>, kind: AgentKind, bounding_box: BoundingBox) -> Self {
        Self { id: id.into(), kind, bounding_box }
    }

    /// A small default library per kind, used by the in-process world.
    pub fn defaults(kind: AgentKind) -> Vec<Blueprint> {
        let bb = |x: f32, y: f32, z: f32, ox: f32| {
            BoundingBox::new(Vec3::new(ox, 0.0, z), Vec3::new(x, y, z))
        };
        match kind {
            AgentKind::Vehicle => vec![
                Blueprint::new("vehicle.sedan",     kind, bb(2.40, 1.00, 0.75, 0.10)),
                Blueprint::new("vehicle.hatchback", kind, bb(1.90, 0.90, 0.75, 0.05)),
                Blueprint::new("vehicle.van",       kind, bb(2.60, 1.10, 1.10, 0.00)),
            ],
            AgentKind::Pedestrian => vec![
                Blueprint::new("walker.adult", kind, bb(0.23, 0.23, 0.90, 0.0)),
                Blueprint::new("walker.child", kind, bb(0.18, 0.18, 0.60, 0.0)),
            ],
        }
    }
}
