//! Footprint geometry.
//!
//! Corners are returned counter-clockwise starting at the rear-left corner
//! (rear-left, rear-right, front-right, front-left) in the actor's heading
//! frame, so the polygon winding handed to the solver never flips.

use crowd_core::Vec2;

/// Half-extent of every pedestrian's square footprint, metres.
pub const PEDESTRIAN_HALF_EXTENT: f32 = 0.23;

/// Footprint centre: `position` plus the box `offset` (actor frame) rotated
/// into the world by `forward`.
pub fn footprint_centre(position: Vec2, forward: Vec2, offset: Vec2) -> Vec2 {
    let left = forward.perp();
    position + forward * offset.x + left * offset.y
}

/// The four corners of a `half_extents.x` (along `forward`) by
/// `half_extents.y` (across) rectangle centred on `centre`.
pub fn footprint_corners(centre: Vec2, forward: Vec2, half_extents: Vec2) -> [Vec2; 4] {
    let along  = forward * half_extents.x;
    let across = forward.perp() * half_extents.y;
    [
        centre - along + across,
        centre - along - across,
        centre + along - across,
        centre + along + across,
    ]
}
