//! Synthetic town: a square street grid with a sidewalk ring around every
//! block.

use crowd_core::Vec2;
use crowd_route::{
    LaneNetwork, LaneNetworkBuilder, RouteResult, SidewalkNetwork, SidewalkNetworkBuilder,
};

/// Intersections per side.
pub const GRID: usize = 4;

/// Distance between neighbouring intersections, metres.
pub const SPACING: f32 = 60.0;

/// Gap between a street centreline and the sidewalk ring of the block.
const SIDEWALK_INSET: f32 = 6.0;

fn origin() -> f32 {
    -SPACING * (GRID - 1) as f32 * 0.5
}

/// Two-way, one-lane-per-direction streets on a `GRID × GRID` lattice
/// centred on the origin.
pub fn build_streets() -> RouteResult<LaneNetwork> {
    let mut b = LaneNetworkBuilder::new();
    let o = origin();

    let mut nodes = Vec::with_capacity(GRID * GRID);
    for j in 0..GRID {
        for i in 0..GRID {
            nodes.push(b.add_node(Vec2::new(o + i as f32 * SPACING, o + j as f32 * SPACING)));
        }
    }
    let at = |i: usize, j: usize| nodes[j * GRID + i];

    for j in 0..GRID {
        for i in 0..GRID {
            if i + 1 < GRID {
                b.add_road(at(i, j), at(i + 1, j), 1);
            }
            if j + 1 < GRID {
                b.add_road(at(i, j), at(i, j + 1), 1);
            }
        }
    }
    b.build()
}

/// One sidewalk ring inside every block.
pub fn build_sidewalks() -> RouteResult<SidewalkNetwork> {
    let mut b = SidewalkNetworkBuilder::new();
    let o = origin();
    for j in 0..GRID - 1 {
        for i in 0..GRID - 1 {
            let min = Vec2::new(o + i as f32 * SPACING, o + j as f32 * SPACING);
            let max = Vec2::new(min.x + SPACING, min.y + SPACING);
            b.add_rect(
                Vec2::new(min.x + SIDEWALK_INSET, min.y + SIDEWALK_INSET),
                Vec2::new(max.x - SIDEWALK_INSET, max.y - SIDEWALK_INSET),
            );
        }
    }
    b.build()
}

/// Half the side length of the street grid.
pub fn half_extent() -> f32 {
    -origin()
}
