//! Sidewalk network: closed polygon rings that pedestrians walk around.
//!
//! Every ring is stored once in a flat vertex buffer with a CSR row pointer
//! (`polygon_start`).  Segment `i` of a ring runs from vertex `i` to vertex
//! `(i + 1) % n`, so a ring of `n` vertices has `n` segments and walking in
//! either direction never reaches a dead end.

use crowd_core::{PolygonId, SimRng, Vec2};

use crate::{RouteError, RouteMap, RouteResult};

// ── SidewalkRoutePoint ────────────────────────────────────────────────────────

/// A position on a sidewalk ring plus the direction of travel.
///
/// `offset` is always measured from the segment's first vertex; `reverse`
/// walks against the ring's vertex order.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SidewalkRoutePoint {
    pub polygon: PolygonId,
    pub segment: u16,
    pub offset:  f32,
    pub reverse: bool,
}

// ── SidewalkNetwork ───────────────────────────────────────────────────────────

pub struct SidewalkNetwork {
    /// CSR row pointer into `vertices`.  Length = `polygon_count + 1`.
    pub polygon_start: Vec<u32>,

    /// Concatenated ring vertices (closing vertex not repeated).
    pub vertices: Vec<Vec2>,

    /// Length of the segment starting at each vertex.  Parallel to `vertices`.
    pub segment_length: Vec<f32>,
}

impl SidewalkNetwork {
    /// A network with no polygons.
    pub fn empty() -> Self {
        Self { polygon_start: vec![0], vertices: Vec::new(), segment_length: Vec::new() }
    }

    pub fn polygon_count(&self) -> usize {
        self.polygon_start.len() - 1
    }

    /// Vertices of `polygon` in ring order.
    #[inline]
    pub fn ring(&self, polygon: PolygonId) -> &[Vec2] {
        let start = self.polygon_start[polygon.index()] as usize;
        let end   = self.polygon_start[polygon.index() + 1] as usize;
        &self.vertices[start..end]
    }

    #[inline]
    fn seg_len(&self, polygon: PolygonId, segment: usize) -> f32 {
        self.segment_length[self.polygon_start[polygon.index()] as usize + segment]
    }

    /// Total perimeter of `polygon`.
    pub fn perimeter(&self, polygon: PolygonId) -> f32 {
        let start = self.polygon_start[polygon.index()] as usize;
        let end   = self.polygon_start[polygon.index() + 1] as usize;
        self.segment_length[start..end].iter().sum()
    }
}

impl RouteMap for SidewalkNetwork {
    type Point = SidewalkRoutePoint;

    fn is_empty(&self) -> bool {
        self.polygon_count() == 0
    }

    fn rand_route_point(&self, rng: &mut SimRng) -> Option<SidewalkRoutePoint> {
        if self.is_empty() {
            return None;
        }
        let polygon = PolygonId(rng.gen_range(0..self.polygon_count() as u32));
        let n       = self.ring(polygon).len();
        let segment = rng.gen_range(0..n);
        let offset  = rng.gen_range(0.0..self.seg_len(polygon, segment));
        Some(SidewalkRoutePoint {
            polygon,
            segment: segment as u16,
            offset,
            reverse: rng.gen_bool(0.5),
        })
    }

    fn next_route_points(&self, point: &SidewalkRoutePoint, distance: f32) -> Vec<SidewalkRoutePoint> {
        let n   = self.ring(point.polygon).len();
        let mut seg = point.segment as usize;

        let offset = if point.reverse {
            let mut off = point.offset - distance;
            while off < 0.0 {
                seg = (seg + n - 1) % n;
                off += self.seg_len(point.polygon, seg);
            }
            off
        } else {
            let mut off = point.offset + distance;
            loop {
                let len = self.seg_len(point.polygon, seg);
                if off <= len {
                    break off;
                }
                off -= len;
                seg = (seg + 1) % n;
            }
        };

        vec![SidewalkRoutePoint { segment: seg as u16, offset, ..*point }]
    }

    fn position(&self, point: &SidewalkRoutePoint) -> Vec2 {
        let ring = self.ring(point.polygon);
        let i = point.segment as usize;
        let a = ring[i];
        let b = ring[(i + 1) % ring.len()];
        a + (b - a).normalize_or_zero() * point.offset
    }
}

// ── SidewalkNetworkBuilder ────────────────────────────────────────────────────

/// Collect sidewalk rings, then call [`build`](Self::build).
#[derive(Default)]
pub struct SidewalkNetworkBuilder {
    rings: Vec<Vec<Vec2>>,
}

impl SidewalkNetworkBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a closed ring.  Do not repeat the first vertex at the end.
    pub fn add_polygon(&mut self, vertices: &[Vec2]) -> PolygonId {
        let id = PolygonId(self.rings.len() as u32);
        self.rings.push(vertices.to_vec());
        id
    }

    /// Axis-aligned rectangular ring (the sidewalk around a city block).
    pub fn add_rect(&mut self, min: Vec2, max: Vec2) -> PolygonId {
        self.add_polygon(&[
            min,
            Vec2::new(max.x, min.y),
            max,
            Vec2::new(min.x, max.y),
        ])
    }

    pub fn polygon_count(&self) -> usize { self.rings.len() }

    pub fn build(self) -> RouteResult<SidewalkNetwork> {
        let mut polygon_start  = Vec::with_capacity(self.rings.len() + 1);
        let mut vertices       = Vec::new();
        let mut segment_length = Vec::new();
        polygon_start.push(0u32);

        for (index, ring) in self.rings.into_iter().enumerate() {
            if ring.len() < 3 {
                return Err(RouteError::DegeneratePolygon { index, reason: "fewer than 3 vertices" });
            }
            for (i, &v) in ring.iter().enumerate() {
                let len = v.distance(ring[(i + 1) % ring.len()]);
                if len <= f32::EPSILON {
                    return Err(RouteError::DegeneratePolygon { index, reason: "zero-length segment" });
                }
                segment_length.push(len);
            }
            vertices.extend(ring);
            polygon_start.push(vertices.len() as u32);
        }

        Ok(SidewalkNetwork { polygon_start, vertices, segment_length })
    }
}
