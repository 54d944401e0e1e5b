//! Lane network representation and builder.
//!
//! # Data layout
//!
//! The graph uses **Compressed Sparse Row (CSR)** format twice:
//!
//! ```text
//! out-edges of node n   : EdgeIds node_out_start[n] .. node_out_start[n+1]
//! polyline of edge e    : shape_points[ edge_shape_start[e] .. edge_shape_start[e+1] ]
//! ```
//!
//! Edges are sorted by source node and indexed by `EdgeId`, so iterating a
//! node's successors while extending a path is a contiguous scan.  Each edge
//! carries its own lane count; all lanes of an edge run in the edge's
//! direction, spaced `lane_width` apart and centred on the polyline.

use crowd_core::{EdgeId, NodeId, SimRng, Vec2};

use crate::{RouteError, RouteMap, RouteResult};

// ── LaneRoutePoint ────────────────────────────────────────────────────────────

/// A position on the lane network: `offset` metres into `segment` of `edge`,
/// on lane `lane`.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LaneRoutePoint {
    pub edge:    EdgeId,
    pub lane:    u8,
    pub segment: u16,
    pub offset:  f32,
}

// ── LaneNetwork ───────────────────────────────────────────────────────────────

/// Directed lane graph in CSR format.
///
/// All fields are `pub` for direct indexed access on hot paths.  Do not
/// construct directly; use [`LaneNetworkBuilder`].
pub struct LaneNetwork {
    // ── Node data ─────────────────────────────────────────────────────────
    /// Position of each node.  Indexed by `NodeId`.
    pub node_pos: Vec<Vec2>,

    /// CSR row pointer.  Length = `node_count + 1`.
    pub node_out_start: Vec<u32>,

    // ── Edge data (indexed by EdgeId = position in sorted order) ──────────
    pub edge_from: Vec<NodeId>,
    pub edge_to:   Vec<NodeId>,

    /// Number of lanes on each edge (>= 1).
    pub edge_lanes: Vec<u8>,

    /// Polyline length of each edge in metres.
    pub edge_length: Vec<f32>,

    /// CSR row pointer into `shape_points`.  Length = `edge_count + 1`.
    pub edge_shape_start: Vec<u32>,

    /// Concatenated edge polylines (each has at least two points).
    pub shape_points: Vec<Vec2>,

    /// Lateral distance between adjacent lane centres.
    pub lane_width: f32,
}

impl LaneNetwork {
    /// Construct an empty network with no nodes or edges.
    pub fn empty() -> Self {
        Self {
            node_pos:         Vec::new(),
            node_out_start:   vec![0],
            edge_from:        Vec::new(),
            edge_to:          Vec::new(),
            edge_lanes:       Vec::new(),
            edge_length:      Vec::new(),
            edge_shape_start: vec![0],
            shape_points:     Vec::new(),
            lane_width:       LaneNetworkBuilder::DEFAULT_LANE_WIDTH,
        }
    }

    // ── Graph dimensions ──────────────────────────────────────────────────

    pub fn node_count(&self) -> usize {
        self.node_pos.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_to.len()
    }

    // ── Graph traversal ───────────────────────────────────────────────────

    /// Iterator over the `EdgeId`s of all outgoing edges from `node`.
    #[inline]
    pub fn out_edges(&self, node: NodeId) -> impl Iterator<Item = EdgeId> + '_ {
        let start = self.node_out_start[node.index()] as usize;
        let end   = self.node_out_start[node.index() + 1] as usize;
        (start..end).map(|i| EdgeId(i as u32))
    }

    /// Out-degree of `node`.
    #[inline]
    pub fn out_degree(&self, node: NodeId) -> usize {
        let start = self.node_out_start[node.index()] as usize;
        let end   = self.node_out_start[node.index() + 1] as usize;
        end - start
    }

    /// Polyline of `edge`, from its source end to its destination end.
    #[inline]
    pub fn edge_shape(&self, edge: EdgeId) -> &[Vec2] {
        let start = self.edge_shape_start[edge.index()] as usize;
        let end   = self.edge_shape_start[edge.index() + 1] as usize;
        &self.shape_points[start..end]
    }

    /// Lateral offset of `lane`'s centre to the right of the edge polyline.
    #[inline]
    fn lane_shift(&self, edge: EdgeId, lane: u8) -> f32 {
        let lanes = self.edge_lanes[edge.index()] as f32;
        (lane as f32 + 0.5 - lanes * 0.5) * self.lane_width
    }

    /// Segment index and in-segment offset for arc length `s` along `edge`.
    fn locate(&self, edge: EdgeId, s: f32) -> (u16, f32) {
        let shape = self.edge_shape(edge);
        let mut remaining = s.max(0.0);
        let last = shape.len() - 2;
        for seg in 0..last {
            let len = shape[seg].distance(shape[seg + 1]);
            if remaining <= len {
                return (seg as u16, remaining);
            }
            remaining -= len;
        }
        let len = shape[last].distance(shape[last + 1]);
        (last as u16, remaining.min(len))
    }

    /// Walk `distance` metres from (`edge`, `segment`, `offset`), branching
    /// into every non-reversing successor edge at the end of `edge`.
    fn advance(
        &self,
        edge:     EdgeId,
        lane:     u8,
        segment:  usize,
        offset:   f32,
        distance: f32,
        out:      &mut Vec<LaneRoutePoint>,
    ) {
        let shape = self.edge_shape(edge);
        let mut seg = segment;
        let mut off = offset + distance;
        loop {
            let len = shape[seg].distance(shape[seg + 1]);
            if off <= len {
                out.push(LaneRoutePoint { edge, lane, segment: seg as u16, offset: off });
                return;
            }
            off -= len;
            seg += 1;
            if seg + 1 >= shape.len() {
                break;
            }
        }

        // `off` metres past the end of `edge`.
        let from = self.edge_from[edge.index()];
        let to   = self.edge_to[edge.index()];
        for next in self.out_edges(to) {
            if self.edge_to[next.index()] == from {
                continue; // no U-turns
            }
            let next_lane = lane.min(self.edge_lanes[next.index()] - 1);
            self.advance(next, next_lane, 0, 0.0, off, out);
        }
    }
}

impl RouteMap for LaneNetwork {
    type Point = LaneRoutePoint;

    fn is_empty(&self) -> bool {
        self.edge_count() == 0
    }

    fn rand_route_point(&self, rng: &mut SimRng) -> Option<LaneRoutePoint> {
        if self.is_empty() {
            return None;
        }
        let edge = EdgeId(rng.gen_range(0..self.edge_count() as u32));
        let lane = rng.gen_range(0..self.edge_lanes[edge.index()]);
        let s    = rng.gen_range(0.0..self.edge_length[edge.index()]);
        let (segment, offset) = self.locate(edge, s);
        Some(LaneRoutePoint { edge, lane, segment, offset })
    }

    fn next_route_points(&self, point: &LaneRoutePoint, distance: f32) -> Vec<LaneRoutePoint> {
        let mut out = Vec::new();
        self.advance(
            point.edge,
            point.lane,
            point.segment as usize,
            point.offset,
            distance,
            &mut out,
        );
        out
    }

    fn position(&self, point: &LaneRoutePoint) -> Vec2 {
        let shape = self.edge_shape(point.edge);
        let a = shape[point.segment as usize];
        let b = shape[point.segment as usize + 1];
        let dir   = (b - a).normalize_or_zero();
        let right = -dir.perp();
        a + dir * point.offset + right * self.lane_shift(point.edge, point.lane)
    }
}

// ── LaneNetworkBuilder ────────────────────────────────────────────────────────

/// Construct a [`LaneNetwork`] incrementally, then call [`build`](Self::build).
///
/// # Example
///
/// ```
/// use crowd_core::Vec2;
/// use crowd_route::LaneNetworkBuilder;
///
/// let mut b = LaneNetworkBuilder::new();
/// let a = b.add_node(Vec2::new(0.0, 0.0));
/// let c = b.add_node(Vec2::new(100.0, 0.0));
/// b.add_road(a, c, 1); // one lane each way
/// let net = b.build().unwrap();
/// assert_eq!(net.node_count(), 2);
/// assert_eq!(net.edge_count(), 2);
/// ```
pub struct LaneNetworkBuilder {
    nodes:      Vec<Vec2>,
    raw_edges:  Vec<RawEdge>,
    lane_width: f32,
}

struct RawEdge {
    from:        NodeId,
    to:          NodeId,
    lanes:       u8,
    via:         Vec<Vec2>,
    /// Shift of the whole polyline to the right of `from → to` (two-way roads).
    right_shift: f32,
}

impl LaneNetworkBuilder {
    /// Default lane width, metres.
    pub const DEFAULT_LANE_WIDTH: f32 = 3.5;

    pub fn new() -> Self {
        Self {
            nodes:      Vec::new(),
            raw_edges:  Vec::new(),
            lane_width: Self::DEFAULT_LANE_WIDTH,
        }
    }

    /// Override the lane width (must be set before adding roads).
    pub fn lane_width(mut self, width: f32) -> Self {
        self.lane_width = width;
        self
    }

    /// Add a node and return its `NodeId` (sequential from 0).
    pub fn add_node(&mut self, pos: Vec2) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(pos);
        id
    }

    /// Add a straight **directed** edge whose centreline runs through both
    /// node positions.
    pub fn add_edge(&mut self, from: NodeId, to: NodeId, lanes: u8) {
        self.add_edge_via(from, to, lanes, &[]);
    }

    /// Add a **directed** edge bending through the interior points `via`.
    pub fn add_edge_via(&mut self, from: NodeId, to: NodeId, lanes: u8, via: &[Vec2]) {
        self.raw_edges.push(RawEdge { from, to, lanes, via: via.to_vec(), right_shift: 0.0 });
    }

    /// Convenience: a straight two-way road between `a` and `b` with `lanes`
    /// lanes per direction.  Each direction is shifted to its own right so
    /// opposing traffic does not share a centreline.
    pub fn add_road(&mut self, a: NodeId, b: NodeId, lanes: u8) {
        let shift = lanes as f32 * self.lane_width * 0.5;
        for (from, to) in [(a, b), (b, a)] {
            self.raw_edges.push(RawEdge { from, to, lanes, via: Vec::new(), right_shift: shift });
        }
    }

    pub fn node_count(&self) -> usize { self.nodes.len() }
    pub fn edge_count(&self) -> usize { self.raw_edges.len() }

    /// Consume the builder and produce a [`LaneNetwork`].
    ///
    /// Fails on edges referencing unknown nodes, edges without lanes, and
    /// polylines containing a zero-length segment.
    pub fn build(self) -> RouteResult<LaneNetwork> {
        let node_count = self.nodes.len();

        for e in &self.raw_edges {
            for n in [e.from, e.to] {
                if n.index() >= node_count {
                    return Err(RouteError::NodeNotFound(n));
                }
            }
            if e.lanes == 0 {
                return Err(RouteError::NoLanes { from: e.from, to: e.to });
            }
        }

        // Stable sort keeps insertion order among a node's out-edges.
        let mut raw = self.raw_edges;
        raw.sort_by_key(|e| e.from.0);

        let mut edge_shape_start = Vec::with_capacity(raw.len() + 1);
        let mut shape_points     = Vec::new();
        let mut edge_length      = Vec::with_capacity(raw.len());
        edge_shape_start.push(0u32);

        for e in &raw {
            let a = self.nodes[e.from.index()];
            let b = self.nodes[e.to.index()];
            let shift = if e.right_shift != 0.0 {
                -(b - a).normalize_or_zero().perp() * e.right_shift
            } else {
                Vec2::ZERO
            };

            let start = shape_points.len();
            shape_points.push(a + shift);
            shape_points.extend(e.via.iter().map(|&p| p + shift));
            shape_points.push(b + shift);

            let shape = &shape_points[start..];
            let mut length = 0.0;
            for pair in shape.windows(2) {
                let d = pair[0].distance(pair[1]);
                if d <= f32::EPSILON {
                    return Err(RouteError::DegenerateEdge { from: e.from, to: e.to });
                }
                length += d;
            }
            edge_length.push(length);
            edge_shape_start.push(shape_points.len() as u32);
        }

        // Build CSR row pointer (node_out_start).
        let mut node_out_start = vec![0u32; node_count + 1];
        for e in &raw {
            node_out_start[e.from.index() + 1] += 1;
        }
        for i in 1..=node_count {
            node_out_start[i] += node_out_start[i - 1];
        }
        debug_assert_eq!(node_out_start[node_count] as usize, raw.len());

        Ok(LaneNetwork {
            node_pos:   self.nodes,
            node_out_start,
            edge_from:  raw.iter().map(|e| e.from).collect(),
            edge_to:    raw.iter().map(|e| e.to).collect(),
            edge_lanes: raw.iter().map(|e| e.lanes).collect(),
            edge_length,
            edge_shape_start,
            shape_points,
            lane_width: self.lane_width,
        })
    }
}

impl Default for LaneNetworkBuilder {
    fn default() -> Self {
        Self::new()
    }
}
