//! ORCA half-planes and the linear programs that pick a velocity inside them.
//!
//! A [`Line`] is a directed line in velocity space; the permitted half-plane
//! lies to its **left**.  `det(direction, point - v) > 0` therefore means `v`
//! violates the constraint.

use crowd_core::Vec2;

/// Below this, two constraint lines are treated as parallel and three hull
/// points as collinear.
const EPSILON: f32 = 1e-5;

/// Directed constraint line in velocity space.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Line {
    pub point:     Vec2,
    /// Unit direction.
    pub direction: Vec2,
}

/// Kinematic snapshot of one footprint, as seen by the constraint builder.
#[derive(Copy, Clone, Debug)]
pub struct Body {
    /// Oriented footprint rectangle in world coordinates.
    pub corners:  [Vec2; 4],
    pub velocity: Vec2,
}

// ── Obstacle geometry ─────────────────────────────────────────────────────────

/// Convex hull of `points`, counter-clockwise, collinear points dropped.
pub fn convex_hull(mut points: Vec<Vec2>) -> Vec<Vec2> {
    points.sort_by(|a, b| a.x.total_cmp(&b.x).then(a.y.total_cmp(&b.y)));
    points.dedup();
    if points.len() < 3 {
        return points;
    }

    let mut lower = Vec::with_capacity(points.len());
    for &p in &points {
        push_convex(&mut lower, p);
    }
    let mut upper = Vec::with_capacity(points.len());
    for &p in points.iter().rev() {
        push_convex(&mut upper, p);
    }
    // Each chain ends where the other begins.
    lower.pop();
    upper.pop();
    lower.extend(upper);
    lower
}

/// Monotone-chain step: drop trailing points that would make a right turn.
fn push_convex(chain: &mut Vec<Vec2>, p: Vec2) {
    while chain.len() >= 2 {
        let (a, b) = (chain[chain.len() - 2], chain[chain.len() - 1]);
        if (b - a).det(p - a) > EPSILON {
            break;
        }
        chain.pop();
    }
    chain.push(p);
}

/// Displacements of `agent` that make its footprint intersect `other`'s:
/// the Minkowski sum of `other` and the reflected `agent`, as a convex
/// counter-clockwise polygon.
pub fn collision_polygon(agent: &Body, other: &Body) -> Vec<Vec2> {
    let mut points = Vec::with_capacity(16);
    for b in other.corners {
        for a in agent.corners {
            points.push(b - a);
        }
    }
    convex_hull(points)
}

/// One piece of an obstacle boundary: a segment, or a ray when `length` is
/// infinite.
#[derive(Copy, Clone, Debug)]
struct Edge {
    start:  Vec2,
    /// Unit direction.
    dir:    Vec2,
    length: f32,
    /// Unit normal pointing out of the obstacle.
    normal: Vec2,
}

impl Edge {
    /// Edge of a counter-clockwise polygon; the outside is on its right.
    fn segment(a: Vec2, b: Vec2) -> Option<Edge> {
        let dir = (b - a).try_normalize()?;
        Some(Edge { start: a, dir, length: a.distance(b), normal: Vec2::new(dir.y, -dir.x) })
    }

    fn ray(start: Vec2, dir: Vec2, normal: Vec2) -> Edge {
        Edge { start, dir, length: f32::INFINITY, normal }
    }

    fn closest(&self, v: Vec2) -> Vec2 {
        self.start + self.dir * (v - self.start).dot(self.dir).clamp(0.0, self.length)
    }
}

/// Boundary of the obstacle `polygon` scaled by `scale`.
fn polygon_edges(polygon: &[Vec2], scale: f32) -> Vec<Edge> {
    let n = polygon.len();
    (0..n)
        .filter_map(|i| Edge::segment(polygon[i] * scale, polygon[(i + 1) % n] * scale))
        .collect()
}

/// Boundary of the velocity obstacle of `polygon` truncated at `1 / inv_horizon`:
/// the two legs of the cone from the origin, joined by the side of the
/// scaled polygon that faces the origin.  `None` when the origin lies inside
/// the polygon.
fn cone_edges(polygon: &[Vec2], inv_horizon: f32) -> Option<Vec<Edge>> {
    let n = polygon.len();
    // Edge i faces the origin when the origin lies on its outer side.
    let faces_origin = |i: usize| polygon[i].det(polygon[(i + 1) % n]) < 0.0;
    let first = (0..n).find(|&i| faces_origin(i) && !faces_origin((i + n - 1) % n))?;

    let mut chain = vec![polygon[first]];
    let mut i = first;
    while faces_origin(i) && chain.len() <= n {
        i = (i + 1) % n;
        chain.push(polygon[i]);
    }

    // Walking counter-clockwise around the polygon, the facing side runs
    // clockwise as seen from the origin: `left` is the first tangent vertex.
    let left  = chain[0].try_normalize()?;
    let right = chain[chain.len() - 1].try_normalize()?;

    let mut edges = Vec::with_capacity(chain.len() + 1);
    edges.push(Edge::ray(chain[0] * inv_horizon, left, left.perp()));
    edges.extend(chain.windows(2).filter_map(|w| Edge::segment(w[0] * inv_horizon, w[1] * inv_horizon)));
    edges.push(Edge::ray(
        chain[chain.len() - 1] * inv_horizon,
        right,
        Vec2::new(right.y, -right.x),
    ));
    Some(edges)
}

/// Smallest change `u` that moves `v` onto the boundary of the convex region
/// bounded by `edges`, and the outward normal there.
fn escape(edges: &[Edge], v: Vec2) -> Option<(Vec2, Vec2)> {
    let inside = edges.iter().all(|e| (v - e.start).dot(e.normal) <= 0.0);
    let (q, edge) = edges
        .iter()
        .map(|e| (e.closest(v), e))
        .min_by(|a, b| (a.0 - v).length_sq().total_cmp(&(b.0 - v).length_sq()))?;
    let normal = if inside {
        edge.normal
    } else {
        (v - q).try_normalize().unwrap_or(edge.normal)
    };
    Some((q - v, normal))
}

// ── Constraint construction ───────────────────────────────────────────────────

/// The ORCA half-plane `agent` must respect with respect to `other`.
///
/// The velocity obstacle is built from the two oriented footprints, so boxes
/// that pass side by side without touching do not constrain each other.
/// `agent` takes half of the velocity change needed to leave the truncated
/// obstacle; `other` is assumed to take the other half.  When the footprints
/// already intersect the obstacle is truncated at `time_step` instead of
/// `time_horizon` so the pair separates within one step.
///
/// `None` when either footprint is degenerate.
pub fn orca_line(agent: &Body, other: &Body, time_horizon: f32, time_step: f32) -> Option<Line> {
    let polygon = collision_polygon(agent, other);
    if polygon.len() < 3 {
        return None;
    }
    let rel_vel = agent.velocity - other.velocity;

    let edges = match cone_edges(&polygon, 1.0 / time_horizon) {
        Some(edges) => edges,
        // Already intersecting.
        None => polygon_edges(&polygon, 1.0 / time_step),
    };
    let (u, normal) = escape(&edges, rel_vel)?;

    Some(Line { point: agent.velocity + u * 0.5, direction: Vec2::new(normal.y, -normal.x) })
}

// ── Linear programs ───────────────────────────────────────────────────────────

/// Optimise along line `line_no` subject to lines `0..line_no` and the speed
/// circle.  Returns `None` when the feasible interval on the line is empty.
fn linear_program1(
    lines:         &[Line],
    line_no:       usize,
    radius:        f32,
    opt_velocity:  Vec2,
    direction_opt: bool,
) -> Option<Vec2> {
    let line = lines[line_no];
    let dot = line.point.dot(line.direction);
    let discriminant = dot * dot + radius * radius - line.point.length_sq();
    if discriminant < 0.0 {
        // Max-speed circle fully invalidates this line.
        return None;
    }

    let sqrt_disc = discriminant.sqrt();
    let mut t_left  = -dot - sqrt_disc;
    let mut t_right = -dot + sqrt_disc;

    for prev in &lines[..line_no] {
        let denominator = line.direction.det(prev.direction);
        let numerator   = prev.direction.det(line.point - prev.point);

        if denominator.abs() <= EPSILON {
            if numerator < 0.0 {
                return None;
            }
            continue;
        }

        let t = numerator / denominator;
        if denominator >= 0.0 {
            t_right = t_right.min(t);
        } else {
            t_left = t_left.max(t);
        }
        if t_left > t_right {
            return None;
        }
    }

    let t = if direction_opt {
        if opt_velocity.dot(line.direction) > 0.0 { t_right } else { t_left }
    } else {
        line.direction.dot(opt_velocity - line.point).max(t_left).min(t_right)
    };
    Some(line.point + line.direction * t)
}

/// Incremental 2-D LP: the velocity closest to `opt_velocity` (or furthest
/// along it, with `direction_opt`) inside every line and the speed circle.
///
/// Returns the index of the first line that could not be satisfied
/// (`lines.len()` on success) and the best velocity found up to that point.
pub fn linear_program2(
    lines:         &[Line],
    radius:        f32,
    opt_velocity:  Vec2,
    direction_opt: bool,
) -> (usize, Vec2) {
    let mut result = if direction_opt {
        // `opt_velocity` is a unit direction here.
        opt_velocity * radius
    } else if opt_velocity.length_sq() > radius * radius {
        opt_velocity.normalize_or_zero() * radius
    } else {
        opt_velocity
    };

    for (i, line) in lines.iter().enumerate() {
        if line.direction.det(line.point - result) > 0.0 {
            match linear_program1(lines, i, radius, opt_velocity, direction_opt) {
                Some(v) => result = v,
                None    => return (i, result),
            }
        }
    }
    (lines.len(), result)
}

/// 3-D LP fallback for an infeasible constraint set: minimise the largest
/// violation, starting from line `begin_line`.
pub fn linear_program3(lines: &[Line], begin_line: usize, radius: f32, mut result: Vec2) -> Vec2 {
    let mut distance = 0.0_f32;

    for i in begin_line..lines.len() {
        let line = lines[i];
        if line.direction.det(line.point - result) <= distance {
            continue;
        }

        // Project the earlier lines onto line i.
        let mut proj_lines = Vec::with_capacity(i);
        for prev in &lines[..i] {
            let determinant = line.direction.det(prev.direction);
            let point = if determinant.abs() <= EPSILON {
                if line.direction.dot(prev.direction) > 0.0 {
                    // Same direction.
                    continue;
                }
                (line.point + prev.point) * 0.5
            } else {
                line.point
                    + line.direction * (prev.direction.det(line.point - prev.point) / determinant)
            };
            proj_lines.push(Line {
                point,
                direction: (prev.direction - line.direction).normalize_or_zero(),
            });
        }

        let (fail, candidate) =
            linear_program2(&proj_lines, radius, Vec2::new(-line.direction.y, line.direction.x), true);
        // Failure here can only come from rounding; keep the previous result.
        if fail == proj_lines.len() {
            result = candidate;
        }
        distance = line.direction.det(line.point - result);
    }
    result
}

/// Velocity closest to `pref_velocity` satisfying every line, capped at
/// `max_speed`.  Falls back to the least-violating velocity when the lines
/// have no common feasible point.
pub fn solve(lines: &[Line], max_speed: f32, pref_velocity: Vec2) -> Vec2 {
    let (fail, result) = linear_program2(lines, max_speed, pref_velocity, false);
    if fail < lines.len() {
        linear_program3(lines, fail, max_speed, result)
    } else {
        result
    }
}
