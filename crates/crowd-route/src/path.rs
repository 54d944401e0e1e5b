//! `Path<M>`: an owned, resizable run of evenly spaced route points.
//!
//! A path starts at one route point and is extended by repeatedly asking the
//! map for the points `interval` metres further on, picking one successor at
//! random at every branch.  Agents consume the path from the front with
//! [`Path::cut`] and top it up again with [`Path::resize`].

use std::sync::Arc;

use crowd_core::{SimRng, Vec2};

use crate::RouteMap;

pub struct Path<M: RouteMap> {
    map:          Arc<M>,
    route_points: Vec<M::Point>,
    interval:     f32,
    /// Branch choices while extending.  Owned so each path is reproducible
    /// on its own.
    rng:          SimRng,
}

impl<M: RouteMap> Path<M> {
    /// Draw a random start point on `map` and extend to `min_points`.
    ///
    /// Returns `None` for an empty map or when the start leads into a dead
    /// end before `min_points` points are collected.
    pub fn random(map: Arc<M>, min_points: usize, interval: f32, mut rng: SimRng) -> Option<Self> {
        let start = map.rand_route_point(&mut rng)?;
        Self::starting_at(map, start, min_points, interval, rng)
    }

    /// Extend a path from `start` to `min_points`; `None` on a dead end.
    pub fn starting_at(
        map:        Arc<M>,
        start:      M::Point,
        min_points: usize,
        interval:   f32,
        rng:        SimRng,
    ) -> Option<Self> {
        let mut path = Self { map, route_points: vec![start], interval, rng };
        path.resize(min_points).then_some(path)
    }

    /// Extend the path until it holds at least `min_points` points.
    ///
    /// Returns `false` when the network offers no continuation.  Points
    /// appended before the dead end was hit are kept.
    pub fn resize(&mut self, min_points: usize) -> bool {
        while self.route_points.len() < min_points {
            let Some(last) = self.route_points.last().copied() else {
                return false;
            };
            let next = self.map.next_route_points(&last, self.interval);
            match self.rng.choose(&next) {
                Some(&p) => self.route_points.push(p),
                None     => return false,
            }
        }
        true
    }

    /// Drop the points the agent at `position` has already passed.
    ///
    /// Only the first half of the path is searched, so a path that loops
    /// back near its start is never cut past its midpoint.  Every point
    /// before the nearest one is dropped, and the nearest one too once the
    /// agent is within half an interval of it.
    pub fn cut(&mut self, position: Vec2) {
        let half = self.route_points.len() / 2;
        let nearest = self.route_points[..half]
            .iter()
            .map(|p| self.map.position(p).distance(position))
            .enumerate()
            .min_by(|a, b| a.1.total_cmp(&b.1));

        if let Some((i, d)) = nearest {
            let cut_index = if d <= self.interval * 0.5 { i + 1 } else { i };
            self.route_points.drain(..cut_index);
        }
    }

    /// World position of point `i`.
    pub fn get_position(&self, i: usize) -> Option<Vec2> {
        self.route_points.get(i).map(|p| self.map.position(p))
    }

    /// Heading in degrees at point `i`: towards point `i + 1`, or from point
    /// `i - 1` for the last point.  A single-point path has yaw 0.
    pub fn get_yaw(&self, i: usize) -> Option<f32> {
        let n = self.route_points.len();
        if i >= n {
            return None;
        }
        let (a, b) = if i + 1 < n {
            (i, i + 1)
        } else if i > 0 {
            (i - 1, i)
        } else {
            return Some(0.0);
        };
        let d = self.map.position(&self.route_points[b]) - self.map.position(&self.route_points[a]);
        Some(if d.length_sq() > 0.0 { d.yaw_deg() } else { 0.0 })
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    pub fn route_points(&self) -> &[M::Point] { &self.route_points }
    pub fn head(&self) -> Option<&M::Point>   { self.route_points.first() }
    pub fn len(&self) -> usize                { self.route_points.len() }
    pub fn is_empty(&self) -> bool            { self.route_points.is_empty() }
    pub fn interval(&self) -> f32             { self.interval }
    pub fn map(&self) -> &Arc<M>              { &self.map }
}

impl<M: RouteMap> std::fmt::Debug for Path<M> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Path")
            .field("len", &self.route_points.len())
            .field("interval", &self.interval)
            .field("head", &self.route_points.first())
            .finish()
    }
}
