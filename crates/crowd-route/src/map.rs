//! The `RouteMap` trait: what a [`Path`][crate::Path] needs from a network.

use crowd_core::{SimRng, Vec2};

/// A topological network that can hand out route points.
///
/// Implemented by [`LaneNetwork`][crate::LaneNetwork] for vehicles and
/// [`SidewalkNetwork`][crate::SidewalkNetwork] for pedestrians.  Maps are
/// immutable once built and shared between paths behind an `Arc`.
pub trait RouteMap: Send + Sync + 'static {
    /// A position along the network (lane/segment/offset, polygon/segment/…).
    type Point: Copy + PartialEq + std::fmt::Debug + Send + Sync;

    /// `true` if the map holds nothing a route point could lie on.
    fn is_empty(&self) -> bool;

    /// A uniformly drawn route point, or `None` for an empty map.
    fn rand_route_point(&self, rng: &mut SimRng) -> Option<Self::Point>;

    /// Every route point `distance` metres further along the network from
    /// `point`.  Several results mean a branch; an empty result is a dead end.
    fn next_route_points(&self, point: &Self::Point, distance: f32) -> Vec<Self::Point>;

    /// World-frame position of `point`.
    fn position(&self, point: &Self::Point) -> Vec2;
}
