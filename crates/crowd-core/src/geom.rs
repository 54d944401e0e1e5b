//! Planar geometry used by every layer of the controller.
//!
//! All coordinates are metres in the world frame and use `f32`, which gives
//! millimetre precision over the few-kilometre extent of a simulated town.
//! Angles cross crate boundaries in **degrees** (the world's transform
//! convention) and are converted to radians only inside computations.

use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub, SubAssign};

// ── Vec2 ──────────────────────────────────────────────────────────────────────

/// A 2-D vector / point in the ground plane.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Unit vector pointing along `yaw_deg` (0° = +x, counter-clockwise positive).
    #[inline]
    pub fn from_yaw_deg(yaw_deg: f32) -> Self {
        let r = yaw_deg.to_radians();
        Self::new(r.cos(), r.sin())
    }

    #[inline]
    pub fn dot(self, other: Vec2) -> f32 {
        self.x * other.x + self.y * other.y
    }

    /// 2-D cross product (z component of the 3-D cross product).
    #[inline]
    pub fn det(self, other: Vec2) -> f32 {
        self.x * other.y - self.y * other.x
    }

    #[inline]
    pub fn length_sq(self) -> f32 {
        self.dot(self)
    }

    #[inline]
    pub fn length(self) -> f32 {
        self.length_sq().sqrt()
    }

    #[inline]
    pub fn distance(self, other: Vec2) -> f32 {
        (self - other).length()
    }

    /// Unit vector in the same direction, or `None` for a (near-)zero vector.
    #[inline]
    pub fn try_normalize(self) -> Option<Vec2> {
        let len = self.length();
        (len > f32::EPSILON).then(|| self / len)
    }

    /// Unit vector in the same direction; the zero vector maps to itself.
    #[inline]
    pub fn normalize_or_zero(self) -> Vec2 {
        self.try_normalize().unwrap_or(Vec2::ZERO)
    }

    /// Rotate counter-clockwise by `radians`.
    #[inline]
    pub fn rotate(self, radians: f32) -> Vec2 {
        let (s, c) = radians.sin_cos();
        Vec2::new(self.x * c - self.y * s, self.x * s + self.y * c)
    }

    /// Counter-clockwise perpendicular (`rotate(90°)` without trig).
    #[inline]
    pub fn perp(self) -> Vec2 {
        Vec2::new(-self.y, self.x)
    }

    /// Heading of this vector in degrees, in `(-180, 180]`.
    #[inline]
    pub fn yaw_deg(self) -> f32 {
        self.y.atan2(self.x).to_degrees()
    }

    /// Extend into 3-D with the given `z`.
    #[inline]
    pub fn extend(self, z: f32) -> Vec3 {
        Vec3::new(self.x, self.y, z)
    }
}

impl Add for Vec2 {
    type Output = Vec2;
    #[inline]
    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Vec2 {
    #[inline]
    fn add_assign(&mut self, rhs: Vec2) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Vec2 {
    type Output = Vec2;
    #[inline]
    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl SubAssign for Vec2 {
    #[inline]
    fn sub_assign(&mut self, rhs: Vec2) {
        self.x -= rhs.x;
        self.y -= rhs.y;
    }
}

impl Mul<f32> for Vec2 {
    type Output = Vec2;
    #[inline]
    fn mul(self, rhs: f32) -> Vec2 {
        Vec2::new(self.x * rhs, self.y * rhs)
    }
}

impl Mul<Vec2> for f32 {
    type Output = Vec2;
    #[inline]
    fn mul(self, rhs: Vec2) -> Vec2 {
        rhs * self
    }
}

impl Div<f32> for Vec2 {
    type Output = Vec2;
    #[inline]
    fn div(self, rhs: f32) -> Vec2 {
        Vec2::new(self.x / rhs, self.y / rhs)
    }
}

impl Neg for Vec2 {
    type Output = Vec2;
    #[inline]
    fn neg(self) -> Vec2 {
        Vec2::new(-self.x, -self.y)
    }
}

impl std::fmt::Display for Vec2 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.3}, {:.3})", self.x, self.y)
    }
}

// ── Vec3 ──────────────────────────────────────────────────────────────────────

/// A 3-D vector.  Only the world contract needs the vertical axis (spawn
/// height, elevation floor, walker commands); the controller works in 2-D.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const ZERO: Vec3 = Vec3 { x: 0.0, y: 0.0, z: 0.0 };

    #[inline]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Drop the vertical component.
    #[inline]
    pub fn truncate(self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }
}

// ── Transform ────────────────────────────────────────────────────────────────

/// Actor placement: a location and a yaw (degrees).  Pitch and roll are
/// always zero for crowd agents.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Transform {
    pub location: Vec3,
    pub yaw_deg:  f32,
}

impl Transform {
    pub fn new(location: Vec3, yaw_deg: f32) -> Self {
        Self { location, yaw_deg }
    }

    /// Unit forward vector in the ground plane.
    #[inline]
    pub fn forward(&self) -> Vec2 {
        Vec2::from_yaw_deg(self.yaw_deg)
    }
}

// ── Bounds ────────────────────────────────────────────────────────────────────

/// Axis-aligned operating area.  Agents that leave it are removed.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bounds {
    pub min: Vec2,
    pub max: Vec2,
}

impl Bounds {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// Inclusive containment test.
    #[inline]
    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }

    /// `true` when `min <= max` on both axes.
    pub fn is_valid(&self) -> bool {
        self.min.x <= self.max.x && self.min.y <= self.max.y
    }
}

// ── Angle helpers ─────────────────────────────────────────────────────────────

/// Signed angle in degrees that rotates `reference` onto `v`, in
/// `(-180, 180]`.  Positive means `v` lies counter-clockwise of `reference`.
///
/// Returns `0.0` when either vector is zero.
pub fn signed_angle_diff_deg(v: Vec2, reference: Vec2) -> f32 {
    if v.length_sq() <= f32::EPSILON || reference.length_sq() <= f32::EPSILON {
        return 0.0;
    }
    reference.det(v).atan2(reference.dot(v)).to_degrees()
}
