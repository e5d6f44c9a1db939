//! Direction vectors in the (northing, easting, vertical) frame
//!
//! Conversions between survey angles and unit vectors, plus the handful of
//! vector operations the trajectory models are built from:
//! - `direction_vector()` / `spherical()` - (inc, azi) <-> unit vector
//! - `normalize()` - unit vector with a zero-norm guard
//! - `angle_between()` - arccos of the clipped dot product
//! - `normal_vector()` - cross product
//!
//! Public angles are in degrees, everything internal is radians.

use std::ops::{Add, Mul, Neg, Sub};

use super::GeometryError;

// ============================================================================
// Tolerances
// ============================================================================

/// Norms below this are treated as zero by `normalize()`.
///
/// A zero (or numerically zero) vector normalizes to itself instead of
/// producing NaN. Surveys with sub-femtometre segments only show up in
/// generated test data, never in real logs.
pub const ZERO_NORM_EPSILON: f64 = 1e-15;

/// How far a dot product of two unit vectors may stray outside [-1, 1]
/// before `checked_angle_between()` reports it instead of clipping.
pub const DOT_DOMAIN_TOLERANCE: f64 = 1e-7;

// ============================================================================
// Vec3
// ============================================================================

/// A vector in the right-handed (northing, easting, vertical) frame.
///
/// Vertical is positive downwards, so a tangent pointing straight down the
/// hole is `(0, 0, 1)`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vec3 {
    pub northing: f64,
    pub easting: f64,
    pub vertical: f64,
}

impl Vec3 {
    pub const fn new(northing: f64, easting: f64, vertical: f64) -> Self {
        Self { northing, easting, vertical }
    }

    pub const fn zero() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }

    /// Euclidean length.
    #[inline]
    pub fn norm(&self) -> f64 {
        self.dot(self).sqrt()
    }

    #[inline]
    pub fn dot(&self, other: &Self) -> f64 {
        self.northing * other.northing + self.easting * other.easting + self.vertical * other.vertical
    }

    /// Cross product: self × other
    #[inline]
    pub fn cross(&self, other: &Self) -> Self {
        Self::new(
            self.easting * other.vertical - self.vertical * other.easting,
            self.vertical * other.northing - self.northing * other.vertical,
            self.northing * other.easting - self.easting * other.northing,
        )
    }

    #[inline]
    pub fn scale(&self, factor: f64) -> Self {
        Self::new(self.northing * factor, self.easting * factor, self.vertical * factor)
    }

    pub fn is_finite(&self) -> bool {
        self.northing.is_finite() && self.easting.is_finite() && self.vertical.is_finite()
    }
}

impl Add for Vec3 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.northing + rhs.northing, self.easting + rhs.easting, self.vertical + rhs.vertical)
    }
}

impl Sub for Vec3 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.northing - rhs.northing, self.easting - rhs.easting, self.vertical - rhs.vertical)
    }
}

impl Neg for Vec3 {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.northing, -self.easting, -self.vertical)
    }
}

impl Mul<f64> for Vec3 {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self {
        self.scale(rhs)
    }
}

// ============================================================================
// Angle <-> Vector Conversions
// ============================================================================

/// Unit tangent for an inclination/azimuth pair (degrees).
///
/// Formula:
/// - northing = sin(inc) × cos(azi)
/// - easting  = sin(inc) × sin(azi)
/// - vertical = cos(inc)
pub fn direction_vector(inc_deg: f64, azi_deg: f64) -> Vec3 {
    let inc = inc_deg.to_radians();
    let azi = azi_deg.to_radians();

    Vec3::new(inc.sin() * azi.cos(), inc.sin() * azi.sin(), inc.cos())
}

/// Elementwise `direction_vector()` over station arrays of equal length.
pub fn direction_vectors(inc_deg: &[f64], azi_deg: &[f64]) -> Vec<Vec3> {
    inc_deg
        .iter()
        .zip(azi_deg)
        .map(|(&inc, &azi)| direction_vector(inc, azi))
        .collect()
}

/// Inclination and azimuth (degrees) of a direction vector.
///
/// The vector does not need to be normalized. Azimuth is returned in
/// [0, 360): negative results are wrapped by a full turn, and the wrap is
/// reduced again so a tiny negative angle lands on 0 rather than 360.
pub fn spherical(v: Vec3) -> (f64, f64) {
    let horizontal = v.northing.hypot(v.easting);
    let inc = horizontal.atan2(v.vertical);

    let two_pi = std::f64::consts::TAU;
    let mut azi = v.easting.atan2(v.northing);
    if azi < 0.0 {
        azi = (azi + two_pi) % two_pi;
    }

    let mut azi_deg = azi.to_degrees();
    if azi_deg >= 360.0 {
        azi_deg -= 360.0;
    }

    (inc.to_degrees(), azi_deg)
}

// ============================================================================
// Vector Operations
// ============================================================================

/// Scale `v` to unit length.
///
/// Norms below `ZERO_NORM_EPSILON` are replaced by 1, so degenerate vectors
/// come back unchanged instead of as NaN.
pub fn normalize(v: Vec3) -> Vec3 {
    let mut norm = v.norm();
    if norm.abs() < ZERO_NORM_EPSILON {
        norm = 1.0;
    }
    v.scale(1.0 / norm)
}

/// Angle between two vectors in radians, in [0, π].
///
/// The dot product of the normalized vectors is clipped to [-1, 1] before
/// `acos`; rounding can push it fractionally outside.
pub fn angle_between(a: Vec3, b: Vec3) -> f64 {
    let dot = normalize(a).dot(&normalize(b));
    dot.clamp(-1.0, 1.0).acos()
}

/// Like `angle_between()`, but a dot product further than
/// `DOT_DOMAIN_TOLERANCE` outside [-1, 1] is an error rather than clipped.
pub fn checked_angle_between(a: Vec3, b: Vec3) -> Result<f64, GeometryError> {
    let dot = normalize(a).dot(&normalize(b));
    if dot.is_nan() || dot.abs() > 1.0 + DOT_DOMAIN_TOLERANCE {
        return Err(GeometryError::DotProductOutOfDomain { dot });
    }
    Ok(dot.clamp(-1.0, 1.0).acos())
}

/// Vector normal to the plane spanned by `a` and `b` (a × b, not normalized).
pub fn normal_vector(a: Vec3, b: Vec3) -> Vec3 {
    a.cross(&b)
}
