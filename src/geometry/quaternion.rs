//! Unit quaternions for axis-angle rotation of direction vectors

use std::ops::Mul;

use super::vector::{normalize, Vec3};

/// Quaternion `w + xi + yj + zk`, with (x, y, z) mapped onto
/// (northing, easting, vertical).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quaternion {
    pub w: f64,
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Quaternion {
    pub const fn new(w: f64, x: f64, y: f64, z: f64) -> Self {
        Self { w, x, y, z }
    }

    pub const fn identity() -> Self {
        Self::new(1.0, 0.0, 0.0, 0.0)
    }

    /// Pure quaternion (w = 0) carrying a vector.
    pub const fn from_vector(v: Vec3) -> Self {
        Self::new(0.0, v.northing, v.easting, v.vertical)
    }

    /// Unit quaternion rotating by `angle` radians about `axis`.
    ///
    /// A zero axis has no defined rotation and yields the identity.
    pub fn from_axis_angle(axis: Vec3, angle: f64) -> Self {
        let axis = normalize(axis);
        if axis == Vec3::zero() {
            return Self::identity();
        }

        let half = angle / 2.0;
        let s = half.sin();
        Self::new(half.cos(), axis.northing * s, axis.easting * s, axis.vertical * s)
    }

    pub const fn conjugate(&self) -> Self {
        Self::new(self.w, -self.x, -self.y, -self.z)
    }

    pub const fn vector_part(&self) -> Vec3 {
        Vec3::new(self.x, self.y, self.z)
    }

    /// Rotate `v` by conjugation, q·v·q⁻¹.
    ///
    /// For unit quaternions the inverse is the conjugate, and the result
    /// keeps the magnitude of `v`.
    pub fn rotate(&self, v: Vec3) -> Vec3 {
        (*self * Self::from_vector(v) * self.conjugate()).vector_part()
    }
}

/// Hamilton product.
impl Mul for Quaternion {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        Self::new(
            self.w * rhs.w - self.x * rhs.x - self.y * rhs.y - self.z * rhs.z,
            self.w * rhs.x + self.x * rhs.w + self.y * rhs.z - self.z * rhs.y,
            self.w * rhs.y - self.x * rhs.z + self.y * rhs.w + self.z * rhs.x,
            self.w * rhs.z + self.x * rhs.y - self.y * rhs.x + self.z * rhs.w,
        )
    }
}

/// Rotate `vector` by `angle` radians about `axis` (right-hand rule).
///
/// The axis need not be normalized. Rotating `a` about `a × b` by a
/// positive angle turns it towards `b`.
pub fn rotate(vector: Vec3, axis: Vec3, angle: f64) -> Vec3 {
    Quaternion::from_axis_angle(axis, angle).rotate(vector)
}
