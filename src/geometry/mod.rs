//! Vector Geometry Kernel
//!
//! Pure vector math used by every trajectory model. Inputs are assumed to be
//! validated already (see `checks`); nothing here re-checks ranges or NaNs.
//!
//! - `direction_vector()` / `spherical()` - survey angles <-> unit tangents
//! - `normalize()`, `angle_between()`, `normal_vector()`
//! - `rotate()` - axis-angle rotation through unit quaternions

pub mod quaternion;
pub mod vector;

pub use quaternion::{rotate, Quaternion};
pub use vector::{
    angle_between, checked_angle_between, direction_vector, direction_vectors, normal_vector,
    normalize, spherical, Vec3, DOT_DOMAIN_TOLERANCE, ZERO_NORM_EPSILON,
};

use thiserror::Error;

/// Errors raised by the geometry kernel.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    #[error("dot product ({dot}) outside of arccos domain [-1, 1]")]
    DotProductOutOfDomain { dot: f64 },
}
