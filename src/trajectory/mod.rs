//! Trajectory Models
//!
//! Converts deviation surveys into position logs and back. All math here is
//! deterministic geometry over validated input.
//!
//! ## Survey -> Position
//! - `minimum_curvature()` - circular arc between stations, with dogleg severity
//! - `radius_of_curvature()` - cylindrical-helix approximation
//! - `tangential()` - high / low / average / balanced tangent variants
//!
//! ## Position log operations
//! - `resample()` - follow the minimum curvature arcs onto new measured depths
//! - `reconstruct_deviation()` - approximate inverse back to (md, inc, azi)
//! - `to_wellhead()` / `to_zero()` / `to_tvdss()` - pure coordinate shifts

pub mod deviation;
pub mod location;
pub mod minimum_curvature;
pub mod radius_curvature;
pub mod resample;
pub mod tangential;

pub use deviation::reconstruct_deviation;
pub use location::{to_tvdss, to_wellhead, to_zero};
pub use minimum_curvature::{minimum_curvature, ratio_factor, ANTIPARALLEL_EPSILON};
pub use radius_curvature::radius_of_curvature;
pub use resample::{interpolate_arc, resample, DEGENERATE_ANGLE_EPSILON};
pub use tangential::tangential;

use thiserror::Error;

use crate::checks::ValidationError;
use crate::geometry::{GeometryError, Vec3};
use crate::types::Survey;

/// Errors raised by trajectory computations.
///
/// Every error is fatal to the single operation that raised it; nothing is
/// retried or partially returned.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TrajectoryError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error("segment {segment} has anti-parallel tangents (dogleg = π), the ratio factor is undefined")]
    AntiParallelTangents { segment: usize },

    #[error("invalid {name}: {reason}")]
    InvalidArgument { name: &'static str, reason: String },

    #[error("{operation} is not supported for {method} position logs")]
    Unsupported {
        operation: &'static str,
        method: String,
    },

    #[error("position log is already resampled; resample the original log instead")]
    AlreadyResampled,
}

/// Validate arrays and build a survey.
pub fn build_survey(md: Vec<f64>, inc: Vec<f64>, azi: Vec<f64>) -> Result<Survey, TrajectoryError> {
    Ok(Survey::new(md, inc, azi)?)
}

/// Require a finite, strictly positive length-like argument.
pub(crate) fn check_positive(name: &'static str, value: f64) -> Result<(), TrajectoryError> {
    if !value.is_finite() || value <= 0.0 {
        return Err(TrajectoryError::InvalidArgument {
            name,
            reason: format!("must be a finite number greater than 0, got {}", value),
        });
    }
    Ok(())
}

/// Largest number of points a regular grid may hold.
pub const MAX_GRID_POINTS: usize = 10_000_000;

/// Grid `first, first + step, ...` strictly below `last`.
///
/// `step` must be finite and positive, and the grid may not exceed
/// `MAX_GRID_POINTS`. `name` labels the step in the error.
pub(crate) fn regular_grid(
    name: &'static str,
    first: f64,
    last: f64,
    step: f64,
) -> Result<Vec<f64>, TrajectoryError> {
    check_positive(name, step)?;
    let points = ((last - first) / step).ceil();
    if points > MAX_GRID_POINTS as f64 {
        return Err(TrajectoryError::InvalidArgument {
            name,
            reason: format!(
                "step {} over {} would need {} points, more than {}",
                step,
                last - first,
                points,
                MAX_GRID_POINTS
            ),
        });
    }

    Ok((0u32..)
        .map(|k| first + f64::from(k) * step)
        .take_while(|&x| x < last)
        .collect())
}

/// Cumulative sum of per-segment displacements, seeded with zero at the
/// first station. Returns (tvd, northing, easting).
pub(crate) fn accumulate_segments(
    segments: impl ExactSizeIterator<Item = Vec3>,
) -> (Vec<f64>, Vec<f64>, Vec<f64>) {
    let stations = segments.len() + 1;
    let mut tvd = Vec::with_capacity(stations);
    let mut northing = Vec::with_capacity(stations);
    let mut easting = Vec::with_capacity(stations);

    let mut position = Vec3::zero();
    tvd.push(0.0);
    northing.push(0.0);
    easting.push(0.0);
    for displacement in segments {
        position = position + displacement;
        tvd.push(position.vertical);
        northing.push(position.northing);
        easting.push(position.easting);
    }

    (tvd, northing, easting)
}

/// Signed azimuth change from `from` to `to` in degrees, taken the short way
/// round, in (-180, 180].
pub(crate) fn azimuth_delta(from: f64, to: f64) -> f64 {
    let delta = (to - from).rem_euclid(360.0);
    if delta > 180.0 {
        delta - 360.0
    } else {
        delta
    }
}
