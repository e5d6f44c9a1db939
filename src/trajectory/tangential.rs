//! Tangential methods
//!
//! Each segment is treated as a straight line of length ΔMD along a single
//! direction:
//! - High: the lower station's direction
//! - Low: the upper station's direction
//! - Average: averaged inclination and azimuth (azimuth the short way round)
//! - Balanced: mean of the upper and lower direction vectors
//!
//! High and low tangential make gross errors in curved wells and are only
//! useful for comparison.

use std::sync::Arc;

use tracing::debug;

use super::{accumulate_segments, azimuth_delta, TrajectoryError};
use crate::checks::check_min_stations;
use crate::geometry::{direction_vector, Vec3};
use crate::types::{Method, PositionLog, Survey, TangentialMethod};

/// Average of two azimuths (degrees) along the shorter arc, in [0, 360).
fn mean_azimuth(upper: f64, lower: f64) -> f64 {
    (upper + azimuth_delta(upper, lower) / 2.0).rem_euclid(360.0)
}

pub fn tangential(
    survey: impl Into<Arc<Survey>>,
    variant: TangentialMethod,
) -> Result<PositionLog, TrajectoryError> {
    let survey: Arc<Survey> = survey.into();
    check_min_stations(survey.len(), 2)?;

    let md = survey.md();
    let inc = survey.inc();
    let azi = survey.azi();

    let displacements = (0..survey.len() - 1).map(|i| {
        segment_direction(variant, (inc[i], azi[i]), (inc[i + 1], azi[i + 1])) * (md[i + 1] - md[i])
    });
    let (tvd, northing, easting): (Vec<f64>, Vec<f64>, Vec<f64>) = accumulate_segments(displacements);

    debug!(stations = survey.len(), method = %variant, "Computed tangential trajectory");

    Ok(PositionLog::from_tvd(
        survey,
        tvd,
        northing,
        easting,
        Method::Tangential(variant),
    ))
}

/// Direction a `variant` assigns to the segment between `upper` and `lower`
/// (inc, azi) stations. Balanced returns the mean vector, which is shorter
/// than unit length when the tangents differ.
pub fn segment_direction(variant: TangentialMethod, upper: (f64, f64), lower: (f64, f64)) -> Vec3 {
    match variant {
        TangentialMethod::High => direction_vector(lower.0, lower.1),
        TangentialMethod::Low => direction_vector(upper.0, upper.1),
        TangentialMethod::Average => {
            direction_vector((upper.0 + lower.0) / 2.0, mean_azimuth(upper.1, lower.1))
        }
        TangentialMethod::Balanced => {
            (direction_vector(upper.0, upper.1) + direction_vector(lower.0, lower.1)) * 0.5
        }
    }
}
