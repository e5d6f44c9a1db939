//! Minimum curvature method
//!
//! Fits a circular arc through each pair of adjacent station tangents.
//!
//! Per segment (upper, lower):
//! - dogleg = angle between the upper and lower unit tangents (radians),
//!   taken as atan2(|t_upper × t_lower|, t_upper · t_lower) so it stays
//!   accurate near 0 and near π, where arccos loses half its digits
//! - rf = 2·tan(dogleg/2) / dogleg, exactly 1 for a straight segment
//! - displacement = ΔMD/2 · (t_upper + t_lower) · rf
//! - DLS = degrees(dogleg) · course_length / ΔMD
//!
//! The ratio factor multiplies the sum of both tangents. Applying it to only
//! one of them passes small-angle tests and fails on large doglegs, which is
//! what `test_large_angle_ratio_factor_regression` pins down.

use std::f64::consts::PI;
use std::sync::Arc;

use tracing::debug;

use super::{accumulate_segments, check_positive, TrajectoryError};
use crate::checks::check_min_stations;
use crate::geometry::{direction_vectors, Vec3};
use crate::types::{Method, PositionLog, Survey};

/// A dogleg closer than this to π (radians) is treated as a reversal of
/// direction. The ratio factor diverges there, and unit tangents rounded to
/// f64 cannot pin down a turn plane finer than about √ε ≈ 1.5e-8 rad.
pub const ANTIPARALLEL_EPSILON: f64 = 1e-7;

/// Ratio factor for a dogleg angle in radians.
///
/// The straight-segment limit is exactly 1. Callers must keep the dogleg
/// away from π.
#[inline]
pub fn ratio_factor(dogleg: f64) -> f64 {
    if dogleg == 0.0 {
        1.0
    } else {
        2.0 * (dogleg / 2.0).tan() / dogleg
    }
}

/// Angle between two unit tangents in radians, in [0, π].
fn dogleg(upper: Vec3, lower: Vec3) -> f64 {
    upper.cross(&lower).norm().atan2(upper.dot(&lower))
}

/// Compute the minimum curvature position log for `survey`.
///
/// Positions are relative to the first station (tvd, northing and easting
/// all 0 there); add a tie-in or wellhead offset afterwards with
/// `to_wellhead()`. Dogleg severity is in degrees per `course_length`.
pub fn minimum_curvature(
    survey: impl Into<Arc<Survey>>,
    course_length: f64,
) -> Result<PositionLog, TrajectoryError> {
    let survey: Arc<Survey> = survey.into();
    check_positive("course_length", course_length)?;
    check_min_stations(survey.len(), 2)?;

    let md = survey.md();
    let tangents = direction_vectors(survey.inc(), survey.azi());
    let doglegs: Vec<f64> = tangents
        .windows(2)
        .map(|pair| dogleg(pair[0], pair[1]))
        .collect();

    if let Some(segment) = doglegs.iter().position(|&dl| PI - dl < ANTIPARALLEL_EPSILON) {
        return Err(TrajectoryError::AntiParallelTangents { segment });
    }

    let displacements = tangents.windows(2).enumerate().map(|(i, pair)| {
        let half_md = (md[i + 1] - md[i]) / 2.0;
        (pair[0] + pair[1]) * (half_md * ratio_factor(doglegs[i]))
    });
    let (tvd, northing, easting) = accumulate_segments(displacements);

    let mut dls = Vec::with_capacity(survey.len());
    dls.push(0.0);
    dls.extend(
        doglegs
            .iter()
            .enumerate()
            .map(|(i, dl)| dl.to_degrees() * course_length / (md[i + 1] - md[i])),
    );

    debug!(
        stations = survey.len(),
        course_length,
        max_dls = dls.iter().copied().fold(0.0_f64, f64::max),
        "Computed minimum curvature trajectory"
    );

    Ok(PositionLog::from_tvd(
        survey,
        tvd,
        northing,
        easting,
        Method::MinimumCurvature { dls },
    ))
}
