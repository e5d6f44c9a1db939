//! Radius of curvature method
//!
//! Models each segment as a curve with constant build rate in inclination
//! and constant turn rate in azimuth:
//!
//! - ΔTVD = ΔMD · (sin I₂ − sin I₁) / (I₂ − I₁)
//! - ΔN   = ΔMD · (cos I₁ − cos I₂)(sin A₂ − sin A₁) / ((I₂ − I₁)(A₂ − A₁))
//! - ΔE   = ΔMD · (cos I₁ − cos I₂)(cos A₁ − cos A₂) / ((I₂ − I₁)(A₂ − A₁))
//!
//! Each difference quotient is replaced by its analytic limit when the angle
//! change is below `DEGENERATE_ANGLE_EPSILON`, so straight-but-deviated
//! segments and pure build or pure turn segments are exact rather than 0/0.
//! ΔA is taken the short way round the 0/360 wrap.

use std::sync::Arc;

use tracing::debug;

use super::resample::DEGENERATE_ANGLE_EPSILON;
use super::{accumulate_segments, azimuth_delta, TrajectoryError};
use crate::checks::check_min_stations;
use crate::geometry::Vec3;
use crate::types::{Method, PositionLog, Survey};

/// (sin b − sin a) / (b − a), with limit cos((a + b)/2).
fn sin_quotient(a: f64, b: f64) -> f64 {
    if (b - a).abs() < DEGENERATE_ANGLE_EPSILON {
        ((a + b) / 2.0).cos()
    } else {
        (b.sin() - a.sin()) / (b - a)
    }
}

/// (cos a − cos b) / (b − a), with limit sin((a + b)/2).
fn cos_quotient(a: f64, b: f64) -> f64 {
    if (b - a).abs() < DEGENERATE_ANGLE_EPSILON {
        ((a + b) / 2.0).sin()
    } else {
        (a.cos() - b.cos()) / (b - a)
    }
}

pub fn radius_of_curvature(survey: impl Into<Arc<Survey>>) -> Result<PositionLog, TrajectoryError> {
    let survey: Arc<Survey> = survey.into();
    check_min_stations(survey.len(), 2)?;

    let md = survey.md();
    let inc = survey.inc();
    let azi = survey.azi();

    let displacements = (0..survey.len() - 1).map(|i| {
        let course = md[i + 1] - md[i];
        let (i1, i2) = (inc[i].to_radians(), inc[i + 1].to_radians());
        let a1 = azi[i].to_radians();
        let a2 = a1 + azimuth_delta(azi[i], azi[i + 1]).to_radians();

        let horizontal = course * cos_quotient(i1, i2);
        Vec3::new(
            horizontal * sin_quotient(a1, a2),
            horizontal * cos_quotient(a1, a2),
            course * sin_quotient(i1, i2),
        )
    });
    let (tvd, northing, easting) = accumulate_segments(displacements);

    debug!(stations = survey.len(), "Computed radius of curvature trajectory");

    Ok(PositionLog::from_tvd(
        survey,
        tvd,
        northing,
        easting,
        Method::RadiusOfCurvature,
    ))
}
