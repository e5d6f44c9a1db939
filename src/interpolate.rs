//! Regular-step linear interpolation
//!
//! Quick resampling of raw arrays onto an even grid, without any trajectory
//! model. For positions that follow the wellbore arcs use
//! `PositionLog::resample()` instead.
//!
//! Both functions sample `start, start + step, ...` strictly below the last
//! value, so the final input station is not repeated on the grid.

use serde::Serialize;

use crate::checks::{check_min_stations, check_position_arrays};
use crate::trajectory::{azimuth_delta, regular_grid, TrajectoryError};
use crate::types::Survey;

/// Depth-indexed position samples.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PositionSamples {
    pub depth: Vec<f64>,
    pub northing: Vec<f64>,
    pub easting: Vec<f64>,
}

/// Linear interpolation of `ys` over strictly increasing `xs` at `x`.
///
/// `x` must lie within `[xs[0], xs[n-1]]`.
fn interp(xs: &[f64], ys: &[f64], x: f64) -> f64 {
    let i = xs
        .partition_point(|&v| v <= x)
        .saturating_sub(1)
        .min(xs.len() - 2);
    let t = (x - xs[i]) / (xs[i + 1] - xs[i]);
    ys[i] + t * (ys[i + 1] - ys[i])
}

/// Interpolate a survey's inclination and azimuth onto a regular md step.
///
/// Azimuth is interpolated the short way round north, so a turn from 350°
/// to 10° passes through 0° rather than 180°.
pub fn interpolate_deviation(survey: &Survey, md_step: f64) -> Result<Survey, TrajectoryError> {
    check_min_stations(survey.len(), 2)?;

    let (first, last) = survey.md_range();
    let md_grid = regular_grid("md_step", first, last, md_step)?;

    let md = survey.md();
    let inc: Vec<f64> = md_grid.iter().map(|&d| interp(md, survey.inc(), d)).collect();

    let azi = survey.azi();
    let unwrapped: Vec<f64> = std::iter::once(azi[0])
        .chain(azi.windows(2).scan(azi[0], |acc, pair| {
            *acc += azimuth_delta(pair[0], pair[1]);
            Some(*acc)
        }))
        .collect();
    let azi: Vec<f64> = md_grid
        .iter()
        .map(|&d| wrap_azimuth(interp(md, &unwrapped, d)))
        .collect();

    tracing::debug!(stations = md_grid.len(), md_step, "Interpolated deviation survey");
    Ok(Survey::new(md_grid, inc, azi)?)
}

/// Interpolate northing and easting onto a regular depth step.
///
/// Depth must be strictly increasing; horizontal or build-and-drop wells
/// should be resampled by measured depth instead.
pub fn interpolate_position(
    depth: &[f64],
    northing: &[f64],
    easting: &[f64],
    depth_step: f64,
) -> Result<PositionSamples, TrajectoryError> {
    check_position_arrays(depth, northing, easting, true)?;
    check_min_stations(depth.len(), 2)?;

    let grid = regular_grid("depth_step", depth[0], depth[depth.len() - 1], depth_step)?;
    let samples = PositionSamples {
        northing: grid.iter().map(|&d| interp(depth, northing, d)).collect(),
        easting: grid.iter().map(|&d| interp(depth, easting, d)).collect(),
        depth: grid,
    };
    Ok(samples)
}

fn wrap_azimuth(azi: f64) -> f64 {
    let wrapped = azi.rem_euclid(360.0);
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deviation_grid_excludes_last_md() {
        let survey = Survey::new(vec![0.0, 10.0], vec![0.0, 10.0], vec![0.0, 20.0]).unwrap();
        let out = interpolate_deviation(&survey, 2.5).unwrap();
        assert_eq!(out.md(), &[0.0, 2.5, 5.0, 7.5]);
        assert_eq!(out.inc(), &[0.0, 2.5, 5.0, 7.5]);
        assert_eq!(out.azi(), &[0.0, 5.0, 10.0, 15.0]);
    }

    #[test]
    fn test_deviation_azimuth_wraps_through_north() {
        let survey = Survey::new(vec![0.0, 20.0], vec![45.0, 45.0], vec![350.0, 10.0]).unwrap();
        let out = interpolate_deviation(&survey, 5.0).unwrap();
        let expected = [350.0, 355.0, 0.0, 5.0];
        for (a, e) in out.azi().iter().zip(expected) {
            assert!((a - e).abs() < 1e-9, "azi {} expected {}", a, e);
        }
    }

    #[test]
    fn test_deviation_rejects_bad_step() {
        let survey = Survey::new(vec![0.0, 10.0], vec![0.0; 2], vec![0.0; 2]).unwrap();
        for bad in [0.0, -1.0, f64::NAN] {
            assert!(matches!(
                interpolate_deviation(&survey, bad),
                Err(TrajectoryError::InvalidArgument { name: "md_step", .. })
            ));
        }
    }

    #[test]
    fn test_position_interpolation() {
        let out = interpolate_position(&[0.0, 10.0, 20.0], &[0.0, 5.0, 5.0], &[0.0, 0.0, 10.0], 5.0).unwrap();
        assert_eq!(out.depth, vec![0.0, 5.0, 10.0, 15.0]);
        assert_eq!(out.northing, vec![0.0, 2.5, 5.0, 5.0]);
        assert_eq!(out.easting, vec![0.0, 0.0, 0.0, 5.0]);
    }

    #[test]
    fn test_position_rejects_runaway_grid() {
        let err = interpolate_position(&[0.0, 1000.0], &[0.0; 2], &[0.0; 2], 1e-9).unwrap_err();
        assert!(matches!(err, TrajectoryError::InvalidArgument { name: "depth_step", .. }));
    }

    #[test]
    fn test_position_requires_monotonic_depth() {
        let err = interpolate_position(&[0.0, 10.0, 5.0], &[0.0; 3], &[0.0; 3], 1.0).unwrap_err();
        assert!(matches!(err, TrajectoryError::Validation(_)));
    }
}
