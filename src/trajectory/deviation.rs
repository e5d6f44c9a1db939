//! Approximate inverse: position log -> deviation survey
//!
//! Walks the log segment by segment, carrying the tangent that enters each
//! segment (straight down for the first one). Assuming every segment is a
//! circular arc leaving along the entry tangent, the chord makes angle alpha
//! with that tangent and the exit tangent is the chord rotated by alpha away
//! from it, about the chord × entry normal. The arc length of a chord c that
//! subtends 2·alpha is c·alpha/sin(alpha).
//!
//! This is not an exact inverse. It reproduces a minimum curvature survey
//! only when the first station is vertical, and accuracy drops for
//! near-straight segments, where alpha comes from an arccos close to 1.
//! Each segment depends on the previous exit tangent, so the walk is
//! sequential.

use tracing::debug;

use super::resample::DEGENERATE_ANGLE_EPSILON;
use super::TrajectoryError;
use crate::checks::check_min_stations;
use crate::geometry::{checked_angle_between, direction_vector, normal_vector, rotate, spherical, Vec3};
use crate::types::{Method, PositionLog, Survey};

/// Reconstruct an approximate (md, inc, azi) survey from a minimum
/// curvature position log.
///
/// The first station gets inclination and azimuth 0 and the log's first
/// measured depth (resampled md if the log was resampled). Shifts applied
/// with `to_wellhead()` or `to_tvdss()` do not affect the result.
pub fn reconstruct_deviation(log: &PositionLog) -> Result<Survey, TrajectoryError> {
    if !matches!(log.method, Method::MinimumCurvature { .. }) {
        return Err(TrajectoryError::Unsupported {
            operation: "deviation",
            method: log.method.name(),
        });
    }
    check_min_stations(log.len(), 2)?;

    let tvd = log.tvd();
    let positions: Vec<Vec3> = (0..log.len())
        .map(|i| Vec3::new(log.northing[i], log.easting[i], tvd[i]))
        .collect();

    let stations = positions.len();
    let mut md = Vec::with_capacity(stations);
    let mut inc = Vec::with_capacity(stations);
    let mut azi = Vec::with_capacity(stations);

    let (mut entry_inc, mut entry_azi) = (0.0, 0.0);
    let mut depth = log.md()[0];
    md.push(depth);
    inc.push(entry_inc);
    azi.push(entry_azi);

    let mut straight_segments = 0usize;
    for pair in positions.windows(2) {
        let chord = pair[1] - pair[0];
        let entry = direction_vector(entry_inc, entry_azi);

        let alpha = checked_angle_between(chord, entry)?;
        let normal = normal_vector(chord, entry);
        let exit = rotate(chord, normal, -alpha);
        let (exit_inc, exit_azi) = spherical(exit);

        let length = chord.norm();
        depth += if alpha < DEGENERATE_ANGLE_EPSILON {
            straight_segments += 1;
            length
        } else {
            length * alpha / alpha.sin()
        };

        md.push(depth);
        inc.push(exit_inc);
        azi.push(exit_azi);
        entry_inc = exit_inc;
        entry_azi = exit_azi;
    }

    debug!(
        stations,
        straight_segments,
        final_md = depth,
        "Reconstructed deviation survey"
    );

    Ok(Survey::new(md, inc, azi)?)
}

impl PositionLog {
    /// See [`reconstruct_deviation`].
    pub fn deviation(&self) -> Result<Survey, TrajectoryError> {
        reconstruct_deviation(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trajectory::{minimum_curvature, radius_of_curvature, to_tvdss, to_wellhead};

    fn vertical_start_survey() -> Survey {
        Survey::new(
            vec![0.0, 100.0, 200.0, 300.0, 400.0],
            vec![0.0, 10.0, 25.0, 40.0, 40.0],
            vec![0.0, 45.0, 60.0, 60.0, 75.0],
        )
        .unwrap()
    }

    fn assert_survey_close(actual: &Survey, expected: &Survey, angle_tol: f64, md_tol: f64) {
        assert_eq!(actual.len(), expected.len());
        for (a, e) in actual.stations().zip(expected.stations()) {
            assert!((a.md - e.md).abs() < md_tol, "md {} vs {}", a.md, e.md);
            assert!((a.inc - e.inc).abs() < angle_tol, "inc {} vs {} at md {}", a.inc, e.inc, e.md);
            assert!((a.azi - e.azi).abs() < angle_tol, "azi {} vs {} at md {}", a.azi, e.azi, e.md);
        }
    }

    #[test]
    fn test_round_trip_from_vertical_start() {
        let survey = vertical_start_survey();
        let log = minimum_curvature(survey.clone(), 30.0).unwrap();
        let reconstructed = log.deviation().unwrap();
        assert_survey_close(&reconstructed, &survey, 1e-6, 1e-6);
    }

    #[test]
    fn test_straight_hole_reconstructs_vertical() {
        let survey = Survey::new(vec![0.0, 3.0, 7.0], vec![0.0; 3], vec![0.0; 3]).unwrap();
        let log = minimum_curvature(survey.clone(), 30.0).unwrap();
        let reconstructed = log.deviation().unwrap();
        assert_eq!(reconstructed, survey);
    }

    #[test]
    fn test_md_starts_at_first_station() {
        let survey = Survey::new(vec![500.0, 530.0, 560.0], vec![0.0, 3.0, 6.0], vec![0.0, 90.0, 90.0]).unwrap();
        let log = minimum_curvature(survey.clone(), 30.0).unwrap();
        let reconstructed = log.deviation().unwrap();
        assert_survey_close(&reconstructed, &survey, 1e-6, 1e-6);
    }

    #[test]
    fn test_shifts_do_not_change_reconstruction() {
        let log = minimum_curvature(vertical_start_survey(), 30.0).unwrap();
        let plain = log.deviation().unwrap();
        let shifted = to_tvdss(&to_wellhead(&log, 6_000_000.0, 400_000.0), 30.0)
            .deviation()
            .unwrap();
        assert_survey_close(&shifted, &plain, 1e-6, 1e-6);
    }

    #[test]
    fn test_resampled_log_reconstructs_denser_survey() {
        let survey = vertical_start_survey();
        let log = minimum_curvature(survey, 30.0).unwrap();
        let resampled = log.resample_every(10.0).unwrap();
        let reconstructed = resampled.deviation().unwrap();

        assert_eq!(reconstructed.len(), resampled.len());
        // Stations at the original survey depths recover the original angles
        let at_300 = reconstructed.stations().find(|s| (s.md - 300.0).abs() < 1e-6).unwrap();
        assert!((at_300.inc - 40.0).abs() < 1e-5, "inc {}", at_300.inc);
        assert!((at_300.azi - 60.0).abs() < 1e-5, "azi {}", at_300.azi);
    }

    #[test]
    fn test_other_methods_unsupported() {
        let log = radius_of_curvature(vertical_start_survey()).unwrap();
        let err = log.deviation().unwrap_err();
        assert!(matches!(err, TrajectoryError::Unsupported { operation: "deviation", .. }));
    }
}
