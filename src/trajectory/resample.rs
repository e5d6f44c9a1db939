//! Resampling a minimum curvature position log onto new measured depths
//!
//! Each requested depth is placed on the circular arc of the segment that
//! contains it, so resampled points lie on the same curve the minimum
//! curvature model assumed. Linear interpolation of the computed positions
//! would cut the corners of every arc.
//!
//! Arc reconstruction from the segment endpoints A, B and upper tangent t₁:
//! - alpha = angle(AB, t₁), omega = 2·alpha
//! - radius = |AB| / (2·sin(alpha))
//! - centre C = A + radius · unit(AB − (AB·t₁)·t₁)
//! - p(t) = C + v₀·(A − C) + v₁·(B − C),
//!   v₀ = sin((1−t)·omega)/sin(omega), v₁ = sin(t·omega)/sin(omega)
//!
//! Segments are half-open `[md₁, md₂)` except the last, which is closed, so
//! every depth in range maps to exactly one segment.

use rayon::prelude::*;
use tracing::debug;

use super::TrajectoryError;
use crate::checks::{check_closed_range, ValidationError};
use crate::geometry::{checked_angle_between, direction_vectors, normalize, Vec3};
use crate::types::{DepthReference, Method, PositionLog};

/// Chord/tangent angles below this (radians) are treated as a straight
/// segment and interpolated linearly.
pub const DEGENERATE_ANGLE_EPSILON: f64 = 1e-6;

/// Point at fraction `t` ∈ [0, 1] along the circular arc from `a` to `b`
/// leaving `a` with unit tangent `tangent`.
pub fn interpolate_arc(a: Vec3, b: Vec3, tangent: Vec3, t: f64) -> Result<Vec3, TrajectoryError> {
    let chord = b - a;
    let alpha = checked_angle_between(chord, tangent)?;

    if alpha < DEGENERATE_ANGLE_EPSILON {
        return Ok(a * (1.0 - t) + b * t);
    }

    let omega = 2.0 * alpha;
    let radius = chord.norm() / (2.0 * alpha.sin());
    let inward = normalize(chord - tangent * chord.dot(&tangent));
    let centre = a + inward * radius;

    let sin_omega = omega.sin();
    let v0 = ((1.0 - t) * omega).sin() / sin_omega;
    let v1 = (t * omega).sin() / sin_omega;

    Ok(centre + (a - centre) * v0 + (b - centre) * v1)
}

/// Index of the segment containing `depth`: the upper station `i` with
/// `md[i] <= depth < md[i + 1]`, or the last segment for `depth == md[n-1]`.
fn segment_index(md: &[f64], depth: f64) -> usize {
    md.partition_point(|&m| m <= depth)
        .saturating_sub(1)
        .min(md.len() - 2)
}

/// Resample a minimum curvature log onto `depths`.
///
/// Depths must be finite and inside the surveyed measured-depth range; they
/// need not be sorted. The result has one station per requested depth, in
/// request order, keeps the log's depth reference, and records the depths
/// as `resampled_md`. Dogleg severity at a resampled station is that of the
/// containing segment, or the station's own value at an exact station depth.
pub fn resample(log: &PositionLog, depths: &[f64]) -> Result<PositionLog, TrajectoryError> {
    let dls = match &log.method {
        Method::MinimumCurvature { dls } => dls,
        other => {
            return Err(TrajectoryError::Unsupported {
                operation: "resample",
                method: other.name(),
            })
        }
    };
    if log.is_resampled() {
        return Err(TrajectoryError::AlreadyResampled);
    }
    if depths.is_empty() {
        return Err(ValidationError::Empty { field: "depths" }.into());
    }

    let source = log.source();
    let md = source.md();
    let (md_first, md_last) = source.md_range();
    check_closed_range("depths", depths, md_first, md_last)?;

    let tvd = log.tvd();
    let positions: Vec<Vec3> = (0..log.len())
        .map(|i| Vec3::new(log.northing[i], log.easting[i], tvd[i]))
        .collect();
    let tangents = direction_vectors(source.inc(), source.azi());

    let stations: Vec<(Vec3, f64)> = depths
        .par_iter()
        .map(|&depth| -> Result<(Vec3, f64), TrajectoryError> {
            let i = segment_index(md, depth);
            let t = (depth - md[i]) / (md[i + 1] - md[i]);
            let point = interpolate_arc(positions[i], positions[i + 1], tangents[i], t)?;
            let severity = if t == 0.0 { dls[i] } else { dls[i + 1] };
            Ok((point, severity))
        })
        .collect::<Result<_, TrajectoryError>>()?;

    let depth = stations
        .iter()
        .map(|(p, _)| match log.reference {
            DepthReference::Tvd => p.vertical,
            DepthReference::Tvdss { datum_elevation } => datum_elevation - p.vertical,
        })
        .collect();

    debug!(
        source_stations = log.len(),
        requested = depths.len(),
        "Resampled minimum curvature log"
    );

    Ok(PositionLog {
        source: log.source_arc(),
        depth,
        northing: stations.iter().map(|(p, _)| p.northing).collect(),
        easting: stations.iter().map(|(p, _)| p.easting).collect(),
        reference: log.reference,
        method: Method::MinimumCurvature {
            dls: stations.iter().map(|&(_, s)| s).collect(),
        },
        resampled_md: Some(depths.to_vec()),
    })
}

impl PositionLog {
    /// See [`resample`].
    pub fn resample(&self, depths: &[f64]) -> Result<PositionLog, TrajectoryError> {
        resample(self, depths)
    }

    /// Resample onto a regular `step` from the first to the last station.
    ///
    /// The last station's depth is always included so the log ends where the
    /// survey does.
    pub fn resample_every(&self, step: f64) -> Result<PositionLog, TrajectoryError> {
        let (first, last) = self.source.md_range();
        let mut depths = super::regular_grid("md_step", first, last, step)?;
        depths.push(last);
        resample(self, &depths)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::direction_vector;
    use crate::trajectory::{minimum_curvature, to_tvdss, to_wellhead};
    use crate::types::{Survey, TangentialMethod};
    use std::f64::consts::FRAC_PI_2;

    fn curved_survey() -> Survey {
        Survey::new(
            vec![0.0, 100.0, 200.0, 300.0, 400.0],
            vec![0.0, 10.0, 25.0, 40.0, 40.0],
            vec![0.0, 45.0, 60.0, 60.0, 75.0],
        )
        .unwrap()
    }

    fn assert_vec_close(a: Vec3, b: Vec3, tol: f64) {
        assert!((a - b).norm() < tol, "points differ: {:?} vs {:?}", a, b);
    }

    #[test]
    fn test_segment_index_conventions() {
        let md = [0.0, 10.0, 20.0];
        assert_eq!(segment_index(&md, 0.0), 0);
        assert_eq!(segment_index(&md, 9.999), 0);
        assert_eq!(segment_index(&md, 10.0), 1);
        assert_eq!(segment_index(&md, 20.0), 1);
    }

    #[test]
    fn test_quarter_circle_midpoint() {
        // Quarter circle of radius 1 in the vertical/north plane, starting
        // straight down and ending horizontal
        let a = Vec3::zero();
        let b = Vec3::new(1.0, 0.0, 1.0);
        let down = Vec3::new(0.0, 0.0, 1.0);

        let mid = interpolate_arc(a, b, down, 0.5).unwrap();
        let angle = FRAC_PI_2 / 2.0;
        assert_vec_close(mid, Vec3::new(1.0 - angle.cos(), 0.0, angle.sin()), 1e-12);
    }

    #[test]
    fn test_arc_endpoints() {
        let a = Vec3::new(1.0, 2.0, 3.0);
        let b = Vec3::new(4.0, 2.0, 9.0);
        let tangent = direction_vector(10.0, 0.0);
        assert_vec_close(interpolate_arc(a, b, tangent, 0.0).unwrap(), a, 1e-12);
        assert_vec_close(interpolate_arc(a, b, tangent, 1.0).unwrap(), b, 1e-12);
    }

    #[test]
    fn test_straight_segment_is_linear() {
        let a = Vec3::new(0.0, 0.0, 0.0);
        let b = Vec3::new(0.0, 0.0, 10.0);
        let p = interpolate_arc(a, b, Vec3::new(0.0, 0.0, 1.0), 0.25).unwrap();
        assert_eq!(p, Vec3::new(0.0, 0.0, 2.5));
    }

    #[test]
    fn test_resample_onto_own_md_reproduces_log() {
        let log = minimum_curvature(curved_survey(), 30.0).unwrap();
        let md = log.source().md().to_vec();
        let resampled = log.resample(&md).unwrap();

        for i in 0..log.len() {
            assert!((resampled.depth()[i] - log.depth()[i]).abs() < 1e-9, "tvd[{}]", i);
            assert!((resampled.northing()[i] - log.northing()[i]).abs() < 1e-9, "northing[{}]", i);
            assert!((resampled.easting()[i] - log.easting()[i]).abs() < 1e-9, "easting[{}]", i);
        }
        assert_eq!(resampled.dls(), log.dls());
        assert_eq!(resampled.resampled_md(), Some(&md[..]));
    }

    #[test]
    fn test_resampled_point_matches_shorter_survey() {
        // A station inserted on an arc with the arc's own tangent must land
        // exactly where the resampler puts it
        let log = minimum_curvature(
            Survey::new(vec![0.0, 100.0], vec![0.0, 30.0], vec![0.0, 0.0]).unwrap(),
            30.0,
        )
        .unwrap();
        let half = minimum_curvature(
            Survey::new(vec![0.0, 50.0], vec![0.0, 15.0], vec![0.0, 0.0]).unwrap(),
            30.0,
        )
        .unwrap();

        let resampled = log.resample(&[50.0]).unwrap();
        assert!((resampled.depth()[0] - half.depth()[1]).abs() < 1e-9);
        assert!((resampled.northing()[0] - half.northing()[1]).abs() < 1e-9);
        assert!(resampled.easting()[0].abs() < 1e-9);
    }

    #[test]
    fn test_unsorted_depths_keep_request_order() {
        let log = minimum_curvature(curved_survey(), 30.0).unwrap();
        let resampled = log.resample(&[300.0, 0.0, 150.0]).unwrap();
        assert_eq!(resampled.len(), 3);
        assert!((resampled.depth()[0] - log.depth()[3]).abs() < 1e-9);
        assert_eq!(resampled.depth()[1], 0.0);
        assert_eq!(resampled.md(), &[300.0, 0.0, 150.0]);
    }

    #[test]
    fn test_out_of_range_depths_rejected() {
        let log = minimum_curvature(curved_survey(), 30.0).unwrap();
        for bad in [-1.0, 400.5, f64::NAN] {
            let err = log.resample(&[10.0, bad]).unwrap_err();
            assert!(
                matches!(err, TrajectoryError::Validation(_)),
                "depth {} gave {:?}",
                bad,
                err
            );
        }
        assert!(log.resample(&[]).is_err());
    }

    #[test]
    fn test_double_resample_rejected() {
        let log = minimum_curvature(curved_survey(), 30.0).unwrap();
        let once = log.resample(&[0.0, 50.0]).unwrap();
        assert_eq!(once.resample(&[10.0]).unwrap_err(), TrajectoryError::AlreadyResampled);
    }

    #[test]
    fn test_other_methods_cannot_resample() {
        let survey = curved_survey();
        let log = crate::trajectory::tangential(survey, TangentialMethod::Balanced).unwrap();
        let err = log.resample(&[10.0]).unwrap_err();
        assert!(matches!(err, TrajectoryError::Unsupported { operation: "resample", .. }));
    }

    #[test]
    fn test_resample_is_shift_invariant() {
        let log = minimum_curvature(curved_survey(), 30.0).unwrap();
        let depths = [25.0, 175.0, 333.3];
        let plain = log.resample(&depths).unwrap();

        let shifted = to_tvdss(&to_wellhead(&log, 1000.0, -500.0), 80.0).resample(&depths).unwrap();
        assert_eq!(shifted.reference(), DepthReference::Tvdss { datum_elevation: 80.0 });
        for i in 0..depths.len() {
            assert!((shifted.tvd()[i] - plain.depth()[i]).abs() < 1e-9);
            assert!((shifted.northing()[i] - 1000.0 - plain.northing()[i]).abs() < 1e-9);
            assert!((shifted.easting()[i] + 500.0 - plain.easting()[i]).abs() < 1e-9);
        }
    }

    #[test]
    fn test_near_reversal_midpoint_on_arc() {
        // Horizontal turn of 180° less 0.001° over 10 units, heading north
        // then swinging through east
        let shortfall = 1e-3;
        let survey = Survey::new(
            vec![0.0, 10.0, 20.0],
            vec![90.0; 3],
            vec![0.0, 180.0 - shortfall, 180.0 - shortfall],
        )
        .unwrap();
        let log = minimum_curvature(survey, 30.0).unwrap();
        let mid = resample(&log, &[5.0]).unwrap();

        let dl = std::f64::consts::PI - shortfall.to_radians();
        let radius = 10.0 / dl;
        let expected_n = radius * (dl / 2.0).sin();
        let expected_e = radius * (1.0 - (dl / 2.0).cos());
        assert!((mid.northing()[0] - expected_n).abs() < 1e-6, "northing {}", mid.northing()[0]);
        assert!((mid.easting()[0] - expected_e).abs() < 1e-6, "easting {}", mid.easting()[0]);
        assert!(mid.tvd()[0].abs() < 1e-9);
    }

    #[test]
    fn test_resample_every_rejects_runaway_grid() {
        let log = minimum_curvature(curved_survey(), 30.0).unwrap();
        let err = log.resample_every(1e-9).unwrap_err();
        assert!(
            matches!(err, TrajectoryError::InvalidArgument { name: "md_step", .. }),
            "{:?}",
            err
        );
    }

    #[test]
    fn test_resample_every_includes_last_station() {
        let log = minimum_curvature(curved_survey(), 30.0).unwrap();
        let resampled = log.resample_every(30.0).unwrap();
        let md = resampled.md();
        assert_eq!(md.first(), Some(&0.0));
        assert_eq!(md.last(), Some(&400.0));
        assert_eq!(md.len(), 15);
        assert!(log.resample_every(0.0).is_err());
    }
}
