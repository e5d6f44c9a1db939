//! Position logs computed from a deviation survey
//!
//! A `PositionLog` holds one (depth, northing, easting) station per survey
//! station, or per requested depth once resampled. It keeps a shared
//! read-only handle to the survey it was computed from, and records which
//! trajectory model produced it.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::survey::Survey;

/// What the `depth` column is measured against.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub enum DepthReference {
    /// True vertical depth below the survey datum (positive down)
    #[default]
    Tvd,
    /// True vertical depth subsea: `datum_elevation - tvd`
    Tvdss { datum_elevation: f64 },
}

/// Tangent-averaging variants.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum TangentialMethod {
    /// Lower-station angles over the whole segment
    High,
    /// Upper-station angles over the whole segment
    Low,
    /// Averaged inclination and azimuth
    Average,
    /// Mean of the upper and lower direction vectors
    Balanced,
}

impl fmt::Display for TangentialMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TangentialMethod::High => write!(f, "high tangential"),
            TangentialMethod::Low => write!(f, "low tangential"),
            TangentialMethod::Average => write!(f, "average tangential"),
            TangentialMethod::Balanced => write!(f, "balanced tangential"),
        }
    }
}

/// Trajectory model that produced a position log.
///
/// Only minimum curvature carries dogleg severity, and only minimum
/// curvature logs can be resampled or inverted back into a survey.
#[derive(Debug, Clone, PartialEq)]
pub enum Method {
    MinimumCurvature {
        /// Dogleg severity per station, degrees per course length.
        /// The first station is always 0.
        dls: Vec<f64>,
    },
    RadiusOfCurvature,
    Tangential(TangentialMethod),
}

impl Method {
    pub fn name(&self) -> String {
        match self {
            Method::MinimumCurvature { .. } => "minimum curvature".to_string(),
            Method::RadiusOfCurvature => "radius of curvature".to_string(),
            Method::Tangential(t) => t.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PositionLog {
    pub(crate) source: Arc<Survey>,
    pub(crate) depth: Vec<f64>,
    pub(crate) northing: Vec<f64>,
    pub(crate) easting: Vec<f64>,
    pub(crate) reference: DepthReference,
    pub(crate) method: Method,
    pub(crate) resampled_md: Option<Vec<f64>>,
}

impl PositionLog {
    /// A tvd-referenced log aligned 1:1 with `source`.
    pub(crate) fn from_tvd(
        source: Arc<Survey>,
        tvd: Vec<f64>,
        northing: Vec<f64>,
        easting: Vec<f64>,
        method: Method,
    ) -> Self {
        Self {
            source,
            depth: tvd,
            northing,
            easting,
            reference: DepthReference::Tvd,
            method,
            resampled_md: None,
        }
    }

    /// The survey this log was computed from.
    pub fn source(&self) -> &Survey {
        &self.source
    }

    /// Shared handle to the source survey.
    pub fn source_arc(&self) -> Arc<Survey> {
        Arc::clone(&self.source)
    }

    /// Vertical depth column, tvd or tvdss depending on `reference()`.
    pub fn depth(&self) -> &[f64] {
        &self.depth
    }

    pub fn northing(&self) -> &[f64] {
        &self.northing
    }

    pub fn easting(&self) -> &[f64] {
        &self.easting
    }

    pub fn reference(&self) -> DepthReference {
        self.reference
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Requested depths, if this log was produced by `resample()`.
    pub fn resampled_md(&self) -> Option<&[f64]> {
        self.resampled_md.as_deref()
    }

    pub fn is_resampled(&self) -> bool {
        self.resampled_md.is_some()
    }

    /// Measured depth of each station: the resampled depths if present,
    /// otherwise the source survey's md.
    pub fn md(&self) -> &[f64] {
        self.resampled_md.as_deref().unwrap_or_else(|| self.source.md())
    }

    /// Dogleg severity per station (minimum curvature only).
    pub fn dls(&self) -> Option<&[f64]> {
        match &self.method {
            Method::MinimumCurvature { dls } => Some(dls),
            _ => None,
        }
    }

    pub fn len(&self) -> usize {
        self.depth.len()
    }

    pub fn is_empty(&self) -> bool {
        self.depth.is_empty()
    }

    /// True vertical depth, whatever the current depth reference.
    pub fn tvd(&self) -> Vec<f64> {
        match self.reference {
            DepthReference::Tvd => self.depth.clone(),
            DepthReference::Tvdss { datum_elevation } => {
                self.depth.iter().map(|d| datum_elevation - d).collect()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn log() -> PositionLog {
        let survey = Survey::new(vec![0.0, 10.0], vec![0.0, 0.0], vec![0.0, 0.0]).unwrap();
        PositionLog::from_tvd(
            Arc::new(survey),
            vec![0.0, 10.0],
            vec![0.0, 0.0],
            vec![0.0, 0.0],
            Method::MinimumCurvature { dls: vec![0.0, 0.0] },
        )
    }

    #[test]
    fn test_md_falls_back_to_source() {
        let log = log();
        assert_eq!(log.md(), &[0.0, 10.0]);
        assert!(!log.is_resampled());
    }

    #[test]
    fn test_tvd_from_tvdss() {
        let mut log = log();
        log.depth = vec![25.0, 15.0];
        log.reference = DepthReference::Tvdss { datum_elevation: 25.0 };
        assert_eq!(log.tvd(), vec![0.0, 10.0]);
    }

    #[test]
    fn test_dls_only_for_minimum_curvature() {
        let mut log = log();
        assert_eq!(log.dls(), Some(&[0.0, 0.0][..]));
        log.method = Method::RadiusOfCurvature;
        assert_eq!(log.dls(), None);
    }

    #[test]
    fn test_method_names() {
        assert_eq!(Method::RadiusOfCurvature.name(), "radius of curvature");
        assert_eq!(
            Method::Tangential(TangentialMethod::Balanced).name(),
            "balanced tangential"
        );
    }
}
