//! Deviation survey: validated (md, inc, azi) stations

use serde::Serialize;

use crate::checks::{check_survey_arrays, ValidationError};

/// A single survey station.
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct Station {
    /// Measured depth
    pub md: f64,
    /// Inclination from vertical, degrees
    pub inc: f64,
    /// Azimuth from north, degrees
    pub azi: f64,
}

/// Ordered deviation survey.
///
/// Immutable once built: md is strictly increasing, inclination lies in
/// [0, 180), azimuth in [0, 360) and nothing is NaN. Operations that derive
/// a new survey return a new value.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Survey {
    md: Vec<f64>,
    inc: Vec<f64>,
    azi: Vec<f64>,
}

impl Survey {
    /// Validate the arrays and build a survey.
    pub fn new(md: Vec<f64>, inc: Vec<f64>, azi: Vec<f64>) -> Result<Self, ValidationError> {
        check_survey_arrays(&md, &inc, &azi)?;
        Ok(Self { md, inc, azi })
    }

    pub fn from_stations(stations: &[Station]) -> Result<Self, ValidationError> {
        Self::new(
            stations.iter().map(|s| s.md).collect(),
            stations.iter().map(|s| s.inc).collect(),
            stations.iter().map(|s| s.azi).collect(),
        )
    }

    pub fn md(&self) -> &[f64] {
        &self.md
    }

    pub fn inc(&self) -> &[f64] {
        &self.inc
    }

    pub fn azi(&self) -> &[f64] {
        &self.azi
    }

    pub fn len(&self) -> usize {
        self.md.len()
    }

    /// Always false for a constructed survey; present for API symmetry.
    pub fn is_empty(&self) -> bool {
        self.md.is_empty()
    }

    pub fn station(&self, index: usize) -> Option<Station> {
        Some(Station {
            md: *self.md.get(index)?,
            inc: self.inc[index],
            azi: self.azi[index],
        })
    }

    pub fn stations(&self) -> impl Iterator<Item = Station> + '_ {
        self.md
            .iter()
            .zip(&self.inc)
            .zip(&self.azi)
            .map(|((&md, &inc), &azi)| Station { md, inc, azi })
    }

    /// First and last measured depth.
    pub fn md_range(&self) -> (f64, f64) {
        (
            self.md.first().copied().unwrap_or(0.0),
            self.md.last().copied().unwrap_or(0.0),
        )
    }

    /// Same stations with measured depth rescaled by `factor` (unit conversion).
    pub fn with_scaled_md(&self, factor: f64) -> Result<Self, ValidationError> {
        Self::new(
            self.md.iter().map(|md| md * factor).collect(),
            self.inc.clone(),
            self.azi.clone(),
        )
    }
}
