//! Coordinate shifts on position logs
//!
//! All shifts return a new log. The caller is responsible for the offsets
//! being in the same unit as the log.

use tracing::debug;

use crate::types::{DepthReference, PositionLog};

/// Add the surface location to northing and easting.
pub fn to_wellhead(log: &PositionLog, surface_northing: f64, surface_easting: f64) -> PositionLog {
    shift_horizontal(log, surface_northing, surface_easting)
}

/// Subtract the surface location from northing and easting.
///
/// Inverse of `to_wellhead()` with the same offsets.
pub fn to_zero(log: &PositionLog, surface_northing: f64, surface_easting: f64) -> PositionLog {
    shift_horizontal(log, -surface_northing, -surface_easting)
}

/// Re-reference depth to subsea: `tvdss = datum_elevation - tvd`.
///
/// Offshore wells end up with negative tvdss. A log already in tvdss is
/// re-referenced from its true vertical depth, so the new elevation
/// replaces the old one.
pub fn to_tvdss(log: &PositionLog, datum_elevation: f64) -> PositionLog {
    let depth = log.tvd().iter().map(|tvd| datum_elevation - tvd).collect();
    debug!(datum_elevation, "Shifted position log to tvdss");

    PositionLog {
        depth,
        reference: DepthReference::Tvdss { datum_elevation },
        ..log.clone()
    }
}

fn shift_horizontal(log: &PositionLog, d_northing: f64, d_easting: f64) -> PositionLog {
    PositionLog {
        northing: log.northing.iter().map(|n| n + d_northing).collect(),
        easting: log.easting.iter().map(|e| e + d_easting).collect(),
        ..log.clone()
    }
}

impl PositionLog {
    pub fn to_wellhead(&self, surface_northing: f64, surface_easting: f64) -> PositionLog {
        to_wellhead(self, surface_northing, surface_easting)
    }

    pub fn to_zero(&self, surface_northing: f64, surface_easting: f64) -> PositionLog {
        to_zero(self, surface_northing, surface_easting)
    }

    pub fn to_tvdss(&self, datum_elevation: f64) -> PositionLog {
        to_tvdss(self, datum_elevation)
    }

    /// In-place variant of `to_wellhead()` for callers that own the log.
    pub fn shift_to_wellhead_in_place(&mut self, surface_northing: f64, surface_easting: f64) {
        self.northing.iter_mut().for_each(|n| *n += surface_northing);
        self.easting.iter_mut().for_each(|e| *e += surface_easting);
    }
}
