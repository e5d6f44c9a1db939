//! Well header: depth datum, units and surface location
//!
//! Only plain floats from the header reach the trajectory code, as the
//! offsets passed to `to_wellhead()` and the elevation passed to `to_tvdss()`.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::units::LengthUnit;

#[derive(Error, Debug)]
pub enum HeaderError {
    #[error("failed to read header {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse header JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("header field '{field}' must be a finite number, got {value}")]
    NotFinite { field: &'static str, value: f64 },
}

/// Depth reference point on the rig.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Datum {
    /// Kelly bushing
    #[default]
    Kb,
    /// Drill floor elevation
    Dfe,
    /// Rotary table
    Rt,
}

impl fmt::Display for Datum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Datum::Kb => write!(f, "kb"),
            Datum::Dfe => write!(f, "dfe"),
            Datum::Rt => write!(f, "rt"),
        }
    }
}

/// Deviation header metadata.
///
/// `elevation` is the datum height above mean sea level in `units`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct WellHeader {
    pub datum: Datum,
    pub units: LengthUnit,
    pub elevation: f64,
    pub surface_northing: f64,
    pub surface_easting: f64,
}

impl WellHeader {
    pub fn from_json_str(json: &str) -> Result<Self, HeaderError> {
        let header: WellHeader = serde_json::from_str(json)?;
        header.validate()?;
        Ok(header)
    }

    pub fn from_json_file(path: &Path) -> Result<Self, HeaderError> {
        let contents = std::fs::read_to_string(path).map_err(|source| HeaderError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let header = Self::from_json_str(&contents)?;
        tracing::debug!(
            path = %path.display(),
            datum = %header.datum,
            units = %header.units,
            elevation = header.elevation,
            "Loaded well header"
        );
        Ok(header)
    }

    pub fn to_json_string(&self) -> Result<String, HeaderError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    fn validate(&self) -> Result<(), HeaderError> {
        for (field, value) in [
            ("elevation", self.elevation),
            ("surface_northing", self.surface_northing),
            ("surface_easting", self.surface_easting),
        ] {
            if !value.is_finite() {
                return Err(HeaderError::NotFinite { field, value });
            }
        }
        Ok(())
    }
}
