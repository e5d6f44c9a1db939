//! Length units for survey depths and positions
//!
//! Trajectory math is unit-agnostic; these helpers only rescale arrays
//! before or after a computation and pick a conventional course length.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Metres per international foot (exact).
pub const METRES_PER_FOOT: f64 = 0.3048;

/// Conventional dogleg severity course length for metric surveys (°/30 m).
pub const COURSE_LENGTH_METRES: f64 = 30.0;

/// Conventional dogleg severity course length for imperial surveys (°/100 ft).
pub const COURSE_LENGTH_FEET: f64 = 100.0;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default, Hash)]
pub enum LengthUnit {
    #[default]
    #[serde(rename = "m")]
    Metres,
    #[serde(rename = "ft")]
    Feet,
}

impl LengthUnit {
    /// Convert a single length from `self` into `to`.
    pub fn convert(self, value: f64, to: LengthUnit) -> f64 {
        match (self, to) {
            (LengthUnit::Metres, LengthUnit::Feet) => value / METRES_PER_FOOT,
            (LengthUnit::Feet, LengthUnit::Metres) => value * METRES_PER_FOOT,
            _ => value,
        }
    }

    pub fn convert_all(self, values: &[f64], to: LengthUnit) -> Vec<f64> {
        values.iter().map(|&v| self.convert(v, to)).collect()
    }

    /// Course length conventionally used for dogleg severity in this unit.
    pub fn default_course_length(self) -> f64 {
        match self {
            LengthUnit::Metres => COURSE_LENGTH_METRES,
            LengthUnit::Feet => COURSE_LENGTH_FEET,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            LengthUnit::Metres => "m",
            LengthUnit::Feet => "ft",
        }
    }
}

impl fmt::Display for LengthUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

impl FromStr for LengthUnit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "m" | "metres" | "meters" | "metre" | "meter" => Ok(LengthUnit::Metres),
            "ft" | "feet" | "foot" => Ok(LengthUnit::Feet),
            other => Err(format!("unknown length unit '{}': expected m or ft", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feet_to_metres() {
        assert!((LengthUnit::Feet.convert(100.0, LengthUnit::Metres) - 30.48).abs() < 1e-12);
    }

    #[test]
    fn test_metres_to_feet_and_back() {
        let ft = LengthUnit::Metres.convert(1000.0, LengthUnit::Feet);
        assert!((ft - 3280.839895).abs() < 1e-5, "got {}", ft);
        let m = LengthUnit::Feet.convert(ft, LengthUnit::Metres);
        assert!((m - 1000.0).abs() < 1e-9);
    }

    #[test]
    fn test_same_unit_is_identity() {
        assert_eq!(LengthUnit::Feet.convert(12.5, LengthUnit::Feet), 12.5);
        assert_eq!(
            LengthUnit::Metres.convert_all(&[1.0, 2.0], LengthUnit::Metres),
            vec![1.0, 2.0]
        );
    }

    #[test]
    fn test_default_course_length() {
        assert_eq!(LengthUnit::Metres.default_course_length(), 30.0);
        assert_eq!(LengthUnit::Feet.default_course_length(), 100.0);
    }

    #[test]
    fn test_parse() {
        assert_eq!("m".parse::<LengthUnit>(), Ok(LengthUnit::Metres));
        assert_eq!("Meters".parse::<LengthUnit>(), Ok(LengthUnit::Metres));
        assert_eq!(" FT ".parse::<LengthUnit>(), Ok(LengthUnit::Feet));
        assert!("yards".parse::<LengthUnit>().is_err());
    }

    #[test]
    fn test_serde_uses_symbols() {
        let json = serde_json::to_string(&LengthUnit::Feet).unwrap();
        assert_eq!(json, "\"ft\"");
        let unit: LengthUnit = serde_json::from_str("\"m\"").unwrap();
        assert_eq!(unit, LengthUnit::Metres);
    }
}
