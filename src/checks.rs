//! Input validation for survey and position arrays
//!
//! Every survey and position log passes through here before any geometry
//! runs. The geometry kernel assumes well-formed input and does not re-check.
//!
//! Checks, in order:
//! 1. Arrays are non-empty and the same length
//! 2. No NaN or infinite values
//! 3. Measured depth (or depth, for the monotonic position variant) is
//!    strictly increasing
//! 4. Inclination in [0, 180), azimuth in [0, 360)

use thiserror::Error;

/// Inclination domain, degrees (half-open).
pub const INCLINATION_RANGE: (f64, f64) = (0.0, 180.0);

/// Azimuth domain, degrees (half-open).
pub const AZIMUTH_RANGE: (f64, f64) = (0.0, 360.0);

/// A constraint on survey or position input that does not hold.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("{field} is empty")]
    Empty { field: &'static str },

    #[error("need at least {needed} stations, have {available}")]
    TooFewStations { needed: usize, available: usize },

    #[error("{field} has {len} values but {other} has {other_len}; arrays must be the same length")]
    LengthMismatch {
        field: &'static str,
        len: usize,
        other: &'static str,
        other_len: usize,
    },

    #[error("{field}[{index}] = {value} is not a finite number")]
    NotFinite {
        field: &'static str,
        index: usize,
        value: f64,
    },

    #[error("{field} must be strictly increasing: {field}[{index}] = {value} follows {previous}")]
    NotIncreasing {
        field: &'static str,
        index: usize,
        value: f64,
        previous: f64,
    },

    #[error("{field}[{index}] = {value} is outside {expected}")]
    OutOfRange {
        field: &'static str,
        index: usize,
        value: f64,
        expected: String,
    },
}

// ============================================================================
// Survey Arrays
// ============================================================================

/// Validate (md, inc, azi) arrays for a deviation survey.
pub fn check_survey_arrays(md: &[f64], inc: &[f64], azi: &[f64]) -> Result<(), ValidationError> {
    check_same_length(&[("md", md), ("inc", inc), ("azi", azi)])?;
    check_finite("md", md)?;
    check_finite("inc", inc)?;
    check_finite("azi", azi)?;
    check_strictly_increasing("md", md)?;
    check_half_open_range("inc", inc, INCLINATION_RANGE)?;
    check_half_open_range("azi", azi, AZIMUTH_RANGE)?;
    Ok(())
}

// ============================================================================
// Position Arrays
// ============================================================================

/// Validate (depth, northing, easting) arrays for a position log.
///
/// `monotonic` additionally requires strictly increasing depth, which only
/// depth-indexed interpolation needs. Horizontal or build-and-drop wells go
/// through the measured-depth-indexed path instead.
pub fn check_position_arrays(
    depth: &[f64],
    northing: &[f64],
    easting: &[f64],
    monotonic: bool,
) -> Result<(), ValidationError> {
    check_same_length(&[("depth", depth), ("northing", northing), ("easting", easting)])?;
    check_finite("depth", depth)?;
    check_finite("northing", northing)?;
    check_finite("easting", easting)?;
    if monotonic {
        check_strictly_increasing("depth", depth)?;
    }
    Ok(())
}

/// Require at least `needed` stations.
pub fn check_min_stations(available: usize, needed: usize) -> Result<(), ValidationError> {
    if available < needed {
        return Err(ValidationError::TooFewStations { needed, available });
    }
    Ok(())
}

/// Require every value in `values` to lie inside the closed interval [min, max].
pub fn check_closed_range(
    field: &'static str,
    values: &[f64],
    min: f64,
    max: f64,
) -> Result<(), ValidationError> {
    check_finite(field, values)?;
    if let Some((index, &value)) = values
        .iter()
        .enumerate()
        .find(|(_, &v)| v < min || v > max)
    {
        return Err(ValidationError::OutOfRange {
            field,
            index,
            value,
            expected: format!("[{min}, {max}]"),
        });
    }
    Ok(())
}

// ============================================================================
// Building Blocks
// ============================================================================

fn check_same_length(arrays: &[(&'static str, &[f64])]) -> Result<(), ValidationError> {
    let Some(&(first_name, first)) = arrays.first() else {
        return Ok(());
    };
    if first.is_empty() {
        return Err(ValidationError::Empty { field: first_name });
    }
    for &(name, values) in &arrays[1..] {
        if values.len() != first.len() {
            return Err(ValidationError::LengthMismatch {
                field: name,
                len: values.len(),
                other: first_name,
                other_len: first.len(),
            });
        }
    }
    Ok(())
}

fn check_finite(field: &'static str, values: &[f64]) -> Result<(), ValidationError> {
    if let Some((index, &value)) = values.iter().enumerate().find(|(_, v)| !v.is_finite()) {
        return Err(ValidationError::NotFinite { field, index, value });
    }
    Ok(())
}

fn check_strictly_increasing(field: &'static str, values: &[f64]) -> Result<(), ValidationError> {
    if let Some((i, w)) = values.windows(2).enumerate().find(|(_, w)| w[1] <= w[0]) {
        return Err(ValidationError::NotIncreasing {
            field,
            index: i + 1,
            value: w[1],
            previous: w[0],
        });
    }
    Ok(())
}

fn check_half_open_range(
    field: &'static str,
    values: &[f64],
    (min, max): (f64, f64),
) -> Result<(), ValidationError> {
    if let Some((index, &value)) = values
        .iter()
        .enumerate()
        .find(|(_, &v)| v < min || v >= max)
    {
        return Err(ValidationError::OutOfRange {
            field,
            index,
            value,
            expected: format!("[{min}, {max})"),
        });
    }
    Ok(())
}
