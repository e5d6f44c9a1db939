//! Default values for every configurable setting.
//!
//! Numeric tolerances used by the geometry code live next to the functions
//! that use them (`geometry::ZERO_NORM_EPSILON`,
//! `trajectory::DEGENERATE_ANGLE_EPSILON`, ...) and are not configurable.

// ============================================================================
// Survey
// ============================================================================

/// Name of the config file looked up in the working directory.
pub const LOCAL_CONFIG_FILE: &str = "wellpath.toml";

/// Environment variable pointing at a config file.
pub const CONFIG_ENV_VAR: &str = "WELLPATH_CONFIG";

// ============================================================================
// Resampling
// ============================================================================

/// Measured-depth step for regular resampling and interpolation.
pub const MD_STEP: f64 = 1.0;

// ============================================================================
// Output
// ============================================================================

/// Decimals written per CSV value.
pub const OUTPUT_PRECISION: usize = 3;

/// Largest accepted output precision. f64 carries ~15-17 significant digits.
pub const MAX_OUTPUT_PRECISION: usize = 12;

/// CSV field separator.
pub const OUTPUT_DELIMITER: &str = ",";
