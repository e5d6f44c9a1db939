//! Processing configuration
//!
//! Units, dogleg course length, resampling step and CSV formatting loaded
//! from TOML. Library functions take these values as explicit arguments;
//! the config only feeds the command-line front end.
//!
//! ## Loading Order
//!
//! 1. `WELLPATH_CONFIG` environment variable (path to TOML file)
//! 2. `wellpath.toml` in the current working directory
//! 3. Built-in defaults
//!
//! ```ignore
//! let config = WellpathConfig::load();
//! let log = minimum_curvature(survey, config.survey.course_length())?;
//! ```

mod wellpath_config;
pub mod defaults;
pub mod validation;

pub use wellpath_config::*;
