//! Wellpath configuration - processing defaults as TOML values
//!
//! Every section has a `Default` impl, so an empty or missing file yields
//! the built-in behaviour.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use super::defaults;
use crate::csv_io::CsvFormat;
use crate::types::LengthUnit;

// ============================================================================
// Top-Level Config
// ============================================================================

/// Root configuration.
///
/// Load with `WellpathConfig::load()` which searches:
/// 1. `$WELLPATH_CONFIG` env var
/// 2. `./wellpath.toml`
/// 3. Built-in defaults
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct WellpathConfig {
    /// Survey units and dogleg severity normalisation
    #[serde(default)]
    pub survey: SurveyConfig,

    /// Regular resampling
    #[serde(default)]
    pub resample: ResampleConfig,

    /// CSV output formatting
    #[serde(default)]
    pub output: OutputConfig,
}

impl WellpathConfig {
    /// Load configuration using the standard search order:
    /// 1. `$WELLPATH_CONFIG` environment variable
    /// 2. `./wellpath.toml` in the current working directory
    /// 3. Built-in defaults
    pub fn load() -> Self {
        // 1. Check env var
        if let Ok(path) = std::env::var(defaults::CONFIG_ENV_VAR) {
            let p = PathBuf::from(&path);
            if p.exists() {
                match Self::load_from_file(&p) {
                    Ok(config) => {
                        info!(path = %p.display(), "Loaded config from WELLPATH_CONFIG");
                        return config;
                    }
                    Err(e) => {
                        warn!(path = %p.display(), error = %e, "Failed to load config from WELLPATH_CONFIG, falling back");
                    }
                }
            } else {
                warn!(path = %path, "WELLPATH_CONFIG points to non-existent file, falling back");
            }
        }

        // 2. Check ./wellpath.toml
        let local = PathBuf::from(defaults::LOCAL_CONFIG_FILE);
        if local.exists() {
            match Self::load_from_file(&local) {
                Ok(config) => {
                    info!("Loaded config from ./wellpath.toml");
                    return config;
                }
                Err(e) => {
                    warn!(error = %e, "Failed to load ./wellpath.toml, using defaults");
                }
            }
        }

        // 3. Defaults
        info!("No wellpath.toml found, using built-in defaults");
        Self::default()
    }

    /// Load from a specific TOML file path.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents =
            std::fs::read_to_string(path).map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;
        Self::from_toml_str(&contents).map_err(|e| match e {
            ConfigError::Parse(_, err) => ConfigError::Parse(path.to_path_buf(), err),
            other => other,
        })
    }

    /// Parse and validate TOML text. Unknown keys are logged, not rejected.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        // Two-pass: check for unknown keys first (warnings only)
        for w in super::validation::validate_unknown_keys(contents) {
            warn!("{}", w);
        }

        let config: Self =
            toml::from_str(contents).map_err(|e| ConfigError::Parse(PathBuf::new(), e))?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize the current config to a TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(ConfigError::Serialize)
    }

    pub fn save_to_file(&self, path: &Path) -> Result<(), ConfigError> {
        let contents = self.to_toml()?;
        std::fs::write(path, contents).map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;
        info!(path = %path.display(), "Config saved");
        Ok(())
    }

    /// Validate all settings, collecting every problem.
    ///
    /// Rules:
    /// - Course length and md step must be finite and > 0
    /// - Precision must not exceed `MAX_OUTPUT_PRECISION`
    /// - Delimiter must be a single character that cannot appear in a number
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors: Vec<String> = Vec::new();

        if let Some(course_length) = self.survey.course_length {
            Self::check_positive(course_length, "survey.course_length", &mut errors);
        }
        Self::check_positive(self.resample.md_step, "resample.md_step", &mut errors);

        if self.output.precision > defaults::MAX_OUTPUT_PRECISION {
            errors.push(format!(
                "output.precision ({}) must be <= {}",
                self.output.precision,
                defaults::MAX_OUTPUT_PRECISION
            ));
        }

        let mut chars = self.output.delimiter.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) if !(c.is_ascii_digit() || matches!(c, '.' | '-' | '+' | '"' | 'e' | 'E')) => {}
            _ => errors.push(format!(
                "output.delimiter ({:?}) must be a single character that cannot appear in a number",
                self.output.delimiter
            )),
        }

        // Physical range validation
        let (range_errors, range_warnings) = super::validation::validate_physical_ranges(self);
        errors.extend(range_errors);
        for w in &range_warnings {
            warn!("{}", w);
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors))
        }
    }

    fn check_positive(value: f64, name: &str, errors: &mut Vec<String>) {
        // NaN comparisons silently pass, catch them explicitly
        if !value.is_finite() || value <= 0.0 {
            errors.push(format!("{name} must be a finite number > 0 (got {value})"));
        }
    }

    /// CSV format for written files.
    pub fn csv_format(&self) -> CsvFormat {
        CsvFormat {
            delimiter: self.output.delimiter_char(),
            precision: self.output.precision,
        }
    }
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(PathBuf, std::io::Error),
    Parse(PathBuf, toml::de::Error),
    Serialize(toml::ser::Error),
    Validation(Vec<String>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(path, e) => write!(f, "Config I/O error ({}): {}", path.display(), e),
            ConfigError::Parse(path, e) => {
                write!(f, "Config parse error ({}): {}", path.display(), e)
            }
            ConfigError::Serialize(e) => write!(f, "Config serialization error: {}", e),
            ConfigError::Validation(errors) => {
                writeln!(f, "Config validation failed:")?;
                for e in errors {
                    writeln!(f, "  - {}", e)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Survey
// ============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SurveyConfig {
    /// Dogleg severity normalisation length. Defaults to 30 for metres and
    /// 100 for feet when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub course_length: Option<f64>,

    /// Length unit of survey measured depths
    #[serde(default)]
    pub units: LengthUnit,
}

impl SurveyConfig {
    /// Configured course length, or the convention for `units`.
    pub fn course_length(&self) -> f64 {
        self.course_length
            .unwrap_or_else(|| self.units.default_course_length())
    }
}

// ============================================================================
// Resampling
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ResampleConfig {
    /// Measured-depth step for `resample --step` and `interpolate`
    #[serde(default = "default_md_step")]
    pub md_step: f64,
}

fn default_md_step() -> f64 {
    defaults::MD_STEP
}

impl Default for ResampleConfig {
    fn default() -> Self {
        Self {
            md_step: defaults::MD_STEP,
        }
    }
}

// ============================================================================
// Output
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OutputConfig {
    /// Decimals per CSV value
    #[serde(default = "default_precision")]
    pub precision: usize,

    /// CSV field separator (single character)
    #[serde(default = "default_delimiter")]
    pub delimiter: String,
}

fn default_precision() -> usize {
    defaults::OUTPUT_PRECISION
}

fn default_delimiter() -> String {
    defaults::OUTPUT_DELIMITER.to_string()
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            precision: defaults::OUTPUT_PRECISION,
            delimiter: default_delimiter(),
        }
    }
}

impl OutputConfig {
    /// First character of the delimiter; `validate()` guarantees there is
    /// exactly one.
    pub fn delimiter_char(&self) -> char {
        self.delimiter.chars().next().unwrap_or(',')
    }
}
