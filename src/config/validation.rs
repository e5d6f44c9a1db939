//! Config validation: unknown-key detection with Levenshtein suggestions
//! and range checks.
//!
//! Two-pass parse: the raw TOML is first read into a `toml::Value`, its key
//! tree is compared against the known field names and any stranger produces
//! a warning with a "did you mean?" suggestion. Serde deserialization runs
//! afterwards. Unknown keys never fail a load.

use std::collections::HashSet;

use super::WellpathConfig;
use crate::types::LengthUnit;

/// A non-fatal config warning (typo, suspicious value).
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    pub field: String,
    pub message: String,
    pub suggestion: Option<String>,
}

impl std::fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)?;
        if let Some(ref s) = self.suggestion {
            write!(f, " (did you mean '{s}'?)")?;
        }
        Ok(())
    }
}

// ============================================================================
// Known Config Keys
// ============================================================================

/// Every valid dotted key path for `WellpathConfig`.
///
/// Kept by hand in step with wellpath_config.rs.
pub fn known_config_keys() -> HashSet<&'static str> {
    let keys: &[&str] = &[
        // [survey]
        "survey",
        "survey.course_length",
        "survey.units",
        // [resample]
        "resample",
        "resample.md_step",
        // [output]
        "output",
        "output.precision",
        "output.delimiter",
    ];
    keys.iter().copied().collect()
}

// ============================================================================
// TOML Key Walking
// ============================================================================

/// Recursively walks a `toml::Value` tree and collects all dotted key paths.
///
/// For example, a table `{ a = { b = 1, c = 2 } }` yields:
/// `["a", "a.b", "a.c"]`
pub fn walk_toml_keys(value: &toml::Value, prefix: &str) -> Vec<String> {
    let mut keys = Vec::new();
    if let Some(table) = value.as_table() {
        for (k, v) in table {
            let path = if prefix.is_empty() {
                k.clone()
            } else {
                format!("{prefix}.{k}")
            };
            keys.push(path.clone());
            if v.is_table() {
                keys.extend(walk_toml_keys(v, &path));
            }
        }
    }
    keys
}

// ============================================================================
// Levenshtein Distance
// ============================================================================

fn levenshtein(a: &str, b: &str) -> usize {
    let b_chars: Vec<char> = b.chars().collect();
    let mut prev: Vec<usize> = (0..=b_chars.len()).collect();
    let mut curr = vec![0; b_chars.len() + 1];

    for (i, ca) in a.chars().enumerate() {
        curr[0] = i + 1;
        for (j, &cb) in b_chars.iter().enumerate() {
            let cost = usize::from(ca != cb);
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b_chars.len()]
}

/// Suggest the closest known key for an unknown key, if within edit distance 3.
///
/// Ties go to the alphabetically first key so suggestions are stable.
pub fn suggest_correction(unknown: &str, known: &HashSet<&str>) -> Option<String> {
    known
        .iter()
        .map(|&k| (levenshtein(unknown, k), k))
        .filter(|&(dist, _)| dist <= 3)
        .min()
        .map(|(_, k)| k.to_string())
}

// ============================================================================
// Unknown Key Validation (entry point)
// ============================================================================

/// Parse a raw TOML string and return warnings for any unknown config keys.
pub fn validate_unknown_keys(raw_toml: &str) -> Vec<ValidationWarning> {
    let value: toml::Value = match raw_toml.parse() {
        Ok(v) => v,
        Err(_) => return Vec::new(), // parse errors are reported by serde later
    };

    let known = known_config_keys();
    walk_toml_keys(&value, "")
        .into_iter()
        .filter(|key| !known.contains(key.as_str()))
        .map(|key| ValidationWarning {
            suggestion: suggest_correction(&key, &known),
            message: format!("Unknown config key '{key}'"),
            field: key,
        })
        .collect()
}

// ============================================================================
// Range Validation
// ============================================================================

/// Md step above which resampled output is suspiciously coarse.
const COARSE_MD_STEP: f64 = 100.0;

/// Check a parsed config for suspicious combinations.
///
/// Returns (errors, warnings). Nothing here is currently fatal, but the
/// error list keeps the same shape as the other validation passes.
pub fn validate_physical_ranges(config: &WellpathConfig) -> (Vec<String>, Vec<ValidationWarning>) {
    let errors = Vec::new();
    let mut warnings = Vec::new();

    let units = config.survey.units;
    if let Some(course_length) = config.survey.course_length {
        let other = match units {
            LengthUnit::Metres => LengthUnit::Feet,
            LengthUnit::Feet => LengthUnit::Metres,
        };
        if course_length == other.default_course_length() {
            warnings.push(ValidationWarning {
                field: "survey.course_length".to_string(),
                message: format!(
                    "survey.course_length = {course_length} is the {other} convention but survey.units = \"{units}\""
                ),
                suggestion: Some(format!("{}", units.default_course_length())),
            });
        }
    }

    if config.resample.md_step > COARSE_MD_STEP {
        warnings.push(ValidationWarning {
            field: "resample.md_step".to_string(),
            message: format!(
                "resample.md_step = {} is coarser than typical survey spacing",
                config.resample.md_step
            ),
            suggestion: None,
        });
    }

    (errors, warnings)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_levenshtein_identical() {
        assert_eq!(levenshtein("units", "units"), 0);
    }

    #[test]
    fn test_levenshtein_one_edit() {
        assert_eq!(levenshtein("precison", "precision"), 1);
    }

    #[test]
    fn test_levenshtein_empty() {
        assert_eq!(levenshtein("", "abc"), 3);
        assert_eq!(levenshtein("abc", ""), 3);
    }

    #[test]
    fn test_walk_toml_keys_nested() {
        let toml: toml::Value = r#"
            [output]
            precision = 4
        "#
        .parse()
        .unwrap();
        let keys = walk_toml_keys(&toml, "");
        assert!(keys.contains(&"output".to_string()));
        assert!(keys.contains(&"output.precision".to_string()));
    }

    #[test]
    fn test_typo_key_produces_warning_with_suggestion() {
        let warnings = validate_unknown_keys("[output]\nprecison = 4\n");
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].field, "output.precison");
        assert_eq!(warnings[0].suggestion.as_deref(), Some("output.precision"));
    }

    #[test]
    fn test_all_valid_keys_produce_zero_warnings() {
        let toml_str = r#"
[survey]
course_length = 30.0
units = "m"

[resample]
md_step = 0.5

[output]
precision = 4
delimiter = ";"
"#;
        let warnings = validate_unknown_keys(toml_str);
        assert!(warnings.is_empty(), "Expected 0 warnings, got: {:?}", warnings);
    }

    #[test]
    fn test_unknown_section_produces_warning() {
        let warnings = validate_unknown_keys("[plotting]\ncolor = \"red\"\n");
        assert!(warnings.iter().any(|w| w.field == "plotting"));
        assert!(warnings.iter().any(|w| w.field == "plotting.color"));
    }

    #[test]
    fn test_suggest_correction_no_match_for_garbage() {
        let known = known_config_keys();
        assert_eq!(suggest_correction("zzzzzzzzzzzzzz", &known), None);
    }

    #[test]
    fn test_unit_mismatch_course_length_warns() {
        let mut config = WellpathConfig::default();
        config.survey.course_length = Some(100.0);
        let (errors, warnings) = validate_physical_ranges(&config);
        assert!(errors.is_empty());
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].suggestion.as_deref(), Some("30"));

        config.survey.units = LengthUnit::Feet;
        let (_, warnings) = validate_physical_ranges(&config);
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_coarse_step_warns() {
        let mut config = WellpathConfig::default();
        config.resample.md_step = 500.0;
        let (_, warnings) = validate_physical_ranges(&config);
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].field, "resample.md_step");
    }

    #[test]
    fn test_defaults_clean() {
        let (errors, warnings) = validate_physical_ranges(&WellpathConfig::default());
        assert!(errors.is_empty());
        assert!(warnings.is_empty());
    }
}
