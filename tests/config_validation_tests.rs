//! Config Validation Tests
//!
//! Typo detection and range validation exercised through the public config
//! API, independent of any trajectory computation.

use wellpath::config::validation::{
    known_config_keys, suggest_correction, validate_physical_ranges, validate_unknown_keys,
};
use wellpath::config::{ConfigError, WellpathConfig};
use wellpath::types::LengthUnit;

// ============================================================================
// Typo Detection
// ============================================================================

#[test]
fn typo_in_survey_section_warns_with_suggestion() {
    let toml_str = r#"
[survey]
cource_length = 30.0
"#;
    let warnings = validate_unknown_keys(toml_str);
    assert_eq!(warnings.len(), 1, "Expected exactly 1 warning");
    assert_eq!(warnings[0].field, "survey.cource_length");
    assert_eq!(warnings[0].suggestion.as_deref(), Some("survey.course_length"));
    assert!(warnings[0].to_string().contains("did you mean 'survey.course_length'"));
}

#[test]
fn misspelled_section_is_reported() {
    let warnings = validate_unknown_keys("[ouptut]\nprecision = 3\n");
    assert!(warnings.iter().any(|w| w.field == "ouptut"));
    let nested = warnings
        .iter()
        .find(|w| w.field == "ouptut.precision")
        .unwrap();
    assert_eq!(nested.suggestion.as_deref(), Some("output.precision"));
}

#[test]
fn valid_config_produces_zero_warnings() {
    let toml_str = r#"
[survey]
units = "ft"
course_length = 100.0

[resample]
md_step = 10.0

[output]
precision = 2
delimiter = "\t"
"#;
    assert!(validate_unknown_keys(toml_str).is_empty());
    let config = WellpathConfig::from_toml_str(toml_str).unwrap();
    assert_eq!(config.survey.units, LengthUnit::Feet);
    assert_eq!(config.csv_format().delimiter, '\t');
}

#[test]
fn unknown_keys_do_not_fail_loading() {
    let config = WellpathConfig::from_toml_str("[resample]\nmd_stepp = 5.0\n").unwrap();
    assert_eq!(config.resample.md_step, 1.0);
}

#[test]
fn every_known_key_is_accepted_by_serde() {
    // A config naming every leaf key must parse without unknown-key warnings
    let toml_str = r#"
[survey]
course_length = 30.0
units = "m"

[resample]
md_step = 1.0

[output]
precision = 3
delimiter = ","
"#;
    let found = validate_unknown_keys(toml_str);
    assert!(found.is_empty());
    assert_eq!(known_config_keys().len(), 8);
    assert!(WellpathConfig::from_toml_str(toml_str).is_ok());
}

#[test]
fn garbage_key_has_no_suggestion() {
    assert_eq!(suggest_correction("completely.unrelated.thing", &known_config_keys()), None);
}

// ============================================================================
// Range Validation
// ============================================================================

#[test]
fn negative_course_length_is_fatal() {
    let err = WellpathConfig::from_toml_str("[survey]\ncourse_length = -100.0\n").unwrap_err();
    match err {
        ConfigError::Validation(errors) => {
            assert_eq!(errors.len(), 1);
            assert!(errors[0].contains("survey.course_length"));
        }
        other => panic!("expected validation error, got {other}"),
    }
}

#[test]
fn nan_md_step_is_fatal() {
    let err = WellpathConfig::from_toml_str("[resample]\nmd_step = nan\n").unwrap_err();
    assert!(matches!(err, ConfigError::Validation(_)));
}

#[test]
fn metric_survey_with_imperial_course_length_warns() {
    let mut config = WellpathConfig::default();
    config.survey.course_length = Some(100.0);
    let (errors, warnings) = validate_physical_ranges(&config);
    assert!(errors.is_empty());
    assert_eq!(warnings.len(), 1);
    assert!(warnings[0].message.contains("survey.course_length"));
    // Suspicious, not invalid
    assert!(config.validate().is_ok());
}

#[test]
fn validation_error_lists_every_problem() {
    let mut config = WellpathConfig::default();
    config.resample.md_step = -1.0;
    config.output.precision = 99;
    let text = config.validate().unwrap_err().to_string();
    assert!(text.starts_with("Config validation failed:"));
    assert!(text.contains("resample.md_step"));
    assert!(text.contains("output.precision"));
}

#[test]
fn missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = WellpathConfig::load_from_file(&dir.path().join("absent.toml")).unwrap_err();
    assert!(matches!(err, ConfigError::Io(_, _)));
}

#[test]
fn parse_error_names_the_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.toml");
    std::fs::write(&path, "[survey\nunits = \"m\"\n").unwrap();
    match WellpathConfig::load_from_file(&path).unwrap_err() {
        ConfigError::Parse(p, _) => assert_eq!(p, path),
        other => panic!("expected parse error, got {other}"),
    }
}
