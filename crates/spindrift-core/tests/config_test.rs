//! Tests for layered configuration loading and validation.

use std::io::Write;

use spindrift_core::config::SpindriftConfig;
use spindrift_core::errors::ConfigError;
use spindrift_core::types::Sector;

#[test]
fn defaults_are_valid() {
    let config = SpindriftConfig::default();
    assert!(SpindriftConfig::validate(&config).is_ok());
    assert_eq!(config.scoring.effective_base_neighbour_radius(), 2);
    assert_eq!(config.influence.effective_decay_factor(), 0.98);
    assert_eq!(config.severity.effective_window_cap(), 50);
    assert_eq!(config.monitors.effective_rolling_window(), 10);
    assert!(config.predictor.effective_enabled());
}

#[test]
fn from_toml_overrides_selected_fields() {
    let config = SpindriftConfig::from_toml(
        r#"
        [scoring]
        play_threshold = 0.2
        strong_play_threshold = 0.6

        [influence]
        decay_factor = 0.9

        [predictor]
        enabled = false
        "#,
    )
    .unwrap();

    assert_eq!(config.scoring.effective_play_threshold(), 0.2);
    assert_eq!(config.influence.effective_decay_factor(), 0.9);
    assert!(!config.predictor.effective_enabled());
    // Untouched fields keep their defaults.
    assert_eq!(config.scoring.effective_weight_hit_rate(), 1.0);
}

#[test]
fn less_strict_lowers_both_thresholds() {
    let config = SpindriftConfig::from_toml(
        r#"
        [scoring]
        less_strict = true
        "#,
    )
    .unwrap();
    assert!((config.scoring.effective_play_threshold() - 0.10).abs() < 1e-12);
    assert!((config.scoring.effective_strong_play_threshold() - 0.40).abs() < 1e-12);
}

#[test]
fn invalid_decay_factor_rejected() {
    let err = SpindriftConfig::from_toml(
        r#"
        [influence]
        decay_factor = 1.5
        "#,
    )
    .unwrap_err();
    assert!(matches!(err, ConfigError::ValidationFailed { .. }));
}

#[test]
fn non_increasing_thresholds_rejected() {
    let err = SpindriftConfig::from_toml(
        r#"
        [severity]
        number_thresholds = [0.4, 0.4, 0.6]
        "#,
    )
    .unwrap_err();
    assert!(matches!(err, ConfigError::ValidationFailed { .. }));
}

#[test]
fn malformed_toml_is_a_parse_error() {
    let err = SpindriftConfig::from_toml("not valid [[ toml").unwrap_err();
    assert!(matches!(err, ConfigError::ParseError { .. }));
}

#[test]
fn load_reads_project_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("spindrift.toml");
    let mut file = std::fs::File::create(&path).unwrap();
    writeln!(file, "[monitors]\nrolling_window = 20").unwrap();

    let config = SpindriftConfig::load(dir.path()).unwrap();
    assert_eq!(config.monitors.effective_rolling_window(), 20);
}

#[test]
fn load_without_project_file_uses_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let config = SpindriftConfig::load(dir.path()).unwrap();
    assert_eq!(config.severity.effective_default_number_max(), 180);
    assert_eq!(
        config.severity.effective_default_sector_max(Sector::VoisinsDuZero),
        12
    );
}

#[test]
fn env_variables_override_the_project_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("spindrift.toml");
    let mut file = std::fs::File::create(&path).unwrap();
    writeln!(file, "[scoring]\nplay_threshold = 0.2\n\n[predictor]\nenabled = true").unwrap();

    std::env::set_var("SPINDRIFT_SCORING_PLAY_THRESHOLD", "0.35");
    std::env::set_var("SPINDRIFT_PREDICTOR_ENABLED", "false");
    let result = SpindriftConfig::load(dir.path());
    std::env::remove_var("SPINDRIFT_SCORING_PLAY_THRESHOLD");
    std::env::remove_var("SPINDRIFT_PREDICTOR_ENABLED");

    let config = result.unwrap();
    assert_eq!(config.scoring.effective_play_threshold(), 0.35);
    assert!(!config.predictor.effective_enabled());
}

#[test]
fn to_toml_round_trips() {
    let config = SpindriftConfig::from_toml(
        r#"
        [scoring]
        weight_streak = 0.75
        "#,
    )
    .unwrap();
    let rendered = config.to_toml().unwrap();
    let reparsed = SpindriftConfig::from_toml(&rendered).unwrap();
    assert_eq!(reparsed.scoring.effective_weight_streak(), 0.75);
}
