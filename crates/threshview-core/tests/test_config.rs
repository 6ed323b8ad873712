use threshview_core::config::EngineConfig;
use threshview_core::params::{Comparison, OverlayColor, ThresholdParams};

#[test]
fn test_engine_config_defaults() {
    let config = EngineConfig::default();
    assert_eq!(config.preview_max_side, 1024);
    assert_eq!(config.thumbnail_max_side, 128);
    assert_eq!(config.initial_params, ThresholdParams::default());
}

#[test]
fn test_threshold_params_defaults() {
    let params = ThresholdParams::default();
    assert_eq!(params.threshold, 100);
    assert_eq!(params.direction, Comparison::GreaterOrEqual);
    assert_eq!(params.overlay, OverlayColor::new(255, 0, 0, 100));
}

#[test]
fn test_comparison_display() {
    assert_eq!(format!("{}", Comparison::GreaterOrEqual), ">= threshold");
    assert_eq!(format!("{}", Comparison::LessThan), "< threshold");
}

#[test]
fn test_config_toml_roundtrip() {
    let config = EngineConfig {
        preview_max_side: 512,
        thumbnail_max_side: 64,
        initial_params: ThresholdParams {
            threshold: 42,
            direction: Comparison::LessThan,
            overlay: OverlayColor::new(0, 128, 255, 60),
        },
    };

    let text = toml::to_string_pretty(&config).unwrap();
    let back: EngineConfig = toml::from_str(&text).unwrap();
    assert_eq!(back.preview_max_side, 512);
    assert_eq!(back.thumbnail_max_side, 64);
    assert_eq!(back.initial_params, config.initial_params);
}

#[test]
fn test_partial_toml_fills_defaults() {
    let back: EngineConfig = toml::from_str("preview_max_side = 2048\n").unwrap();
    assert_eq!(back.preview_max_side, 2048);
    assert_eq!(back.thumbnail_max_side, 128);
    assert_eq!(back.initial_params, ThresholdParams::default());
}
