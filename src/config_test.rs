use super::*;

// =============================================================
// Defaults
// =============================================================

#[test]
fn default_config_matches_stock_markup() {
    let config = PanelConfig::default();
    assert_eq!(config.storage.theme, "stafanet-theme");
    assert_eq!(config.storage.manual, "stafanet-manual-theme");
    assert_eq!(config.elements.auto_indicator, "autoIndicator");
    assert_eq!(config.elements.theme_toggle, "themeToggle");
    assert_eq!(config.elements.clock, "clock");
    assert_eq!(config.elements.date, "date");
    assert_eq!(config.elements.button_selector, ".btn");
}

#[test]
fn default_timings() {
    let timings = Timings::default();
    assert_eq!(timings.clock_tick_ms, 1_000);
    assert_eq!(timings.theme_check_ms, 60_000);
    assert_eq!(timings.ripple_ms, 600);
    assert_eq!(timings.toggle_pulse_ms, 300);
    assert_eq!(timings.double_click_window_ms, 500);
}

#[test]
fn default_config_validates() {
    assert!(PanelConfig::default().validate().is_ok());
}

#[test]
fn light_window_is_half_open() {
    let window = LightWindow::default();
    assert!(!window.contains(5));
    assert!(window.contains(6));
    assert!(window.contains(17));
    assert!(!window.contains(18));
}

// =============================================================
// JSON loading
// =============================================================

#[test]
fn partial_json_keeps_other_defaults() {
    let raw = serde_json::json!({
        "storage": { "theme": "panel-theme" },
        "timings": { "clock_tick_ms": 500 }
    })
    .to_string();
    let config = PanelConfig::from_json(&raw).expect("config should parse");
    assert_eq!(config.storage.theme, "panel-theme");
    assert_eq!(config.storage.manual, DEFAULT_MANUAL_KEY);
    assert_eq!(config.timings.clock_tick_ms, 500);
    assert_eq!(config.timings.theme_check_ms, 60_000);
    assert_eq!(config.elements, ElementIds::default());
}

#[test]
fn empty_object_is_default() {
    let config = PanelConfig::from_json("{}").expect("empty object should parse");
    assert_eq!(config, PanelConfig::default());
}

#[test]
fn malformed_json_is_parse_error() {
    let err = PanelConfig::from_json("{ not json").expect_err("should fail");
    assert!(matches!(err, ConfigError::Parse(_)));
}

#[test]
fn inverted_light_window_is_rejected() {
    let raw = serde_json::json!({ "light_window": { "start_hour": 18, "end_hour": 6 } }).to_string();
    let err = PanelConfig::from_json(&raw).expect_err("should fail");
    assert!(matches!(err, ConfigError::Invalid { field: "light_window", .. }));
}

#[test]
fn light_window_past_midnight_is_rejected() {
    let raw = serde_json::json!({ "light_window": { "start_hour": 6, "end_hour": 25 } }).to_string();
    assert!(PanelConfig::from_json(&raw).is_err());
}

#[test]
fn zero_period_is_rejected() {
    let raw = serde_json::json!({ "timings": { "theme_check_ms": 0 } }).to_string();
    let err = PanelConfig::from_json(&raw).expect_err("should fail");
    assert!(matches!(err, ConfigError::Invalid { field: "timings.theme_check_ms", .. }));
}

#[test]
fn identical_storage_keys_are_rejected() {
    let raw = serde_json::json!({ "storage": { "theme": "k", "manual": "k" } }).to_string();
    assert!(PanelConfig::from_json(&raw).is_err());
}

// =============================================================
// Log level
// =============================================================

#[test]
fn log_level_defaults_to_info() {
    assert_eq!(PanelConfig::default().log_level(), log::Level::Info);
}

#[test]
fn log_level_parses_case_insensitively() {
    let config = PanelConfig { log_level: Some("debug".to_owned()), ..PanelConfig::default() };
    assert_eq!(config.log_level(), log::Level::Debug);
}

#[test]
fn unknown_log_level_falls_back_to_info() {
    let config = PanelConfig { log_level: Some("loud".to_owned()), ..PanelConfig::default() };
    assert_eq!(config.log_level(), log::Level::Info);
}
