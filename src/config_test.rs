#![allow(clippy::float_cmp)]

use super::*;

#[test]
fn panel_config_defaults_to_settings_container() {
    let config = PanelConfig::default();
    assert_eq!(config.container_id, "settings");
    assert_eq!(config.level(), log::Level::Debug);
}

#[test]
fn panel_config_partial_json_keeps_defaults() {
    let config: PanelConfig = serde_json::from_str(r#"{ "log_level": "warn" }"#).unwrap();
    assert_eq!(config.container_id, "settings");
    assert_eq!(config.level(), log::Level::Warn);
}

#[test]
fn panel_config_unknown_level_falls_back_to_debug() {
    let config = PanelConfig { log_level: "chatty".to_owned(), ..PanelConfig::default() };
    assert_eq!(config.level(), log::Level::Debug);
}

#[test]
fn control_config_defaults_match_harness_tuning() {
    let config = ControlConfig::default();
    assert_eq!(config.move_speed, 1000.0);
    assert_eq!(config.sensitivity_x, 50.0);
    assert_eq!(config.sensitivity_y, 50.0);
    assert_eq!(config.dead_zone, 0.02);
}

#[test]
fn control_config_overrides_single_key() {
    let config: ControlConfig = serde_json::from_str(r#"{ "move_speed": 10.0 }"#).unwrap();
    assert_eq!(config.move_speed, 10.0);
    assert_eq!(config.sensitivity_x, 50.0);
}
