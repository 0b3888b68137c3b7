//! Unit tests for the SettingsEngine public API.

use serde_json::json;
use tempfile::TempDir;

use teleclipper::services::settings_engine::{SettingsEngine, SettingsEngineTrait};
use teleclipper::types::errors::SettingsError;
use teleclipper::types::settings::{ClipperSettings, SessionBackend, DEFAULT_ENDPOINT};

/// The caller holds the `TempDir` handle for the duration of the test.
fn engine_in_temp(dir: &TempDir) -> SettingsEngine {
    let path = dir
        .path()
        .join("settings.json")
        .to_string_lossy()
        .to_string();
    SettingsEngine::new(Some(path))
}

#[test]
fn test_load_defaults_when_no_config_file_exists() {
    let dir = TempDir::new().unwrap();
    let mut engine = engine_in_temp(&dir);

    let settings = engine.load().unwrap();

    assert_eq!(settings, ClipperSettings::default());
    assert_eq!(settings.endpoint.url, DEFAULT_ENDPOINT);
    assert_eq!(settings.session.backend, SessionBackend::Sqlite);
}

#[test]
fn test_set_value_persists_changes() {
    let dir = TempDir::new().unwrap();

    {
        let mut engine = engine_in_temp(&dir);
        engine.load().unwrap();
        engine
            .set_value("endpoint.url", json!("http://127.0.0.1:8787"))
            .unwrap();
    }

    let mut engine = engine_in_temp(&dir);
    let settings = engine.load().unwrap();
    assert_eq!(settings.endpoint.url, "http://127.0.0.1:8787");
}

#[test]
fn test_set_value_accepts_enum_names() {
    let dir = TempDir::new().unwrap();
    let mut engine = engine_in_temp(&dir);
    engine.load().unwrap();

    engine.set_value("session.backend", json!("memory")).unwrap();

    assert_eq!(engine.get_settings().session.backend, SessionBackend::Memory);
}

#[test]
fn test_set_value_rejects_non_http_endpoint() {
    let dir = TempDir::new().unwrap();
    let mut engine = engine_in_temp(&dir);
    engine.load().unwrap();

    let result = engine.set_value("endpoint.url", json!("ftp://example.com"));

    assert!(matches!(result, Err(SettingsError::InvalidValue(_))));
    assert_eq!(engine.get_settings().endpoint.url, DEFAULT_ENDPOINT);
}

#[test]
fn test_set_value_rejects_relative_endpoint() {
    let dir = TempDir::new().unwrap();
    let mut engine = engine_in_temp(&dir);
    engine.load().unwrap();

    let result = engine.set_value("endpoint.url", json!("/ingest"));
    assert!(matches!(result, Err(SettingsError::InvalidValue(_))));
}

#[test]
fn test_set_value_rejects_wrong_type() {
    let dir = TempDir::new().unwrap();
    let mut engine = engine_in_temp(&dir);
    engine.load().unwrap();

    let result = engine.set_value("session.backend", json!(42));
    assert!(matches!(result, Err(SettingsError::InvalidValue(_))));
}

#[test]
fn test_set_value_rejects_unknown_key() {
    let dir = TempDir::new().unwrap();
    let mut engine = engine_in_temp(&dir);
    engine.load().unwrap();

    assert!(matches!(
        engine.set_value("endpoint.timeout", json!(30)),
        Err(SettingsError::InvalidKey(_))
    ));
    assert!(matches!(
        engine.set_value("", json!(1)),
        Err(SettingsError::InvalidKey(_))
    ));
}

#[test]
fn test_reset_restores_defaults() {
    let dir = TempDir::new().unwrap();
    let mut engine = engine_in_temp(&dir);
    engine.load().unwrap();
    engine.set_value("logging.filter", json!("debug")).unwrap();

    engine.reset().unwrap();

    let mut fresh = engine_in_temp(&dir);
    assert_eq!(fresh.load().unwrap(), ClipperSettings::default());
}

#[test]
fn test_malformed_file_is_serialization_error() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("settings.json"), "{ not json").unwrap();
    let mut engine = engine_in_temp(&dir);

    assert!(matches!(engine.load(), Err(SettingsError::SerializationError(_))));
}

#[test]
fn test_partial_file_fills_in_defaults() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("settings.json"),
        r#"{"logging":{"filter":"teleclipper=trace"}}"#,
    )
    .unwrap();
    let mut engine = engine_in_temp(&dir);

    let settings = engine.load().unwrap();

    assert_eq!(settings.logging.filter, "teleclipper=trace");
    assert_eq!(settings.endpoint.url, DEFAULT_ENDPOINT);
}

#[test]
fn test_config_path_override_is_used() {
    let dir = TempDir::new().unwrap();
    let engine = engine_in_temp(&dir);
    assert!(engine.get_config_path().ends_with("settings.json"));
}
