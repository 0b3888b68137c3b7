// Tele Clipper Settings Engine
// Loads, saves, updates and resets the client configuration.
// Settings are stored as a JSON file; `TELECLIPPER_CONFIG` overrides the platform path.

use std::fs;
use std::path::Path;

use serde_json::Value;
use url::Url;

use crate::platform;
use crate::types::errors::SettingsError;
use crate::types::settings::ClipperSettings;

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "TELECLIPPER_CONFIG";

/// Trait defining the settings engine interface.
pub trait SettingsEngineTrait {
    fn load(&mut self) -> Result<ClipperSettings, SettingsError>;
    fn save(&self) -> Result<(), SettingsError>;
    fn get_settings(&self) -> &ClipperSettings;
    fn set_value(&mut self, key: &str, value: Value) -> Result<(), SettingsError>;
    fn reset(&mut self) -> Result<(), SettingsError>;
    fn get_config_path(&self) -> &str;
}

/// Settings engine persisting `ClipperSettings` as JSON on disk.
pub struct SettingsEngine {
    config_path: String,
    settings: ClipperSettings,
}

impl SettingsEngine {
    /// Creates a new SettingsEngine.
    ///
    /// Path precedence: `path_override`, then `$TELECLIPPER_CONFIG`, then
    /// `settings.json` in the platform config directory.
    pub fn new(path_override: Option<String>) -> Self {
        let config_path = path_override
            .or_else(|| std::env::var(CONFIG_ENV).ok().filter(|p| !p.is_empty()))
            .unwrap_or_else(|| {
                platform::get_config_dir()
                    .join("settings.json")
                    .to_string_lossy()
                    .to_string()
            });

        Self {
            config_path,
            settings: ClipperSettings::default(),
        }
    }

    /// Rejects settings the client cannot run with.
    pub fn validate(settings: &ClipperSettings) -> Result<(), SettingsError> {
        let endpoint = Url::parse(&settings.endpoint.url).map_err(|e| {
            SettingsError::InvalidValue(format!("endpoint.url '{}': {}", settings.endpoint.url, e))
        })?;
        if endpoint.scheme() != "https" && endpoint.scheme() != "http" {
            return Err(SettingsError::InvalidValue(format!(
                "endpoint.url must use http or https, got '{}'",
                endpoint.scheme()
            )));
        }
        Ok(())
    }
}

/// Replaces the value at a dot-separated path inside a JSON object tree.
fn set_path(root: &mut Value, key: &str, value: Value) -> Result<(), SettingsError> {
    let (parents, leaf) = match key.rsplit_once('.') {
        Some((parents, leaf)) => (Some(parents), leaf),
        None => (None, key),
    };

    let mut current = root;
    for part in parents.into_iter().flat_map(|p| p.split('.')) {
        current = current
            .get_mut(part)
            .ok_or_else(|| SettingsError::InvalidKey(format!("Key '{}' not found in settings", key)))?;
    }

    match current {
        Value::Object(map) if map.contains_key(leaf) => {
            map.insert(leaf.to_string(), value);
            Ok(())
        }
        Value::Object(_) => Err(SettingsError::InvalidKey(format!(
            "Key '{}' not found in settings",
            key
        ))),
        _ => Err(SettingsError::InvalidKey(format!(
            "Cannot navigate to key '{}': intermediate value is not an object",
            key
        ))),
    }
}

impl SettingsEngineTrait for SettingsEngine {
    /// Loads settings from the JSON config file.
    ///
    /// A missing file yields defaults; a malformed one is a serialization error.
    fn load(&mut self) -> Result<ClipperSettings, SettingsError> {
        let path = Path::new(&self.config_path);

        if !path.exists() {
            tracing::debug!(path = %self.config_path, "no config file, using defaults");
            self.settings = ClipperSettings::default();
            return Ok(self.settings.clone());
        }

        let content = fs::read_to_string(path)
            .map_err(|e| SettingsError::IoError(format!("Failed to read config file: {}", e)))?;

        let settings: ClipperSettings = serde_json::from_str(&content).map_err(|e| {
            SettingsError::SerializationError(format!("Failed to parse config file: {}", e))
        })?;
        Self::validate(&settings)?;

        self.settings = settings;
        Ok(self.settings.clone())
    }

    /// Saves the current settings, creating parent directories as needed.
    fn save(&self) -> Result<(), SettingsError> {
        let path = Path::new(&self.config_path);

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                SettingsError::IoError(format!("Failed to create config directory: {}", e))
            })?;
        }

        let json = serde_json::to_string_pretty(&self.settings).map_err(|e| {
            SettingsError::SerializationError(format!("Failed to serialize settings: {}", e))
        })?;

        fs::write(path, json)
            .map_err(|e| SettingsError::IoError(format!("Failed to write config file: {}", e)))?;

        Ok(())
    }

    fn get_settings(&self) -> &ClipperSettings {
        &self.settings
    }

    /// Updates one setting by dot-notation path (`"endpoint.url"`,
    /// `"session.backend"`, `"logging.filter"`) and saves to disk.
    fn set_value(&mut self, key: &str, value: Value) -> Result<(), SettingsError> {
        if key.is_empty() {
            return Err(SettingsError::InvalidKey("Key cannot be empty".to_string()));
        }

        let mut json_value = serde_json::to_value(&self.settings).map_err(|e| {
            SettingsError::SerializationError(format!("Failed to serialize settings: {}", e))
        })?;
        set_path(&mut json_value, key, value)?;

        let new_settings: ClipperSettings = serde_json::from_value(json_value).map_err(|e| {
            SettingsError::InvalidValue(format!("Invalid value for key '{}': {}", key, e))
        })?;
        Self::validate(&new_settings)?;

        self.settings = new_settings;
        self.save()
    }

    /// Resets all settings to defaults and saves to disk.
    fn reset(&mut self) -> Result<(), SettingsError> {
        self.settings = ClipperSettings::default();
        self.save()
    }

    fn get_config_path(&self) -> &str {
        &self.config_path
    }
}
