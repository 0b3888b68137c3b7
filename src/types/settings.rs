use serde::{Deserialize, Serialize};

/// Endpoint used when no configuration file overrides it.
pub const DEFAULT_ENDPOINT: &str = "https://tele-clipper-worker.poxmaadani.workers.dev";

/// Top-level client settings container.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct ClipperSettings {
    #[serde(default)]
    pub endpoint: EndpointSettings,
    #[serde(default)]
    pub session: SessionSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

/// Where and how submissions are sent.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EndpointSettings {
    pub url: String,
    pub user_agent: String,
}

impl Default for EndpointSettings {
    fn default() -> Self {
        Self {
            url: DEFAULT_ENDPOINT.to_string(),
            user_agent: format!("teleclipper/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// Backend for the session-scoped credential cache.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SessionBackend {
    Memory,
    Sqlite,
}

/// Session storage settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SessionSettings {
    pub backend: SessionBackend,
    /// Overrides `<data dir>/session.db` for the sqlite backend.
    #[serde(default)]
    pub database_path: Option<String>,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            backend: SessionBackend::Sqlite,
            database_path: None,
        }
    }
}

/// Log output settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoggingSettings {
    /// `tracing-subscriber` env-filter directive.
    pub filter: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
        }
    }
}
