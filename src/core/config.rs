//! Construction config for the logger facade

use super::error::Result;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

/// Declarative config: threshold, diagnostics mode and backends
///
/// ```
/// use rust_logger_facade::LoggerConfig;
///
/// let config = LoggerConfig::from_json(r#"{
///     "level": 3,
///     "debugMode": false,
///     "logger": { "console": { "colors": false } }
/// }"#).unwrap();
///
/// assert_eq!(config.level, Some(3));
/// assert_eq!(config.backends().len(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoggerConfig {
    /// Initial threshold rank; the environment default applies when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<u8>,

    /// Diagnostics mode; the environment toggle applies when absent
    #[serde(
        default,
        rename = "debugMode",
        alias = "debug_mode",
        skip_serializing_if = "Option::is_none"
    )]
    pub debug_mode: Option<bool>,

    /// Backends to load, keyed by name, in registration order
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logger: Option<Map<String, Value>>,
}

impl LoggerConfig {
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Backends used when the config names none
    pub fn default_backends() -> Map<String, Value> {
        match json!({
            "console": { "colors": true, "template": "default", "timestamp": false },
            "file": { "logfile": "./logs/app.log" }
        }) {
            Value::Object(map) => map,
            _ => Map::new(),
        }
    }

    /// Configured backends, or the defaults when `logger` is absent
    ///
    /// An explicitly empty `logger` object means no backends at all.
    pub fn backends(&self) -> Map<String, Value> {
        self.logger.clone().unwrap_or_else(Self::default_backends)
    }

    #[must_use]
    pub fn with_level(mut self, rank: u8) -> Self {
        self.level = Some(rank);
        self
    }

    #[must_use]
    pub fn with_debug_mode(mut self, enabled: bool) -> Self {
        self.debug_mode = Some(enabled);
        self
    }

    /// Add a backend entry, creating the `logger` map if needed
    #[must_use]
    pub fn with_backend(mut self, name: impl Into<String>, config: Value) -> Self {
        self.logger
            .get_or_insert_with(Map::new)
            .insert(name.into(), config);
        self
    }

    /// Config with an explicitly empty backend map
    pub fn without_backends() -> Self {
        Self {
            logger: Some(Map::new()),
            ..Self::default()
        }
    }
}
