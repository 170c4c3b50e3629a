//! TOML-based application configuration.
//!
//! Stores user preferences:
//! - Appearance (dark mode)
//! - Schedule display (urgency threshold for the countdown highlight)
//! - Backup destination
//!
//! Configuration is stored at `<data_dir>/config.toml`.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::data_dir;
use crate::error::ConfigError;

/// UI configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    #[serde(default = "default_dark_mode")]
    pub dark_mode: bool,
}

/// Schedule display configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleConfig {
    /// A countdown under this many minutes is rendered as urgent.
    #[serde(default = "default_urgent_threshold")]
    pub urgent_threshold_minutes: u32,
}

/// Backup configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackupConfig {
    /// Where backups land; defaults to the current directory at backup time.
    #[serde(default)]
    pub directory: Option<String>,
}

/// Application configuration.
///
/// Serialized to/from TOML at `<data_dir>/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub schedule: ScheduleConfig,
    #[serde(default)]
    pub backup: BackupConfig,
}

fn default_dark_mode() -> bool {
    true
}
fn default_urgent_threshold() -> u32 {
    60
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            dark_mode: default_dark_mode(),
        }
    }
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            urgent_threshold_minutes: default_urgent_threshold(),
        }
    }
}

impl Default for BackupConfig {
    fn default() -> Self {
        Self { directory: None }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ui: UiConfig::default(),
            schedule: ScheduleConfig::default(),
            backup: BackupConfig::default(),
        }
    }
}

impl Config {
    fn path() -> Result<PathBuf, ConfigError> {
        let dir = data_dir().map_err(|err| ConfigError::LoadFailed {
            path: PathBuf::from("<data_dir>"),
            message: err.to_string(),
        })?;
        Ok(dir.join("config.toml"))
    }

    /// Load from disk, writing the defaults on first run.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::path()?;
        match std::fs::read_to_string(&path) {
            Ok(content) => toml::from_str(&content).map_err(|err| ConfigError::LoadFailed {
                path,
                message: err.to_string(),
            }),
            Err(_) => {
                let config = Self::default();
                config.save()?;
                Ok(config)
            }
        }
    }

    /// Load from disk, falling back to defaults on any failure.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_default()
    }

    /// Persist to disk.
    pub fn save(&self) -> Result<(), ConfigError> {
        let path = Self::path()?;
        let content = toml::to_string_pretty(self).map_err(|err| ConfigError::SaveFailed {
            path: path.clone(),
            message: err.to_string(),
        })?;
        std::fs::write(&path, content).map_err(|err| ConfigError::SaveFailed {
            path,
            message: err.to_string(),
        })
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let mut current = serde_json::to_value(self).ok()?;
        for part in key.split('.') {
            current = current.get(part)?.clone();
        }
        Some(match current {
            serde_json::Value::String(s) => s,
            other => other.to_string(),
        })
    }

    /// Set a config value by dot-separated key and persist. The new value is
    /// parsed according to the type of the existing one.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let mut root = serde_json::to_value(&*self).map_err(|err| ConfigError::InvalidValue {
            key: key.to_string(),
            message: err.to_string(),
        })?;

        let (parents, leaf) = match key.rsplit_once('.') {
            Some((parents, leaf)) => (parents, leaf),
            None => ("", key),
        };
        let mut current = &mut root;
        if !parents.is_empty() {
            for part in parents.split('.') {
                current = current
                    .get_mut(part)
                    .ok_or_else(|| ConfigError::UnknownKey(key.to_string()))?;
            }
        }
        let object = current
            .as_object_mut()
            .ok_or_else(|| ConfigError::UnknownKey(key.to_string()))?;
        let existing = object
            .get(leaf)
            .ok_or_else(|| ConfigError::UnknownKey(key.to_string()))?;

        let new_value = match existing {
            serde_json::Value::Bool(_) => {
                let parsed = value.parse::<bool>().map_err(|_| ConfigError::InvalidValue {
                    key: key.to_string(),
                    message: format!("expected true or false, got '{value}'"),
                })?;
                serde_json::Value::Bool(parsed)
            }
            serde_json::Value::Number(_) => {
                let parsed = value.parse::<u64>().map_err(|_| ConfigError::InvalidValue {
                    key: key.to_string(),
                    message: format!("expected a number, got '{value}'"),
                })?;
                serde_json::Value::Number(parsed.into())
            }
            // Optional strings show up as null when unset.
            serde_json::Value::Null | serde_json::Value::String(_) => {
                serde_json::Value::String(value.to_string())
            }
            _ => {
                return Err(ConfigError::UnknownKey(key.to_string()));
            }
        };
        object.insert(leaf.to_string(), new_value);

        *self = serde_json::from_value(root).map_err(|err| ConfigError::InvalidValue {
            key: key.to_string(),
            message: err.to_string(),
        })?;
        self.save()
    }
}
