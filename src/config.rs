use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

pub const DEFAULT_SCORE_KEY: &str = "score";
pub const SETTINGS_KEY: &str = "bookquiz.settings";

/// What a resize does to sidebar visibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResizePolicy {
    /// Only the narrow-screen flag follows the viewport.
    #[default]
    Sticky,
    /// When the orientation flips, the sidebar is reset to its default for
    /// the new orientation.
    Follow,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShellConfig {
    #[serde(default = "default_storage_key")]
    pub storage_key: String,
    #[serde(default)]
    pub resize_policy: ResizePolicy,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_storage_key() -> String {
    DEFAULT_SCORE_KEY.to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            storage_key: default_storage_key(),
            resize_policy: ResizePolicy::default(),
            log_level: default_log_level(),
        }
    }
}

impl ShellConfig {
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let cfg: ShellConfig = serde_json::from_str(raw)?;
        if cfg.storage_key.trim().is_empty() {
            return Err(ConfigError::EmptyStorageKey);
        }
        Ok(cfg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_take_defaults() {
        let cfg = ShellConfig::from_json(r#"{"resize_policy": "follow"}"#).unwrap();
        assert_eq!(cfg.storage_key, "score");
        assert_eq!(cfg.resize_policy, ResizePolicy::Follow);
        assert_eq!(cfg.log_level, "info");
    }

    #[test]
    fn empty_storage_key_is_rejected() {
        assert!(matches!(
            ShellConfig::from_json(r#"{"storage_key": " "}"#),
            Err(ConfigError::EmptyStorageKey)
        ));
    }

    #[test]
    fn garbage_is_a_parse_error() {
        assert!(matches!(ShellConfig::from_json("{nope"), Err(ConfigError::Parse(_))));
    }
}
