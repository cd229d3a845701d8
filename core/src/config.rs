//! Application configuration persistence

use serde::{Deserialize, Serialize};
use thiserror::Error;

use ghanti_types::{AnnouncerSettings, OverlapPolicy};

/// Wallet app whose notifications are announced by default.
pub const DEFAULT_SOURCE_PACKAGE: &str = "com.f1soft.esewa";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Only notifications from this source id are announced
    #[serde(default = "default_source_package")]
    pub source_package: String,

    /// Behavior when a new payment arrives mid-announcement
    #[serde(default)]
    pub overlap_policy: OverlapPolicy,

    #[serde(default)]
    pub announcer: AnnouncerSettings,
}

fn default_source_package() -> String {
    DEFAULT_SOURCE_PACKAGE.to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            source_package: default_source_package(),
            overlap_policy: OverlapPolicy::default(),
            announcer: AnnouncerSettings::default(),
        }
    }
}

impl AppConfig {
    pub fn load() -> Self {
        confy::load("ghanti", "config").unwrap_or_default()
    }

    pub fn save(&self) -> Result<(), ConfigError> {
        confy::store("ghanti", "config", self).map_err(ConfigError::Save)
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to save configuration")]
    Save(#[source] confy::ConfyError),
}
