pub mod types;

pub use types::*;

use crate::error::AppError;
use crate::i18n::{Catalog, FALLBACK_LOCALE};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Main application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QualityMenuConfig {
    /// Locale used for menu strings
    pub locale: String,
    /// Menu behaviour
    pub ui: UiConfig,
    /// Replacement strings for the configured locale, keyed like the built-in tables
    pub strings: BTreeMap<String, String>,
}

impl Default for QualityMenuConfig {
    fn default() -> Self {
        Self {
            locale: FALLBACK_LOCALE.to_string(),
            ui: UiConfig::default(),
            strings: BTreeMap::new(),
        }
    }
}

impl QualityMenuConfig {
    /// Load configuration from TOML file, or create default if not found
    pub fn load() -> Self {
        Self::load_or_create(&Self::config_path())
    }

    /// Load from `path`; a missing file is created with defaults, a broken one is ignored
    pub fn load_or_create(config_path: &Path) -> Self {
        if config_path.exists() {
            match Self::load_from_file(config_path) {
                Ok(config) => {
                    info!("Loaded config from {}", config_path.display());
                    return config;
                }
                Err(e) => {
                    warn!("Failed to load config: {}. Using defaults.", e);
                    return Self::default();
                }
            }
        }

        let config = Self::default();
        // Save default config for future editing
        if let Err(e) = config.save_to(config_path) {
            warn!("Failed to save default config: {}", e);
        }
        config
    }

    /// Save configuration to a TOML file
    pub fn save_to(&self, config_path: &Path) -> Result<(), AppError> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let toml_string = toml::to_string_pretty(self)?;
        std::fs::write(config_path, toml_string)?;

        info!("Saved config to {}", config_path.display());
        Ok(())
    }

    fn load_from_file(path: &Path) -> Result<Self, AppError> {
        let content = std::fs::read_to_string(path)?;
        let config: QualityMenuConfig = toml::from_str(&content)?;
        Ok(config)
    }

    /// Get the default configuration file path
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("quality-menu")
            .join("config.toml")
    }

    /// Validate configuration values
    pub fn validate(&self, catalog: &Catalog) -> Result<(), AppError> {
        if !catalog.has_locale(&self.locale) {
            return Err(AppError::Config(format!(
                "Locale '{}' is not available (expected one of: {})",
                self.locale,
                catalog.available_locales().join(", ")
            )));
        }
        Ok(())
    }
}
