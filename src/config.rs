//! Configuration management for the application.
//!
//! This module handles loading, validating, and saving application configuration
//! in TOML format with platform-specific directory resolution.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::constants::{APP_DIR_NAME, CONFIG_DIR_ENV};
use crate::models::{DEFAULT_RODS, MAX_RODS};
use crate::services::challenge::{DEFAULT_MAX_RANDOM_TARGET, DEFAULT_TARGET};

/// Theme display mode preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ThemeMode {
    /// Automatically detect OS theme (dark/light)
    #[default]
    Auto,
    /// Always use dark theme
    Dark,
    /// Always use light theme
    Light,
}

impl ThemeMode {
    /// Parses a user-supplied mode name, case-insensitively.
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "auto" => Some(Self::Auto),
            "dark" => Some(Self::Dark),
            "light" => Some(Self::Light),
            _ => None,
        }
    }

    /// Lowercase name as accepted by [`ThemeMode::parse`].
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::Dark => "dark",
            Self::Light => "light",
        }
    }
}

/// Frame settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbacusConfig {
    /// Number of rods on the frame (1-18)
    #[serde(default = "default_rod_count")]
    pub rod_count: usize,
}

fn default_rod_count() -> usize {
    DEFAULT_RODS
}

impl Default for AbacusConfig {
    fn default() -> Self {
        Self {
            rod_count: default_rod_count(),
        }
    }
}

/// Demo challenge settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PracticeConfig {
    /// Number shown when the demo starts
    #[serde(default = "default_target")]
    pub default_target: u64,
    /// Ceiling for randomly drawn targets
    #[serde(default = "default_max_random_target")]
    pub max_random_target: u64,
}

fn default_target() -> u64 {
    DEFAULT_TARGET
}

fn default_max_random_target() -> u64 {
    DEFAULT_MAX_RANDOM_TARGET
}

impl Default for PracticeConfig {
    fn default() -> Self {
        Self {
            default_target: default_target(),
            max_random_target: default_max_random_target(),
        }
    }
}

/// UI preferences configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UiConfig {
    /// Display help on startup
    #[serde(default)]
    pub show_help_on_startup: bool,
    /// Theme mode preference (Auto, Dark, Light)
    #[serde(default)]
    pub theme_mode: ThemeMode,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            show_help_on_startup: false,
            theme_mode: ThemeMode::default(),
        }
    }
}

/// Application configuration.
///
/// # File Location
///
/// - Linux: `~/.config/AbacusTrainer/config.toml`
/// - macOS: `~/Library/Application Support/AbacusTrainer/config.toml`
/// - Windows: `%APPDATA%\AbacusTrainer\config.toml`
///
/// The `ABACUS_CONFIG_DIR` environment variable replaces the directory.
///
/// # Validation
///
/// - `rod_count` must be between 1 and 18
/// - `default_target` must fit on the configured frame
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Config {
    /// Frame settings
    #[serde(default)]
    pub abacus: AbacusConfig,
    /// Demo challenge settings
    #[serde(default)]
    pub practice: PracticeConfig,
    /// UI preferences
    #[serde(default)]
    pub ui: UiConfig,
}

impl Config {
    /// Creates a new Config with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Gets the config directory path.
    ///
    /// - `$ABACUS_CONFIG_DIR` if set
    /// - Linux: `~/.config/AbacusTrainer/`
    /// - macOS: `~/Library/Application Support/AbacusTrainer/`
    /// - Windows: `%APPDATA%\AbacusTrainer\`
    pub fn config_dir() -> Result<PathBuf> {
        if let Some(dir) = std::env::var_os(CONFIG_DIR_ENV) {
            return Ok(PathBuf::from(dir));
        }

        let config_dir = dirs::config_dir()
            .context("Failed to determine config directory")?
            .join(APP_DIR_NAME);

        Ok(config_dir)
    }

    /// Gets the full path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Gets the path of the log file written while the TUI is running.
    pub fn log_file_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("abacus.log"))
    }

    /// Loads configuration from the config file.
    ///
    /// If the file doesn't exist, returns default configuration.
    pub fn load() -> Result<Self> {
        let config_path = Self::config_file_path()?;

        if !config_path.exists() {
            return Ok(Self::new());
        }

        let content = fs::read_to_string(&config_path).context(format!(
            "Failed to read config file: {}",
            config_path.display()
        ))?;

        let config = Self::from_toml(&content).context(format!(
            "Failed to parse config file: {}",
            config_path.display()
        ))?;

        Ok(config)
    }

    /// Parses and validates configuration from TOML text.
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Saves configuration to the config file.
    ///
    /// Uses atomic write pattern (temp file + rename) to prevent corruption.
    pub fn save(&self) -> Result<()> {
        self.validate()?;

        // Ensure config directory exists
        let config_dir = Self::config_dir()?;
        fs::create_dir_all(&config_dir).context(format!(
            "Failed to create config directory: {}",
            config_dir.display()
        ))?;

        // Serialize to TOML
        let content = toml::to_string_pretty(self).context("Failed to serialize configuration")?;

        let config_path = Self::config_file_path()?;
        let temp_path = config_path.with_extension("toml.tmp");

        // Write to temp file
        fs::write(&temp_path, content).context(format!(
            "Failed to write temp config file: {}",
            temp_path.display()
        ))?;

        // Atomic rename
        fs::rename(&temp_path, &config_path).context(format!(
            "Failed to rename temp config file to: {}",
            config_path.display()
        ))?;

        Ok(())
    }

    /// Validates configuration values.
    ///
    /// Checks:
    /// - `rod_count` is between 1 and 18
    /// - `default_target` fits on a frame of `rod_count` rods
    pub fn validate(&self) -> Result<()> {
        let rods = self.abacus.rod_count;
        if rods == 0 || rods > MAX_RODS {
            anyhow::bail!("Invalid rod count {rods}: must be between 1 and {MAX_RODS}");
        }

        let max_value = Self::max_value_for(rods);
        if self.practice.default_target > max_value {
            anyhow::bail!(
                "Default target {} does not fit on {rods} rods (max {max_value})",
                self.practice.default_target
            );
        }

        Ok(())
    }

    /// Sets the rod count with validation.
    pub fn set_rod_count(&mut self, rods: usize) -> Result<()> {
        let previous = self.abacus.rod_count;
        self.abacus.rod_count = rods;
        if let Err(e) = self.validate() {
            self.abacus.rod_count = previous;
            return Err(e);
        }
        Ok(())
    }

    #[allow(clippy::cast_possible_truncation)]
    fn max_value_for(rods: usize) -> u64 {
        10u64.pow(rods as u32) - 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_new() {
        let config = Config::new();
        assert_eq!(config.abacus.rod_count, 5);
        assert_eq!(config.practice.default_target, 42);
        assert_eq!(config.practice.max_random_target, 99);
        assert_eq!(config.ui.theme_mode, ThemeMode::Auto);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validate_rod_count() {
        let mut config = Config::new();
        config.abacus.rod_count = 0;
        assert!(config.validate().is_err());

        config.abacus.rod_count = 19;
        assert!(config.validate().is_err());

        config.abacus.rod_count = 18;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validate_target_fits() {
        let mut config = Config::new();
        config.abacus.rod_count = 1;
        // 42 needs two rods
        assert!(config.validate().is_err());

        config.practice.default_target = 9;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_set_rod_count_rolls_back() {
        let mut config = Config::new();
        assert!(config.set_rod_count(40).is_err());
        assert_eq!(config.abacus.rod_count, 5);

        config.set_rod_count(7).unwrap();
        assert_eq!(config.abacus.rod_count, 7);
    }

    #[test]
    fn test_config_from_partial_toml() {
        let config = Config::from_toml("[abacus]\nrod_count = 8\n").unwrap();
        assert_eq!(config.abacus.rod_count, 8);
        assert_eq!(config.practice, PracticeConfig::default());
        assert_eq!(config.ui, UiConfig::default());
    }

    #[test]
    fn test_config_from_empty_toml() {
        assert_eq!(Config::from_toml("").unwrap(), Config::new());
    }

    #[test]
    fn test_config_from_invalid_toml() {
        assert!(Config::from_toml("[abacus]\nrod_count = 0\n").is_err());
        assert!(Config::from_toml("[abacus\n").is_err());
    }

    #[test]
    fn test_config_toml_round_trip() {
        let mut config = Config::new();
        config.abacus.rod_count = 9;
        config.ui.theme_mode = ThemeMode::Light;

        let text = toml::to_string_pretty(&config).unwrap();
        assert!(text.contains("rod_count = 9"));
        assert!(text.contains("theme_mode = \"Light\""));
        assert_eq!(Config::from_toml(&text).unwrap(), config);
    }

    #[test]
    fn test_theme_mode_parse() {
        assert_eq!(ThemeMode::parse("DARK"), Some(ThemeMode::Dark));
        assert_eq!(ThemeMode::parse("light"), Some(ThemeMode::Light));
        assert_eq!(ThemeMode::parse("auto"), Some(ThemeMode::Auto));
        assert_eq!(ThemeMode::parse("sepia"), None);
        assert_eq!(ThemeMode::Dark.as_str(), "dark");
    }
}
