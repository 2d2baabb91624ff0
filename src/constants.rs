//! Application-wide constants.
//!
//! This module defines constants used throughout the application,
//! including the application name and configuration locations.

/// The display name of the application (human-readable, with proper capitalization).
pub const APP_NAME: &str = "Abacus Trainer";

/// Directory name under the platform config directory.
pub const APP_DIR_NAME: &str = "AbacusTrainer";

/// Environment variable that overrides the config directory.
pub const CONFIG_DIR_ENV: &str = "ABACUS_CONFIG_DIR";
