//! Configuration management CLI commands.

use crate::cli::common::{CliError, CliResult};
use crate::config::{Config, ThemeMode};
use clap::{Args, Subcommand};
use serde::Serialize;

/// Configuration management commands
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommand,
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Display current configuration
    Show(ConfigShowArgs),
    /// Set configuration values
    Set(ConfigSetArgs),
}

/// Display current configuration
#[derive(Args, Debug)]
pub struct ConfigShowArgs {
    /// Output as JSON
    #[arg(long)]
    json: bool,
}

/// Set configuration values
#[derive(Args, Debug)]
pub struct ConfigSetArgs {
    /// Number of rods on the frame (1-18)
    #[arg(long, value_name = "N")]
    rods: Option<usize>,

    /// Theme mode (auto, light, or dark)
    #[arg(long, value_name = "MODE")]
    theme: Option<String>,
}

/// JSON-serializable configuration for output
#[derive(Serialize, Debug)]
struct ConfigOutput {
    path: String,
    abacus: AbacusOutput,
    practice: PracticeOutput,
    ui: UiOutput,
}

#[derive(Serialize, Debug)]
struct AbacusOutput {
    rod_count: usize,
}

#[derive(Serialize, Debug)]
struct PracticeOutput {
    default_target: u64,
    max_random_target: u64,
}

#[derive(Serialize, Debug)]
struct UiOutput {
    theme: String,
    show_help_on_startup: bool,
}

impl ConfigArgs {
    /// Execute config subcommand
    pub fn execute(&self) -> CliResult<()> {
        match &self.command {
            ConfigCommand::Show(args) => args.execute(),
            ConfigCommand::Set(args) => args.execute(),
        }
    }
}

impl ConfigShowArgs {
    /// Execute show command
    pub fn execute(&self) -> CliResult<()> {
        let config = Config::load()
            .map_err(|e| CliError::validation(format!("Failed to load configuration: {e:#}")))?;

        if self.json {
            output_json(&config)?;
        } else {
            output_human_readable(&config);
        }

        Ok(())
    }
}

impl ConfigSetArgs {
    /// Execute set command
    pub fn execute(&self) -> CliResult<()> {
        // At least one argument must be provided
        if self.rods.is_none() && self.theme.is_none() {
            return Err(CliError::validation(
                "At least one configuration option must be specified: --rods or --theme",
            ));
        }

        // A missing file loads as defaults; a broken one must not be overwritten
        let mut config = Config::load()
            .map_err(|e| CliError::validation(format!("Failed to load configuration: {e:#}")))?;

        if let Some(rods) = self.rods {
            config
                .set_rod_count(rods)
                .map_err(|e| CliError::validation(e.to_string()))?;
        }

        if let Some(theme_str) = &self.theme {
            config.ui.theme_mode = ThemeMode::parse(theme_str).ok_or_else(|| {
                CliError::validation("Invalid theme mode. Must be 'auto', 'light', or 'dark'")
            })?;
        }

        config
            .save()
            .map_err(|e| CliError::io(format!("Failed to save configuration: {e:#}")))?;

        println!("Configuration updated successfully.");

        Ok(())
    }
}

fn config_path_display() -> String {
    Config::config_file_path()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|_| "(unknown)".to_string())
}

/// Output configuration in JSON format
fn output_json(config: &Config) -> CliResult<()> {
    let output = ConfigOutput {
        path: config_path_display(),
        abacus: AbacusOutput {
            rod_count: config.abacus.rod_count,
        },
        practice: PracticeOutput {
            default_target: config.practice.default_target,
            max_random_target: config.practice.max_random_target,
        },
        ui: UiOutput {
            theme: config.ui.theme_mode.as_str().to_string(),
            show_help_on_startup: config.ui.show_help_on_startup,
        },
    };

    let json = serde_json::to_string_pretty(&output)
        .map_err(|e| CliError::io(format!("Failed to serialize configuration to JSON: {e}")))?;

    println!("{json}");
    Ok(())
}

/// Output configuration in human-readable format
fn output_human_readable(config: &Config) {
    println!("Abacus Trainer Configuration");
    println!("============================");
    println!("File: {}", config_path_display());
    println!();

    println!("Abacus:");
    println!("  Rods: {}", config.abacus.rod_count);
    println!();

    println!("Practice:");
    println!("  Default Target: {}", config.practice.default_target);
    println!("  Max Random Target: {}", config.practice.max_random_target);
    println!();

    println!("UI:");
    println!("  Theme Mode: {}", config.ui.theme_mode.as_str());
    println!("  Help On Startup: {}", config.ui.show_help_on_startup);
    println!();
}
