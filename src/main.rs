//! Abacus Trainer - Terminal soroban for learning place value
//!
//! Without a subcommand this opens the interactive frame. The `show` and
//! `config` subcommands are headless and scriptable.

use std::fs::{self, OpenOptions};
use std::io;
use std::sync::Mutex;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use abacus_tui::cli::{CliResult, ConfigArgs, ShowArgs, TuiArgs};
use abacus_tui::config::Config;

/// Abacus Trainer - Terminal soroban for learning place value
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Launch the interactive abacus (default)
    Tui(TuiArgs),
    /// Print the bead layout for a value
    Show(ShowArgs),
    /// Manage configuration
    Config(ConfigArgs),
}

/// Initialize tracing. The TUI owns the terminal, so it logs to a file.
fn init_tracing(verbose: bool, to_file: bool) -> anyhow::Result<()> {
    let filter = if verbose { "debug" } else { "warn" };
    let registry = tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()));

    if to_file {
        let path = Config::log_file_path()?;
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)
                .context(format!("Failed to create log directory: {}", dir.display()))?;
        }
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .context(format!("Failed to open log file: {}", path.display()))?;

        registry
            .with(fmt::layer().with_writer(Mutex::new(file)).with_ansi(false))
            .init();
    } else {
        registry.with(fmt::layer().with_writer(io::stderr)).init();
    }

    Ok(())
}

fn main() {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Tui(TuiArgs::default()));

    if let Err(e) = init_tracing(cli.verbose, matches!(command, Command::Tui(_))) {
        eprintln!("Warning: logging disabled: {e:#}");
    }

    let result: CliResult<()> = match &command {
        Command::Tui(args) => args.execute(),
        Command::Show(args) => args.execute(),
        Command::Config(args) => args.execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(e.exit_code());
    }
}
