//! `abacus tui`: the interactive "represent this number" screen.

use clap::Args;
use tracing::info;

use crate::cli::common::{CliError, CliResult};
use crate::config::Config;
use crate::tui::{self, AppState};

/// Launch the interactive abacus
#[derive(Args, Debug, Default)]
pub struct TuiArgs {
    /// Number of rods (defaults to the configured rod count)
    #[arg(long, value_name = "N")]
    pub rods: Option<usize>,

    /// First number to represent (defaults to the configured target)
    #[arg(long, value_name = "N")]
    pub target: Option<u64>,
}

impl TuiArgs {
    /// Execute tui command
    pub fn execute(&self) -> CliResult<()> {
        let config = Config::load()
            .map_err(|e| CliError::validation(format!("Failed to load configuration: {e:#}")))?;

        let mut state = AppState::new(config, self.rods, self.target)
            .map_err(|e| CliError::validation(format!("{e:#}")))?;
        info!(
            rods = state.abacus.abacus().rod_count(),
            target = state.challenge.target(),
            "starting tui"
        );

        let mut terminal = tui::setup_terminal().map_err(|e| CliError::io(format!("{e:#}")))?;

        let result = tui::run_tui(&mut state, &mut terminal);

        // Restore the terminal before reporting a loop error
        tui::restore_terminal(terminal).map_err(|e| CliError::io(format!("{e:#}")))?;
        result.map_err(|e| CliError::io(format!("{e:#}")))?;

        info!(
            attempts = state.challenge.attempts(),
            solved = state.challenge.solved(),
            "tui closed"
        );
        Ok(())
    }
}
