//! CLI command handlers for the abacus trainer.
//!
//! The headless commands give scriptable access to the frame model and
//! configuration, for automation and testing.

pub mod common;
pub mod config;
pub mod show;
pub mod tui;

// Re-export types used by main.rs and tests
pub use common::{CliError, CliResult, ExitCode};
pub use config::ConfigArgs;
pub use show::ShowArgs;
pub use tui::TuiArgs;
