//! `abacus show`: decompose a value into bead positions.

use clap::Args;
use serde::Serialize;
use tracing::debug;

use crate::cli::common::{CliError, CliResult};
use crate::config::Config;
use crate::models::{Abacus, RodSnapshot, SetValue};
use crate::tui::abacus_widget::{rod_column, RodCell, BEAD_ROWS};

/// Show how a value is laid out on the frame
#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Value to place on the frame
    #[arg(value_name = "VALUE")]
    value: u64,

    /// Number of rods (defaults to the configured rod count)
    #[arg(long, value_name = "N")]
    rods: Option<usize>,

    /// Output as JSON
    #[arg(long)]
    json: bool,

    /// Show the leading digits instead of failing when the value is too wide
    #[arg(long)]
    allow_truncate: bool,
}

/// JSON output for `show --json`
#[derive(Serialize, Debug)]
struct ShowOutput {
    value: u64,
    requested: u64,
    truncated: bool,
    rods: Vec<RodSnapshot>,
}

impl ShowArgs {
    /// Execute show command
    pub fn execute(&self) -> CliResult<()> {
        let rod_count = match self.rods {
            Some(rods) => rods,
            None => {
                Config::load()
                    .map_err(|e| {
                        CliError::validation(format!("Failed to load configuration: {e:#}"))
                    })?
                    .abacus
                    .rod_count
            }
        };

        let mut abacus = Abacus::new(rod_count).map_err(|e| CliError::validation(e.to_string()))?;
        let outcome = abacus.set_value(self.value);

        if let SetValue::Truncated { requested, shown } = outcome {
            let message = format!(
                "{requested} does not fit on {rod_count} rods (max {}); showing {shown}",
                abacus.max_value()
            );
            if !self.allow_truncate {
                return Err(CliError::validation(message));
            }
            eprintln!("Warning: {message}");
        }
        debug!(value = abacus.value(), ?outcome, "show");

        if self.json {
            let output = ShowOutput {
                value: abacus.value(),
                requested: self.value,
                truncated: outcome.is_truncated(),
                rods: abacus.snapshot(),
            };
            let json = serde_json::to_string_pretty(&output)
                .map_err(|e| CliError::io(format!("Failed to serialize output to JSON: {e}")))?;
            println!("{json}");
        } else {
            print!("{}", render_text(&abacus));
        }

        Ok(())
    }
}

/// Plain-text picture of the frame, one column per rod.
fn render_text(abacus: &Abacus) -> String {
    let columns: Vec<[RodCell; BEAD_ROWS]> = abacus.rods().iter().map(rod_column).collect();
    let mut out = String::new();

    for row in 0..BEAD_ROWS {
        for column in &columns {
            out.push_str(match column[row] {
                RodCell::Heaven { active: true } | RodCell::Earth { active: true, .. } => " ● ",
                RodCell::Heaven { active: false } | RodCell::Earth { active: false, .. } => " ○ ",
                RodCell::Divider => "═══",
                RodCell::Gap => " │ ",
            });
        }
        out.push('\n');
    }

    for digit in abacus.digits() {
        out.push_str(&format!(" {digit} "));
    }
    out.push('\n');
    out.push_str(&format!("Value: {}\n", abacus.value()));
    out
}
