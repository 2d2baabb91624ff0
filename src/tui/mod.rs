//! Terminal user interface components and state management.
//!
//! This module contains the main TUI loop, `AppState`, event handling,
//! and the widgets of the "represent this number" demo screen.

// Allow intentional type casts for terminal coordinates
#![allow(clippy::cast_possible_truncation)]

pub mod abacus_widget;
pub mod component;
pub mod help_overlay;
pub mod status_bar;
pub mod theme;

use anyhow::{Context, Result};
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseEvent,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame, Terminal,
};
use std::cell::Cell;
use std::io;
use std::rc::Rc;
use std::time::Duration;
use tracing::{debug, info};

use crate::config::Config;
use crate::constants::APP_NAME;
use crate::models::{Abacus, SetValue};
use crate::services::{Challenge, ResetBus, Verdict};

// Re-export TUI components
pub use abacus_widget::AbacusWidget;
pub use component::{AbacusEvent, Component};
pub use help_overlay::{HelpEvent, HelpOverlay};
pub use status_bar::StatusBar;
pub use theme::Theme;

/// Longest value the entry prompt accepts (digits of `u64::MAX`).
const MAX_ENTRY_LEN: usize = 20;

/// Application state for the demo screen.
pub struct AppState {
    /// Loaded configuration
    pub config: Config,
    /// Resolved color theme
    pub theme: Theme,
    /// Reset channel every mounted frame listens on
    pub reset_bus: ResetBus,
    /// The interactive frame
    pub abacus: AbacusWidget,
    /// Last value reported by the frame's change listener
    pub current_value: Rc<Cell<u64>>,
    /// Target bookkeeping
    pub challenge: Challenge,
    /// Result of the last check, cleared when a new target is drawn
    pub verdict: Option<Verdict>,
    /// Digits typed after '=', if the prompt is open
    pub value_entry: Option<String>,
    /// Status line text
    pub status_message: String,
    /// Error line text, takes precedence over the status message
    pub error_message: Option<String>,
    /// Help overlay, if open
    pub help: Option<HelpOverlay>,
    /// Set when the user asks to quit
    pub should_quit: bool,
}

impl AppState {
    /// Builds the screen from configuration, with optional command-line overrides.
    pub fn new(config: Config, rods: Option<usize>, target: Option<u64>) -> Result<Self> {
        let rod_count = rods.unwrap_or(config.abacus.rod_count);

        let current_value = Rc::new(Cell::new(0));
        let seen = Rc::clone(&current_value);
        let abacus = Abacus::new(rod_count)
            .context("Failed to create abacus")?
            .with_on_change(move |value| seen.set(value));

        let target = target.unwrap_or(config.practice.default_target);
        if target > abacus.max_value() {
            anyhow::bail!(
                "Target {target} does not fit on {rod_count} rods (max {})",
                abacus.max_value()
            );
        }

        let reset_bus = ResetBus::new();
        let widget = AbacusWidget::mount(abacus, &reset_bus);
        let help = config.ui.show_help_on_startup.then(HelpOverlay::new);

        Ok(Self {
            theme: Theme::from_mode(config.ui.theme_mode),
            challenge: Challenge::new(target, config.practice.max_random_target),
            config,
            reset_bus,
            abacus: widget,
            current_value,
            verdict: None,
            value_entry: None,
            status_message: String::new(),
            error_message: None,
            help,
            should_quit: false,
        })
    }

    /// Set status message
    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = message.into();
        self.error_message = None;
    }

    /// Set error message
    pub fn set_error(&mut self, error: impl Into<String>) {
        self.error_message = Some(error.into());
    }

    /// Checks the frame against the target.
    pub fn check(&mut self) {
        let verdict = self.challenge.check(self.current_value.get());
        info!(?verdict, "challenge checked");
        self.set_status(verdict.message());
        self.verdict = Some(verdict);
    }

    /// Draws a new target that fits on the frame.
    pub fn new_target(&mut self) {
        let frame_max = self.abacus.abacus().max_value();
        let target = self.challenge.next_target(frame_max, &mut rand::rng());
        self.verdict = None;
        self.set_status(format!("New number: {target}"));
    }

    /// Resets every frame on the reset channel.
    pub fn reset(&mut self) {
        let reached = self.reset_bus.broadcast();
        debug!(reached, "reset requested");
        self.set_status("Frame reset to 0");
    }

    /// Pushes a typed value onto the frame.
    pub fn apply_entry(&mut self, entry: &str) {
        if entry.is_empty() {
            self.status_message.clear();
            return;
        }

        let Ok(value) = entry.parse::<u64>() else {
            self.set_error(format!("{entry} is not a number"));
            return;
        };

        match self.abacus.set_value(value) {
            SetValue::Exact => self.set_status(format!("Showing {value}")),
            SetValue::Truncated { requested, shown } => self.set_error(format!(
                "{requested} does not fit on {} rods; showing {shown}",
                self.abacus.abacus().rod_count()
            )),
        }
    }
}

/// Initialize terminal for TUI
pub fn setup_terminal() -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
        .context("Failed to enter alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend).context("Failed to create terminal")?;
    Ok(terminal)
}

/// Restore terminal to normal state
pub fn restore_terminal(mut terminal: Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )
    .context("Failed to leave alternate screen")?;
    terminal.show_cursor().context("Failed to show cursor")?;
    Ok(())
}

/// Main event loop
pub fn run_tui(
    state: &mut AppState,
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
) -> Result<()> {
    loop {
        terminal.draw(|f| render(f, state))?;

        // Poll for events with 100ms timeout
        if event::poll(Duration::from_millis(100))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if handle_key_event(state, key)? {
                        break; // User quit
                    }
                }
                Event::Mouse(mouse) => handle_mouse_event(state, mouse),
                // Resize and the rest re-render on the next loop
                _ => {}
            }
        }

        if state.should_quit {
            break;
        }
    }

    Ok(())
}

/// Render the UI from current state
fn render(f: &mut Frame, state: &AppState) {
    let theme = &state.theme;
    let full_bg = Block::default().style(Style::default().bg(theme.background));
    f.render_widget(full_bg, f.area());

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),                            // Title bar
            Constraint::Length(abacus_widget::WIDGET_HEIGHT), // Frame
            Constraint::Min(6),                               // Challenge
            Constraint::Length(StatusBar::HEIGHT),            // Status bar
        ])
        .split(f.area());

    render_title_bar(f, chunks[0], state);
    state.abacus.render(f, chunks[1], theme);
    render_challenge(f, chunks[2], state);
    StatusBar::render(f, chunks[3], state, theme);

    if let Some(help) = &state.help {
        help.render(f, f.area(), theme);
    }
}

fn render_title_bar(f: &mut Frame, area: Rect, state: &AppState) {
    let title = Paragraph::new(format!(" {APP_NAME} - Represent this number"))
        .style(
            Style::default()
                .fg(state.theme.primary)
                .bg(state.theme.background),
        )
        .block(
            Block::default()
                .borders(Borders::ALL)
                .style(Style::default().bg(state.theme.background)),
        );

    f.render_widget(title, area);
}

fn render_challenge(f: &mut Frame, area: Rect, state: &AppState) {
    let theme = &state.theme;

    let mut lines = vec![
        Line::from(vec![
            Span::styled("Represent: ", Style::default().fg(theme.text_muted)),
            Span::styled(
                state.challenge.target().to_string(),
                Style::default()
                    .fg(theme.accent)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(vec![
            Span::styled("On the frame: ", Style::default().fg(theme.text_muted)),
            Span::styled(
                state.current_value.get().to_string(),
                Style::default().fg(theme.text),
            ),
        ]),
    ];

    if let Some(verdict) = &state.verdict {
        let color = if verdict.is_correct() {
            theme.success
        } else {
            theme.warning
        };
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            verdict.title(),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )));
    }

    lines.push(Line::from(Span::styled(
        format!(
            "Checks: {}  Solved: {}",
            state.challenge.attempts(),
            state.challenge.solved()
        ),
        Style::default().fg(theme.text_muted),
    )));

    let panel = Paragraph::new(lines).alignment(Alignment::Center).block(
        Block::default()
            .title(" Challenge ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.primary)),
    );
    f.render_widget(panel, area);
}

/// Handle keyboard input events. Returns `true` when the user quits.
fn handle_key_event(state: &mut AppState, key: KeyEvent) -> Result<bool> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        state.should_quit = true;
        return Ok(true);
    }

    // Help overlay swallows input until closed
    if let Some(help) = &mut state.help {
        help.handle_input(key);
        if help.should_close() {
            state.help = None;
        }
        return Ok(false);
    }

    if let Some(entry) = &mut state.value_entry {
        match key.code {
            KeyCode::Char(c @ '0'..='9') if entry.len() < MAX_ENTRY_LEN => entry.push(c),
            KeyCode::Backspace => {
                entry.pop();
            }
            KeyCode::Esc => state.value_entry = None,
            KeyCode::Enter => {
                let entry = state.value_entry.take().unwrap_or_default();
                state.apply_entry(&entry);
            }
            _ => {}
        }
        return Ok(false);
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => {
            state.should_quit = true;
            return Ok(true);
        }
        KeyCode::Char('?') => state.help = Some(HelpOverlay::new()),
        KeyCode::Char('=') => {
            state.error_message = None;
            state.value_entry = Some(String::new());
        }
        KeyCode::Char('c') => state.check(),
        KeyCode::Char('n') => state.new_target(),
        KeyCode::Char('r') => state.reset(),
        _ => {
            if let Some(AbacusEvent::BeadsMoved { .. }) = state.abacus.handle_input(key) {
                state.status_message.clear();
                state.error_message = None;
            }
        }
    }

    Ok(false)
}

fn handle_mouse_event(state: &mut AppState, mouse: MouseEvent) {
    if state.help.is_some() || state.value_entry.is_some() {
        return;
    }
    if let Some(AbacusEvent::BeadsMoved { .. }) = state.abacus.handle_mouse(mouse) {
        state.status_message.clear();
        state.error_message = None;
    }
}
