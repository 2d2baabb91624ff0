//! Status bar widget for displaying status messages and help

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::{AppState, Theme};

/// Hints shown when nothing else needs the first status line.
const MAIN_HINTS: &[(&str, &str)] = &[
    ("←/→", "rod"),
    ("u", "heaven"),
    ("1-4", "earth"),
    ("=", "enter value"),
    ("c", "check"),
];

/// Hints shown while typing a value.
const ENTRY_HINTS: &[(&str, &str)] = &[("0-9", "digit"), ("Enter", "set"), ("Esc", "cancel")];

/// Status bar widget
pub struct StatusBar;

impl StatusBar {
    /// Height including borders.
    pub const HEIGHT: u16 = 4;

    /// Render the status bar with contextual help
    pub fn render(f: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
        // First line: entry prompt, error, status message, or hints
        let first_line = if let Some(entry) = &state.value_entry {
            Line::from(vec![
                Span::styled("Set value: ", Style::default().fg(theme.primary)),
                Span::styled(
                    format!("{entry}_"),
                    Style::default()
                        .fg(theme.accent)
                        .add_modifier(Modifier::BOLD),
                ),
            ])
        } else if let Some(error) = &state.error_message {
            Line::from(vec![
                Span::styled("ERROR: ", Style::default().fg(theme.error)),
                Span::raw(error.clone()),
            ])
        } else if !state.status_message.is_empty() {
            Line::from(state.status_message.clone())
        } else {
            Self::hints_line(MAIN_HINTS, theme)
        };

        let help_line = if state.value_entry.is_some() {
            Self::hints_line(ENTRY_HINTS, theme)
        } else {
            Line::from(vec![
                Span::styled("Help: ", Style::default().fg(theme.primary)),
                Span::styled("r", Style::default().fg(theme.accent)),
                Span::raw(": Reset | "),
                Span::styled("n", Style::default().fg(theme.accent)),
                Span::raw(": New number | "),
                Span::styled("q", Style::default().fg(theme.accent)),
                Span::raw(": Quit | "),
                Span::styled("?", Style::default().fg(theme.accent)),
                Span::raw(": Help"),
            ])
        };

        let status = Paragraph::new(vec![first_line, help_line])
            .style(Style::default().fg(theme.text).bg(theme.background))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(" Status ")
                    .style(Style::default().bg(theme.background)),
            );

        f.render_widget(status, area);
    }

    fn hints_line(hints: &[(&'static str, &'static str)], theme: &Theme) -> Line<'static> {
        let mut spans: Vec<Span<'static>> = Vec::new();
        for (i, (key, action)) in hints.iter().enumerate() {
            if i > 0 {
                spans.push(Span::raw("  "));
            }
            spans.push(Span::styled(
                *key,
                Style::default()
                    .fg(theme.accent)
                    .add_modifier(Modifier::BOLD),
            ));
            spans.push(Span::raw(" "));
            spans.push(Span::styled(*action, Style::default().fg(theme.text_muted)));
        }
        Line::from(spans)
    }
}
