//! Help overlay widget listing the keyboard and mouse controls.
//!
//! Opened with '?', scrollable, closed with Esc, q or '?'.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState},
    Frame,
};

use super::component::Component;
use super::Theme;

/// Section headings and their (keys, action) rows.
const SECTIONS: &[(&str, &[(&str, &str)])] = &[
    (
        "BEADS",
        &[
            ("←/→  h/l", "Select rod"),
            ("u  Space", "Toggle heaven bead (worth 5)"),
            ("1-4", "Click earth bead 1-4 (worth 1 each)"),
            ("Mouse", "Click any bead to move it"),
        ],
    ),
    (
        "VALUE",
        &[
            ("=", "Type a value, Enter to show it on the frame"),
            ("r", "Reset every rod to zero"),
        ],
    ),
    (
        "CHALLENGE",
        &[
            ("c", "Check the frame against the target"),
            ("n", "Draw a new target number"),
        ],
    ),
    (
        "SYSTEM",
        &[
            ("?", "Toggle this help"),
            ("q  Esc", "Quit"),
            ("Ctrl+C", "Quit"),
        ],
    ),
];

/// Events emitted by the help overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HelpEvent {
    /// The overlay was dismissed
    Closed,
}

/// Scrollable help overlay.
#[derive(Debug, Clone)]
pub struct HelpOverlay {
    /// Current scroll offset (line number)
    pub scroll_offset: usize,
    total_lines: usize,
    closed: bool,
}

impl HelpOverlay {
    /// Creates a new help overlay scrolled to the top.
    #[must_use]
    pub fn new() -> Self {
        Self {
            scroll_offset: 0,
            total_lines: Self::help_content(&Theme::dark()).len(),
            closed: false,
        }
    }

    /// Scroll up by one line.
    pub const fn scroll_up(&mut self) {
        self.scroll_offset = self.scroll_offset.saturating_sub(1);
    }

    /// Scroll down by one line.
    pub const fn scroll_down(&mut self) {
        if self.scroll_offset + 1 < self.total_lines {
            self.scroll_offset += 1;
        }
    }

    fn help_content(theme: &Theme) -> Vec<Line<'static>> {
        let mut lines = vec![
            Line::from(Span::styled(
                "Each rod is one decimal place. The heaven bead counts 5,",
                Style::default().fg(theme.text),
            )),
            Line::from(Span::styled(
                "each earth bead 1. Beads touching the bar are counted.",
                Style::default().fg(theme.text),
            )),
        ];

        for (heading, rows) in SECTIONS {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                format!("═══ {heading} ═══"),
                Style::default()
                    .fg(theme.accent)
                    .add_modifier(Modifier::BOLD),
            )));
            for (keys, action) in *rows {
                lines.push(Line::from(vec![
                    Span::styled(format!("  {keys:<12}"), Style::default().fg(theme.success)),
                    Span::styled(*action, Style::default().fg(theme.text)),
                ]));
            }
        }

        lines
    }
}

impl Default for HelpOverlay {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for HelpOverlay {
    type Event = HelpEvent;

    fn handle_input(&mut self, key: KeyEvent) -> Option<Self::Event> {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.scroll_up();
                None
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.scroll_down();
                None
            }
            KeyCode::Home => {
                self.scroll_offset = 0;
                None
            }
            KeyCode::Esc | KeyCode::Char('q' | '?') => {
                self.closed = true;
                Some(HelpEvent::Closed)
            }
            _ => None,
        }
    }

    #[allow(clippy::cast_possible_truncation)]
    fn render(&self, f: &mut Frame, area: Rect, theme: &Theme) {
        // Centered modal, 60% wide and 80% tall
        let width = (area.width * 60) / 100;
        let height = (area.height * 80) / 100;
        let modal_area = Rect {
            x: area.x + area.width.saturating_sub(width) / 2,
            y: area.y + area.height.saturating_sub(height) / 2,
            width,
            height,
        };
        f.render_widget(Clear, modal_area);

        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(1), Constraint::Length(1)])
            .split(modal_area);

        let visible_height = chunks[0].height.saturating_sub(2) as usize;
        let paragraph = Paragraph::new(Self::help_content(theme))
            .block(
                Block::default()
                    .title(" Help - Controls ")
                    .title_alignment(Alignment::Center)
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(theme.primary)),
            )
            .style(Style::default().fg(theme.text).bg(theme.background))
            .scroll((self.scroll_offset as u16, 0));
        f.render_widget(paragraph, chunks[0]);

        let scrollbar = Scrollbar::default()
            .orientation(ScrollbarOrientation::VerticalRight)
            .begin_symbol(Some("↑"))
            .end_symbol(Some("↓"))
            .style(Style::default().fg(theme.primary));
        let mut scrollbar_state =
            ScrollbarState::new(self.total_lines.saturating_sub(visible_height))
                .position(self.scroll_offset);
        f.render_stateful_widget(scrollbar, chunks[1], &mut scrollbar_state);
    }

    fn should_close(&self) -> bool {
        self.closed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_scroll_bounds() {
        let mut help = HelpOverlay::new();
        help.scroll_up();
        assert_eq!(help.scroll_offset, 0);

        for _ in 0..500 {
            help.scroll_down();
        }
        assert_eq!(help.scroll_offset, help.total_lines - 1);
    }

    #[test]
    fn test_close_keys() {
        for code in [KeyCode::Esc, KeyCode::Char('q'), KeyCode::Char('?')] {
            let mut help = HelpOverlay::new();
            assert_eq!(help.handle_input(key(code)), Some(HelpEvent::Closed));
            assert!(help.should_close());
        }
    }

    #[test]
    fn test_content_lists_every_section() {
        let text: String = HelpOverlay::help_content(&Theme::dark())
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n");
        for (heading, _) in SECTIONS {
            assert!(text.contains(heading));
        }
    }
}
