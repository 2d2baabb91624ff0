//! Abacus widget: draws the frame and turns keys and clicks into bead moves.
//!
//! Each rod is a fixed-width column. From top to bottom a column holds the
//! heaven deck (two rows: the bead and a gap), the divider, the earth deck
//! (five rows: four beads and a gap), and the digit label. Active beads sit
//! against the divider and the gap opens on the far side.

use std::cell::{Cell, Ref, RefCell};
use std::rc::Rc;

use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use tracing::debug;

use super::component::{AbacusEvent, Component};
use super::Theme;
use crate::models::{Abacus, EarthPosition, Rod, SetValue, EARTH_BEADS_PER_ROD};
use crate::services::{ResetBus, ResetSubscription};

/// Character width of one rod column.
pub const COLUMN_WIDTH: u16 = 5;

/// Rows used by beads and the divider in each column.
pub const BEAD_ROWS: usize = 2 + 1 + EARTH_BEADS_PER_ROD + 1;

/// Row index of the divider within a column.
pub const DIVIDER_ROW: usize = 2;

/// Total widget height including the label row and borders.
#[allow(clippy::cast_possible_truncation)]
pub const WIDGET_HEIGHT: u16 = BEAD_ROWS as u16 + 1 + 2;

/// What occupies one row of a rod column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RodCell {
    /// The heaven bead
    Heaven {
        /// At the divider
        active: bool,
    },
    /// An earth bead
    Earth {
        /// Bead position on the rod
        position: EarthPosition,
        /// At the divider
        active: bool,
    },
    /// The divider bar
    Divider,
    /// Bare rod (the gap a bead can slide into)
    Gap,
}

/// Lays out one rod's beads top to bottom.
#[must_use]
pub fn rod_column(rod: &Rod) -> [RodCell; BEAD_ROWS] {
    let mut cells = [RodCell::Gap; BEAD_ROWS];

    let heaven = RodCell::Heaven {
        active: rod.heaven_active(),
    };
    if rod.heaven_active() {
        cells[1] = heaven;
    } else {
        cells[0] = heaven;
    }

    cells[DIVIDER_ROW] = RodCell::Divider;

    // Active earth beads stack up under the divider, then one gap, then the rest
    let active = usize::from(rod.active_earth_count());
    for position in EarthPosition::ALL {
        let k = position.index();
        let is_active = rod.earth_active(position);
        let row = if k < active { k } else { k + 1 };
        cells[DIVIDER_ROW + 1 + row] = RodCell::Earth {
            position,
            active: is_active,
        };
    }

    cells
}

/// Interactive abacus mounted on a reset channel.
///
/// Dropping the widget drops its reset subscription, unsubscribing it.
pub struct AbacusWidget {
    abacus: Rc<RefCell<Abacus>>,
    _reset: ResetSubscription,
    selected: usize,
    inner_area: Cell<Rect>,
}

impl AbacusWidget {
    /// Takes ownership of `abacus` and subscribes it to `bus`.
    #[must_use]
    pub fn mount(abacus: Abacus, bus: &ResetBus) -> Self {
        let abacus = Rc::new(RefCell::new(abacus));
        let reset = bus.attach(&abacus);
        let selected = abacus.borrow().rod_count() - 1;
        debug!(rods = selected + 1, "abacus widget mounted");

        Self {
            abacus,
            _reset: reset,
            selected,
            inner_area: Cell::new(Rect::default()),
        }
    }

    /// Read access to the frame.
    #[must_use]
    pub fn abacus(&self) -> Ref<'_, Abacus> {
        self.abacus.borrow()
    }

    /// Current frame value.
    #[must_use]
    pub fn value(&self) -> u64 {
        self.abacus.borrow().value()
    }

    /// Selected rod; starts on the units rod.
    #[must_use]
    pub const fn selected_rod(&self) -> usize {
        self.selected
    }

    /// Moves the selection one rod towards the most significant end.
    pub fn select_previous(&mut self) -> AbacusEvent {
        self.selected = self.selected.saturating_sub(1);
        AbacusEvent::RodSelected(self.selected)
    }

    /// Moves the selection one rod towards the units rod.
    pub fn select_next(&mut self) -> AbacusEvent {
        let last = self.abacus.borrow().rod_count() - 1;
        self.selected = (self.selected + 1).min(last);
        AbacusEvent::RodSelected(self.selected)
    }

    /// Pushes a value onto the frame.
    pub fn set_value(&mut self, value: u64) -> SetValue {
        self.abacus.borrow_mut().set_value(value)
    }

    /// Toggles the heaven bead of `rod`.
    pub fn click_heaven(&mut self, rod: usize) -> Option<AbacusEvent> {
        let value = self.abacus.borrow_mut().toggle_heaven(rod).ok()?;
        self.selected = rod;
        Some(AbacusEvent::BeadsMoved { rod, value })
    }

    /// Clicks the earth bead at `position` on `rod`.
    pub fn click_earth(&mut self, rod: usize, position: EarthPosition) -> Option<AbacusEvent> {
        let value = self
            .abacus
            .borrow_mut()
            .toggle_earth(rod, position)
            .ok()?;
        self.selected = rod;
        Some(AbacusEvent::BeadsMoved { rod, value })
    }

    /// Maps a terminal cell to the bead drawn there, based on the last render.
    #[must_use]
    pub fn hit_test(&self, column: u16, row: u16) -> Option<(usize, RodCell)> {
        let inner = self.inner_area.get();
        if column < inner.x || row < inner.y {
            return None;
        }

        let rod = usize::from((column - inner.x) / COLUMN_WIDTH);
        let row = usize::from(row - inner.y);
        if row >= BEAD_ROWS || column >= inner.x + inner.width {
            return None;
        }

        let abacus = self.abacus.borrow();
        let cell = rod_column(abacus.rod(rod)?)[row];
        Some((rod, cell))
    }

    fn cell_span(cell: RodCell, selected: bool, theme: &Theme) -> Span<'static> {
        let bead = |color| {
            let mut style = Style::default().fg(color);
            if selected {
                style = style.add_modifier(Modifier::BOLD);
            }
            Span::styled(" ███ ", style)
        };

        match cell {
            RodCell::Heaven { active: true } => bead(theme.heaven_bead),
            RodCell::Earth { active: true, .. } => bead(theme.earth_bead),
            RodCell::Heaven { active: false } | RodCell::Earth { active: false, .. } => {
                bead(theme.bead_idle)
            }
            RodCell::Divider => Span::styled("═════", Style::default().fg(theme.frame)),
            RodCell::Gap => Span::styled("  │  ", Style::default().fg(theme.frame)),
        }
    }

    fn label_span(digit: u8, selected: bool, theme: &Theme) -> Span<'static> {
        if selected {
            Span::styled(
                format!("[ {digit} ]"),
                Style::default()
                    .fg(theme.accent)
                    .add_modifier(Modifier::BOLD),
            )
        } else {
            Span::styled(format!("  {digit}  "), Style::default().fg(theme.text_muted))
        }
    }
}

impl Component for AbacusWidget {
    type Event = AbacusEvent;

    fn handle_input(&mut self, key: KeyEvent) -> Option<Self::Event> {
        match key.code {
            KeyCode::Left | KeyCode::Char('h') => Some(self.select_previous()),
            KeyCode::Right | KeyCode::Char('l') => Some(self.select_next()),
            KeyCode::Char('u' | ' ') => self.click_heaven(self.selected),
            KeyCode::Char(c @ '1'..='4') => {
                let position = EarthPosition::try_from(c as usize - '1' as usize).ok()?;
                self.click_earth(self.selected, position)
            }
            _ => None,
        }
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) -> Option<Self::Event> {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return None;
        }

        match self.hit_test(mouse.column, mouse.row)? {
            (rod, RodCell::Heaven { .. }) => self.click_heaven(rod),
            (rod, RodCell::Earth { position, .. }) => self.click_earth(rod, position),
            (rod, RodCell::Divider | RodCell::Gap) => {
                self.selected = rod;
                Some(AbacusEvent::RodSelected(rod))
            }
        }
    }

    fn render(&self, f: &mut Frame, area: Rect, theme: &Theme) {
        let abacus = self.abacus.borrow();
        let block = Block::default()
            .title(format!(" Abacus ({} rods) ", abacus.rod_count()))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.primary));
        let inner = block.inner(area);
        self.inner_area.set(inner);

        let columns: Vec<[RodCell; BEAD_ROWS]> = abacus.rods().iter().map(rod_column).collect();

        let mut lines: Vec<Line> = (0..BEAD_ROWS)
            .map(|row| {
                Line::from(
                    columns
                        .iter()
                        .enumerate()
                        .map(|(i, column)| Self::cell_span(column[row], i == self.selected, theme))
                        .collect::<Vec<_>>(),
                )
            })
            .collect();

        lines.push(Line::from(
            abacus
                .rods()
                .iter()
                .map(|rod| Self::label_span(rod.digit(), rod.index() == self.selected, theme))
                .collect::<Vec<_>>(),
        ));

        f.render_widget(Paragraph::new(lines).block(block), area);
    }
}
