//! Component trait pattern for TUI components.
//!
//! This module defines the traits and types used to implement self-contained,
//! testable TUI components that can handle their own input and rendering.

use crossterm::event::{KeyEvent, MouseEvent};
use ratatui::{layout::Rect, Frame};

use crate::tui::Theme;

/// A component that can be rendered and handle input.
///
/// Components are self-contained UI elements that manage their own state,
/// handle keyboard input, and can emit events to communicate with the parent.
pub trait Component {
    /// Event type this component can emit
    type Event;

    /// Handle keyboard input.
    ///
    /// Returns `Some(Event)` if the component wants to signal something to the parent.
    /// Returns `None` if input was handled internally without needing parent action.
    fn handle_input(&mut self, key: KeyEvent) -> Option<Self::Event>;

    /// Handle mouse input.
    ///
    /// Default implementation ignores the mouse.
    fn handle_mouse(&mut self, _mouse: MouseEvent) -> Option<Self::Event> {
        None
    }

    /// Render the component.
    ///
    /// The component should render itself within the provided area.
    fn render(&self, f: &mut Frame, area: Rect, theme: &Theme);

    /// Check if component should close.
    ///
    /// Returns `true` if the component has finished its work and should be closed.
    /// Default implementation returns `false`.
    fn should_close(&self) -> bool {
        false
    }
}

/// Events emitted by the abacus widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AbacusEvent {
    /// A bead click changed the frame's value
    BeadsMoved {
        /// Rod that was clicked
        rod: usize,
        /// Aggregate value after the click
        value: u64,
    },
    /// The rod selection moved
    RodSelected(usize),
}
