//! A single abacus rod: one decimal place.

use std::fmt;

use tracing::trace;

use super::bead::{Bead, BeadKind, EarthBeads, EarthPosition, HEAVEN_BEAD_VALUE};
use super::error::AbacusError;

/// Largest digit a rod can show.
pub const MAX_DIGIT: u8 = 9;

/// Callback fired with the rod's new digit after every mutating call.
pub type DigitListener = Box<dyn FnMut(u8)>;

/// One decimal place of the frame.
///
/// The digit is recomputed after every mutation, so [`Rod::digit`] is never
/// stale. Each mutating call fires the rod's listener exactly once, however
/// many beads the click moved.
pub struct Rod {
    index: usize,
    heaven: Bead,
    earth: EarthBeads,
    digit: u8,
    on_value_change: Option<DigitListener>,
}

impl Rod {
    /// Creates a rod at `index` (0 = most significant) showing zero.
    #[must_use]
    pub const fn new(index: usize) -> Self {
        Self {
            index,
            heaven: Bead::new(BeadKind::Heaven),
            earth: EarthBeads::new(),
            digit: 0,
            on_value_change: None,
        }
    }

    /// Registers the listener notified after each mutation.
    pub fn set_on_value_change(&mut self, listener: impl FnMut(u8) + 'static) {
        self.on_value_change = Some(Box::new(listener));
    }

    /// Position of this rod in its frame.
    #[must_use]
    pub const fn index(&self) -> usize {
        self.index
    }

    /// Current digit, 0-9.
    #[must_use]
    pub const fn digit(&self) -> u8 {
        self.digit
    }

    /// Whether the heaven bead is down at the divider.
    #[must_use]
    pub const fn heaven_active(&self) -> bool {
        self.heaven.active
    }

    /// Whether the earth bead at `position` is up at the divider.
    #[must_use]
    pub const fn earth_active(&self, position: EarthPosition) -> bool {
        self.earth.is_active(position)
    }

    /// Earth bead stack of this rod.
    #[must_use]
    pub const fn earth(&self) -> &EarthBeads {
        &self.earth
    }

    /// Number of earth beads at the divider.
    #[must_use]
    pub fn active_earth_count(&self) -> u8 {
        self.earth.count()
    }

    /// Flips the heaven bead.
    pub fn toggle_heaven(&mut self) -> u8 {
        self.heaven.active = !self.heaven.active;
        self.commit()
    }

    /// Clicks the earth bead at `position`; see [`EarthBeads::toggle`].
    pub fn toggle_earth(&mut self, position: EarthPosition) -> u8 {
        self.earth.toggle(position);
        self.commit()
    }

    /// Moves the beads directly to show `digit`.
    pub fn set_digit(&mut self, digit: u8) -> Result<u8, AbacusError> {
        if digit > MAX_DIGIT {
            return Err(AbacusError::InvalidDigit(digit));
        }
        self.assign(digit);
        Ok(self.commit())
    }

    /// Clears every bead.
    pub fn clear(&mut self) -> u8 {
        self.assign(0);
        self.commit()
    }

    /// Bead assignment without notification; caller guarantees `digit <= 9`.
    pub(crate) fn assign(&mut self, digit: u8) {
        self.heaven.active = digit >= HEAVEN_BEAD_VALUE;
        self.earth.set_count(digit % HEAVEN_BEAD_VALUE);
        self.digit = self.compute_digit();
    }

    fn compute_digit(&self) -> u8 {
        self.heaven.value() + self.earth.count()
    }

    fn commit(&mut self) -> u8 {
        self.digit = self.compute_digit();
        trace!(rod = self.index, digit = self.digit, "rod changed");
        if let Some(listener) = self.on_value_change.as_mut() {
            listener(self.digit);
        }
        self.digit
    }
}

impl fmt::Debug for Rod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rod")
            .field("index", &self.index)
            .field("heaven", &self.heaven.active)
            .field("earth", &self.earth.as_flags())
            .field("digit", &self.digit)
            .finish_non_exhaustive()
    }
}
