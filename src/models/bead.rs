//! Bead state for a single rod.
//!
//! A rod carries one heaven bead worth five and a stack of four earth beads
//! worth one each. Earth beads move as a stack: the active beads always form
//! a contiguous run starting at the divider (position 0).

use serde::Serialize;

use super::error::AbacusError;

/// Number of earth beads on every rod.
pub const EARTH_BEADS_PER_ROD: usize = 4;

/// Value contributed by an active heaven bead.
pub const HEAVEN_BEAD_VALUE: u8 = 5;

/// Which deck of the rod a bead sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BeadKind {
    /// Upper bead, worth 5 when moved to the divider
    Heaven,
    /// Lower bead, worth 1 when moved to the divider
    Earth,
}

/// A single bead and whether it is pushed against the divider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Bead {
    /// Deck the bead belongs to
    pub kind: BeadKind,
    /// True when the bead is counted
    pub active: bool,
}

impl Bead {
    /// Creates an inactive bead of the given kind.
    #[must_use]
    pub const fn new(kind: BeadKind) -> Self {
        Self {
            kind,
            active: false,
        }
    }

    /// Value this bead contributes to its rod's digit.
    #[must_use]
    pub const fn value(&self) -> u8 {
        match (self.kind, self.active) {
            (BeadKind::Heaven, true) => HEAVEN_BEAD_VALUE,
            (BeadKind::Earth, true) => 1,
            (_, false) => 0,
        }
    }
}

/// Position of an earth bead, 0 (nearest the divider) to 3 (farthest).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EarthPosition(u8);

impl EarthPosition {
    /// All earth positions, nearest the divider first.
    pub const ALL: [Self; EARTH_BEADS_PER_ROD] = [Self(0), Self(1), Self(2), Self(3)];

    /// Position as an array index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl TryFrom<usize> for EarthPosition {
    type Error = AbacusError;

    fn try_from(position: usize) -> Result<Self, Self::Error> {
        if position < EARTH_BEADS_PER_ROD {
            #[allow(clippy::cast_possible_truncation)]
            Ok(Self(position as u8))
        } else {
            Err(AbacusError::InvalidPosition(position))
        }
    }
}

/// The four earth beads of one rod.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EarthBeads {
    beads: [Bead; EARTH_BEADS_PER_ROD],
}

impl EarthBeads {
    /// Creates a stack with every bead away from the divider.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            beads: [Bead::new(BeadKind::Earth); EARTH_BEADS_PER_ROD],
        }
    }

    /// Handles a click on the bead at `position`.
    ///
    /// A click sets the stack's water-line. Clicking an active bead pulls it
    /// and every bead farther from the divider away, leaving the beads below
    /// it in place. Clicking an inactive bead pushes it and everything below
    /// it to the divider and releases every bead above it.
    ///
    /// An active click does not clear positions `0..=position`. That rule
    /// leaves the beads above still active, so clicking position 1 on a full
    /// stack would give `[F, F, T, T]`. Lowering the water-line gives
    /// `[T, F, F, F]` and the active beads always form a prefix.
    pub fn toggle(&mut self, position: EarthPosition) {
        let clicked = position.index();

        if self.beads[clicked].active {
            for bead in &mut self.beads[clicked..] {
                bead.active = false;
            }
        } else {
            for (i, bead) in self.beads.iter_mut().enumerate() {
                bead.active = i <= clicked;
            }
        }
    }

    /// Assigns the stack so exactly `count` beads touch the divider.
    ///
    /// Counts above four saturate at a full stack.
    pub fn set_count(&mut self, count: u8) {
        let count = usize::from(count);
        for (i, bead) in self.beads.iter_mut().enumerate() {
            bead.active = i < count;
        }
    }

    /// Number of active beads.
    #[must_use]
    pub fn count(&self) -> u8 {
        self.beads.iter().map(Bead::value).sum()
    }

    /// Whether the bead at `position` is active.
    #[must_use]
    pub const fn is_active(&self, position: EarthPosition) -> bool {
        self.beads[position.index()].active
    }

    /// Active flags, nearest the divider first.
    #[must_use]
    pub fn as_flags(&self) -> [bool; EARTH_BEADS_PER_ROD] {
        self.beads.map(|bead| bead.active)
    }

    /// Checks that the active beads form a run starting at position 0.
    #[must_use]
    pub fn is_contiguous(&self) -> bool {
        let flags = self.as_flags();
        flags.windows(2).all(|pair| pair[0] || !pair[1])
    }
}

impl Default for EarthBeads {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos(i: usize) -> EarthPosition {
        EarthPosition::try_from(i).unwrap()
    }

    #[test]
    fn test_bead_values() {
        let mut heaven = Bead::new(BeadKind::Heaven);
        assert_eq!(heaven.value(), 0);
        heaven.active = true;
        assert_eq!(heaven.value(), 5);

        let mut earth = Bead::new(BeadKind::Earth);
        earth.active = true;
        assert_eq!(earth.value(), 1);
    }

    #[test]
    fn test_position_bounds() {
        assert_eq!(pos(3).index(), 3);
        assert_eq!(
            EarthPosition::try_from(4),
            Err(AbacusError::InvalidPosition(4))
        );
    }

    #[test]
    fn test_toggle_inactive_pushes_stack() {
        let mut earth = EarthBeads::new();
        earth.toggle(pos(2));
        assert_eq!(earth.as_flags(), [true, true, true, false]);
        assert_eq!(earth.count(), 3);
    }

    #[test]
    fn test_toggle_inactive_releases_beads_above() {
        let mut earth = EarthBeads::new();
        earth.set_count(1);
        earth.toggle(pos(1));
        assert_eq!(earth.as_flags(), [true, true, false, false]);
    }

    #[test]
    fn test_toggle_active_lowers_water_line() {
        let mut earth = EarthBeads::new();
        earth.set_count(4);
        earth.toggle(pos(1));
        assert_eq!(earth.as_flags(), [true, false, false, false]);
        assert_eq!(earth.count(), 1);
    }

    #[test]
    fn test_toggle_active_leaves_no_beads_above_gap() {
        let mut earth = EarthBeads::new();
        earth.set_count(4);
        earth.toggle(pos(1));
        assert!(!earth.is_active(pos(2)));
        assert!(!earth.is_active(pos(3)));
        assert!(earth.is_contiguous());
    }

    #[test]
    fn test_toggle_active_bottom_bead_clears_stack() {
        let mut earth = EarthBeads::new();
        earth.set_count(3);
        earth.toggle(pos(0));
        assert_eq!(earth.as_flags(), [false; 4]);
    }

    #[test]
    fn test_toggle_same_bead_twice() {
        let mut earth = EarthBeads::new();
        earth.toggle(pos(3));
        assert_eq!(earth.count(), 4);
        earth.toggle(pos(3));
        assert_eq!(earth.count(), 3);
    }

    #[test]
    fn test_every_click_sequence_keeps_contiguous_stack() {
        // Exhaustive over all click sequences of length 5
        let mut sequence = [0usize; 5];
        for n in 0..4usize.pow(5) {
            let mut rest = n;
            for slot in &mut sequence {
                *slot = rest % 4;
                rest /= 4;
            }

            let mut earth = EarthBeads::new();
            for &i in &sequence {
                earth.toggle(pos(i));
                assert!(earth.is_contiguous(), "broken stack after {sequence:?}");
            }
        }
    }

    #[test]
    fn test_set_count_saturates() {
        let mut earth = EarthBeads::new();
        earth.set_count(9);
        assert_eq!(earth.count(), 4);
        earth.set_count(0);
        assert_eq!(earth.count(), 0);
    }

    #[test]
    fn test_is_contiguous_detects_gaps() {
        let mut earth = EarthBeads::new();
        earth.beads[2].active = true;
        assert!(!earth.is_contiguous());
    }
}
