//! Error type for abacus model operations.

use std::fmt;

use super::bead::EARTH_BEADS_PER_ROD;
use super::frame::MAX_RODS;

/// Errors raised when a caller addresses beads, rods, or digits that do not exist.
///
/// None of these can occur through the interactive widget itself; they only
/// surface when raw indices or digits arrive from outside (CLI arguments,
/// config files, tests).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AbacusError {
    /// Frame constructed with zero rods or more rods than a `u64` can hold
    InvalidRodCount(usize),
    /// Rod index outside the frame
    InvalidRod {
        /// Requested rod index
        index: usize,
        /// Number of rods in the frame
        rod_count: usize,
    },
    /// Earth bead position outside 0..=3
    InvalidPosition(usize),
    /// Rod digit above 9
    InvalidDigit(u8),
}

impl fmt::Display for AbacusError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidRodCount(count) => {
                write!(f, "Invalid rod count {count}: must be between 1 and {MAX_RODS}")
            }
            Self::InvalidRod { index, rod_count } => {
                write!(f, "Rod {index} does not exist (frame has {rod_count} rods)")
            }
            Self::InvalidPosition(position) => write!(
                f,
                "Earth bead position {position} is out of range (0-{})",
                EARTH_BEADS_PER_ROD - 1
            ),
            Self::InvalidDigit(digit) => write!(f, "Digit {digit} cannot be shown on one rod (0-9)"),
        }
    }
}

impl std::error::Error for AbacusError {}
