//! The abacus frame: an ordered row of rods read as one base-10 number.

use std::fmt;

use serde::Serialize;
use tracing::{debug, warn};

use super::bead::{EarthPosition, EARTH_BEADS_PER_ROD};
use super::error::AbacusError;
use super::rod::Rod;

/// Rod count used when the caller does not choose one.
pub const DEFAULT_RODS: usize = 5;

/// Widest frame whose value still fits in a `u64`.
pub const MAX_RODS: usize = 18;

/// Callback fired with the frame's aggregate value.
pub type ValueListener = Box<dyn FnMut(u64)>;

/// Outcome of [`Abacus::set_value`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
#[must_use]
pub enum SetValue {
    /// The frame now shows exactly the requested value
    Exact,
    /// The value had more digits than rods.
    ///
    /// Only the leading digits were kept, so `shown` is the requested
    /// number with its trailing digits cut off (123456 on five rods shows
    /// 12345).
    Truncated {
        /// Value passed by the caller
        requested: u64,
        /// Value the frame now shows
        shown: u64,
    },
}

impl SetValue {
    /// True if the frame shows something other than what was asked for.
    #[must_use]
    pub const fn is_truncated(&self) -> bool {
        matches!(self, Self::Truncated { .. })
    }
}

/// Bead layout of a single rod, for renderers and JSON output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RodSnapshot {
    /// Rod position, 0 = most significant
    pub index: usize,
    /// Digit shown on the rod
    pub digit: u8,
    /// Heaven bead at the divider
    pub heaven: bool,
    /// Earth beads at the divider, nearest first
    pub earth: [bool; EARTH_BEADS_PER_ROD],
}

/// A multi-rod abacus.
///
/// The frame owns its rods exclusively. Every mutation goes through the
/// frame, which recomputes the aggregate from all rod digits before it
/// notifies the change listener, so a listener never sees a value that
/// disagrees with the beads.
pub struct Abacus {
    rods: Vec<Rod>,
    value: u64,
    on_change: Option<ValueListener>,
}

impl Abacus {
    /// Creates a frame of `rod_count` rods, all showing zero.
    pub fn new(rod_count: usize) -> Result<Self, AbacusError> {
        if rod_count == 0 || rod_count > MAX_RODS {
            return Err(AbacusError::InvalidRodCount(rod_count));
        }

        Ok(Self {
            rods: (0..rod_count).map(Rod::new).collect(),
            value: 0,
            on_change: None,
        })
    }

    /// Registers the change listener and immediately reports the current value.
    pub fn set_on_change(&mut self, listener: impl FnMut(u64) + 'static) {
        self.on_change = Some(Box::new(listener));
        self.notify();
    }

    /// Builder form of [`Abacus::set_on_change`].
    pub fn with_on_change(mut self, listener: impl FnMut(u64) + 'static) -> Self {
        self.set_on_change(listener);
        self
    }

    /// Number of rods, fixed for the frame's lifetime.
    #[must_use]
    pub fn rod_count(&self) -> usize {
        self.rods.len()
    }

    /// Current aggregate value.
    #[must_use]
    pub const fn value(&self) -> u64 {
        self.value
    }

    /// Largest value this frame can show.
    #[must_use]
    pub fn max_value(&self) -> u64 {
        10u64.pow(Self::exponent(self.rods.len())) - 1
    }

    /// Rod digits, most significant first.
    #[must_use]
    pub fn digits(&self) -> Vec<u8> {
        self.rods.iter().map(Rod::digit).collect()
    }

    /// The rods, most significant first.
    #[must_use]
    pub fn rods(&self) -> &[Rod] {
        &self.rods
    }

    /// The rod at `index`, if it exists.
    #[must_use]
    pub fn rod(&self, index: usize) -> Option<&Rod> {
        self.rods.get(index)
    }

    /// Bead layout of every rod.
    #[must_use]
    pub fn snapshot(&self) -> Vec<RodSnapshot> {
        self.rods
            .iter()
            .map(|rod| RodSnapshot {
                index: rod.index(),
                digit: rod.digit(),
                heaven: rod.heaven_active(),
                earth: rod.earth().as_flags(),
            })
            .collect()
    }

    /// Flips the heaven bead on rod `index`.
    pub fn toggle_heaven(&mut self, index: usize) -> Result<u64, AbacusError> {
        let digit = self.rod_mut(index)?.toggle_heaven();
        debug!(rod = index, digit, "heaven bead toggled");
        Ok(self.recompute())
    }

    /// Clicks an earth bead on rod `index`.
    pub fn toggle_earth(
        &mut self,
        index: usize,
        position: EarthPosition,
    ) -> Result<u64, AbacusError> {
        let digit = self.rod_mut(index)?.toggle_earth(position);
        debug!(rod = index, position = position.index(), digit, "earth bead toggled");
        Ok(self.recompute())
    }

    /// Shows `target` on the frame.
    ///
    /// The value is written out in decimal and left-padded with zeros to the
    /// rod count. A value with more digits than rods keeps only its leading
    /// digits, one per rod; that case is reported as [`SetValue::Truncated`]
    /// rather than as an error so existing callers keep working.
    pub fn set_value(&mut self, target: u64) -> SetValue {
        let rod_count = self.rods.len();
        let padded = format!("{target:0>rod_count$}");

        for (rod, ch) in self.rods.iter_mut().zip(padded.bytes()) {
            rod.assign(ch - b'0');
        }

        let shown = self.recompute();
        if shown == target {
            debug!(value = shown, "value set");
            SetValue::Exact
        } else {
            warn!(
                requested = target,
                shown,
                rods = rod_count,
                "value does not fit on the frame, keeping leading digits"
            );
            SetValue::Truncated {
                requested: target,
                shown,
            }
        }
    }

    /// Clears every rod in place.
    pub fn reset(&mut self) {
        for rod in &mut self.rods {
            rod.assign(0);
        }
        debug!("frame reset");
        self.recompute();
    }

    fn rod_mut(&mut self, index: usize) -> Result<&mut Rod, AbacusError> {
        let rod_count = self.rods.len();
        self.rods
            .get_mut(index)
            .ok_or(AbacusError::InvalidRod { index, rod_count })
    }

    fn recompute(&mut self) -> u64 {
        let rod_count = self.rods.len();
        self.value = self
            .rods
            .iter()
            .enumerate()
            .map(|(i, rod)| u64::from(rod.digit()) * 10u64.pow(Self::exponent(rod_count - 1 - i)))
            .sum();
        self.notify();
        self.value
    }

    fn notify(&mut self) {
        let value = self.value;
        if let Some(listener) = self.on_change.as_mut() {
            listener(value);
        }
    }

    #[allow(clippy::cast_possible_truncation)]
    const fn exponent(places: usize) -> u32 {
        // places <= MAX_RODS
        places as u32
    }
}

impl Default for Abacus {
    fn default() -> Self {
        Self {
            rods: (0..DEFAULT_RODS).map(Rod::new).collect(),
            value: 0,
            on_change: None,
        }
    }
}

impl fmt::Debug for Abacus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Abacus")
            .field("rods", &self.rods)
            .field("value", &self.value)
            .finish_non_exhaustive()
    }
}
