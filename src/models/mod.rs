//! Abacus data model: beads, rods, and the frame that reads them as a number.
//!
//! The model is independent of any UI. Hosts drive it through the frame's
//! toggle and set/reset operations and observe it through change listeners.

pub mod bead;
pub mod error;
pub mod frame;
pub mod rod;

// Re-export all model types
pub use bead::{Bead, BeadKind, EarthBeads, EarthPosition, EARTH_BEADS_PER_ROD, HEAVEN_BEAD_VALUE};
pub use error::AbacusError;
pub use frame::{Abacus, RodSnapshot, SetValue, ValueListener, DEFAULT_RODS, MAX_RODS};
pub use rod::{DigitListener, Rod, MAX_DIGIT};
