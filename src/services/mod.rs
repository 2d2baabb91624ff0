//! Service layer sitting between the abacus model and its hosts.
//!
//! Hosts coordinate frames through the reset channel and score the learner
//! through the challenge; neither service mutates beads directly.

pub mod challenge;
pub mod reset_bus;

// Re-export commonly used types
pub use challenge::{Challenge, Verdict};
pub use reset_bus::{ResetBus, ResetSubscription};
