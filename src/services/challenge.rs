//! "Represent this number" challenge used by the demo screen.
//!
//! The challenge only consumes the frame's value; it never touches beads.

use rand::Rng;
use serde::Serialize;

/// Target shown before the learner asks for a new one.
pub const DEFAULT_TARGET: u64 = 42;

/// Upper bound for randomly drawn targets when nothing else is configured.
pub const DEFAULT_MAX_RANDOM_TARGET: u64 = 99;

/// Result of checking the frame against the target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum Verdict {
    /// The frame shows the target
    Correct {
        /// Target that was represented
        target: u64,
    },
    /// The frame shows something else
    NotQuite {
        /// Target the learner is working towards
        target: u64,
        /// Value currently on the frame
        current: u64,
    },
}

impl Verdict {
    /// Whether the answer was right.
    #[must_use]
    pub const fn is_correct(&self) -> bool {
        matches!(self, Self::Correct { .. })
    }

    /// Short heading for the verdict.
    #[must_use]
    pub const fn title(&self) -> &'static str {
        match self {
            Self::Correct { .. } => "Correct!",
            Self::NotQuite { .. } => "Not quite right",
        }
    }

    /// Full feedback sentence.
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::Correct { target } => {
                format!("Great job! You've correctly represented {target} on the abacus.")
            }
            Self::NotQuite { target, current } => format!(
                "The current value is {current}. Keep trying to represent {target}."
            ),
        }
    }
}

/// Target bookkeeping for the demo screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Challenge {
    target: u64,
    max_random_target: u64,
    attempts: u32,
    solved: u32,
}

impl Challenge {
    /// Starts with `target`, drawing later targets from `0..=max_random_target`.
    #[must_use]
    pub const fn new(target: u64, max_random_target: u64) -> Self {
        Self {
            target,
            max_random_target,
            attempts: 0,
            solved: 0,
        }
    }

    /// Number the learner must represent.
    #[must_use]
    pub const fn target(&self) -> u64 {
        self.target
    }

    /// Checks made so far.
    #[must_use]
    pub const fn attempts(&self) -> u32 {
        self.attempts
    }

    /// Checks that came back correct.
    #[must_use]
    pub const fn solved(&self) -> u32 {
        self.solved
    }

    /// Compares the frame's current value with the target.
    pub fn check(&mut self, current: u64) -> Verdict {
        self.attempts += 1;
        if current == self.target {
            self.solved += 1;
            Verdict::Correct {
                target: self.target,
            }
        } else {
            Verdict::NotQuite {
                target: self.target,
                current,
            }
        }
    }

    /// Draws a new target no larger than the frame can show.
    ///
    /// A draw equal to the current target is retried once so the learner
    /// usually sees the number change.
    pub fn next_target(&mut self, frame_max: u64, rng: &mut impl Rng) -> u64 {
        let ceiling = self.max_random_target.min(frame_max);
        let mut target = rng.random_range(0..=ceiling);
        if target == self.target && ceiling > 0 {
            target = rng.random_range(0..=ceiling);
        }
        self.target = target;
        target
    }
}

impl Default for Challenge {
    fn default() -> Self {
        Self::new(DEFAULT_TARGET, DEFAULT_MAX_RANDOM_TARGET)
    }
}
