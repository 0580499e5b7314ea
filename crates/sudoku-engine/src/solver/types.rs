//! Public solver vocabulary: difficulty, techniques, steps, and hints.

use crate::errors::ParseDifficultyError;
use crate::grid::{Grid, Position};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Difficulty level of a puzzle, mapped to a target range of clue cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// Target range of clue (pre-filled) cells for generated puzzles.
    pub fn clue_range(self) -> RangeInclusive<usize> {
        match self {
            Difficulty::Easy => 36..=49,
            Difficulty::Medium => 28..=35,
            Difficulty::Hard => 22..=27,
        }
    }

    /// All difficulty levels, easiest first.
    pub fn all() -> &'static [Difficulty] {
        &[Difficulty::Easy, Difficulty::Medium, Difficulty::Hard]
    }

    /// Whole-puzzle attempts the generator makes before settling for its
    /// closest result.
    pub(crate) fn max_attempts(self) -> usize {
        match self {
            Difficulty::Easy => 50,
            Difficulty::Medium => 100,
            Difficulty::Hard => 200,
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Difficulty::Easy => write!(f, "Easy"),
            Difficulty::Medium => write!(f, "Medium"),
            Difficulty::Hard => write!(f, "Hard"),
        }
    }
}

impl FromStr for Difficulty {
    type Err = ParseDifficultyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            _ => Err(ParseDifficultyError(s.to_string())),
        }
    }
}

/// What justified a step: a proven deduction or a search placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Technique {
    /// The cell had exactly one candidate left.
    NakedSingle,
    /// The value fit only one cell of a unit.
    HiddenSingle,
    /// A search guess, not a proven deduction.
    BacktrackingGuess,
    /// Proven by elimination: every other candidate leads to a dead end.
    BacktrackingDerived,
}

impl fmt::Display for Technique {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Technique::NakedSingle => write!(f, "Naked Single"),
            Technique::HiddenSingle => write!(f, "Hidden Single"),
            Technique::BacktrackingGuess => write!(f, "Backtracking Guess"),
            Technique::BacktrackingDerived => write!(f, "Backtracking Elimination"),
        }
    }
}

/// One deduction (or guess) in a solving trace.
///
/// Serializes flat as `{technique, row, col, value, message}`, the shape the
/// boundary exchanges.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    pub technique: Technique,
    #[serde(flatten)]
    pub pos: Position,
    pub value: u8,
    pub message: String,
}

/// A single proposed next move. Computing a hint never mutates the grid it
/// was derived from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hint {
    pub technique: Technique,
    #[serde(flatten)]
    pub pos: Position,
    pub value: u8,
    pub message: String,
}

impl From<Step> for Hint {
    fn from(step: Step) -> Self {
        Hint {
            technique: step.technique,
            pos: step.pos,
            value: step.value,
            message: step.message,
        }
    }
}

/// A solved grid together with the trace that produced it.
#[derive(Debug, Clone, Serialize)]
pub struct Solution {
    pub grid: Grid,
    pub steps: Vec<Step>,
}

/// Cooperative cancellation flag, checked at every search branch point.
///
/// Clone the token, hand one copy to a [`Solver`](crate::Solver) and keep the
/// other: calling [`cancel`](CancelToken::cancel) makes the in-flight call
/// return [`SolveError::Cancelled`](crate::SolveError::Cancelled). The engine
/// holds no resource needing cleanup beyond its local working copy.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }
}
