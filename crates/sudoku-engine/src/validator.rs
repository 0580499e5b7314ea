//! Grid validation against the row/column/box constraints.

use crate::digit_set::DigitSet;
use crate::grid::{Grid, Unit};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single problem found by [`validate`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Violation {
    /// A unit contains the same value in more than one cell.
    Duplicate { unit: Unit, values: Vec<u8> },
    /// The grid still has empty cells. Only reported when completeness was
    /// required, and never conflated with rule violations.
    Incomplete { empty_cells: usize },
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::Duplicate { unit, values } => {
                write!(f, "duplicate values {:?} in {}", values, unit)
            }
            Violation::Incomplete { empty_cells } => {
                write!(f, "grid is incomplete ({} empty cells)", empty_cells)
            }
        }
    }
}

/// Outcome of [`validate`].
#[derive(Debug, Clone, Serialize)]
pub struct ValidationReport {
    pub violations: Vec<Violation>,
}

impl ValidationReport {
    /// `true` iff no violation was found.
    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }
}

/// Check `grid` for duplicate values in any of the 27 units. With
/// `require_complete`, empty cells are additionally reported as an
/// [`Violation::Incomplete`] entry.
pub fn validate(grid: &Grid, require_complete: bool) -> ValidationReport {
    let mut violations = Vec::new();
    for unit in Unit::all() {
        let mut seen = DigitSet::EMPTY;
        let mut duplicated = DigitSet::EMPTY;
        for pos in unit.cells() {
            if let Some(value) = grid.get(pos) {
                if seen.contains(value) {
                    duplicated.insert(value);
                } else {
                    seen.insert(value);
                }
            }
        }
        if !duplicated.is_empty() {
            violations.push(Violation::Duplicate {
                unit,
                values: duplicated.iter().collect(),
            });
        }
    }
    if require_complete {
        let empty_cells = grid.empty_count();
        if empty_cells > 0 {
            violations.push(Violation::Incomplete { empty_cells });
        }
    }
    ValidationReport { violations }
}
