//! Error types for the engine's public operations.
//!
//! Every condition here is an expected, recoverable outcome reported as an
//! explicit result. None of them poison the engine: a solver or generator
//! value remains usable for subsequent calls after returning any of these.

use crate::generator::Puzzle;
use crate::grid::Position;
use crate::validator::Violation;

/// Error for the checked [`Grid`](crate::Grid) accessors.
#[derive(Debug, thiserror::Error)]
pub enum GridError {
    /// Coordinates outside the 9×9 grid.
    #[error("coordinate ({row}, {col}) is outside the 9x9 grid")]
    InvalidCoordinate { row: usize, col: usize },
    /// A cell value outside `0..=9`.
    #[error("cell value {value} is outside 0..=9")]
    InvalidValue { value: u8 },
}

/// Error for [`Grid::from_line_str`](crate::Grid::from_line_str).
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// The line did not contain exactly 81 cells.
    #[error("puzzle line should have length 81, found {0}")]
    WrongLength(usize),
    /// A character other than `0..=9` or `.`.
    #[error("unexpected character {found:?} at offset {offset}")]
    InvalidCharacter { found: char, offset: usize },
}

/// Error for [`Difficulty::from_str`](crate::Difficulty).
#[derive(Debug, thiserror::Error)]
#[error("unknown difficulty {0:?} (expected easy, medium, or hard)")]
pub struct ParseDifficultyError(pub String);

/// Outcomes of solving and propagation that do not produce a solved grid.
#[derive(Debug, thiserror::Error)]
pub enum SolveError {
    /// The input grid already violates the Sudoku rules.
    #[error("grid violates Sudoku rules ({} violations)", .0.len())]
    InvalidGridState(Vec<Violation>),
    /// Propagation emptied the candidate set of an unfilled cell.
    #[error("no candidate left for cell ({}, {})", .pos.row + 1, .pos.col + 1)]
    Contradiction { pos: Position },
    /// The search exhausted the root cell's candidates.
    #[error("no solution exists for this puzzle")]
    Unsolvable,
    /// The cancellation token was set at a search branch point.
    #[error("solving was cancelled")]
    Cancelled,
    /// The caller's wall-clock or step budget ran out. The engine never
    /// produces this itself; the caller running a solve in a worker does.
    #[error("solving exceeded the caller's budget")]
    Timeout,
}

/// Error for [`Solver::hint`](crate::Solver::hint).
#[derive(Debug, thiserror::Error)]
pub enum HintError {
    /// The input grid already violates the Sudoku rules.
    #[error("grid violates Sudoku rules ({} violations)", .0.len())]
    InvalidGridState(Vec<Violation>),
    /// The grid is complete, or no single move can be justified.
    #[error("no hint available for this grid state")]
    NoHintAvailable,
}

/// Error for [`Generator::generate`](crate::Generator::generate).
#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    /// The clue-count target could not be reached. `best` is the closest
    /// achieved puzzle; it still has a unique solution, only its clue count
    /// is outside the requested range.
    #[error(
        "could not reach {target_min}..={target_max} clues after {attempts} attempts \
         (best attempt has {} clues)",
        .best.clue_count
    )]
    ClueTargetMissed {
        target_min: usize,
        target_max: usize,
        attempts: usize,
        best: Box<Puzzle>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_are_one_based() {
        let err = SolveError::Contradiction {
            pos: Position::new(0, 8),
        };
        assert_eq!(err.to_string(), "no candidate left for cell (1, 9)");
    }
}
