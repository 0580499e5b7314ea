//! A 9×9 Sudoku engine: explained solving, unique-solution generation,
//! single-step hints, and validation.
//!
//! The engine is a pure computation over grid state. Every call works on its
//! own private copy of the input, performs no I/O, and reports every outcome
//! as an explicit result. Solving is deterministic; the only randomness lives
//! in the [`Generator`], seeded per instance.
//!
//! ## Example
//!
//! ```
//! use sudoku_engine::{Grid, Solver};
//!
//! let line = "530070000600195000098000060800060003400803001700020006060000280000419005000080079";
//! let grid = Grid::from_line_str(line)?;
//!
//! let solution = Solver::new().solve(&grid)?;
//! assert!(solution.grid.is_complete());
//! assert_eq!(solution.grid.rows()[0], [5, 3, 4, 6, 7, 8, 9, 1, 2]);
//!
//! // Every filled cell comes with a justification.
//! println!("{}", solution.steps[0].message);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod digit_set;
mod errors;
mod generator;
mod grid;
mod solver;
mod validator;

pub use digit_set::DigitSet;
pub use errors::{
    GenerateError, GridError, HintError, ParseDifficultyError, ParseError, SolveError,
};
pub use generator::{Generator, Puzzle};
pub use grid::{Grid, Position, Unit};
pub use solver::{CancelToken, Difficulty, Hint, Solution, Solver, Step, Technique};
pub use validator::{validate, ValidationReport, Violation};
