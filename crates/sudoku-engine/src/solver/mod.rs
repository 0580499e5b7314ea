//! Solver facade: propagation, search, uniqueness, and hints.
//!
//! Every entry point works on a private copy of the input grid; callers'
//! grids are never mutated. All solving is deterministic: identical input
//! yields the identical trace and result. The only randomness in the engine
//! lives in the [`Generator`](crate::Generator).

pub(crate) mod backtrack;
mod explain;
mod propagate;
pub(crate) mod state;
mod types;

pub use types::{CancelToken, Difficulty, Hint, Solution, Step, Technique};

use crate::errors::{HintError, SolveError};
use crate::grid::Grid;
use crate::validator;
use state::CandidateState;

/// The solving engine.
///
/// Stateless apart from an optional cancellation token, so a single value can
/// serve any number of sequential calls; concurrent callers use their own
/// `Solver` and grid copies.
#[derive(Debug, Clone, Default)]
pub struct Solver {
    cancel: Option<CancelToken>,
}

impl Solver {
    pub fn new() -> Self {
        Self { cancel: None }
    }

    /// A solver whose search checks `token` at every branch point and bails
    /// out with [`SolveError::Cancelled`] once it is set.
    pub fn with_cancel_token(token: CancelToken) -> Self {
        Self {
            cancel: Some(token),
        }
    }

    /// Solve `grid`, returning the completed grid and the full trace: one
    /// [`Step`] per filled cell, deductions tagged by technique and search
    /// placements tagged as guesses.
    ///
    /// Rule-violating input is rejected as [`SolveError::InvalidGridState`];
    /// legal input with no completion reports [`SolveError::Unsolvable`].
    pub fn solve(&self, grid: &Grid) -> Result<Solution, SolveError> {
        let report = validator::validate(grid, false);
        if !report.is_valid() {
            return Err(SolveError::InvalidGridState(report.violations));
        }
        let mut state = CandidateState::from_grid(grid);
        let mut steps = Vec::new();
        match propagate::propagate(&mut state, Some(&mut steps)) {
            Ok(()) => {}
            // A dead end before the first guess means the clues themselves
            // admit no solution.
            Err(SolveError::Contradiction { pos }) => {
                log::debug!("contradiction at ({}, {})", pos.row + 1, pos.col + 1);
                return Err(SolveError::Unsolvable);
            }
            Err(other) => return Err(other),
        }
        let solved = if state.is_complete() {
            state
        } else {
            backtrack::search(&state, &mut steps, self.cancel.as_ref())?
        };
        Ok(Solution {
            grid: solved.to_grid(),
            steps,
        })
    }

    /// Run the constraint propagator alone: fill every forced cell, then
    /// stop. The returned grid may still be incomplete.
    ///
    /// Unlike [`solve`](Solver::solve), a propagation dead end is surfaced
    /// directly as [`SolveError::Contradiction`] naming the emptied cell.
    pub fn propagate_only(&self, grid: &Grid) -> Result<(Grid, Vec<Step>), SolveError> {
        let report = validator::validate(grid, false);
        if !report.is_valid() {
            return Err(SolveError::InvalidGridState(report.violations));
        }
        let mut state = CandidateState::from_grid(grid);
        let mut steps = Vec::new();
        propagate::propagate(&mut state, Some(&mut steps))?;
        Ok((state.to_grid(), steps))
    }

    /// Count distinct solutions of `grid`, stopping at `limit`.
    pub fn count_solutions(&self, grid: &Grid, limit: usize) -> Result<usize, SolveError> {
        let report = validator::validate(grid, false);
        if !report.is_valid() {
            return Err(SolveError::InvalidGridState(report.violations));
        }
        let state = CandidateState::from_grid(grid);
        backtrack::count_solutions(&state, limit, self.cancel.as_ref())
    }

    /// `true` iff `grid` has exactly one solution.
    pub fn has_unique_solution(&self, grid: &Grid) -> Result<bool, SolveError> {
        Ok(self.count_solutions(grid, 2)? == 1)
    }

    /// Produce at most one justified next move without mutating `grid`.
    ///
    /// The first propagation step wins. When propagation stalls, one level of
    /// trial at the most constrained cell may still prove a forced value by
    /// eliminating every alternative; that comes back tagged
    /// [`Technique::BacktrackingDerived`].
    pub fn hint(&self, grid: &Grid) -> Result<Hint, HintError> {
        let report = validator::validate(grid, false);
        if !report.is_valid() {
            return Err(HintError::InvalidGridState(report.violations));
        }
        if grid.is_complete() {
            return Err(HintError::NoHintAvailable);
        }

        let state = CandidateState::from_grid(grid);
        let mut scratch = state.clone();
        let mut steps = Vec::new();
        let outcome = propagate::propagate(&mut scratch, Some(&mut steps));
        if let Some(step) = steps.into_iter().next() {
            return Ok(step.into());
        }
        if outcome.is_err() {
            // No deduction and a dead cell: nothing to suggest.
            return Err(HintError::NoHintAvailable);
        }

        // Propagation stalled without a single fill: trial at the MRV cell.
        let Some(pos) = state.mrv_cell() else {
            return Err(HintError::NoHintAvailable);
        };
        let mut survivor = None;
        for value in state.candidates(pos).iter() {
            let mut child = state.clone();
            child.place(pos, value);
            let solvable = match propagate::propagate(&mut child, None) {
                Ok(()) => backtrack::search(&child, &mut Vec::new(), None).is_ok(),
                Err(_) => false,
            };
            if solvable {
                if survivor.is_some() {
                    // Two viable candidates: nothing is forced.
                    return Err(HintError::NoHintAvailable);
                }
                survivor = Some(value);
            }
        }
        match survivor {
            Some(value) => Ok(explain::derived(pos, value).into()),
            None => Err(HintError::NoHintAvailable),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Position;
    use crate::validator::Violation;

    const PUZZLE: &str =
        "530070000600195000098000060800060003400803001700020006060000280000419005000080079";
    const SOLVED: &str =
        "534678912672195348198342567859761423426853791713924856961537284287419635345286179";
    const HARD: &str =
        "800000000003600000070090200050007000000045700000100030001000068008500010090000400";

    #[test]
    fn test_solve_canonical_puzzle() {
        let grid = Grid::from_line_str(PUZZLE).unwrap();
        let solution = Solver::new().solve(&grid).unwrap();

        assert_eq!(solution.grid, Grid::from_line_str(SOLVED).unwrap());
        assert_eq!(solution.grid.rows()[0], [5, 3, 4, 6, 7, 8, 9, 1, 2]);
        // One step per originally empty cell, all proven deductions.
        assert_eq!(solution.steps.len(), 51);
        assert!(solution
            .steps
            .iter()
            .all(|s| s.technique != Technique::BacktrackingGuess));
    }

    #[test]
    fn test_solve_is_deterministic() {
        let grid = Grid::from_line_str(HARD).unwrap();
        let solver = Solver::new();
        let first = solver.solve(&grid).unwrap();
        let second = solver.solve(&grid).unwrap();
        assert_eq!(first.grid, second.grid);
        assert_eq!(first.steps, second.steps);
    }

    #[test]
    fn test_solved_result_validates_clean() {
        let grid = Grid::from_line_str(HARD).unwrap();
        let solution = Solver::new().solve(&grid).unwrap();
        let report = validator::validate(&solution.grid, true);
        assert!(report.is_valid());
    }

    #[test]
    fn test_solve_rejects_rule_violations() {
        let mut grid = Grid::from_line_str(PUZZLE).unwrap();
        grid.set(0, 8, 5).unwrap(); // second 5 in row 1
        let err = Solver::new().solve(&grid).unwrap_err();
        match err {
            SolveError::InvalidGridState(violations) => {
                assert!(violations
                    .iter()
                    .any(|v| matches!(v, Violation::Duplicate { .. })));
            }
            other => panic!("expected InvalidGridState, got {other:?}"),
        }
    }

    #[test]
    fn test_solve_reports_unsolvable() {
        // Legal clues that contradict the puzzle's unique solution.
        let mut grid = Grid::from_line_str(PUZZLE).unwrap();
        grid.set(0, 2, 2).unwrap(); // the solution needs 4 here
        let err = Solver::new().solve(&grid).unwrap_err();
        assert!(matches!(err, SolveError::Unsolvable));
        // The solver stays usable afterwards.
        assert!(Solver::new()
            .solve(&Grid::from_line_str(PUZZLE).unwrap())
            .is_ok());
    }

    #[test]
    fn test_propagate_only_can_stop_short() {
        let grid = Grid::from_line_str(HARD).unwrap();
        let (partial, steps) = Solver::new().propagate_only(&grid).unwrap();
        assert!(!partial.is_complete());
        assert!(steps
            .iter()
            .all(|s| s.technique == Technique::NakedSingle
                || s.technique == Technique::HiddenSingle));
    }

    #[test]
    fn test_cancelled_solve() {
        let token = CancelToken::new();
        token.cancel();
        let solver = Solver::with_cancel_token(token);
        let err = solver.solve(&Grid::from_line_str(HARD).unwrap()).unwrap_err();
        assert!(matches!(err, SolveError::Cancelled));
    }

    #[test]
    fn test_hint_does_not_mutate_input() {
        let grid = Grid::from_line_str(PUZZLE).unwrap();
        let before = grid.clone();
        let hint = Solver::new().hint(&grid).unwrap();
        assert_eq!(grid, before);
        assert!((1..=9).contains(&hint.value));
    }

    #[test]
    fn test_hint_matches_solution() {
        let grid = Grid::from_line_str(PUZZLE).unwrap();
        let solved = Grid::from_line_str(SOLVED).unwrap();
        let hint = Solver::new().hint(&grid).unwrap();
        assert_eq!(solved.get(hint.pos), Some(hint.value));
        assert!(!hint.message.is_empty());
    }

    #[test]
    fn test_hint_on_stalled_grid_is_derived() {
        let grid = Grid::from_line_str(HARD).unwrap();
        // Propagation alone stalls on this puzzle with no fill at all.
        let (_, steps) = Solver::new().propagate_only(&grid).unwrap();
        assert!(steps.is_empty());

        let hint = Solver::new().hint(&grid).unwrap();
        assert_eq!(hint.technique, Technique::BacktrackingDerived);
        // The derived value agrees with the unique solution.
        let solution = Solver::new().solve(&grid).unwrap();
        assert_eq!(solution.grid.get(hint.pos), Some(hint.value));
    }

    #[test]
    fn test_hint_error_cases() {
        let complete = Grid::from_line_str(SOLVED).unwrap();
        assert!(matches!(
            Solver::new().hint(&complete),
            Err(HintError::NoHintAvailable)
        ));

        let mut invalid = Grid::empty();
        invalid.set(3, 3, 7).unwrap();
        invalid.set(3, 8, 7).unwrap();
        assert!(matches!(
            Solver::new().hint(&invalid),
            Err(HintError::InvalidGridState(_))
        ));
    }

    #[test]
    fn test_uniqueness_entry_point() {
        let grid = Grid::from_line_str(PUZZLE).unwrap();
        assert!(Solver::new().has_unique_solution(&grid).unwrap());
        assert!(!Solver::new().has_unique_solution(&Grid::empty()).unwrap());
    }

    #[test]
    fn test_step_positions_are_in_range() {
        let grid = Grid::from_line_str(PUZZLE).unwrap();
        let solution = Solver::new().solve(&grid).unwrap();
        for step in &solution.steps {
            assert!(step.pos.row < 9 && step.pos.col < 9);
            assert!((1..=9).contains(&step.value));
            assert_eq!(Position::new(step.pos.row, step.pos.col), step.pos);
        }
    }
}
