//! Puzzle generation: a randomized filled grid, then uniqueness-preserving
//! cell removal down to the difficulty's clue target.

use crate::errors::GenerateError;
use crate::grid::{Grid, Position};
use crate::solver::state::CandidateState;
use crate::solver::{backtrack, Difficulty, Solver};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::Serialize;

/// A generated puzzle together with the solved grid it was dug from.
///
/// `solution` is the puzzle's one and only completion; solving `grid` always
/// reproduces it cell for cell.
#[derive(Debug, Clone, Serialize)]
pub struct Puzzle {
    pub grid: Grid,
    pub solution: Grid,
    pub difficulty: Difficulty,
    pub clue_count: usize,
}

/// Sudoku puzzle generator.
///
/// Each instance owns its own seeded rng, so concurrent generation uses
/// independent instances and cannot interfere or produce correlated puzzles.
pub struct Generator {
    rng: StdRng,
}

impl Default for Generator {
    fn default() -> Self {
        Self::new()
    }
}

impl Generator {
    /// An entropy-seeded generator.
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// A reproducible generator: the same seed and difficulty always produce
    /// the same puzzle.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Generate a puzzle whose clue count lies in `difficulty`'s range and
    /// whose solution is unique.
    ///
    /// If the bounded number of attempts cannot reach the range, the closest
    /// achieved puzzle is handed back inside
    /// [`GenerateError::ClueTargetMissed`]. That fallback still has a unique
    /// solution; a non-unique puzzle is never returned.
    pub fn generate(&mut self, difficulty: Difficulty) -> Result<Puzzle, GenerateError> {
        let range = difficulty.clue_range();
        let max_attempts = difficulty.max_attempts();

        let mut best = self.dig_one(difficulty);
        for attempt in 1.. {
            if range.contains(&best.clue_count) {
                log::debug!(
                    "generated {} puzzle with {} clues on attempt {}",
                    difficulty,
                    best.clue_count,
                    attempt
                );
                return Ok(best);
            }
            if attempt >= max_attempts {
                break;
            }
            let next = self.dig_one(difficulty);
            if next.clue_count < best.clue_count {
                best = next;
            }
        }
        Err(GenerateError::ClueTargetMissed {
            target_min: *range.start(),
            target_max: *range.end(),
            attempts: max_attempts,
            best: Box::new(best),
        })
    }

    /// One full attempt: fill, then dig toward a clue target sampled from
    /// the difficulty's range.
    fn dig_one(&mut self, difficulty: Difficulty) -> Puzzle {
        let range = difficulty.clue_range();
        let target = self.rng.gen_range(*range.start()..=*range.end());

        let solution = self.filled_grid();
        let mut grid = solution.clone();
        let mut clue_count = 81;

        let mut order: Vec<Position> = Position::all().collect();
        order.shuffle(&mut self.rng);

        let solver = Solver::new();
        for pos in order {
            if clue_count == target {
                break;
            }
            let Some(value) = grid.get(pos) else {
                continue;
            };
            grid.set_at(pos, 0);
            if matches!(solver.count_solutions(&grid, 2), Ok(1)) {
                clue_count -= 1;
            } else {
                // Removal breaks uniqueness; this cell stays for the rest of
                // the attempt.
                grid.set_at(pos, value);
            }
        }
        log::trace!("dig reached {} clues (target {})", clue_count, target);

        Puzzle {
            grid,
            solution,
            difficulty,
            clue_count,
        }
    }

    /// A fully solved grid, varied by running the search over an empty grid
    /// with randomized value order.
    fn filled_grid(&mut self) -> Grid {
        let empty = CandidateState::from_grid(&Grid::empty());
        loop {
            // The empty grid always has solutions; one randomized descent
            // finds one without backtracking out of the root.
            if let Some(solved) = backtrack::solve_randomized(&empty, &mut self.rng) {
                return solved.to_grid();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validator::validate;

    #[test]
    fn test_generate_easy_clue_range_and_uniqueness() {
        let mut generator = Generator::with_seed(42);
        let puzzle = generator.generate(Difficulty::Easy).unwrap();

        assert!(Difficulty::Easy.clue_range().contains(&puzzle.clue_count));
        assert_eq!(puzzle.grid.clue_count(), puzzle.clue_count);
        assert!(Solver::new().has_unique_solution(&puzzle.grid).unwrap());
        assert!(validate(&puzzle.grid, false).is_valid());
    }

    #[test]
    fn test_generate_hard_has_fewer_clues() {
        let mut generator = Generator::with_seed(42);
        let easy = generator.generate(Difficulty::Easy).unwrap();
        let hard = generator.generate(Difficulty::Hard).unwrap();

        assert!(Difficulty::Hard.clue_range().contains(&hard.clue_count));
        assert!(hard.clue_count < easy.clue_count);
        assert!(Solver::new().has_unique_solution(&hard.grid).unwrap());
    }

    #[test]
    fn test_solving_reproduces_the_dug_solution() {
        let mut generator = Generator::with_seed(7);
        let puzzle = generator.generate(Difficulty::Medium).unwrap();

        let solution = Solver::new().solve(&puzzle.grid).unwrap();
        assert_eq!(solution.grid, puzzle.solution);
        assert!(validate(&solution.grid, true).is_valid());
    }

    #[test]
    fn test_seeded_generation_is_reproducible() {
        let first = Generator::with_seed(99).generate(Difficulty::Medium).unwrap();
        let second = Generator::with_seed(99).generate(Difficulty::Medium).unwrap();
        assert_eq!(first.grid, second.grid);
        assert_eq!(first.solution, second.solution);

        let other = Generator::with_seed(100).generate(Difficulty::Medium).unwrap();
        assert_ne!(first.grid, other.grid);
    }

    #[test]
    fn test_solution_is_a_valid_complete_grid() {
        let mut generator = Generator::with_seed(3);
        let puzzle = generator.generate(Difficulty::Easy).unwrap();
        assert!(puzzle.solution.is_complete());
        assert!(validate(&puzzle.solution, true).is_valid());
        // The puzzle is the solution with cells cleared, never altered.
        for pos in Position::all() {
            if let Some(value) = puzzle.grid.get(pos) {
                assert_eq!(puzzle.solution.get(pos), Some(value));
            }
        }
    }
}
