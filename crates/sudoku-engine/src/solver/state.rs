//! Solver working state: cell values plus derived candidate sets.

use crate::digit_set::DigitSet;
use crate::grid::{Grid, Position};

/// Candidate-tracking state for one solve/hint/generate call.
///
/// The candidate sets are a cache over the value array; [`rebuild`] derives
/// them from scratch and [`place`] keeps them in sync incrementally. They are
/// never authoritative on their own.
///
/// [`rebuild`]: CandidateState::rebuild
/// [`place`]: CandidateState::place
#[derive(Clone, Debug)]
pub(crate) struct CandidateState {
    values: [u8; 81],
    cands: [DigitSet; 81],
}

impl CandidateState {
    pub fn from_grid(grid: &Grid) -> Self {
        let mut state = Self {
            values: *grid.values(),
            cands: [DigitSet::EMPTY; 81],
        };
        state.rebuild();
        state
    }

    /// Recompute every candidate set from the value array.
    fn rebuild(&mut self) {
        for pos in Position::all() {
            let idx = pos.index();
            if self.values[idx] != 0 {
                self.cands[idx] = DigitSet::EMPTY;
                continue;
            }
            let mut cands = DigitSet::ALL;
            for peer in pos.peers() {
                let value = self.values[peer.index()];
                if value != 0 {
                    cands.remove(value);
                }
            }
            self.cands[idx] = cands;
        }
    }

    /// Fill a cell and eliminate the value from all 20 peers' candidates.
    pub fn place(&mut self, pos: Position, value: u8) {
        debug_assert!((1..=9).contains(&value));
        debug_assert_eq!(self.values[pos.index()], 0);
        self.values[pos.index()] = value;
        self.cands[pos.index()] = DigitSet::EMPTY;
        for peer in pos.peers() {
            self.cands[peer.index()].remove(value);
        }
    }

    #[inline]
    pub fn value(&self, pos: Position) -> u8 {
        self.values[pos.index()]
    }

    #[inline]
    pub fn is_filled(&self, pos: Position) -> bool {
        self.values[pos.index()] != 0
    }

    #[inline]
    pub fn candidates(&self, pos: Position) -> DigitSet {
        self.cands[pos.index()]
    }

    pub fn is_complete(&self) -> bool {
        self.values.iter().all(|&v| v != 0)
    }

    /// First empty cell (row-major) whose candidate set is empty, if any.
    pub fn first_contradiction(&self) -> Option<Position> {
        Position::all()
            .find(|&pos| !self.is_filled(pos) && self.candidates(pos).is_empty())
    }

    /// The unfilled cell with the smallest candidate set, ties broken by
    /// lowest row-major index. `None` iff the grid is complete.
    pub fn mrv_cell(&self) -> Option<Position> {
        let mut best: Option<(Position, u32)> = None;
        for pos in Position::all() {
            if self.is_filled(pos) {
                continue;
            }
            let count = self.candidates(pos).len();
            match best {
                Some((_, smallest)) if smallest <= count => {}
                _ => best = Some((pos, count)),
            }
            // Nothing can beat a forced (or dead) cell.
            if count <= 1 {
                break;
            }
        }
        best.map(|(pos, _)| pos)
    }

    pub fn to_grid(&self) -> Grid {
        let mut grid = Grid::empty();
        for pos in Position::all() {
            grid.set_at(pos, self.values[pos.index()]);
        }
        grid
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PUZZLE: &str =
        "530070000600195000098000060800060003400803001700020006060000280000419005000080079";

    #[test]
    fn test_candidates_exclude_peer_values() {
        let grid = Grid::from_line_str(PUZZLE).unwrap();
        let state = CandidateState::from_grid(&grid);

        // (0,2) sees 5 and 3 in its row and 6, 9, 8 in its box.
        let cands = state.candidates(Position::new(0, 2));
        assert!(!cands.contains(5));
        assert!(!cands.contains(3));
        assert!(!cands.contains(6));
        assert!(!cands.contains(9));
        assert!(!cands.contains(8));
        // Filled cells carry no candidates.
        assert!(state.candidates(Position::new(0, 0)).is_empty());
    }

    #[test]
    fn test_place_updates_peers() {
        let grid = Grid::from_line_str(PUZZLE).unwrap();
        let mut state = CandidateState::from_grid(&grid);

        let pos = Position::new(0, 2);
        state.place(pos, 4);
        assert_eq!(state.value(pos), 4);
        for peer in pos.peers() {
            assert!(!state.candidates(peer).contains(4) || state.is_filled(peer));
        }

        // Incremental update matches a from-scratch rebuild.
        let rebuilt = CandidateState::from_grid(&state.to_grid());
        for check in Position::all() {
            assert_eq!(state.candidates(check), rebuilt.candidates(check));
        }
    }

    #[test]
    fn test_mrv_prefers_smallest_then_lowest_index() {
        let grid = Grid::from_line_str(PUZZLE).unwrap();
        let state = CandidateState::from_grid(&grid);
        let pos = state.mrv_cell().unwrap();
        let smallest = Position::all()
            .filter(|&p| !state.is_filled(p))
            .map(|p| state.candidates(p).len())
            .min()
            .unwrap();
        assert_eq!(state.candidates(pos).len(), smallest);
        // No earlier cell does as well.
        for earlier in Position::all().take_while(|&p| p != pos) {
            if !state.is_filled(earlier) {
                assert!(state.candidates(earlier).len() > smallest);
            }
        }
    }

    #[test]
    fn test_contradiction_detection() {
        // Row 1 holds 1..=8; a 9 below (0,8) makes that cell impossible.
        let mut grid = Grid::empty();
        for col in 0..8 {
            grid.set(0, col, col as u8 + 1).unwrap();
        }
        grid.set(4, 8, 9).unwrap();

        let state = CandidateState::from_grid(&grid);
        assert_eq!(state.first_contradiction(), Some(Position::new(0, 8)));
    }
}
