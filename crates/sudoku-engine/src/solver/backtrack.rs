//! Depth-first search with most-constrained-cell selection.

use super::explain;
use super::propagate::propagate;
use super::state::CandidateState;
use super::types::{CancelToken, Step};
use crate::errors::SolveError;
use rand::seq::SliceRandom;
use rand::Rng;

/// Complete `state` by search, reapplying propagation after each guess.
///
/// Branches on the cell with the fewest candidates (ties by lowest row-major
/// index) and tries values in ascending order, so identical input always
/// yields the identical trace. Steps belonging to abandoned branches are
/// rolled back; the returned trace is the successful path only.
pub(crate) fn search(
    state: &CandidateState,
    steps: &mut Vec<Step>,
    cancel: Option<&CancelToken>,
) -> Result<CandidateState, SolveError> {
    if let Some(token) = cancel {
        if token.is_cancelled() {
            return Err(SolveError::Cancelled);
        }
    }
    let Some(pos) = state.mrv_cell() else {
        return Ok(state.clone());
    };
    let depth_mark = steps.len();
    for value in state.candidates(pos).iter() {
        log::debug!("guess {} at ({}, {})", value, pos.row + 1, pos.col + 1);
        let mut child = state.clone();
        child.place(pos, value);
        steps.push(explain::guess(pos, value));
        match propagate(&mut child, Some(&mut *steps)) {
            Ok(()) => match search(&child, steps, cancel) {
                Ok(solved) => return Ok(solved),
                Err(SolveError::Unsolvable) => {}
                Err(other) => return Err(other),
            },
            Err(SolveError::Contradiction { .. }) => {}
            Err(other) => return Err(other),
        }
        steps.truncate(depth_mark);
    }
    Err(SolveError::Unsolvable)
}

/// Count distinct solutions, stopping as soon as `limit` are found.
///
/// This is the generator's uniqueness oracle: with `limit = 2` it proves or
/// refutes uniqueness without enumerating the full solution space.
pub(crate) fn count_solutions(
    state: &CandidateState,
    limit: usize,
    cancel: Option<&CancelToken>,
) -> Result<usize, SolveError> {
    let mut root = state.clone();
    match propagate(&mut root, None) {
        Ok(()) => {}
        Err(SolveError::Contradiction { .. }) => return Ok(0),
        Err(other) => return Err(other),
    }
    let mut count = 0;
    count_recursive(&root, limit, cancel, &mut count)?;
    Ok(count)
}

fn count_recursive(
    state: &CandidateState,
    limit: usize,
    cancel: Option<&CancelToken>,
    count: &mut usize,
) -> Result<(), SolveError> {
    if let Some(token) = cancel {
        if token.is_cancelled() {
            return Err(SolveError::Cancelled);
        }
    }
    let Some(pos) = state.mrv_cell() else {
        *count += 1;
        return Ok(());
    };
    for value in state.candidates(pos).iter() {
        let mut child = state.clone();
        child.place(pos, value);
        match propagate(&mut child, None) {
            Ok(()) => count_recursive(&child, limit, cancel, count)?,
            Err(SolveError::Contradiction { .. }) => continue,
            Err(other) => return Err(other),
        }
        if *count >= limit {
            return Ok(());
        }
    }
    Ok(())
}

/// Solve with per-cell candidate order shuffled from `rng`. Used by the
/// generator to produce varied filled grids; records no steps.
pub(crate) fn solve_randomized<R: Rng>(
    state: &CandidateState,
    rng: &mut R,
) -> Option<CandidateState> {
    let Some(pos) = state.mrv_cell() else {
        return Some(state.clone());
    };
    let mut values: Vec<u8> = state.candidates(pos).iter().collect();
    values.shuffle(rng);
    for value in values {
        let mut child = state.clone();
        child.place(pos, value);
        if propagate(&mut child, None).is_err() {
            continue;
        }
        if let Some(solved) = solve_randomized(&child, rng) {
            return Some(solved);
        }
    }
    None
}
