//! Constraint propagation: naked and hidden singles to a fixpoint.

use super::explain;
use super::state::CandidateState;
use super::types::Step;
use crate::errors::SolveError;
use crate::grid::{Position, Unit};

/// Fill every cell forced by the current constraints.
///
/// Repeats full passes (naked singles over all cells, then hidden singles
/// over all 27 units) until a pass makes no change, appending one [`Step`]
/// per fill to `steps` when a sink is given. Pure deduction: a consistent
/// input cannot be made contradictory, but an inconsistent one is reported
/// as [`SolveError::Contradiction`] naming the first emptied cell.
pub(crate) fn propagate(
    state: &mut CandidateState,
    mut steps: Option<&mut Vec<Step>>,
) -> Result<(), SolveError> {
    loop {
        if let Some(pos) = state.first_contradiction() {
            return Err(SolveError::Contradiction { pos });
        }
        let mut filled = naked_singles_pass(state, steps.as_deref_mut());
        filled += hidden_singles_pass(state, steps.as_deref_mut());
        if filled == 0 {
            return Ok(());
        }
        log::trace!("propagation pass filled {filled} cells");
    }
}

/// Fill every cell whose candidate set is a singleton. Cells filled earlier
/// in the pass shrink the sets seen later in the same pass.
fn naked_singles_pass(state: &mut CandidateState, mut steps: Option<&mut Vec<Step>>) -> usize {
    let mut filled = 0;
    for pos in Position::all() {
        if state.is_filled(pos) {
            continue;
        }
        if let Some(value) = state.candidates(pos).sole() {
            state.place(pos, value);
            if let Some(sink) = steps.as_deref_mut() {
                sink.push(explain::naked_single(pos, value));
            }
            filled += 1;
        }
    }
    filled
}

/// Fill, per unit, every value that only one empty cell can still take,
/// even when that cell's own candidate set is larger.
fn hidden_singles_pass(state: &mut CandidateState, mut steps: Option<&mut Vec<Step>>) -> usize {
    let mut filled = 0;
    for unit in Unit::all() {
        for value in 1..=9 {
            if unit.cells().iter().any(|&pos| state.value(pos) == value) {
                continue;
            }
            let mut slot = None;
            let mut count = 0;
            for pos in unit.cells() {
                if !state.is_filled(pos) && state.candidates(pos).contains(value) {
                    slot = Some(pos);
                    count += 1;
                    if count > 1 {
                        break;
                    }
                }
            }
            if count == 1 {
                if let Some(pos) = slot {
                    state.place(pos, value);
                    if let Some(sink) = steps.as_deref_mut() {
                        sink.push(explain::hidden_single(pos, value, unit));
                    }
                    filled += 1;
                }
            }
        }
    }
    filled
}
