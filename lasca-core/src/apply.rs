//! Board transforms for moves, capture hops and promotion
//!
//! These do no legality checking; `GameState` validates an action against the
//! legal set before calling in here.

use crate::board::{Board, Square};
use crate::movegen::{CaptureChain, Step};
use crate::pieces::Rank;

/// Move the whole pile on `from` to the empty square `to`
pub(crate) fn move_pile(board: &Board, from: Square, to: Square) -> Board {
    let mut next = board.clone();
    if let Some(pile) = next.take(from) {
        next.set(to, Some(pile));
    }
    next
}

/// One capture hop, applied in place.
///
/// The capturing pile moves to the landing square and takes the top piece of
/// the jumped pile as a prisoner. Whatever was under that top stays behind.
pub(crate) fn capture_hop(board: &mut Board, from: Square, step: Step) {
    let Some(mut capturer) = board.take(from) else {
        return;
    };
    if let Some(victim) = board.take(step.captured) {
        capturer = capturer.push_captured(victim.top());
        board.set(step.captured, victim.remove_top());
    }
    board.set(step.landing, Some(capturer));
}

/// Play every hop of a chain
pub(crate) fn apply_chain(board: &Board, chain: &CaptureChain) -> Board {
    let mut next = board.clone();
    let mut at = chain.origin;
    for &step in &chain.steps {
        capture_hop(&mut next, at, step);
        at = step.landing;
    }
    next
}

/// Promote the pile on `sq` if a soldier tops it on its promotion row.
/// Returns true when a promotion happened.
pub(crate) fn promote_if_due(board: &mut Board, sq: Square) -> bool {
    let size = board.size();
    let promoted = match board.get(sq) {
        Some(pile)
            if pile.controlling_rank() == Rank::Soldier
                && sq.row == pile.controlling_team().promotion_row(size) =>
        {
            pile.promote()
        }
        _ => return false,
    };
    board.set(sq, Some(promoted));
    true
}
