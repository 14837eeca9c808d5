//! Legal move and capture-chain generation
//!
//! Soldiers step and capture along their two forward diagonals, officers along
//! all four. Capturing is mandatory: when any chain exists for the side to
//! move, no simple move is offered. A chain continues as long as the capturing
//! pile has another hop from its landing square.

use serde::{Deserialize, Serialize};

use crate::apply;
use crate::board::{Board, Square, DIAGONALS};
use crate::pieces::{Piece, Rank, Team};
use crate::ruleset::{CaptureRule, Rules};

// ============================================================================
// ACTION TYPES
// ============================================================================

/// Non-capturing step of one pile to an adjacent empty square
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SimpleMove {
    pub from: Square,
    pub to: Square,
}

/// One hop of a capture chain
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Step {
    pub captured: Square,
    pub landing: Square,
}

/// A complete capture sequence played by one pile in a single turn
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CaptureChain {
    pub origin: Square,
    pub steps: Vec<Step>,
}

impl CaptureChain {
    /// Final landing square
    pub fn destination(&self) -> Square {
        self.steps.last().map_or(self.origin, |s| s.landing)
    }

    /// Number of hops
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

/// Anything a player can submit on their turn
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    Move(SimpleMove),
    Capture(CaptureChain),
    Resign,
}

impl Action {
    /// Square the acting pile starts from
    pub fn origin(&self) -> Option<Square> {
        match self {
            Action::Move(mv) => Some(mv.from),
            Action::Capture(chain) => Some(chain.origin),
            Action::Resign => None,
        }
    }

    /// Square the acting pile ends on
    pub fn destination(&self) -> Option<Square> {
        match self {
            Action::Move(mv) => Some(mv.to),
            Action::Capture(chain) => Some(chain.destination()),
            Action::Resign => None,
        }
    }

    /// Every square the action names: origin, jumped squares and landings
    pub fn squares(&self) -> Vec<Square> {
        match self {
            Action::Move(mv) => vec![mv.from, mv.to],
            Action::Capture(chain) => std::iter::once(chain.origin)
                .chain(chain.steps.iter().flat_map(|s| [s.captured, s.landing]))
                .collect(),
            Action::Resign => Vec::new(),
        }
    }
}

/// Legal options for the side to move: either all captures or all simple moves
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionSet {
    Moves(Vec<SimpleMove>),
    Captures(Vec<CaptureChain>),
}

impl ActionSet {
    pub fn len(&self) -> usize {
        match self {
            ActionSet::Moves(moves) => moves.len(),
            ActionSet::Captures(chains) => chains.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_capture(&self) -> bool {
        matches!(self, ActionSet::Captures(_))
    }

    pub fn contains(&self, action: &Action) -> bool {
        match (self, action) {
            (ActionSet::Moves(moves), Action::Move(mv)) => moves.contains(mv),
            (ActionSet::Captures(chains), Action::Capture(chain)) => chains.contains(chain),
            _ => false,
        }
    }

    /// Every option wrapped as an `Action`
    pub fn actions(&self) -> Vec<Action> {
        match self {
            ActionSet::Moves(moves) => moves.iter().copied().map(Action::Move).collect(),
            ActionSet::Captures(chains) => chains.iter().cloned().map(Action::Capture).collect(),
        }
    }
}

// ============================================================================
// GENERATION
// ============================================================================

/// Diagonals a piece may use, for stepping and capturing alike
fn directions(piece: Piece) -> impl Iterator<Item = (i8, i8)> {
    let forward = piece.team.forward_row_delta();
    DIAGONALS
        .into_iter()
        .filter(move |&(dr, _)| piece.rank == Rank::Officer || dr == forward)
}

/// All simple moves for `team`, ignoring the mandatory-capture rule
pub fn simple_moves(board: &Board, team: Team) -> Vec<SimpleMove> {
    let mut moves = Vec::new();
    for (from, pile) in board.piles() {
        if pile.controlling_team() != team {
            continue;
        }
        for dir in directions(pile.top()) {
            if let Some(to) = board.step(from, dir, 1) {
                if board.get(to).is_none() {
                    moves.push(SimpleMove { from, to });
                }
            }
        }
    }
    moves
}

/// Single hops open to the pile on `from`
fn hops_from(board: &Board, from: Square) -> Vec<Step> {
    let Some(pile) = board.get(from) else {
        return Vec::new();
    };
    let attacker = pile.top();

    directions(attacker)
        .filter_map(|dir| {
            let captured = board.step(from, dir, 1)?;
            let landing = board.step(from, dir, 2)?;
            let victim = board.get(captured)?;
            let open = victim.controlling_team() != attacker.team && board.get(landing).is_none();
            open.then_some(Step { captured, landing })
        })
        .collect()
}

/// Landing squares of the hops available to `team`'s pile on `square`.
/// Empty when the square is empty or held by the other side.
pub fn continuation_captures(board: &Board, team: Team, square: Square) -> Vec<Square> {
    match board.get(square) {
        Some(pile) if pile.controlling_team() == team => {
            hops_from(board, square).into_iter().map(|s| s.landing).collect()
        }
        _ => Vec::new(),
    }
}

/// Depth-first walk over hops, replaying each one on a scratch board so that
/// later hops see the pieces already taken.
fn extend_chain(
    board: &Board,
    origin: Square,
    at: Square,
    steps: &mut Vec<Step>,
    out: &mut Vec<CaptureChain>,
) {
    let hops = hops_from(board, at);
    if hops.is_empty() {
        if !steps.is_empty() {
            out.push(CaptureChain { origin, steps: steps.clone() });
        }
        return;
    }

    for step in hops {
        let mut next = board.clone();
        apply::capture_hop(&mut next, at, step);
        steps.push(step);
        extend_chain(&next, origin, step.landing, steps, out);
        steps.pop();
    }
}

/// Every complete capture chain for `team`
pub fn capture_chains(board: &Board, team: Team, capture_rule: CaptureRule) -> Vec<CaptureChain> {
    let mut chains = Vec::new();
    for (origin, pile) in board.piles() {
        if pile.controlling_team() == team {
            extend_chain(board, origin, origin, &mut Vec::new(), &mut chains);
        }
    }

    if capture_rule == CaptureRule::Longest {
        let longest = chains.iter().map(CaptureChain::len).max().unwrap_or(0);
        chains.retain(|c| c.len() == longest);
    }

    chains
}

/// Legal actions for `team`. Captures, when there are any, shut out simple moves.
pub fn legal_actions(board: &Board, team: Team, rules: &Rules) -> ActionSet {
    let chains = capture_chains(board, team, rules.capture_rule);
    if chains.is_empty() {
        ActionSet::Moves(simple_moves(board, team))
    } else {
        ActionSet::Captures(chains)
    }
}
