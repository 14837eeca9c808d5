//! Text formats and read-only views for collaborators
//!
//! - position strings: `bbbb/bbb/bbbb/3/wwww/www/wwww`
//! - move notation: `c3-d4`, `c3xe5xc7`
//! - render model: a serialisable grid of piles, top piece first

use serde::{Deserialize, Serialize};

use crate::board::{Board, Square};
use crate::error::{LascaError, Result};
use crate::game::GameState;
use crate::movegen::Action;
use crate::pieces::{Piece, Pile};

// ============================================================================
// POSITION STRING
// ============================================================================

/// Encode a board row by row, top row first.
///
/// Only dark squares are listed. A run of empty squares is its length, a lone
/// piece is its letter and a taller pile is its letters top-first in
/// parentheses, e.g. `(Wbb)`.
pub fn to_position_string(board: &Board) -> String {
    let size = board.size();
    let rows: Vec<String> = (0..size)
        .map(|row| {
            let mut out = String::new();
            let mut empty = 0;
            for col in (0..size).filter(|col| (row + col) % 2 == 0) {
                match board.get(Square::new(row, col)) {
                    None => empty += 1,
                    Some(pile) => {
                        if empty > 0 {
                            out.push_str(&empty.to_string());
                            empty = 0;
                        }
                        push_pile(&mut out, pile);
                    }
                }
            }
            if empty > 0 {
                out.push_str(&empty.to_string());
            }
            out
        })
        .collect();
    rows.join("/")
}

fn push_pile(out: &mut String, pile: &Pile) {
    if pile.len() == 1 {
        out.push(pile.top().to_char());
    } else {
        out.push('(');
        out.extend(pile.pieces().iter().map(|p| p.to_char()));
        out.push(')');
    }
}

/// Decode a position string. The number of rows gives the board size.
pub fn from_position_string(text: &str) -> Result<Board> {
    let rows: Vec<&str> = text.trim().split('/').collect();
    let size = u8::try_from(rows.len())
        .map_err(|_| LascaError::InvalidPosition(format!("too many rows in {text:?}")))?;
    let mut board = Board::empty(size)
        .map_err(|_| LascaError::InvalidPosition(format!("{size} rows is not a supported board")))?;

    for (row, line) in rows.iter().enumerate() {
        let row = row as u8;
        let dark: Vec<Square> = (0..size)
            .map(|col| Square::new(row, col))
            .filter(Square::is_dark)
            .collect();
        let piles = parse_row(line, dark.len())?;
        if piles.len() != dark.len() {
            return Err(LascaError::InvalidPosition(format!(
                "row {} describes {} squares, expected {}",
                row + 1,
                piles.len(),
                dark.len()
            )));
        }
        for (sq, pile) in dark.into_iter().zip(piles) {
            board.set(sq, pile);
        }
    }

    Ok(board)
}

/// One entry per dark square of the row; never more than `width`
fn parse_row(line: &str, width: usize) -> Result<Vec<Option<Pile>>> {
    let bad = |msg: String| LascaError::InvalidPosition(msg);
    let too_long = || bad(format!("{line:?} describes more than {width} squares"));
    let mut cells = Vec::with_capacity(width);
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        if cells.len() >= width && !c.is_ascii_digit() {
            return Err(too_long());
        }
        if let Some(digit) = c.to_digit(10) {
            if digit == 0 {
                return Err(bad(format!("zero-length gap in {line:?}")));
            }
            let mut run = digit as usize;
            while let Some(d) = chars.peek().and_then(|c| c.to_digit(10)) {
                run = run
                    .checked_mul(10)
                    .and_then(|r| r.checked_add(d as usize))
                    .filter(|r| cells.len() + r <= width)
                    .ok_or_else(too_long)?;
                chars.next();
            }
            if cells.len() + run > width {
                return Err(too_long());
            }
            cells.extend(std::iter::repeat(None).take(run));
        } else if c == '(' {
            let mut pieces = Vec::new();
            loop {
                match chars.next() {
                    Some(')') => break,
                    Some(p) => pieces.push(
                        Piece::from_char(p)
                            .ok_or_else(|| bad(format!("unknown piece {p:?} in {line:?}")))?,
                    ),
                    None => return Err(bad(format!("unclosed pile in {line:?}"))),
                }
            }
            let pile = Pile::from_pieces(pieces)
                .ok_or_else(|| bad(format!("empty pile in {line:?}")))?;
            cells.push(Some(pile));
        } else {
            let piece = Piece::from_char(c)
                .ok_or_else(|| bad(format!("unknown piece {c:?} in {line:?}")))?;
            cells.push(Some(Pile::single(piece)));
        }
    }

    Ok(cells)
}

// ============================================================================
// MOVE NOTATION
// ============================================================================

/// `c3-d4` for a step, `c3xe5xc7` for a chain (origin, then every landing)
pub fn action_notation(action: &Action, size: u8) -> String {
    match action {
        Action::Move(mv) => format!("{}-{}", mv.from.name(size), mv.to.name(size)),
        Action::Capture(chain) => {
            let mut text = chain.origin.name(size);
            for step in &chain.steps {
                text.push('x');
                text.push_str(&step.landing.name(size));
            }
            text
        }
        Action::Resign => "resign".to_string(),
    }
}

/// Match an origin/destination pair against the legal set.
///
/// A capture may be named by its origin and final landing alone, as long as
/// only one legal chain connects them.
pub fn resolve_action(state: &GameState, from: Square, to: Square) -> Result<Action> {
    let size = state.board().size();
    let mut matches: Vec<Action> = state
        .legal_actions()
        .actions()
        .into_iter()
        .filter(|a| a.origin() == Some(from) && a.destination() == Some(to))
        .collect();

    if matches.len() > 1 {
        return Err(LascaError::IllegalMove(format!(
            "{} capture paths lead from {} to {}; give every landing square",
            matches.len(),
            from.name(size),
            to.name(size)
        )));
    }
    matches.pop().ok_or_else(|| {
        LascaError::IllegalMove(format!(
            "no legal move from {} to {}",
            from.name(size),
            to.name(size)
        ))
    })
}

/// Parse `c3-d4`, `c3xe5xc7`, `c3xc7` or `resign` against the current position
pub fn parse_action(text: &str, state: &GameState) -> Result<Action> {
    let text = text.trim();
    if text.eq_ignore_ascii_case("resign") {
        return Ok(Action::Resign);
    }

    let size = state.board().size();
    let squares = text
        .split(|c| c == '-' || c == 'x')
        .map(|name| {
            Square::parse(name, size)
                .ok_or_else(|| LascaError::IllegalMove(format!("bad square {name:?} in {text:?}")))
        })
        .collect::<Result<Vec<_>>>()?;

    if squares.len() < 2 {
        return Err(LascaError::IllegalMove(format!("{text:?} names no destination")));
    }
    if squares.len() == 2 {
        return resolve_action(state, squares[0], squares[1]);
    }

    // full capture path
    state
        .legal_actions()
        .actions()
        .into_iter()
        .find(|a| match a {
            Action::Capture(chain) => {
                chain.origin == squares[0]
                    && chain.steps.iter().map(|s| s.landing).eq(squares[1..].iter().copied())
            }
            _ => false,
        })
        .ok_or_else(|| LascaError::IllegalMove(format!("{text} is not a legal capture")))
}

// ============================================================================
// RENDER MODEL
// ============================================================================

/// One square as a renderer sees it
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderSquare {
    pub square: Square,
    pub name: String,
    pub dark: bool,
    /// Top piece first; empty for a vacant square
    pub pile: Vec<Piece>,
}

/// Read-only snapshot of a board, row-major from the top-left corner
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderModel {
    pub size: u8,
    pub squares: Vec<RenderSquare>,
}

pub fn to_render_model(board: &Board) -> RenderModel {
    let size = board.size();
    let squares = (0..size)
        .flat_map(|row| (0..size).map(move |col| Square::new(row, col)))
        .map(|square| RenderSquare {
            square,
            name: square.name(size),
            dark: square.is_dark(),
            pile: board
                .get(square)
                .map(|p| p.pieces().to_vec())
                .unwrap_or_default(),
        })
        .collect();
    RenderModel { size, squares }
}
