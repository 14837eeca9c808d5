//! Square grid with row/column coordinates

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{LascaError, Result};
use crate::pieces::{Piece, Pile, Team};

/// Standard Lasca board
pub const STANDARD_SIZE: u8 = 7;

/// Board sizes the engine knows a starting layout for
pub const SUPPORTED_SIZES: [u8; 2] = [6, 7];

/// The four diagonal directions (row delta, col delta)
pub const DIAGONALS: [(i8, i8); 4] = [
    (-1, -1), // up-left
    (-1, 1),  // up-right
    (1, -1),  // down-left
    (1, 1),   // down-right
];

/// Board coordinate, row 0 at the top (Blue's home row)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Square {
    pub row: u8,
    pub col: u8,
}

impl Square {
    pub const fn new(row: u8, col: u8) -> Self {
        Self { row, col }
    }

    /// Playable (dark) square. Diagonal moves never leave this colour.
    pub fn is_dark(&self) -> bool {
        (self.row as u16 + self.col as u16) % 2 == 0
    }

    /// Algebraic name, e.g. `a7` for the top-left corner of a 7x7 board.
    /// Squares off a board of `size` come out as `(row,col)`.
    pub fn name(&self, size: u8) -> String {
        if self.row >= size || self.col >= size || self.col >= 26 {
            return format!("({},{})", self.row, self.col);
        }
        let file = (b'a' + self.col) as char;
        format!("{}{}", file, size - self.row)
    }

    /// Parse an algebraic name for a board of `size`
    pub fn parse(name: &str, size: u8) -> Option<Self> {
        let mut chars = name.chars();
        let file = chars.next()?.to_ascii_lowercase();
        if !file.is_ascii_lowercase() {
            return None;
        }
        let col = file as u8 - b'a';
        let rank: u8 = chars.as_str().parse().ok()?;
        if col >= size || rank == 0 || rank > size {
            return None;
        }
        Some(Self::new(size - rank, col))
    }
}

fn check_size(size: u8) -> Result<()> {
    if SUPPORTED_SIZES.contains(&size) {
        Ok(())
    } else {
        Err(LascaError::InvalidSize(size))
    }
}

/// Dense N x N grid; each cell holds at most one pile
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawBoard")]
pub struct Board {
    size: u8,
    cells: Vec<Option<Pile>>,
}

/// Unchecked wire form of a `Board`
#[derive(Deserialize)]
struct RawBoard {
    size: u8,
    cells: Vec<Option<Pile>>,
}

impl TryFrom<RawBoard> for Board {
    type Error = LascaError;

    fn try_from(raw: RawBoard) -> Result<Self> {
        check_size(raw.size)?;
        let expected = raw.size as usize * raw.size as usize;
        if raw.cells.len() != expected {
            return Err(LascaError::InvalidPosition(format!(
                "{} cells for a {}x{} board, expected {}",
                raw.cells.len(),
                raw.size,
                raw.size,
                expected
            )));
        }
        Ok(Self {
            size: raw.size,
            cells: raw.cells,
        })
    }
}

impl Board {
    /// Board with no pieces
    pub fn empty(size: u8) -> Result<Self> {
        check_size(size)?;
        Ok(Self {
            size,
            cells: vec![None; size as usize * size as usize],
        })
    }

    /// Opening layout: `(size - 1) / 2` rows of single soldiers per side on
    /// the dark squares, Blue at the top and Red at the bottom.
    pub fn starting(size: u8) -> Result<Self> {
        let mut board = Self::empty(size)?;
        let back_rows = (size - 1) / 2;

        for row in 0..size {
            let team = if row < back_rows {
                Team::Blue
            } else if row >= size - back_rows {
                Team::Red
            } else {
                continue;
            };
            for col in 0..size {
                let sq = Square::new(row, col);
                if sq.is_dark() {
                    board.set(sq, Some(Pile::single(Piece::soldier(team))));
                }
            }
        }

        Ok(board)
    }

    pub fn size(&self) -> u8 {
        self.size
    }

    // ========================================================================
    // COORDINATES
    // ========================================================================

    pub fn in_bounds(&self, row: i16, col: i16) -> bool {
        let n = self.size as i16;
        (0..n).contains(&row) && (0..n).contains(&col)
    }

    fn checked_square(&self, row: i16, col: i16) -> Result<Square> {
        if self.in_bounds(row, col) {
            Ok(Square::new(row as u8, col as u8))
        } else {
            Err(LascaError::OutOfRange { row, col })
        }
    }

    /// Square reached by stepping `(dr, dc)` times `distance`, if still on the board
    pub fn step(&self, from: Square, (dr, dc): (i8, i8), distance: i8) -> Option<Square> {
        let row = from.row as i16 + (dr * distance) as i16;
        let col = from.col as i16 + (dc * distance) as i16;
        self.checked_square(row, col).ok()
    }

    fn index(&self, sq: Square) -> usize {
        sq.row as usize * self.size as usize + sq.col as usize
    }

    // ========================================================================
    // ACCESS
    // ========================================================================

    /// Pile at `(row, col)`; fails for off-board coordinates
    pub fn piece_at(&self, row: i16, col: i16) -> Result<Option<&Pile>> {
        let sq = self.checked_square(row, col)?;
        Ok(self.get(sq))
    }

    /// New board with `(row, col)` replaced; `self` is left as it was
    pub fn with_piece_at(&self, row: i16, col: i16, pile: Option<Pile>) -> Result<Self> {
        let sq = self.checked_square(row, col)?;
        let mut board = self.clone();
        board.set(sq, pile);
        Ok(board)
    }

    /// Pile on `sq`; `None` for empty or off-board squares
    pub fn get(&self, sq: Square) -> Option<&Pile> {
        if sq.row >= self.size || sq.col >= self.size {
            return None;
        }
        self.cells[self.index(sq)].as_ref()
    }

    /// In-place update, only used on boards the engine has just cloned
    pub(crate) fn set(&mut self, sq: Square, pile: Option<Pile>) {
        let idx = self.index(sq);
        self.cells[idx] = pile;
    }

    pub(crate) fn take(&mut self, sq: Square) -> Option<Pile> {
        let idx = self.index(sq);
        self.cells[idx].take()
    }

    /// Occupied squares in row-major order
    pub fn piles(&self) -> impl Iterator<Item = (Square, &Pile)> + '_ {
        let size = self.size;
        self.cells.iter().enumerate().filter_map(move |(i, cell)| {
            let sq = Square::new((i / size as usize) as u8, (i % size as usize) as u8);
            cell.as_ref().map(|pile| (sq, pile))
        })
    }

    /// Number of piles whose top belongs to `team`
    pub fn pile_count(&self, team: Team) -> usize {
        self.piles()
            .filter(|(_, pile)| pile.controlling_team() == team)
            .count()
    }

    /// Total pieces on the board, prisoners included
    pub fn piece_count(&self) -> usize {
        self.piles().map(|(_, pile)| pile.len()).sum()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.size {
            write!(f, "{} ", self.size - row)?;
            for col in 0..self.size {
                let sq = Square::new(row, col);
                let cell: String = match self.get(sq) {
                    Some(pile) => pile.pieces().iter().map(|p| p.to_char()).collect(),
                    None if sq.is_dark() => ".".to_string(),
                    None => String::new(),
                };
                write!(f, " {:<4}", cell)?;
            }
            writeln!(f)?;
        }
        write!(f, "  ")?;
        for col in 0..self.size {
            write!(f, " {:<4}", (b'a' + col) as char)?;
        }
        writeln!(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds() {
        let board = Board::empty(7).unwrap();
        assert!(board.in_bounds(0, 0));
        assert!(board.in_bounds(6, 6));
        assert!(!board.in_bounds(7, 0));
        assert!(!board.in_bounds(0, -1));
    }

    #[test]
    fn test_unsupported_size() {
        assert_eq!(Board::empty(8), Err(LascaError::InvalidSize(8)));
    }

    #[test]
    fn test_piece_at_out_of_range() {
        let board = Board::starting(7).unwrap();
        assert_eq!(board.piece_at(7, 2), Err(LascaError::OutOfRange { row: 7, col: 2 }));
        assert!(board.with_piece_at(-1, 0, None).is_err());
    }

    #[test]
    fn test_with_piece_at_is_pure() {
        let board = Board::empty(7).unwrap();
        let pile = Pile::single(Piece::soldier(Team::Red));
        let updated = board.with_piece_at(3, 3, Some(pile.clone())).unwrap();
        assert_eq!(updated.piece_at(3, 3).unwrap(), Some(&pile));
        assert_eq!(board.piece_at(3, 3).unwrap(), None);
    }

    #[test]
    fn test_starting_layout_7() {
        let board = Board::starting(7).unwrap();
        assert_eq!(board.pile_count(Team::Red), 11);
        assert_eq!(board.pile_count(Team::Blue), 11);
        for col in 0..7 {
            assert!(board.piece_at(3, col).unwrap().is_none());
        }
        assert!(board.piles().all(|(sq, pile)| sq.is_dark() && pile.len() == 1));
    }

    #[test]
    fn test_starting_layout_6() {
        let board = Board::starting(6).unwrap();
        assert_eq!(board.pile_count(Team::Red), 6);
        assert_eq!(board.pile_count(Team::Blue), 6);
        assert_eq!(board.piece_count(), 12);
    }

    #[test]
    fn test_square_names() {
        assert_eq!(Square::new(0, 0).name(7), "a7");
        assert_eq!(Square::new(6, 6).name(7), "g1");
        assert_eq!(Square::parse("c3", 7), Some(Square::new(4, 2)));
        assert_eq!(Square::parse("h1", 7), None);
        assert_eq!(Square::parse("a0", 7), None);
        assert_eq!(Square::parse("", 7), None);
    }

    #[test]
    fn test_off_board_square_names() {
        assert_eq!(Square::new(9, 0).name(7), "(9,0)");
        assert_eq!(Square::new(0, 200).name(7), "(0,200)");
        assert_eq!(Square::new(255, 255).name(7), "(255,255)");
        assert!(Square::new(255, 255).is_dark());
    }

    #[test]
    fn test_deserialize_checks_shape() {
        let board = Board::starting(6).unwrap();
        let json = serde_json::to_string(&board).unwrap();
        assert_eq!(serde_json::from_str::<Board>(&json).unwrap(), board);

        let short = r#"{"size":7,"cells":[null,null]}"#;
        assert!(serde_json::from_str::<Board>(short).is_err());
        let cells = vec!["null"; 64].join(",");
        let unsupported = format!(r#"{{"size":8,"cells":[{cells}]}}"#);
        assert!(serde_json::from_str::<Board>(&unsupported).is_err());
    }

    #[test]
    fn test_step() {
        let board = Board::empty(7).unwrap();
        let sq = Square::new(1, 1);
        assert_eq!(board.step(sq, (-1, -1), 1), Some(Square::new(0, 0)));
        assert_eq!(board.step(sq, (-1, -1), 2), None);
        assert_eq!(board.step(sq, (1, 1), 2), Some(Square::new(3, 3)));
    }
}
