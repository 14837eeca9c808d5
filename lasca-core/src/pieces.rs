//! Pieces and piles
//!
//! A pile is a stack of pieces on one square. Index 0 is the top piece, and
//! the top piece alone decides who controls the pile and how it moves.

use serde::{Deserialize, Serialize};

/// Side to play
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Team {
    Red = 0,
    Blue = 1,
}

impl Team {
    pub fn opponent(self) -> Self {
        match self {
            Team::Red => Team::Blue,
            Team::Blue => Team::Red,
        }
    }

    /// Row step of a forward move. Red starts on the bottom rows.
    pub const fn forward_row_delta(self) -> i8 {
        match self {
            Team::Red => -1,
            Team::Blue => 1,
        }
    }

    /// Row on which this team's soldiers are promoted
    pub const fn promotion_row(self, size: u8) -> u8 {
        match self {
            Team::Red => 0,
            Team::Blue => size - 1,
        }
    }
}

/// Piece rank
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rank {
    Soldier,
    Officer,
}

/// A single piece
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    pub team: Team,
    pub rank: Rank,
}

impl Piece {
    pub const fn new(team: Team, rank: Rank) -> Self {
        Self { team, rank }
    }

    pub const fn soldier(team: Team) -> Self {
        Self::new(team, Rank::Soldier)
    }

    pub const fn officer(team: Team) -> Self {
        Self::new(team, Rank::Officer)
    }

    /// Letter used by the position format: `w`/`b` soldiers, `W`/`B` officers
    pub fn to_char(self) -> char {
        match (self.team, self.rank) {
            (Team::Red, Rank::Soldier) => 'w',
            (Team::Red, Rank::Officer) => 'W',
            (Team::Blue, Rank::Soldier) => 'b',
            (Team::Blue, Rank::Officer) => 'B',
        }
    }

    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'w' => Some(Self::soldier(Team::Red)),
            'W' => Some(Self::officer(Team::Red)),
            'b' => Some(Self::soldier(Team::Blue)),
            'B' => Some(Self::officer(Team::Blue)),
            _ => None,
        }
    }
}

/// Non-empty stack of pieces, top first
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<Piece>", into = "Vec<Piece>")]
pub struct Pile {
    pieces: Vec<Piece>,
}

impl Pile {
    pub fn single(piece: Piece) -> Self {
        Self { pieces: vec![piece] }
    }

    /// Build a pile from pieces listed top first. Returns `None` for an empty list.
    pub fn from_pieces(pieces: Vec<Piece>) -> Option<Self> {
        if pieces.is_empty() {
            None
        } else {
            Some(Self { pieces })
        }
    }

    pub fn top(&self) -> Piece {
        self.pieces[0]
    }

    pub fn controlling_team(&self) -> Team {
        self.top().team
    }

    pub fn controlling_rank(&self) -> Rank {
        self.top().rank
    }

    /// Pieces from top to bottom
    pub fn pieces(&self) -> &[Piece] {
        &self.pieces
    }

    pub fn len(&self) -> usize {
        self.pieces.len()
    }

    /// Always false for a constructed pile
    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }

    /// Absorb a captured piece. The capturing top keeps control and the
    /// prisoner goes to the bottom of the stack.
    pub fn push_captured(&self, piece: Piece) -> Self {
        let mut pieces = Vec::with_capacity(self.pieces.len() + 1);
        pieces.extend_from_slice(&self.pieces);
        pieces.push(piece);
        Self { pieces }
    }

    /// Drop the top piece, returning `None` when nothing is left
    pub fn remove_top(&self) -> Option<Self> {
        Self::from_pieces(self.pieces[1..].to_vec())
    }

    /// Turn the top piece into an officer. Everything below is untouched.
    pub fn promote(&self) -> Self {
        let mut pieces = self.pieces.clone();
        pieces[0].rank = Rank::Officer;
        Self { pieces }
    }
}

impl TryFrom<Vec<Piece>> for Pile {
    type Error = &'static str;

    fn try_from(pieces: Vec<Piece>) -> Result<Self, Self::Error> {
        Pile::from_pieces(pieces).ok_or("a pile needs at least one piece")
    }
}

impl From<Pile> for Vec<Piece> {
    fn from(pile: Pile) -> Self {
        pile.pieces
    }
}

/// Controlling team of a possibly empty square
pub fn controlling_team(pile: Option<&Pile>) -> Option<Team> {
    pile.map(Pile::controlling_team)
}

/// Controlling rank of a possibly empty square
pub fn controlling_rank(pile: Option<&Pile>) -> Option<Rank> {
    pile.map(Pile::controlling_rank)
}
