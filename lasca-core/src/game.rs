//! Game state, turn sequencing and terminal detection

use serde::{Deserialize, Serialize};

use crate::apply;
use crate::board::{Board, Square};
use crate::error::{LascaError, Result};
use crate::movegen::{self, Action, ActionSet, CaptureChain, SimpleMove};
use crate::notation;
use crate::pieces::Team;
use crate::ruleset::Rules;

// ============================================================================
// CORE TYPES
// ============================================================================

/// Game status
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    InProgress,
    RedWon,
    BlueWon,
}

impl GameStatus {
    pub fn won_by(team: Team) -> Self {
        match team {
            Team::Red => GameStatus::RedWon,
            Team::Blue => GameStatus::BlueWon,
        }
    }

    pub fn winner(self) -> Option<Team> {
        match self {
            GameStatus::InProgress => None,
            GameStatus::RedWon => Some(Team::Red),
            GameStatus::BlueWon => Some(Team::Blue),
        }
    }
}

// ============================================================================
// GAME STATE
// ============================================================================

/// Game state (every action returns a new one)
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    board: Board,

    /// Side to move
    turn: Team,

    /// Starts at 1, increments after Blue's move
    move_number: u32,

    /// Notation of every move played, Red's entries prefixed with the move number
    history: Vec<String>,

    status: GameStatus,

    rules: Rules,
}

impl GameState {
    // ========================================================================
    // CONSTRUCTORS
    // ========================================================================

    /// Standard game on a board of `size`, Red to move
    pub fn new_game(size: u8) -> Result<Self> {
        Self::with_rules(Rules::with_size(size))
    }

    /// Fresh game under the given rules
    pub fn with_rules(rules: Rules) -> Result<Self> {
        let board = Board::starting(rules.size)?;
        Ok(Self::from_position(board, Team::Red, rules))
    }

    /// Game continuing from an arbitrary board. The board decides the size.
    pub fn from_position(board: Board, turn: Team, mut rules: Rules) -> Self {
        rules.size = board.size();
        let status = evaluate_status(&board, turn, &rules);
        Self {
            board,
            turn,
            move_number: 1,
            history: Vec::new(),
            status,
            rules,
        }
    }

    // ========================================================================
    // ACCESSORS
    // ========================================================================

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn turn(&self) -> Team {
        self.turn
    }

    pub fn move_number(&self) -> u32 {
        self.move_number
    }

    pub fn history(&self) -> &[String] {
        &self.history
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn rules(&self) -> &Rules {
        &self.rules
    }

    pub fn is_terminal(&self) -> bool {
        self.status != GameStatus::InProgress
    }

    /// History as one line, e.g. `1. c3-d4 e5-c3 2. ...`
    pub fn pgn(&self) -> String {
        self.history.join(" ")
    }

    pub fn position_string(&self) -> String {
        notation::to_position_string(&self.board)
    }

    // ========================================================================
    // MOVE GENERATION
    // ========================================================================

    /// Legal actions for the side to move; empty once the game is over
    pub fn legal_actions(&self) -> ActionSet {
        if self.is_terminal() {
            return ActionSet::Moves(Vec::new());
        }
        movegen::legal_actions(&self.board, self.turn, &self.rules)
    }

    // ========================================================================
    // APPLY
    // ========================================================================

    pub fn apply_simple_move(&self, from: Square, to: Square) -> Result<Self> {
        self.apply_action(&Action::Move(SimpleMove { from, to }))
    }

    pub fn apply_capture(&self, chain: &CaptureChain) -> Result<Self> {
        self.apply_action(&Action::Capture(chain.clone()))
    }

    /// Validate `action` against the legal set and return the resulting state.
    /// `self` is never modified; a rejected action only yields an error.
    pub fn apply_action(&self, action: &Action) -> Result<Self> {
        if self.is_terminal() {
            return Err(LascaError::IllegalMove("the game is over".to_string()));
        }

        if *action == Action::Resign {
            let mut next = self.clone();
            next.status = GameStatus::won_by(self.turn.opponent());
            tracing::info!("{:?} resigns, {:?}", self.turn, next.status);
            return Ok(next);
        }

        let size = self.board.size();
        if let Some(off) = action
            .squares()
            .into_iter()
            .find(|sq| !self.board.in_bounds(sq.row as i16, sq.col as i16))
        {
            tracing::debug!("rejected action naming ({}, {})", off.row, off.col);
            return Err(LascaError::IllegalMove(format!(
                "square {} is off the {}x{} board",
                off.name(size),
                size,
                size
            )));
        }

        let legal = self.legal_actions();
        if !legal.contains(action) {
            let reason = self.explain_rejection(action, &legal);
            tracing::debug!("rejected action: {}", reason);
            return Err(LascaError::IllegalMove(reason));
        }

        Ok(self.play(action))
    }

    /// Play an action already known to be legal
    fn play(&self, action: &Action) -> Self {
        let mut board = match action {
            Action::Move(mv) => apply::move_pile(&self.board, mv.from, mv.to),
            Action::Capture(chain) => apply::apply_chain(&self.board, chain),
            Action::Resign => self.board.clone(),
        };
        if let Some(dest) = action.destination() {
            if apply::promote_if_due(&mut board, dest) {
                tracing::debug!("promotion on {}", dest.name(board.size()));
            }
        }

        let text = notation::action_notation(action, board.size());
        let mut history = self.history.clone();
        history.push(match self.turn {
            Team::Red => format!("{}. {}", self.move_number, text),
            Team::Blue => text,
        });

        let move_number = match self.turn {
            Team::Red => self.move_number,
            Team::Blue => self.move_number + 1,
        };
        let turn = self.turn.opponent();
        let status = evaluate_status(&board, turn, &self.rules);

        tracing::debug!(
            "{:?} played {} -> {}",
            self.turn,
            history.last().map(String::as_str).unwrap_or_default(),
            notation::to_position_string(&board)
        );
        if status != GameStatus::InProgress {
            tracing::info!("game over after {} plies: {:?}", history.len(), status);
        }

        Self {
            board,
            turn,
            move_number,
            history,
            status,
            rules: self.rules.clone(),
        }
    }

    fn explain_rejection(&self, action: &Action, legal: &ActionSet) -> String {
        let size = self.board.size();
        let text = notation::action_notation(action, size);

        if let Some(origin) = action.origin() {
            match self.board.get(origin) {
                None => return format!("no pile on {}", origin.name(size)),
                Some(pile) if pile.controlling_team() != self.turn => {
                    return format!("{} is not controlled by {:?}", origin.name(size), self.turn);
                }
                _ => {}
            }
        }

        match (action, legal) {
            (Action::Move(_), ActionSet::Captures(_)) => {
                format!("{} is not allowed, a capture is mandatory", text)
            }
            (Action::Capture(chain), ActionSet::Captures(chains))
                if chains.iter().any(|c| c.origin == chain.origin && c.steps.starts_with(&chain.steps)) =>
            {
                format!("{} is incomplete, the capture must continue", text)
            }
            _ => format!("{} is not a legal move", text),
        }
    }
}

/// Status once `to_move` is about to play on `board`
fn evaluate_status(board: &Board, to_move: Team, rules: &Rules) -> GameStatus {
    if board.pile_count(to_move) == 0 {
        return GameStatus::won_by(to_move.opponent());
    }
    if board.pile_count(to_move.opponent()) == 0 {
        return GameStatus::won_by(to_move);
    }
    if rules.blocked_side_loses && movegen::legal_actions(board, to_move, rules).is_empty() {
        return GameStatus::won_by(to_move.opponent());
    }
    GameStatus::InProgress
}

// ============================================================================
// TESTS
// ============================================================================
