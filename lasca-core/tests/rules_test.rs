//! Integration tests for the Lasca rules engine
//!
//! Exercises the public API end to end: openings, captures, chains,
//! promotion, game end and the text formats.

use lasca_core::{
    capture_chains, from_position_string, parse_action, to_position_string, Action, ActionSet,
    Board, CaptureRule, GameState, GameStatus, LascaError, Piece, Pile, Rank, Rules, Square,
    Team,
};
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

// ============================================================================
// TEST FIXTURES
// ============================================================================

fn sq(row: u8, col: u8) -> Square {
    Square::new(row, col)
}

fn only_chain(state: &GameState) -> lasca_core::CaptureChain {
    match state.legal_actions() {
        ActionSet::Captures(chains) => {
            assert_eq!(chains.len(), 1, "expected a single chain");
            chains.into_iter().next().unwrap()
        }
        ActionSet::Moves(_) => panic!("expected a capture"),
    }
}

// ============================================================================
// SCENARIOS
// ============================================================================

#[test]
fn test_new_game_layout() {
    let game = GameState::new_game(7).unwrap();
    let board = game.board();
    assert_eq!(board.pile_count(Team::Red), 11);
    assert_eq!(board.pile_count(Team::Blue), 11);
    assert!(board
        .piles()
        .all(|(_, pile)| pile.len() == 1 && pile.controlling_rank() == Rank::Soldier));
    assert!((0..7).all(|col| board.piece_at(3, col).unwrap().is_none()));
    assert_eq!(game.position_string(), "bbbb/bbb/bbbb/3/wwww/www/wwww");
}

#[test]
fn test_capture_grows_landing_pile() {
    let game = GameState::new_game(7).unwrap()
        .apply_simple_move(sq(4, 2), sq(3, 3))
        .unwrap();
    let chain = only_chain(&game);
    assert_eq!(chain.origin, sq(2, 4));
    let before = game.board().get(chain.origin).unwrap().len();

    let after = game.apply_capture(&chain).unwrap();
    let landing = after.board().get(sq(4, 2)).unwrap();
    assert_eq!(landing.len(), before + 1);
    assert_eq!(landing.controlling_team(), Team::Blue);
    assert!(after.board().get(sq(3, 3)).is_none());
    assert!(after.board().get(sq(2, 4)).is_none());
    assert_eq!(after.board().pile_count(Team::Red), 10);
}

#[test]
fn test_capturing_top_frees_prisoners() {
    // blue officer sitting on two red prisoners
    let board = Board::empty(7).unwrap()
        .with_piece_at(
            3,
            3,
            Pile::from_pieces(vec![
                Piece::officer(Team::Blue),
                Piece::soldier(Team::Red),
                Piece::soldier(Team::Red),
            ]),
        )
        .unwrap()
        .with_piece_at(4, 2, Some(Pile::single(Piece::soldier(Team::Red))))
        .unwrap()
        .with_piece_at(0, 0, Some(Pile::single(Piece::soldier(Team::Blue))))
        .unwrap();
    let game = GameState::from_position(board, Team::Red, Rules::default());
    let after = game.apply_capture(&only_chain(&game)).unwrap();

    let freed = after.board().get(sq(3, 3)).unwrap();
    assert_eq!(freed.controlling_team(), Team::Red);
    assert_eq!(freed.len(), 2);
    let capturer = after.board().get(sq(2, 4)).unwrap();
    assert_eq!(capturer.pieces(), &[Piece::soldier(Team::Red), Piece::officer(Team::Blue)]);
}

#[test]
fn test_whole_pile_taken_in_one_chain() {
    let board = Board::empty(7).unwrap()
        .with_piece_at(
            3,
            3,
            Pile::from_pieces(vec![
                Piece::officer(Team::Blue),
                Piece::soldier(Team::Blue),
                Piece::soldier(Team::Blue),
            ]),
        )
        .unwrap()
        .with_piece_at(4, 2, Some(Pile::single(Piece::officer(Team::Red))))
        .unwrap();
    let game = GameState::from_position(board, Team::Red, Rules::default());
    let chain = only_chain(&game);
    assert_eq!(chain.len(), 3);

    let after = game.apply_capture(&chain).unwrap();
    assert!(after.board().get(sq(3, 3)).is_none());
    let capturer = after.board().get(chain.destination()).unwrap();
    assert_eq!(capturer.len(), 4);
    assert_eq!(capturer.controlling_team(), Team::Red);

    assert_eq!(after.status(), GameStatus::RedWon);
    let err = after.apply_simple_move(chain.destination(), sq(1, 3)).unwrap_err();
    assert!(matches!(err, LascaError::IllegalMove(_)));
}

#[test]
fn test_illegal_action_leaves_state_unchanged() {
    let game = GameState::new_game(7).unwrap()
        .apply_simple_move(sq(4, 2), sq(3, 3))
        .unwrap();
    let snapshot = game.clone();
    let result = game.apply_simple_move(sq(2, 6), sq(3, 5));
    assert!(matches!(result, Err(LascaError::IllegalMove(_))));
    assert_eq!(game, snapshot);
}

#[test]
fn test_promoted_officer_moves_backward() {
    let board = from_position_string("4/1w1/4/3/3b/3/4").unwrap();
    let game = GameState::from_position(board, Team::Red, Rules::default());
    let game = game.apply_simple_move(sq(1, 3), sq(0, 2)).unwrap();
    assert_eq!(game.board().get(sq(0, 2)).unwrap().top(), Piece::officer(Team::Red));

    let game = game.apply_simple_move(sq(4, 6), sq(5, 5)).unwrap();
    let actions = game.legal_actions().actions();
    assert!(actions.contains(&Action::Move(lasca_core::SimpleMove {
        from: sq(0, 2),
        to: sq(1, 1),
    })));
    assert_eq!(game.pgn(), "1. d6-c7 g3-f2");
}

#[test]
fn test_notation_drives_a_game() {
    let mut game = GameState::new_game(7).unwrap();
    for text in ["c3-d4", "e5xc3", "b2xd4"] {
        let action = parse_action(text, &game).unwrap();
        game = game.apply_action(&action).unwrap();
    }
    assert_eq!(game.pgn(), "1. c3-d4 e5xc3 2. b2xd4");
    assert_eq!(game.move_number(), 2);
    assert_eq!(game.turn(), Team::Blue);
}

#[test]
fn test_longest_capture_rule() {
    let board = from_position_string("4/2b/4/bb1/1w2/3/4").unwrap();
    let free = GameState::from_position(board.clone(), Team::Red, Rules::default());
    assert_eq!(free.legal_actions().len(), 2);

    let strict = GameState::from_position(
        board,
        Team::Red,
        Rules::default().with_capture_rule(CaptureRule::Longest),
    );
    let chain = only_chain(&strict);
    assert_eq!(chain.destination(), sq(0, 6));
}

#[test]
fn test_six_by_six_variant() {
    let game = GameState::with_rules(Rules::six()).unwrap();
    assert_eq!(game.board().size(), 6);
    assert_eq!(game.legal_actions().len(), 5);
    assert_eq!(game.position_string(), "bbb/bbb/3/3/www/www");
}

// ============================================================================
// PROPERTIES OVER RANDOM GAMES
// ============================================================================

#[test]
fn test_random_games_keep_invariants() {
    for seed in 0..20u64 {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let size = if seed % 2 == 0 { 7 } else { 6 };
        let mut game = GameState::new_game(size).unwrap();
        let total = game.board().piece_count();

        for _ in 0..300 {
            if game.is_terminal() {
                break;
            }
            let legal = game.legal_actions();

            // generation is stable
            assert_eq!(legal, game.legal_actions());

            // capture is mandatory
            let chains = capture_chains(game.board(), game.turn(), CaptureRule::Free);
            assert_eq!(legal.is_capture(), !chains.is_empty());

            // position string round-trips
            let text = to_position_string(game.board());
            assert_eq!(&from_position_string(&text).unwrap(), game.board());

            let actions = legal.actions();
            let Some(action) = actions.choose(&mut rng) else {
                break;
            };
            game = game.apply_action(action).unwrap();
            assert_eq!(game.board().piece_count(), total, "seed {seed}");
        }
    }
}

#[test]
fn test_finished_games_have_a_loser() {
    let mut finished = 0;
    for seed in 0..10u64 {
        let result = lasca_core::seeded_playout(&GameState::new_game(7).unwrap(), 1000, seed);
        if let Some(winner) = result.status().winner() {
            finished += 1;
            let board = result.final_state.board();
            let loser = winner.opponent();
            let loser_stuck = result.final_state.turn() == loser
                && lasca_core::legal_actions(board, loser, &Rules::default()).is_empty();
            assert!(board.pile_count(loser) == 0 || loser_stuck);
        }
    }
    assert!(finished > 0);
}
