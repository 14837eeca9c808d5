//! Random self-play and perft counting
//!
//! Neither plays well; they exist to exercise the rules end to end and to
//! give reproducible node counts for a position.

use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use rustc_hash::FxHashMap;

use crate::game::{GameState, GameStatus};
use crate::pieces::Team;

/// Result of a random playout
#[derive(Clone, Debug)]
pub struct PlayoutResult {
    pub final_state: GameState,
    /// Actions played
    pub plies: u32,
}

impl PlayoutResult {
    pub fn status(&self) -> GameStatus {
        self.final_state.status()
    }
}

/// Play uniformly random legal actions until the game ends, no action is
/// available, or `max_plies` is reached.
pub fn random_playout<R: Rng>(state: &GameState, max_plies: u32, rng: &mut R) -> PlayoutResult {
    let mut current = state.clone();
    let mut plies = 0;

    while !current.is_terminal() && plies < max_plies {
        let actions = current.legal_actions().actions();
        let Some(action) = actions.choose(rng) else {
            break;
        };
        match current.apply_action(action) {
            Ok(next) => current = next,
            Err(e) => {
                // a generated action must always apply
                tracing::error!("generated action failed to apply: {}", e);
                break;
            }
        }
        plies += 1;
    }

    PlayoutResult {
        final_state: current,
        plies,
    }
}

/// Playout driven by a `ChaCha8Rng` seeded with `seed`
pub fn seeded_playout(state: &GameState, max_plies: u32, seed: u64) -> PlayoutResult {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    random_playout(state, max_plies, &mut rng)
}

type PerftKey = (String, Team, u32);

/// Number of distinct action sequences of length `depth`
pub fn perft(state: &GameState, depth: u32) -> u64 {
    let mut cache = FxHashMap::default();
    perft_cached(state, depth, &mut cache)
}

fn perft_cached(state: &GameState, depth: u32, cache: &mut FxHashMap<PerftKey, u64>) -> u64 {
    if depth == 0 {
        return 1;
    }

    let key = (state.position_string(), state.turn(), depth);
    if let Some(&count) = cache.get(&key) {
        return count;
    }

    let actions = state.legal_actions().actions();
    let count = if depth == 1 {
        actions.len() as u64
    } else {
        actions
            .iter()
            .filter_map(|a| state.apply_action(a).ok())
            .map(|next| perft_cached(&next, depth - 1, cache))
            .sum()
    };

    cache.insert(key, count);
    count
}
