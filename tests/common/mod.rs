#![allow(dead_code)]

use lacuna::BoardState;
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;

/// States reached by uniformly random legal moves from the initial position.
/// Each walk stops early when the game ends.
pub fn random_states(seed: u64, walks: usize, max_plies: usize) -> Vec<BoardState> {
    lacuna::init();
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);
    let mut out = Vec::new();
    for _ in 0..walks {
        let mut state = BoardState::initial();
        out.push(state);
        for _ in 0..max_plies {
            let moves = state.generate_moves();
            if moves.is_empty() {
                break;
            }
            let mv = moves[rng.random_range(0..moves.len())];
            state = state.perform(mv);
            out.push(state);
        }
    }
    out
}
