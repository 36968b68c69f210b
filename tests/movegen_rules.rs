mod common;

use lacuna::board::{BoardState, Move, PieceKind, THEM, US};
use lacuna::movegen::{perft, perft_divide, MAX_MOVES};
use lacuna::tables::{self, cell_bit, SENTINEL};
use lacuna::MoveParseError;

/// Whether the royal piece of `side` stands on an open line with the other one.
fn royals_face(state: &BoardState, side: usize) -> bool {
    let (Some(own), Some(other)) = (
        state.piece_cell(side, PieceKind::ROYAL),
        state.piece_cell(1 - side, PieceKind::ROYAL),
    ) else {
        return false;
    };
    let occupancy = SENTINEL | state.non_royal_mask(US) | state.non_royal_mask(THEM);
    tables::tables().attacks(PieceKind::ROYAL, Some(other), own, occupancy)
}

fn assert_legal_successors(state: &BoardState) {
    let moves = state.generate_moves();
    assert!(moves.len() <= MAX_MOVES);

    let own = state.side_mask(US);
    for &mv in &moves {
        assert_eq!(own & cell_bit(mv.to_sq()), 0, "{mv} lands on an own piece");
        if mv.piece().is_royal() {
            assert!(!state.is_hole(mv.to_sq()), "{mv} enters a hole");
        }

        let next = state.perform(mv);
        assert_eq!(next, state.perform(mv), "perform is not deterministic");
        // the mover is now the opponent
        assert!(!next.is_attacked(THEM), "{mv} leaves the royal piece attacked");
        assert!(!royals_face(&next, THEM), "{mv} faces the other royal piece");
        assert_eq!(next.royal_attacked_prev(), state.royal_attacked());
    }
}

#[test]
fn initial_position_moves_are_legal_and_distinct() {
    lacuna::init();
    let state = BoardState::initial();
    let moves = state.generate_moves();
    assert!(!moves.is_empty());

    let mut raw: Vec<u8> = moves.iter().map(|m| m.raw()).collect();
    raw.sort_unstable();
    raw.dedup();
    assert_eq!(raw.len(), moves.len(), "duplicate moves: {moves:?}");

    assert_legal_successors(&state);
}

#[test]
fn random_walks_keep_the_rules() {
    for state in common::random_states(0xC0FFEE, 40, 80) {
        assert_legal_successors(&state);

        let moves = state.generate_moves();
        if let Some(last) = state.last_move() {
            assert!(!moves.contains(last), "{last} repeated right after an exchange");
        }
        assert_eq!(moves.is_empty(), state.is_game_over());
        assert_eq!(moves.len(), state.count_moves());

        for side in [US, THEM] {
            if let Some(cell) = state.piece_cell(side, PieceKind::ROYAL) {
                assert!(!state.is_hole(cell), "royal piece on a hole\n{state}");
            }
        }
    }
}

#[test]
fn perform_swaps_sides() {
    let state = BoardState::initial();
    for &mv in &state.generate_moves() {
        let next = state.perform(mv);
        assert_eq!(next.piece_cell(THEM, mv.piece()), Some(mv.to_sq()));
        for kind in PieceKind::ALL {
            // the previous opponent is untouched unless it was exchanged
            if state.piece_cell(THEM, kind) != Some(mv.to_sq()) {
                assert_eq!(next.piece_cell(US, kind), state.piece_cell(THEM, kind));
            }
        }
    }
}

#[test]
fn perft_is_consistent() {
    let state = BoardState::initial();
    assert_eq!(perft(&state, 0), 1);
    assert_eq!(perft(&state, 1), state.count_moves() as u64);

    let divide = perft_divide(&state, 3);
    assert_eq!(divide.len(), state.count_moves());
    assert_eq!(divide.iter().map(|(_, n)| n).sum::<u64>(), perft(&state, 3));
    for (mv, n) in divide {
        assert_eq!(n, perft(&state.perform(mv), 2));
    }
}

#[test]
fn notation_round_trips_through_legal_moves() {
    let state = BoardState::initial();
    for &mv in &state.generate_moves() {
        assert_eq!(state.parse_move(&mv.to_string()), Ok(mv));
    }

    assert!(matches!(state.parse_move("Qg7"), Err(MoveParseError::Illegal(_))));
    assert!(matches!(state.parse_move("Kc3"), Err(MoveParseError::UnknownPiece('K'))));
    assert!(matches!(state.parse_move("Nh9"), Err(MoveParseError::OffBoard(_))));
    assert!(matches!(state.parse_move(""), Err(MoveParseError::Malformed(_))));
    assert!("--".parse::<Move>().is_err());
}
