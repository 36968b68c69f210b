mod common;

use lacuna::board::{BoardState, Move, PieceKind};
use lacuna::eval::{evaluate, is_loss, DRAW, LOSS};
use lacuna::tables::cell_bit;

fn cornered_queen() -> BoardState {
    // rook a4 attacks the queen on a1, every step out of the corner is a hole
    BoardState::from_cells(
        [None, None, None, Some(0)],
        [None, None, Some(21), Some(41)],
        cell_bit(1) | cell_bit(7) | cell_bit(8),
    )
}

#[test]
fn attacked_without_moves_is_a_loss() {
    let state = cornered_queen();
    assert!(state.royal_attacked());
    assert!(state.is_game_over());
    assert_eq!(evaluate(&state), -LOSS);
    assert!(is_loss(evaluate(&state)));
}

#[test]
fn blocked_but_safe_is_a_draw() {
    // holes around the corner; every capture past them walks into an attack
    let state = BoardState::from_cells(
        [None, None, None, Some(0)],
        [Some(14), Some(2), Some(16), Some(48)],
        cell_bit(1) | cell_bit(7) | cell_bit(8),
    );
    assert!(!state.royal_attacked());
    assert!(state.is_game_over());
    assert_eq!(evaluate(&state), DRAW);
}

#[test]
fn captured_royal_is_a_loss() {
    let state = BoardState::from_cells(
        [Some(3), None, None, None],
        [None, None, None, Some(41)],
        0,
    );
    assert!(state.is_game_over());
    assert_eq!(evaluate(&state), -LOSS);
}

#[test]
fn evaluation_is_idempotent_and_bounded() {
    for state in common::random_states(17, 20, 40) {
        let score = evaluate(&state);
        assert_eq!(score, evaluate(&state));
        if state.is_game_over() {
            assert!(score == DRAW || score == -LOSS);
        } else {
            assert!(score.abs() < LOSS / 10, "heuristic score {score} too large");
        }
    }
}

#[test]
fn evaluation_follows_the_side_to_move() {
    // the mover is a rook up; after a quiet move the same material counts against
    let state = BoardState::from_cells(
        [None, None, Some(16), Some(24)],
        [None, None, None, Some(46)],
        0,
    );
    let next = state.perform(Move::new(PieceKind::Rook, 17));
    assert!(evaluate(&state) > 0);
    assert!(evaluate(&next) < 0);
}
