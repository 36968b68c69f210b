//! Static evaluation
//!
//! Scores are always from the point of view of the side to move. Heuristic
//! scores stay far below [`LOSS`] in magnitude.

use crate::board::{BoardState, PieceKind, THEM, US};
use crate::tables;

// ============================================================================
// SCORES
// ============================================================================

/// Score of a side that has no legal move while attacked.
pub const LOSS: i16 = 10_000;

/// Score of a side that has no legal move while not attacked.
pub const DRAW: i16 = 0;

/// Knight, bishop, rook.
const MATERIAL: [i16; 3] = [30, 20, 40];

const BISHOP_ALIGNMENT: i16 = 2;
const PINNED_PIECE: i16 = 2;
const ROYAL_ON_EDGE: i16 = 3;

/// True for a terminal loss score.
#[inline]
pub fn is_loss(score: i16) -> bool {
    score <= -LOSS
}

/// Score for a position without legal moves.
#[inline]
pub fn terminal_score(state: &BoardState) -> i16 {
    if state.royal_attacked() {
        -LOSS
    } else {
        DRAW
    }
}

/// Full static evaluation.
pub fn evaluate(state: &BoardState) -> i16 {
    let moves = state.count_moves();
    if moves == 0 {
        return terminal_score(state);
    }

    (moves / 2) as i16
        + material_balance(state)
        + bishop_alignment(state)
        + pinned_pieces(state)
        + royal_placement(state)
}

/// Weighted non-royal pieces of the side to move minus the opponent's.
pub fn material_balance(state: &BoardState) -> i16 {
    PieceKind::NON_ROYAL
        .iter()
        .zip(MATERIAL)
        .map(|(&kind, value)| {
            let ours = state.piece_cell(US, kind).is_some() as i16;
            let theirs = state.piece_cell(THEM, kind).is_some() as i16;
            value * (ours - theirs)
        })
        .sum()
}

// A bishop can only ever reach the royal piece standing on its own colour.
// With an odd board width the cell index parity is the square colour.
fn bishop_alignment(state: &BoardState) -> i16 {
    let same_colour = |bishop_side: usize, royal_side: usize| {
        match (
            state.piece_cell(bishop_side, PieceKind::Bishop),
            state.piece_cell(royal_side, PieceKind::ROYAL),
        ) {
            (Some(b), Some(r)) => (b & 1) == (r & 1),
            _ => false,
        }
    };
    let mut score = 0;
    if same_colour(US, THEM) {
        score += BISHOP_ALIGNMENT;
    }
    if same_colour(THEM, US) {
        score -= BISHOP_ALIGNMENT;
    }
    score
}

// Approximation: any non-royal piece on the open line between the two royal
// pieces counts as pinned, whatever actually stands behind it.
fn pinned_pieces(state: &BoardState) -> i16 {
    let Some(royal) = state.piece_cell(US, PieceKind::ROYAL) else {
        return 0;
    };
    let line = tables::tables().between(
        royal,
        PieceKind::ROYAL,
        state.piece_cell(THEM, PieceKind::ROYAL),
    );
    let mut score = 0;
    if state.non_royal_mask(US) & line != 0 {
        score -= PINNED_PIECE;
    }
    if state.non_royal_mask(THEM) & line != 0 {
        score += PINNED_PIECE;
    }
    score
}

fn royal_placement(state: &BoardState) -> i16 {
    let edge = tables::tables().edge_cells();
    let on_edge = |side: usize| {
        state
            .piece_cell(side, PieceKind::ROYAL)
            .is_some_and(|cell| edge & tables::cell_bit(cell) != 0)
    };
    let mut score = 0;
    if on_edge(US) {
        score -= ROYAL_ON_EDGE;
    }
    if on_edge(THEM) {
        score += ROYAL_ON_EDGE;
    }
    score
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Move;

    #[test]
    fn test_initial_material_is_even() {
        assert_eq!(material_balance(&BoardState::initial()), 0);
    }

    #[test]
    fn test_material_counts_for_side_to_move() {
        let s = BoardState::from_cells(
            [Some(0), None, Some(2), Some(24)],
            [None, None, None, Some(48)],
            0,
        );
        assert_eq!(material_balance(&s), 70);
        let s = BoardState::from_cells(
            [None, None, None, Some(24)],
            [Some(0), Some(3), None, Some(48)],
            0,
        );
        assert_eq!(material_balance(&s), -50);
    }

    #[test]
    fn test_initial_evaluation() {
        // 23 moves, bishops on the wrong colour, both queens off the edge
        let s = BoardState::initial();
        let moves = s.count_moves() as i16;
        assert_eq!(evaluate(&s), moves / 2);
    }

    #[test]
    fn test_evaluation_is_idempotent() {
        let s = BoardState::initial().perform(Move::new(PieceKind::Knight, 21));
        assert_eq!(evaluate(&s), evaluate(&s));
    }

    #[test]
    fn test_edge_penalty() {
        let centre = BoardState::from_cells(
            [None, None, None, Some(24)],
            [None, None, None, Some(48)],
            0,
        );
        let corner = BoardState::from_cells(
            [None, None, None, Some(0)],
            [None, None, None, Some(46)],
            0,
        );
        assert_eq!(royal_placement(&centre), ROYAL_ON_EDGE);
        assert_eq!(royal_placement(&corner), 0);
    }

    #[test]
    fn test_pinned_piece_between_royals() {
        // queens on a1 and d1, the knight on b1 sits on the line between them
        let s = BoardState::from_cells(
            [Some(1), None, None, Some(0)],
            [None, None, None, Some(3)],
            0,
        );
        assert_eq!(pinned_pieces(&s), -PINNED_PIECE);
        let s = BoardState::from_cells(
            [None, None, None, Some(0)],
            [None, Some(2), None, Some(3)],
            0,
        );
        assert_eq!(pinned_pieces(&s), PINNED_PIECE);
    }
}
