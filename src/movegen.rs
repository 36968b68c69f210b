//! Legal move generation
//!
//! Every piece walks its precomputed rays from its current cell. A ray stops
//! at the first occupied cell: an own piece is never a destination, an
//! opposing piece is (the move exchanges or eliminates it). Candidates are
//! then filtered for holes, for royal safety and for the anti-oscillation
//! rule.

use std::ops::Deref;

use crate::board::{BoardState, Move, PieceKind, THEM, US};
use crate::tables::{self, cell_bit};

/// Upper bound on legal moves in any position: 24 + 12 + 12 + 8.
pub const MAX_MOVES: usize = 56;

/// Fixed-capacity move list, filled without heap allocation.
#[derive(Clone)]
pub struct MoveList {
    moves: [Move; MAX_MOVES],
    len: usize,
}

impl MoveList {
    pub fn new() -> Self {
        Self {
            moves: [Move::NONE; MAX_MOVES],
            len: 0,
        }
    }

    #[inline]
    pub fn push(&mut self, mv: Move) {
        debug_assert!(self.len < MAX_MOVES, "move list overflow");
        self.moves[self.len] = mv;
        self.len += 1;
    }

    #[inline]
    pub fn as_slice(&self) -> &[Move] {
        &self.moves[..self.len]
    }

    #[inline]
    pub fn contains(&self, mv: Move) -> bool {
        self.as_slice().contains(&mv)
    }
}

impl Default for MoveList {
    fn default() -> Self {
        Self::new()
    }
}

impl Deref for MoveList {
    type Target = [Move];

    fn deref(&self) -> &[Move] {
        self.as_slice()
    }
}

impl<'a> IntoIterator for &'a MoveList {
    type Item = &'a Move;
    type IntoIter = std::slice::Iter<'a, Move>;

    fn into_iter(self) -> Self::IntoIter {
        self.as_slice().iter()
    }
}

impl std::fmt::Debug for MoveList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.as_slice()).finish()
    }
}

impl BoardState {
    /// All legal moves for the side to move, in table order.
    pub fn generate_moves(&self) -> MoveList {
        let mut list = MoveList::new();
        if self.piece_cell(US, PieceKind::ROYAL).is_none() {
            return list;
        }

        let t = tables::tables();
        let own = self.side_mask(US);
        let enemy = self.side_mask(THEM);
        let forbidden = self.forbidden_move();

        for piece in PieceKind::ALL {
            let Some(origin) = self.piece_cell(US, piece) else {
                continue;
            };
            // while attacked, the royal piece only steps one cell
            let single_step = piece.is_royal() && self.royal_attacked();

            for ray in t.rays(piece, origin) {
                for &cell in ray.iter() {
                    let cell = cell as usize;
                    let bit = cell_bit(cell);
                    if own & bit != 0 {
                        break;
                    }
                    if !(piece.is_royal() && self.holes() & bit != 0) {
                        let mv = Move::new(piece, cell);
                        if mv != forbidden && !self.exposes_royal(mv) {
                            list.push(mv);
                        }
                    }
                    if enemy & bit != 0 || single_step {
                        break;
                    }
                }
            }
        }
        list
    }

    /// Number of legal moves.
    #[inline]
    pub fn count_moves(&self) -> usize {
        self.generate_moves().len()
    }

    /// True when the side to move has no legal move.
    #[inline]
    pub fn is_game_over(&self) -> bool {
        self.generate_moves().is_empty()
    }
}

/// Leaf count of the legal move tree.
pub fn perft(state: &BoardState, depth: u8) -> u64 {
    if depth == 0 {
        return 1;
    }
    let moves = state.generate_moves();
    if depth == 1 {
        return moves.len() as u64;
    }
    moves
        .iter()
        .map(|&mv| perft(&state.perform(mv), depth - 1))
        .sum()
}

/// Per-move leaf counts at the root.
pub fn perft_divide(state: &BoardState, depth: u8) -> Vec<(Move, u64)> {
    state
        .generate_moves()
        .iter()
        .map(|&mv| (mv, perft(&state.perform(mv), depth.saturating_sub(1))))
        .collect()
}
