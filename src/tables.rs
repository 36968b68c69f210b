//! Precomputed ray lists and blocking masks for the 7x7 board
//!
//! The tables are built once and only read afterwards. Two structures are kept:
//!
//! - for every piece kind and origin cell, the rays the piece can travel along,
//!   each ray ordered outward from the origin (a knight jump is a ray of one);
//! - for every (target, piece kind, origin) triple, the cells strictly between
//!   origin and target along a ray of that piece, or [`SENTINEL`] when the
//!   piece cannot reach the target at all.
//!
//! With these, "does piece P on X attack cell T given occupancy O" becomes a
//! single test: `O & between(T, P, X) == 0`, where `O` always contains the
//! sentinel bit.

use std::sync::OnceLock;

use crate::board::{BitBoard, PieceKind};

/// Width and height of the board.
pub const BOARD_SIZE: usize = 7;

/// Number of cells on the board.
pub const NUM_CELLS: usize = BOARD_SIZE * BOARD_SIZE;

/// Synthetic cell outside the board that is always occupied.
pub const SENTINEL: BitBoard = 1 << 50;

// ============================================================================
// DIRECTIONS
// ============================================================================

const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (2, 1),
    (1, 2),
    (2, -1),
    (-1, 2),
    (-2, 1),
    (1, -2),
    (-2, -1),
    (-1, -2),
];

const ORTHOGONAL: [(i8, i8); 4] = [(1, 0), (0, 1), (-1, 0), (0, -1)];

const DIAGONAL: [(i8, i8); 4] = [(1, 1), (-1, 1), (-1, -1), (1, -1)];

const ALL_DIRECTIONS: [(i8, i8); 8] = [
    (1, 0),
    (1, 1),
    (0, 1),
    (-1, 1),
    (-1, 0),
    (-1, -1),
    (0, -1),
    (1, -1),
];

fn directions(piece: PieceKind) -> &'static [(i8, i8)] {
    match piece {
        PieceKind::Knight => &KNIGHT_OFFSETS,
        PieceKind::Bishop => &DIAGONAL,
        PieceKind::Rook => &ORTHOGONAL,
        PieceKind::Queen => &ALL_DIRECTIONS,
    }
}

// ============================================================================
// CELL HELPERS
// ============================================================================

/// Single-bit mask for a cell.
#[inline]
pub fn cell_bit(cell: usize) -> BitBoard {
    debug_assert!(cell < NUM_CELLS, "cell {cell} is off the board");
    1 << cell
}

/// Cell index for a (row, column) pair, if it lies on the board.
#[inline]
pub fn cell_at(row: i8, col: i8) -> Option<usize> {
    let size = BOARD_SIZE as i8;
    if (0..size).contains(&row) && (0..size).contains(&col) {
        Some(row as usize * BOARD_SIZE + col as usize)
    } else {
        None
    }
}

/// (row, column) of a cell.
#[inline]
pub fn row_col(cell: usize) -> (i8, i8) {
    ((cell / BOARD_SIZE) as i8, (cell % BOARD_SIZE) as i8)
}

// ============================================================================
// ATTACK TABLES
// ============================================================================

/// Ray lists and blocking masks for every piece kind.
pub struct AttackTables {
    /// Rays per `piece * NUM_CELLS + origin`.
    rays: Vec<Vec<Box<[u8]>>>,
    /// Between-masks per `(target * 4 + piece) * NUM_CELLS + origin`.
    between: Vec<BitBoard>,
    /// Cells on the outer ring of the board.
    edge: BitBoard,
}

impl AttackTables {
    /// Build all tables from scratch.
    pub fn new() -> Self {
        let mut rays = Vec::with_capacity(PieceKind::ALL.len() * NUM_CELLS);
        for piece in PieceKind::ALL {
            for origin in 0..NUM_CELLS {
                rays.push(build_rays(piece, origin));
            }
        }

        let mut between = vec![SENTINEL; NUM_CELLS * PieceKind::ALL.len() * NUM_CELLS];
        for piece in PieceKind::ALL {
            for origin in 0..NUM_CELLS {
                for ray in &rays[piece.index() * NUM_CELLS + origin] {
                    let mut passed = 0;
                    for &cell in ray.iter() {
                        between[between_index(cell as usize, piece, origin)] = passed;
                        passed |= cell_bit(cell as usize);
                    }
                }
            }
        }

        let edge = (0..NUM_CELLS)
            .filter(|&cell| {
                let (row, col) = row_col(cell);
                let last = BOARD_SIZE as i8 - 1;
                row == 0 || col == 0 || row == last || col == last
            })
            .fold(0, |mask, cell| mask | cell_bit(cell));

        Self {
            rays,
            between,
            edge,
        }
    }

    /// Rays of `piece` starting next to `origin`, each ordered outward.
    #[inline]
    pub fn rays(&self, piece: PieceKind, origin: usize) -> &[Box<[u8]>] {
        &self.rays[piece.index() * NUM_CELLS + origin]
    }

    /// Cells strictly between `origin` and `target` along a ray of `piece`.
    ///
    /// Returns [`SENTINEL`] when the piece is absent or cannot reach the target,
    /// so that the mask always intersects the occupancy.
    #[inline]
    pub fn between(&self, target: usize, piece: PieceKind, origin: Option<usize>) -> BitBoard {
        match origin {
            Some(origin) => self.between[between_index(target, piece, origin)],
            None => SENTINEL,
        }
    }

    /// True if `piece` standing on `origin` attacks `target` given `occupancy`.
    #[inline]
    pub fn attacks(
        &self,
        piece: PieceKind,
        origin: Option<usize>,
        target: usize,
        occupancy: BitBoard,
    ) -> bool {
        occupancy & self.between(target, piece, origin) == 0
    }

    /// Mask of the 24 edge cells.
    #[inline]
    pub fn edge_cells(&self) -> BitBoard {
        self.edge
    }
}

impl Default for AttackTables {
    fn default() -> Self {
        Self::new()
    }
}

#[inline]
fn between_index(target: usize, piece: PieceKind, origin: usize) -> usize {
    (target * PieceKind::ALL.len() + piece.index()) * NUM_CELLS + origin
}

fn build_rays(piece: PieceKind, origin: usize) -> Vec<Box<[u8]>> {
    let (row, col) = row_col(origin);
    let mut rays = Vec::new();
    for &(dr, dc) in directions(piece) {
        let mut ray = Vec::new();
        let (mut r, mut c) = (row + dr, col + dc);
        while let Some(cell) = cell_at(r, c) {
            ray.push(cell as u8);
            if piece == PieceKind::Knight {
                break;
            }
            r += dr;
            c += dc;
        }
        if !ray.is_empty() {
            rays.push(ray.into_boxed_slice());
        }
    }
    rays
}

static ATTACK_TABLES: OnceLock<AttackTables> = OnceLock::new();

/// Build the global tables if that has not happened yet.
pub fn init_attack_tables() {
    ATTACK_TABLES.get_or_init(AttackTables::new);
}

/// Global tables, built on first access.
#[inline]
pub fn tables() -> &'static AttackTables {
    ATTACK_TABLES.get_or_init(AttackTables::new)
}
