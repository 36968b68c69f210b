// Cell mapping: a1 = 0, b1 = 1, ..., g1 = 6, a2 = 7, ..., g7 = 48.
// The side to move is always stored at index US; performing a move swaps the
// two sides, so there is no separate turn flag.

use std::fmt;
use std::str::FromStr;

use crate::error::MoveParseError;
use crate::tables::{self, cell_bit, BOARD_SIZE, NUM_CELLS, SENTINEL};

pub type BitBoard = u64;

/// Index of the side to move in [`BoardState`].
pub const US: usize = 0;
/// Index of the opponent in [`BoardState`].
pub const THEM: usize = 1;

const NO_CELL: i8 = -1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    Knight = 0,
    Bishop = 1,
    Rook = 2,
    Queen = 3,
}

impl PieceKind {
    pub const ALL: [PieceKind; 4] = [
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Rook,
        PieceKind::Queen,
    ];

    pub const NON_ROYAL: [PieceKind; 3] = [PieceKind::Knight, PieceKind::Bishop, PieceKind::Rook];

    /// The piece whose loss ends the game.
    pub const ROYAL: PieceKind = PieceKind::Queen;

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    #[inline]
    pub fn is_royal(self) -> bool {
        self == Self::ROYAL
    }

    pub fn symbol(self) -> char {
        match self {
            PieceKind::Knight => 'N',
            PieceKind::Bishop => 'B',
            PieceKind::Rook => 'R',
            PieceKind::Queen => 'Q',
        }
    }

    /// Piece for a letter, in either case.
    pub fn from_symbol(c: char) -> Option<PieceKind> {
        match c.to_ascii_uppercase() {
            'N' => Some(PieceKind::Knight),
            'B' => Some(PieceKind::Bishop),
            'R' => Some(PieceKind::Rook),
            'Q' => Some(PieceKind::Queen),
            _ => None,
        }
    }
}

// ============================================================================
// MOVES
// ============================================================================

/// A move packed into one byte: bits 0-1 piece kind, bits 2-7 destination.
///
/// The origin is implied, since each side owns exactly one piece of each kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move(u8);

impl Move {
    /// "No move". Never produced by move generation.
    pub const NONE: Move = Move(0xFF);

    #[inline]
    pub fn new(piece: PieceKind, to: usize) -> Self {
        debug_assert!(to < NUM_CELLS);
        Move(((to as u8) << 2) | piece as u8)
    }

    #[inline]
    pub fn piece(self) -> PieceKind {
        match self.0 & 3 {
            0 => PieceKind::Knight,
            1 => PieceKind::Bishop,
            2 => PieceKind::Rook,
            _ => PieceKind::Queen,
        }
    }

    #[inline]
    pub fn to_sq(self) -> usize {
        (self.0 >> 2) as usize
    }

    #[inline]
    pub fn is_none(self) -> bool {
        self == Self::NONE
    }

    #[inline]
    pub fn to_option(self) -> Option<Move> {
        if self.is_none() {
            None
        } else {
            Some(self)
        }
    }

    /// Raw packed byte.
    #[inline]
    pub fn raw(self) -> u8 {
        self.0
    }
}

/// Algebraic name of a cell, e.g. 0 -> "a1", 48 -> "g7".
pub fn cell_name(cell: usize) -> String {
    let file = (b'a' + (cell % BOARD_SIZE) as u8) as char;
    let rank = (b'1' + (cell / BOARD_SIZE) as u8) as char;
    format!("{}{}", file, rank)
}

/// Cell for an algebraic name such as "c3".
pub fn parse_cell(name: &str) -> Option<usize> {
    let bytes = name.as_bytes();
    if bytes.len() != 2 {
        return None;
    }
    let file = bytes[0].to_ascii_lowercase();
    let rank = bytes[1];
    let last_file = b'a' + BOARD_SIZE as u8 - 1;
    let last_rank = b'1' + BOARD_SIZE as u8 - 1;
    if !(b'a'..=last_file).contains(&file) || !(b'1'..=last_rank).contains(&rank) {
        return None;
    }
    Some((rank - b'1') as usize * BOARD_SIZE + (file - b'a') as usize)
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_none() {
            return write!(f, "--");
        }
        write!(f, "{}{}", self.piece().symbol(), cell_name(self.to_sq()))
    }
}

impl FromStr for Move {
    type Err = MoveParseError;

    /// Parse notation like "Nc3" (piece letter in either case).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let mut chars = s.chars();
        let letter = chars
            .next()
            .ok_or_else(|| MoveParseError::Malformed(s.to_string()))?;
        let piece = PieceKind::from_symbol(letter).ok_or(MoveParseError::UnknownPiece(letter))?;
        let rest = chars.as_str();
        if rest.len() != 2 {
            return Err(MoveParseError::Malformed(s.to_string()));
        }
        let to = parse_cell(rest).ok_or_else(|| MoveParseError::OffBoard(rest.to_string()))?;
        Ok(Move::new(piece, to))
    }
}

// ============================================================================
// BOARD STATE
// ============================================================================

/// Snapshot of one position. Cheap to copy; successors are new values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BoardState {
    holes: BitBoard,
    /// Cell of each piece, `[side][piece]`, -1 when eliminated.
    pos: [[i8; 4]; 2],
    royal_attacked: bool,
    royal_attacked_prev: bool,
    last_move: Move,
}

/// Piece placement before the sides are swapped, plus whether a non-royal
/// exchange took place.
type Placement = ([[i8; 4]; 2], bool);

impl BoardState {
    /// Starting position: b2/d2/c3/c2 against f6/d6/e5/e6, no holes.
    pub fn initial() -> Self {
        BoardState {
            holes: 0,
            pos: [[8, 10, 16, 9], [40, 38, 32, 39]],
            royal_attacked: false,
            royal_attacked_prev: false,
            last_move: Move::NONE,
        }
    }

    /// Build an arbitrary position, pieces given in [`PieceKind::ALL`] order.
    ///
    /// The attack flag is computed; the previous-ply flag and last move are clear.
    pub fn from_cells(us: [Option<usize>; 4], them: [Option<usize>; 4], holes: BitBoard) -> Self {
        let encode = |cell: Option<usize>| match cell {
            Some(c) => {
                debug_assert!(c < NUM_CELLS);
                c as i8
            }
            None => NO_CELL,
        };
        let pos = [us.map(encode), them.map(encode)];
        debug_assert!(
            {
                let cells: Vec<i8> = pos.iter().flatten().copied().filter(|&c| c >= 0).collect();
                let mut dedup = cells.clone();
                dedup.sort_unstable();
                dedup.dedup();
                dedup.len() == cells.len()
            },
            "two pieces share a cell"
        );
        BoardState {
            holes: holes & ((1u64 << NUM_CELLS) - 1),
            pos,
            royal_attacked: royal_attacked_in(&pos, US, &PieceKind::NON_ROYAL),
            royal_attacked_prev: false,
            last_move: Move::NONE,
        }
    }

    #[inline]
    pub fn holes(&self) -> BitBoard {
        self.holes
    }

    #[inline]
    pub fn is_hole(&self, cell: usize) -> bool {
        self.holes & cell_bit(cell) != 0
    }

    /// Cell of a piece, `None` once it has been eliminated.
    #[inline]
    pub fn piece_cell(&self, side: usize, piece: PieceKind) -> Option<usize> {
        to_cell(self.pos[side][piece.index()])
    }

    /// Whether the side to move has its royal piece under attack.
    #[inline]
    pub fn royal_attacked(&self) -> bool {
        self.royal_attacked
    }

    /// The attack flag of the previous ply (the opponent's, before its move).
    #[inline]
    pub fn royal_attacked_prev(&self) -> bool {
        self.royal_attacked_prev
    }

    /// Move that may not be played now, set after an exchange.
    #[inline]
    pub fn last_move(&self) -> Option<Move> {
        self.last_move.to_option()
    }

    #[inline]
    pub(crate) fn forbidden_move(&self) -> Move {
        self.last_move
    }

    /// All cells occupied by one side's pieces.
    #[inline]
    pub fn side_mask(&self, side: usize) -> BitBoard {
        side_mask(&self.pos, side, &PieceKind::ALL)
    }

    /// Cells occupied by one side's non-royal pieces.
    #[inline]
    pub fn non_royal_mask(&self, side: usize) -> BitBoard {
        side_mask(&self.pos, side, &PieceKind::NON_ROYAL)
    }

    /// Whether `side`'s royal piece is attacked by the other side's non-royal
    /// pieces. An eliminated royal piece counts as attacked.
    pub fn is_attacked(&self, side: usize) -> bool {
        royal_attacked_in(&self.pos, side, &PieceKind::NON_ROYAL)
    }

    /// Placement after `mv`, still from the mover's point of view.
    ///
    /// An opposing piece on the destination is moved to the cell the mover
    /// left, unless either piece is royal, in which case it is eliminated.
    pub(crate) fn relocate(&self, mv: Move) -> Placement {
        let mut pos = self.pos;
        let piece = mv.piece();
        let to = mv.to_sq() as i8;
        let from = pos[US][piece.index()];
        let mut exchanged = false;
        for kind in PieceKind::ALL {
            let other = &mut pos[THEM][kind.index()];
            if *other == to {
                if piece.is_royal() || kind.is_royal() {
                    *other = NO_CELL;
                } else {
                    *other = from;
                    exchanged = true;
                }
            }
        }
        pos[US][piece.index()] = to;
        (pos, exchanged)
    }

    /// Whether `mv` would leave the mover's royal piece on an attacked cell.
    ///
    /// Unlike [`BoardState::royal_attacked`], the opposing royal piece counts
    /// as an attacker here: the two royal pieces may never face each other on
    /// an open line.
    pub(crate) fn exposes_royal(&self, mv: Move) -> bool {
        let (pos, _) = self.relocate(mv);
        royal_attacked_in(&pos, US, &PieceKind::ALL)
    }

    /// Successor position with the sides swapped.
    pub fn perform(&self, mv: Move) -> BoardState {
        debug_assert!(!mv.is_none());
        let piece = mv.piece();
        let to = mv.to_sq();
        let from = self.pos[US][piece.index()];
        debug_assert!(from >= 0, "moving an eliminated piece: {mv}");
        let from = from as usize;

        let mut holes = self.holes;
        if piece.is_royal() {
            holes |= cell_bit(from);
        } else if holes & cell_bit(to) != 0 {
            holes ^= cell_bit(to) | cell_bit(from);
        }

        let (placed, exchanged) = self.relocate(mv);
        let pos = [placed[THEM], placed[US]];

        BoardState {
            holes,
            pos,
            royal_attacked: royal_attacked_in(&pos, US, &PieceKind::NON_ROYAL),
            royal_attacked_prev: self.royal_attacked,
            last_move: if exchanged { mv } else { Move::NONE },
        }
    }

    /// Parse a move and check that it is legal here.
    pub fn parse_move(&self, notation: &str) -> Result<Move, MoveParseError> {
        let mv: Move = notation.parse()?;
        if self.generate_moves().contains(mv) {
            Ok(mv)
        } else {
            Err(MoveParseError::Illegal(notation.trim().to_string()))
        }
    }

    /// Canonical byte image: holes (LE), cells, flags, last move.
    pub(crate) fn to_bytes(&self) -> [u8; 19] {
        let mut bytes = [0u8; 19];
        bytes[..8].copy_from_slice(&self.holes.to_le_bytes());
        for (i, &cell) in self.pos.iter().flatten().enumerate() {
            bytes[8 + i] = cell as u8;
        }
        bytes[16] = self.royal_attacked as u8;
        bytes[17] = self.royal_attacked_prev as u8;
        bytes[18] = self.last_move.raw();
        bytes
    }
}

#[inline]
fn to_cell(cell: i8) -> Option<usize> {
    if cell >= 0 {
        Some(cell as usize)
    } else {
        None
    }
}

#[inline]
fn side_mask(pos: &[[i8; 4]; 2], side: usize, kinds: &[PieceKind]) -> BitBoard {
    kinds
        .iter()
        .filter_map(|k| to_cell(pos[side][k.index()]))
        .fold(0, |mask, cell| mask | cell_bit(cell))
}

/// Occupancy that obstructs attack rays: the sentinel plus every non-royal
/// piece. Royal pieces do not block.
#[inline]
fn blocking_occupancy(pos: &[[i8; 4]; 2]) -> BitBoard {
    SENTINEL
        | side_mask(pos, US, &PieceKind::NON_ROYAL)
        | side_mask(pos, THEM, &PieceKind::NON_ROYAL)
}

/// Whether `defender`'s royal piece is attacked by any of `attackers` of the
/// other side. A missing royal piece counts as attacked.
pub(crate) fn royal_attacked_in(
    pos: &[[i8; 4]; 2],
    defender: usize,
    attackers: &[PieceKind],
) -> bool {
    let Some(royal) = to_cell(pos[defender][PieceKind::ROYAL.index()]) else {
        return true;
    };
    let t = tables::tables();
    let occupancy = blocking_occupancy(pos);
    let enemy = 1 - defender;
    attackers
        .iter()
        .any(|&kind| t.attacks(kind, to_cell(pos[enemy][kind.index()]), royal, occupancy))
}

impl fmt::Display for BoardState {
    /// Seven rows from rank 7 down, holes as `*`, side to move in upper case.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut grid = [['.'; BOARD_SIZE]; BOARD_SIZE];
        for cell in 0..NUM_CELLS {
            if self.is_hole(cell) {
                grid[cell / BOARD_SIZE][cell % BOARD_SIZE] = '*';
            }
        }
        for side in [US, THEM] {
            for kind in PieceKind::ALL {
                if let Some(cell) = self.piece_cell(side, kind) {
                    let symbol = kind.symbol();
                    grid[cell / BOARD_SIZE][cell % BOARD_SIZE] = if side == US {
                        symbol
                    } else {
                        symbol.to_ascii_lowercase()
                    };
                }
            }
        }
        for row in (0..BOARD_SIZE).rev() {
            write!(f, "{}", row + 1)?;
            for c in grid[row] {
                write!(f, "{}", c)?;
            }
            writeln!(f)?;
        }
        write!(f, " ")?;
        for col in 0..BOARD_SIZE {
            write!(f, "{}", (b'A' + col as u8) as char)?;
        }
        writeln!(f)
    }
}
