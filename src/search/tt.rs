//! Direct-mapped transposition table
//!
//! One entry per slot, indexed by the 32-bit half of the fingerprint and
//! verified by the 64-bit half. Each entry keeps a score window: an exact
//! score is stored as `lower == upper`.

use crate::board::Move;
use crate::hash::Fingerprint;

/// Scores beyond any reachable value.
pub const INFINITE: i16 = 30_000;

/// Single TT entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TTEntry {
    pub key: u64,
    pub depth: i16,
    pub lower: i16,
    pub upper: i16,
    pub best_move: Move,
}

impl TTEntry {
    /// Never matches a probe and is replaced by any store.
    pub const EMPTY: TTEntry = TTEntry {
        key: u64::MAX,
        depth: -1,
        lower: -INFINITE,
        upper: INFINITE,
        best_move: Move::NONE,
    };

    pub fn is_empty(&self) -> bool {
        self.depth < 0
    }

    /// Stored window as `(lower, upper)`.
    pub fn bound(&self) -> (i16, i16) {
        (self.lower, self.upper)
    }
}

/// Fixed-size transposition table
pub struct TranspositionTable {
    entries: Box<[TTEntry]>,
}

impl TranspositionTable {
    /// Create a table with `size` slots (at least one).
    pub fn new(size: usize) -> Self {
        Self {
            entries: vec![TTEntry::EMPTY; size.max(1)].into_boxed_slice(),
        }
    }

    #[inline]
    fn index(&self, fp: Fingerprint) -> usize {
        fp.minor as usize % self.entries.len()
    }

    /// Entry stored for this position, at any depth.
    #[inline]
    pub fn probe(&self, fp: Fingerprint) -> Option<&TTEntry> {
        let entry = &self.entries[self.index(fp)];
        (entry.key == fp.major && !entry.is_empty()).then_some(entry)
    }

    /// Remembered best move for this position, if any.
    #[inline]
    pub fn best_move(&self, fp: Fingerprint) -> Option<Move> {
        self.probe(fp).and_then(|e| e.best_move.to_option())
    }

    /// Store the result of a search with window `(alpha, beta)`.
    ///
    /// Replaces the slot only when `depth` is at least the depth already
    /// stored there, whatever position that entry belongs to.
    pub fn store(
        &mut self,
        fp: Fingerprint,
        depth: i16,
        score: i16,
        alpha: i16,
        beta: i16,
        best_move: Move,
    ) {
        let index = self.index(fp);
        let slot = &mut self.entries[index];
        if depth < slot.depth {
            return;
        }
        let (lower, upper) = if score >= beta {
            (score, INFINITE)
        } else if score <= alpha {
            (-INFINITE, score)
        } else {
            (score, score)
        };
        *slot = TTEntry {
            key: fp.major,
            depth,
            lower,
            upper,
            best_move,
        };
    }

    pub fn clear(&mut self) {
        self.entries.fill(TTEntry::EMPTY);
    }

    pub fn size(&self) -> usize {
        self.entries.len()
    }

    /// Occupied slots per thousand, sampled over the first thousand slots.
    pub fn fill_permille(&self) -> usize {
        let sample = self.entries.len().min(1000);
        let used = self.entries[..sample].iter().filter(|e| !e.is_empty()).count();
        used * 1000 / sample
    }
}

impl Default for TranspositionTable {
    fn default() -> Self {
        Self::new(1 << 16)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::PieceKind;

    fn fp(major: u64, minor: u32) -> Fingerprint {
        Fingerprint { major, minor }
    }

    #[test]
    fn test_tt_basic_store_probe() {
        let mut tt = TranspositionTable::new(64);
        let mv = Move::new(PieceKind::Rook, 17);

        tt.store(fp(0x1111, 3), 3, 42, -100, 100, mv);

        let entry = tt.probe(fp(0x1111, 3)).expect("Entry should exist");
        assert_eq!(entry.bound(), (42, 42));
        assert_eq!(entry.depth, 3);
        assert_eq!(tt.best_move(fp(0x1111, 3)), Some(mv));

        // same slot, different position
        assert!(tt.probe(fp(0x9999, 3)).is_none());
        assert!(tt.probe(fp(0x1111, 4)).is_none());
    }

    #[test]
    fn test_tt_window_classification() {
        let mut tt = TranspositionTable::new(64);

        tt.store(fp(1, 1), 2, 50, 10, 50, Move::NONE);
        let entry = tt.probe(fp(1, 1)).expect("Entry should exist");
        assert_eq!(entry.bound(), (50, INFINITE));

        tt.store(fp(2, 2), 2, 10, 10, 50, Move::NONE);
        let entry = tt.probe(fp(2, 2)).expect("Entry should exist");
        assert_eq!(entry.bound(), (-INFINITE, 10));
        assert_eq!(tt.best_move(fp(2, 2)), None);
    }

    #[test]
    fn test_tt_replacement_depth_priority() {
        let mut tt = TranspositionTable::new(16);

        tt.store(fp(0x5678, 5), 10, 100, -INFINITE, INFINITE, Move::NONE);

        // shallower result for the same position is dropped
        tt.store(fp(0x5678, 5), 5, 200, -INFINITE, INFINITE, Move::NONE);
        let entry = tt.probe(fp(0x5678, 5)).expect("Entry should exist");
        assert_eq!(entry.depth, 10, "Deep entry should not be replaced by shallow");
        assert_eq!(entry.lower, 100);

        // equal depth replaces
        tt.store(fp(0x5678, 5), 10, 300, -INFINITE, INFINITE, Move::NONE);
        assert_eq!(tt.probe(fp(0x5678, 5)).map(|e| e.lower), Some(300));

        // a colliding position at greater depth evicts it
        tt.store(fp(0xABCD, 21), 11, 7, -INFINITE, INFINITE, Move::NONE);
        assert!(tt.probe(fp(0x5678, 5)).is_none());
        assert!(tt.probe(fp(0xABCD, 21)).is_some());
    }

    #[test]
    fn test_tt_clear() {
        let mut tt = TranspositionTable::new(8);
        for i in 0..8u32 {
            tt.store(fp(i as u64, i), 1, 0, -1, 1, Move::NONE);
        }
        assert_eq!(tt.fill_permille(), 1000);
        tt.clear();
        assert_eq!(tt.fill_permille(), 0);
        assert!(tt.probe(fp(0, 0)).is_none());
        // depth zero still beats the empty marker
        tt.store(fp(3, 3), 0, 0, -1, 1, Move::NONE);
        assert!(tt.probe(fp(3, 3)).is_some());
    }
}
