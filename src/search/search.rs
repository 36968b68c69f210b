//! Main search engine implementation for lacuna
//!
//! Negamax alpha-beta over the transposition table, driven by MTD(f)
//! null-window passes inside an iterative-deepening loop.

use super::params::SearchParams;
use super::stats::SearchStats;
use super::tt::TranspositionTable;
use crate::board::{BoardState, Move};
use crate::eval::{self, LOSS};

pub use super::tt::INFINITE;

/// Progress report after each completed iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchInfo {
    pub depth: u8,
    pub value: i16,
    pub best_move: Option<Move>,
    /// Moves until mate, for either side, when the value is a forced result.
    pub mate_in: Option<u8>,
    pub nodes: u64,
}

/// Number of moves to mate encoded in `value`, found by a search of `depth`
/// plies with `extension_budget` extra plies.
pub fn mate_in(value: i16, depth: u8, extension_budget: u8) -> Option<u8> {
    let distance = (value as i32).abs() - LOSS as i32;
    if distance < 0 {
        return None;
    }
    let plies = (depth as i32 + extension_budget as i32) - distance;
    Some(((plies + 1) / 2).clamp(0, u8::MAX as i32) as u8)
}

/// Main search engine
pub struct Search {
    /// Transposition table for caching
    tt: TranspositionTable,

    /// Search parameters
    params: SearchParams,

    /// Search statistics
    stats: SearchStats,
}

impl Search {
    /// Create new search engine with a table of `params.tt_entries` slots
    pub fn new(params: SearchParams) -> Self {
        Self {
            tt: TranspositionTable::new(params.tt_entries),
            params,
            stats: SearchStats::new(),
        }
    }

    pub fn params(&self) -> &SearchParams {
        &self.params
    }

    /// Get search statistics
    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    pub fn tt(&self) -> &TranspositionTable {
        &self.tt
    }

    /// Forget everything learned so far
    pub fn clear(&mut self) {
        self.tt.clear();
        self.stats.reset();
    }

    /// Best move for the side to move, searching `depth` plies.
    pub fn best_move(&mut self, state: &BoardState, depth: u8) -> Option<Move> {
        self.best_move_with(state, depth, |_| {})
    }

    /// Like [`Search::best_move`], reporting every completed iteration.
    ///
    /// Iterates over even depths up to `depth` (a single iteration at depth
    /// one when `depth < 2`). The table is cleared first, so repeated calls
    /// on the same state give the same move.
    pub fn best_move_with<F>(
        &mut self,
        state: &BoardState,
        depth: u8,
        mut on_iteration: F,
    ) -> Option<Move>
    where
        F: FnMut(&SearchInfo),
    {
        let moves = state.generate_moves();
        match moves.len() {
            0 => return None,
            1 => return Some(moves[0]),
            _ => {}
        }

        self.clear();
        self.stats.start_timing();

        let root = state.fingerprint();
        let mut best = moves[0];
        let mut guess = 0;

        let iterations: Vec<u8> = if depth < 2 {
            vec![1]
        } else {
            (2..=depth).step_by(2).collect()
        };

        for d in iterations {
            guess = self.mtdf(state, guess, d);

            match self.tt.best_move(root) {
                Some(mv) => best = mv,
                None => log::warn!("root entry evicted at depth {d}, keeping {best}"),
            }

            let info = SearchInfo {
                depth: d,
                value: guess,
                best_move: Some(best),
                mate_in: mate_in(guess, d, self.params.extension_budget),
                nodes: self.stats.nodes,
            };
            log::debug!(
                "depth {} value {} best {} nodes {}{}",
                info.depth,
                info.value,
                best,
                info.nodes,
                info.mate_in.map(|n| format!(" mate in {n}")).unwrap_or_default()
            );
            on_iteration(&info);
        }

        self.stats.update_timing();
        self.stats.log_summary();
        log::debug!("tt fill {}‰ of {} slots", self.tt.fill_permille(), self.tt.size());
        Some(best)
    }

    /// MTD(f): converge on the value at `depth` with null-window searches
    /// starting from `guess`. The table is kept between passes.
    pub fn mtdf(&mut self, state: &BoardState, guess: i16, depth: u8) -> i16 {
        let mut g = guess;
        let mut lower = -INFINITE;
        let mut upper = INFINITE;
        let mut passes = 0;

        while lower < upper {
            if passes == self.params.max_mtdf_passes {
                log::warn!(
                    "mtdf gave up after {passes} passes at depth {depth} (bounds {lower}..{upper})"
                );
                break;
            }
            passes += 1;
            self.stats.mtdf_passes += 1;

            let beta = if g == lower { g + 1 } else { g };
            g = self.alpha_beta(state, depth, beta - 1, beta);
            if g < beta {
                upper = g;
            } else {
                lower = g;
            }
        }
        g
    }

    /// Root alpha-beta search with window `(alpha, beta)`.
    ///
    /// The root gets the full extension budget; each branch spends its own copy.
    pub fn alpha_beta(&mut self, state: &BoardState, depth: u8, alpha: i16, beta: i16) -> i16 {
        self.stats.root_searches += 1;
        let ext = self.params.extension_budget as i16;
        self.negamax(state, depth as i16, ext, alpha, beta)
    }

    /// Fail-soft negamax with memory
    ///
    /// `ext` is the extension budget left on this path.
    fn negamax(
        &mut self,
        state: &BoardState,
        mut depth: i16,
        mut ext: i16,
        mut alpha: i16,
        mut beta: i16,
    ) -> i16 {
        self.stats.inc_node();

        let fp = state.fingerprint();
        let mut best_move = Move::NONE;

        if let Some(entry) = self.tt.probe(fp) {
            self.stats.inc_tt_hit();
            if entry.depth >= depth {
                let (lower, upper) = entry.bound();
                if lower >= beta {
                    self.stats.inc_tt_cutoff();
                    return lower;
                }
                if upper <= alpha {
                    self.stats.inc_tt_cutoff();
                    return upper;
                }
                alpha = alpha.max(lower);
                beta = beta.min(upper);
            }
            best_move = entry.best_move;
        }

        if depth == 0
            && (state.royal_attacked() || state.royal_attacked_prev())
            && ext >= 2
        {
            depth += 2;
            ext -= 2;
            self.stats.inc_extension();
        }

        let mut g = -INFINITE;
        if depth > 0 {
            let mut a = alpha;
            let remembered = best_move;

            // the remembered move goes first and may save move generation
            if !remembered.is_none() {
                g = -self.negamax(&state.perform(remembered), depth - 1, ext, -beta, -a);
                if g > a {
                    a = g;
                }
            }

            if g < beta {
                for &mv in &state.generate_moves() {
                    if mv == remembered {
                        continue;
                    }
                    let v = -self.negamax(&state.perform(mv), depth - 1, ext, -beta, -a);
                    if v > g {
                        g = v;
                        if g > a {
                            a = g;
                            best_move = mv;
                        }
                    }
                    if g >= beta {
                        break;
                    }
                }
            }
            if g >= beta {
                self.stats.inc_cutoff();
            }
        }

        // leaf, or no legal move
        if g == -INFINITE {
            g = eval::evaluate(state);
            if eval::is_loss(g) {
                g -= depth + ext;
            }
        }

        self.tt.store(fp, depth, g, alpha, beta, best_move);
        g
    }
}

impl Default for Search {
    fn default() -> Self {
        Self::new(SearchParams::default())
    }
}
