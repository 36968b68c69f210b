//! Search statistics and performance metrics
//!
//! Tracks nodes searched, cutoffs, table usage and timing for one move
//! decision.

use std::time::{Duration, Instant};

/// Search statistics
#[derive(Debug, Default, Clone)]
pub struct SearchStats {
    /// Total nodes searched
    pub nodes: u64,

    /// Root alpha-beta calls (one per MTD(f) pass)
    pub root_searches: u64,

    /// Probes that found an entry for the position
    pub tt_hits: u64,

    /// Probes that returned a bound without searching
    pub tt_cutoffs: u64,

    /// Beta cutoffs
    pub cutoffs: u64,

    /// Extensions granted
    pub extensions: u64,

    /// Null-window passes over all iterations
    pub mtdf_passes: u64,

    /// Search start time
    pub start_time: Option<Instant>,

    /// Time spent searching
    pub search_time: Duration,

    /// Nodes per second rate
    pub nps: u64,
}

impl SearchStats {
    /// Create new empty stats
    pub fn new() -> Self {
        Self::default()
    }

    /// Start timing
    pub fn start_timing(&mut self) {
        self.start_time = Some(Instant::now());
    }

    /// Update elapsed time and calculate NPS
    pub fn update_timing(&mut self) {
        if let Some(start) = self.start_time {
            self.search_time = start.elapsed();
            let elapsed_ms = self.search_time.as_millis() as u64;
            if elapsed_ms > 0 {
                self.nps = (self.nodes * 1000) / elapsed_ms;
            }
        }
    }

    #[inline]
    pub fn inc_node(&mut self) {
        self.nodes += 1;
    }

    #[inline]
    pub fn inc_tt_hit(&mut self) {
        self.tt_hits += 1;
    }

    #[inline]
    pub fn inc_tt_cutoff(&mut self) {
        self.tt_cutoffs += 1;
    }

    #[inline]
    pub fn inc_cutoff(&mut self) {
        self.cutoffs += 1;
    }

    #[inline]
    pub fn inc_extension(&mut self) {
        self.extensions += 1;
    }

    /// Reset all statistics
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Percentage of probes that found an entry.
    pub fn tt_hit_rate(&self) -> f64 {
        if self.nodes > 0 {
            (self.tt_hits as f64 / self.nodes as f64) * 100.0
        } else {
            0.0
        }
    }

    /// Emit the summary at debug level
    pub fn log_summary(&self) {
        log::debug!(
            "search: {} nodes in {} ms ({} nps), {} root searches, {} mtdf passes",
            self.nodes,
            self.search_time.as_millis(),
            self.nps,
            self.root_searches,
            self.mtdf_passes
        );
        log::debug!(
            "search: tt hits {} ({:.1}%), tt cutoffs {}, beta cutoffs {}, extensions {}",
            self.tt_hits,
            self.tt_hit_rate(),
            self.tt_cutoffs,
            self.cutoffs,
            self.extensions
        );
    }
}
