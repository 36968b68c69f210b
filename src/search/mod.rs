//! Search engine for lacuna
//!
//! Transposition table, parameters, statistics and the MTD(f) driver.

pub mod params;
pub mod search;
pub mod stats;
pub mod tt;

pub use self::params::SearchParams;
pub use self::search::{Search, SearchInfo};
pub use self::stats::SearchStats;
pub use self::tt::TranspositionTable;
pub use crate::board::Move;
