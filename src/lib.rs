pub mod board;
pub mod error;
pub mod eval;
pub mod hash;
pub mod movegen;
pub mod search;
pub mod tables;

pub use board::{BoardState, Move, PieceKind};
pub use error::{ConfigError, MoveParseError};
pub use search::{Search, SearchInfo, SearchParams};

/// Build the attack tables. Safe to call more than once; the tables are
/// also built lazily on first use.
pub fn init() {
    tables::init_attack_tables();
}
