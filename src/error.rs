//! Error types for the edges of the engine: move notation and configuration.
//!
//! The search core itself has no recoverable errors.

use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MoveParseError {
    #[error("move must look like `Nc3`, got {0:?}")]
    Malformed(String),

    #[error("unknown piece letter {0:?} (expected one of N, B, R, Q)")]
    UnknownPiece(char),

    #[error("cell {0:?} is not on the board")]
    OffBoard(String),

    #[error("{0} is not a legal move in this position")]
    Illegal(String),
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("`{field}` must be greater than zero")]
    Zero { field: &'static str },
}
