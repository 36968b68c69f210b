//! Search parameters and configuration
//!
//! Controls depth limits, the extension budget and the size of the
//! transposition table. Parameters can be built in code or loaded from a
//! TOML file; missing keys keep their defaults.

use std::path::Path;

use serde::Deserialize;

use crate::error::ConfigError;

/// Search parameters for the engine
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SearchParams {
    /// Maximum search depth in plies
    pub max_depth: u8,

    /// Extra plies available to extensions in one root search
    pub extension_budget: u8,

    /// Transposition table slots
    pub tt_entries: usize,

    /// Null-window passes allowed per MTD(f) call
    pub max_mtdf_passes: u32,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            max_depth: 6,
            extension_budget: 6,
            tt_entries: 4_194_301, // prime
            max_mtdf_passes: 64,
        }
    }
}

impl SearchParams {
    /// Create new search params with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set maximum depth in plies
    pub fn max_depth(mut self, depth: u8) -> Self {
        self.max_depth = depth;
        self
    }

    /// Set the extension budget
    pub fn extension_budget(mut self, plies: u8) -> Self {
        self.extension_budget = plies;
        self
    }

    /// Set the number of table slots
    pub fn tt_entries(mut self, entries: usize) -> Self {
        self.tt_entries = entries;
        self
    }

    pub fn max_mtdf_passes(mut self, passes: u32) -> Self {
        self.max_mtdf_passes = passes;
        self
    }

    /// Parse and validate parameters from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let params: SearchParams = toml::from_str(text)?;
        params.validate()?;
        Ok(params)
    }

    /// Load parameters from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_depth == 0 {
            return Err(ConfigError::Zero { field: "max_depth" });
        }
        if self.tt_entries == 0 {
            return Err(ConfigError::Zero { field: "tt_entries" });
        }
        if self.max_mtdf_passes == 0 {
            return Err(ConfigError::Zero {
                field: "max_mtdf_passes",
            });
        }
        Ok(())
    }
}
