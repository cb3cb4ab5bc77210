use std::num::NonZeroUsize;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::Result;

/// Tunables for a [`Navigator`](crate::Navigator).
///
/// ```toml
/// [navigator]
/// result_buffer = 32
/// result_replay = 32
/// pending_limit = 64
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavigatorConfig {
    /// How many results a slow subscriber may lag behind before losing some.
    pub result_buffer: usize,
    /// How many results are held for keys that nobody listens on yet.
    pub result_replay: usize,
    /// Bound on commands queued while no controller is attached. `None` keeps
    /// every command; otherwise the oldest one is dropped when full. Zero is
    /// rejected when parsing.
    pub pending_limit: Option<NonZeroUsize>,
}

impl Default for NavigatorConfig {
    fn default() -> Self {
        Self {
            result_buffer: 32,
            result_replay: 32,
            pending_limit: None,
        }
    }
}

impl NavigatorConfig {
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        Ok(toml::from_str(raw)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_toml_str(&raw)
    }
}
