use std::path::{Path, PathBuf};

use color_eyre::{eyre::WrapErr, Result};
use navigation::NavigatorConfig;
use serde::Deserialize;

/// Host configuration file.
///
/// ```toml
/// [navigator]
/// pending_limit = 64
///
/// [logging]
/// level = "navigation=debug,info"
/// file = "logs/storefront.log"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub navigator: NavigatorConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directive; `RUST_LOG` wins when set.
    pub level: String,
    /// Additional log file, written without ANSI colors.
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_owned(),
            file: None,
        }
    }
}

impl AppConfig {
    /// Read `path`, or fall back to defaults when no file was given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let raw = std::fs::read_to_string(path)
            .wrap_err_with(|| format!("reading config {}", path.display()))?;
        toml::from_str(&raw).wrap_err_with(|| format!("parsing config {}", path.display()))
    }
}
