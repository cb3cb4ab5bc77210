// src/cli.rs
use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "storefront", version, about = "Headless storefront navigation host")]
pub struct Cli {
    /// TOML file with `[navigator]` and `[logging]` sections
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Overrides `logging.level` (e.g. `debug`, `navigation=trace`)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub cmd: Cmd,
}

#[derive(Subcommand)]
pub enum Cmd {
    /// Run a scenario file
    Run { scenario: PathBuf },
    /// Run the built-in login redirect scenario
    Demo,
}
