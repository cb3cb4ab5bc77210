mod cli;
mod config;
mod errors;
mod host;
mod logging;
mod scenario;

use std::sync::Arc;

use clap::Parser;
use color_eyre::Result;
use navigation::{NavigationService, Navigator, Session};
use tracing::info;

use crate::cli::{Cli, Cmd};
use crate::config::AppConfig;
use crate::scenario::Scenario;

#[tokio::main]
pub async fn main() -> Result<()> {
    let args = Cli::parse();
    errors::init()?;

    let config = AppConfig::load(args.config.as_deref())?;
    let _log_guard = logging::init(&config.logging, args.log_level.as_deref())?;

    let scenario = match &args.cmd {
        Cmd::Run { scenario } => Scenario::load(scenario)?,
        Cmd::Demo => Scenario::demo()?,
    };

    let session = Session::logged_out();
    let navigator = Arc::new(Navigator::with_config(
        Arc::new(session.clone()),
        config.navigator,
    ));
    NavigationService::bind(navigator.clone());

    let outcome = scenario.run(navigator.clone(), &session).await;
    NavigationService::unbind(&navigator);

    let stack = outcome?;
    info!(
        depth = stack.len(),
        top = stack.last().map(|route| route.name()).unwrap_or("<empty>"),
        "scenario finished"
    );
    Ok(())
}
