use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;

use crucible_reference::config::Config;

mod cli;
mod commands;
mod logging;

use cli::Cli;

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    logging::init_logging(cli.global.verbose)?;

    let config = match &cli.global.config {
        Some(path) => Config::load(path),
        None => Config::load_default(),
    }
    .context("Failed to load configuration")?
    .with_overrides(cli.global.registry.clone(), cli.global.namespace.clone());

    let mut stdout = std::io::stdout().lock();
    commands::execute(&cli.command, &config, &mut stdout)
}
