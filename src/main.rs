use anyhow::{Context, Result};
use clap::Parser;
use photopoet::cli::{self, Cli, Command};
use photopoet::config::Config;
use photopoet::logging::{init_tracing, LogTarget};
use photopoet::ui;

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(if cli.is_interactive() {
        LogTarget::Interactive
    } else {
        LogTarget::Headless
    });

    let config = match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
    .context("Failed to load configuration")?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Failed to start async runtime")?;

    let launch = cli.launch_options();
    match cli.command {
        None => ui::run(&config, launch, runtime.handle().clone())?,
        Some(Command::Compose(args)) => runtime.block_on(cli::run_compose(&config, args))?,
        Some(Command::Library { action }) => cli::run_library(&config, action)?,
    }
    Ok(())
}
