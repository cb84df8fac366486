//! goalsplit CLI entry point.

use anyhow::Result;
use clap::Parser;

use goalsplit::cli::{commands, handle_error, Cli, Commands};
use goalsplit::domain::models::Config;
use goalsplit::infrastructure::config::ConfigLoader;
use goalsplit::infrastructure::logging::{LogConfig, LoggerImpl};

fn load_config(cli: &Cli) -> Result<Config> {
    match &cli.config {
        Some(path) => ConfigLoader::load_from_file(path),
        None => ConfigLoader::load(),
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let json_mode = cli.json;

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(err) => handle_error(err, json_mode),
    };

    // held for the whole run so buffered file logs are flushed on exit
    let _logger = match LoggerImpl::init(&LogConfig::from(&config.logging)) {
        Ok(logger) => logger,
        Err(err) => handle_error(err, json_mode),
    };

    let result = match cli.command {
        Commands::Breakdown(args) => commands::breakdown::execute(args, &config, json_mode).await,
        Commands::Templates(args) => commands::templates::execute(args, json_mode).await,
        Commands::Prompt(args) => commands::prompt::execute(args, json_mode).await,
        Commands::Progress(args) => commands::progress::execute(args, json_mode).await,
    };

    if let Err(err) = result {
        handle_error(err, json_mode);
    }
}
