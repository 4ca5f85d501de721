//! steam-stats CLI
//!
//! Syncs a Steam library into a local document store and enriches each
//! owned game with its GiantBomb record.

mod cli_types;
mod commands;
mod config;
mod error;
mod progress;

use std::io::Write;

use clap::Parser;
use log::LevelFilter;

use cli_types::{Cli, Commands, ConfigAction};
use config::AppConfig;
pub(crate) use error::CliError;

fn main() {
    let cli = Cli::parse();
    init_logging(cli.quiet, cli.verbose);

    if let Err(e) = run(cli) {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

/// Plain messages at info level; `RUST_LOG` overrides the default filter.
fn init_logging(quiet: bool, verbose: bool) {
    let level = if quiet {
        LevelFilter::Warn
    } else if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format(|buf, record| match record.level() {
            log::Level::Info => writeln!(buf, "{}", record.args()),
            level => writeln!(buf, "{}: {}", level.as_str().to_lowercase(), record.args()),
        })
        .init();
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Commands::Config { action } => match action {
            ConfigAction::Show => {
                let config = AppConfig::load()?;
                commands::config::run_config_show(&config);
                Ok(())
            }
            ConfigAction::Path => commands::config::run_config_path(),
        },
        Commands::Setup => {
            let store = commands::connect(&cli.host)?;
            commands::setup::run_setup(&store)
        }
        Commands::Status => {
            let store = commands::connect(&cli.host)?;
            commands::status::run_status(&store, &cli.host)
        }
        Commands::Steam => {
            let config = AppConfig::load()?;
            let store = commands::connect(&cli.host)?;
            commands::pipeline::run_steam(&config, &store)
        }
        Commands::Search => {
            let config = AppConfig::load()?;
            let store = commands::connect(&cli.host)?;
            commands::pipeline::run_search(&config, &store, cli.quiet)
        }
        Commands::Fetch => {
            let config = AppConfig::load()?;
            let store = commands::connect(&cli.host)?;
            commands::pipeline::run_fetch(&config, &store, cli.quiet)
        }
    }
}
