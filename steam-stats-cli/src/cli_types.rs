//! CLI type definitions: command enums and argument structs.

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "steam-stats")]
#[command(about = "Sync a Steam library and enrich it with GiantBomb metadata", long_about = None)]
pub(crate) struct Cli {
    /// Database location: "localhost" for the default database, ":memory:", or a file path
    #[arg(long, global = true, default_value = steam_stats_db::DEFAULT_HOST)]
    pub host: String,

    /// Only show warnings and errors (suppress normal output)
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Enable verbose/debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Create needed database and tables
    Setup,

    /// Update all owned games from Steam
    Steam,

    /// Search for the name of all owned games in GiantBomb
    Search,

    /// Fetch all known games from GiantBomb
    Fetch,

    /// Show how many games are waiting at each step
    Status,

    /// Inspect API key configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Show current configuration and where each value comes from
    Show,

    /// Print the config file path
    Path,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn host_defaults_to_localhost() {
        let cli = Cli::try_parse_from(["steam-stats", "setup"]).unwrap();
        assert_eq!(cli.host, "localhost");
        assert!(matches!(cli.command, Commands::Setup));
    }

    #[test]
    fn global_flags_follow_the_subcommand() {
        let cli = Cli::try_parse_from(["steam-stats", "search", "--host", ":memory:", "-v"]).unwrap();
        assert_eq!(cli.host, ":memory:");
        assert!(cli.verbose);
        assert!(!cli.quiet);
    }

    #[test]
    fn config_requires_an_action() {
        assert!(Cli::try_parse_from(["steam-stats", "config"]).is_err());
        let cli = Cli::try_parse_from(["steam-stats", "config", "path"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Config {
                action: ConfigAction::Path
            }
        ));
    }
}
