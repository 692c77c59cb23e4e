//! Command-line interface

pub mod prices;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::DEFAULT_CONFIG_PATH;

/// Process exit codes
pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    pub const UNEXPECTED_FAILURE: i32 = 1;
    pub const CONFIG_ERROR: i32 = 2;
    pub const FETCH_FAILED: i32 = 3;
}

#[derive(Debug, Parser)]
#[command(name = "cryptoticker", version, about = "Desktop widget for live crypto prices")]
pub struct Cli {
    /// Path of the JSON config file (created with defaults if missing)
    #[arg(long, global = true, env = "CRYPTOTICKER_CONFIG", default_value = DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    pub json_output: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Open the ticker window (default)
    Widget,

    /// Fetch prices once and print them
    Prices(prices::PricesArgs),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_launch_widget() {
        let cli = Cli::try_parse_from(["cryptoticker"]).unwrap();
        assert!(cli.command.is_none());
        assert!(!cli.verbose);
    }

    #[test]
    fn test_prices_with_global_flags() {
        let cli = Cli::try_parse_from([
            "cryptoticker",
            "prices",
            "--format",
            "json",
            "--config",
            "/tmp/tokens.json",
            "-v",
        ])
        .unwrap();

        assert!(cli.verbose);
        assert_eq!(cli.config, PathBuf::from("/tmp/tokens.json"));
        match cli.command {
            Some(Commands::Prices(args)) => assert_eq!(args.format, prices::OutputFormat::Json),
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
