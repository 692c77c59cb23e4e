//! Crypto Ticker - desktop widget showing live cryptocurrency prices
//!
//! Polls CoinGecko for a configurable list of tokens and shows each as a card
//! with its USD price and 24h change, falling back to placeholder prices when
//! the API cannot be reached:
//! - Ticker window (default)
//! - One-shot CLI (`cryptoticker prices`)

mod cli;
mod config;
mod core;
mod logging;
mod native_ui;
mod providers;
mod refresh;
mod render;

use clap::Parser;
use cli::{exit_codes, Cli, Commands};
use config::TickerConfig;
use refresh::TickerState;

fn main() {
    std::process::exit(run());
}

fn run() -> i32 {
    let cli = Cli::parse();

    if let Err(e) = logging::init(cli.verbose, cli.json_output) {
        eprintln!("Failed to initialize logging: {}", e);
        return exit_codes::UNEXPECTED_FAILURE;
    }

    let config = match TickerConfig::load_or_create(&cli.config) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("{}", e);
            eprintln!("Error: {}", e);
            return exit_codes::CONFIG_ERROR;
        }
    };

    match cli.command {
        Some(Commands::Prices(args)) => {
            let rt = match tokio::runtime::Runtime::new() {
                Ok(rt) => rt,
                Err(e) => {
                    eprintln!("Failed to create runtime: {}", e);
                    return exit_codes::UNEXPECTED_FAILURE;
                }
            };

            rt.block_on(async {
                match cli::prices::run(args, &config).await {
                    Ok(TickerState::Normal) => exit_codes::SUCCESS,
                    Ok(TickerState::Degraded) => exit_codes::FETCH_FAILED,
                    Err(e) => {
                        eprintln!("Error: {}", e);
                        exit_codes::UNEXPECTED_FAILURE
                    }
                }
            })
        }
        Some(Commands::Widget) | None => match native_ui::run(config) {
            Ok(()) => exit_codes::SUCCESS,
            Err(e) => {
                tracing::error!("{:#}", e);
                eprintln!("Error: {:#}", e);
                exit_codes::UNEXPECTED_FAILURE
            }
        },
    }
}
