//! `prices` command - run one refresh batch and print the result

use clap::{Args, ValueEnum};

use crate::config::TickerConfig;
use crate::providers::CoinGeckoSource;
use crate::refresh::{refresh_batch, PriceBoard, TickerState};
use crate::render::Panel;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Args)]
pub struct PricesArgs {
    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

/// Fetch every configured token once and print the board.
///
/// Returns the board state so the caller can pick an exit code; placeholder
/// data is still printed when the batch fails.
pub async fn run(args: PricesArgs, config: &TickerConfig) -> anyhow::Result<TickerState> {
    let source = CoinGeckoSource::new(config.api_base_url.clone(), config.request_timeout())?;
    let board = refresh_batch(&source, &config.tokens).await;

    match args.format {
        OutputFormat::Text => print!("{}", format_text(&config.tokens, &board)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&board)?),
    }

    Ok(board.state)
}

/// Render a board the way the widget would show it, as plain text
fn format_text(tokens: &[String], board: &PriceBoard) -> String {
    let mut panel = Panel::initial(tokens);
    panel.apply(board);

    let mut out = String::new();
    if let Some(banner) = &panel.banner {
        out.push_str(banner);
        out.push_str("\n\n");
    }
    for card in &panel.cards {
        out.push_str(&card.title);
        out.push('\n');
        out.push_str(&format!("  {}\n", card.price_text));
        out.push_str(&format!("  {}\n", card.change_text));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{FetchError, PriceRecord};

    #[test]
    fn test_format_text_normal() {
        let tokens = vec!["bitcoin".to_string()];
        let board = PriceBoard::normal(vec![PriceRecord::new("bitcoin", 98000.0, 5.3)]);

        assert_eq!(
            format_text(&tokens, &board),
            "Bitcoin\n  Price: $98000.00\n  24h Change: +5.30% (24h)\n"
        );
    }

    #[test]
    fn test_format_text_degraded() {
        let tokens = vec!["dogecoin".to_string()];
        let board = PriceBoard::degraded(&FetchError::Status(429));

        let text = format_text(&tokens, &board);
        assert!(text.starts_with("Error fetching prices\n"));
        assert!(text.contains("429"));
        assert!(text.contains("Ethereum\n  Price: $3500.00\n  24h Change: -2.10% (24h)\n"));
        assert!(!text.contains("Dogecoin"));
    }
}
