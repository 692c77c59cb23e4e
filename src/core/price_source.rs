//! Price source abstraction

use async_trait::async_trait;
use thiserror::Error;

use super::PriceRecord;

/// Errors that can occur while fetching a price
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Price API returned status {0}")]
    Status(u16),

    #[error("Failed to parse price response: {0}")]
    Parse(String),

    #[error("Price response for '{token}' is missing '{field}'")]
    MissingField { token: String, field: &'static str },

    #[error("Price response for '{token}' has a non-finite '{field}'")]
    NonFinite { token: String, field: &'static str },
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            FetchError::Parse(e.to_string())
        } else {
            FetchError::Network(e.to_string())
        }
    }
}

/// Anything that can quote a token's USD price and 24h change
#[async_trait]
pub trait PriceSource: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &'static str;

    /// Fetch the current price record for one token
    async fn fetch(&self, token: &str) -> Result<PriceRecord, FetchError>;
}
