//! CoinGecko price source
//!
//! Uses the public `simple/price` endpoint, one request per token, asking for
//! the USD price and 24h change. No API key is required.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

use crate::core::{FetchError, PriceRecord, PriceSource};

/// Public CoinGecko API base URL
pub const COINGECKO_API_BASE: &str = "https://api.coingecko.com/api/v3";

/// One entry of the `simple/price` response, keyed by token id
#[derive(Debug, Deserialize)]
struct SimplePrice {
    usd: Option<f64>,
    usd_24h_change: Option<f64>,
}

/// CoinGecko price source
pub struct CoinGeckoSource {
    client: reqwest::Client,
    base_url: String,
}

impl CoinGeckoSource {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("cryptoticker/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
            .map_err(|e| FetchError::Network(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Build the `simple/price` URL for one token
    fn price_url(&self, token: &str) -> String {
        format!(
            "{}/simple/price?ids={}&vs_currencies=usd&include_24hr_change=true",
            self.base_url, token
        )
    }
}

#[async_trait]
impl PriceSource for CoinGeckoSource {
    fn name(&self) -> &'static str {
        "coingecko"
    }

    async fn fetch(&self, token: &str) -> Result<PriceRecord, FetchError> {
        let url = self.price_url(token);
        tracing::debug!("Fetching CoinGecko price: {}", url);

        let resp = self
            .client
            .get(&url)
            .header("Accept", "application/json")
            .send()
            .await?;

        if !resp.status().is_success() {
            return Err(FetchError::Status(resp.status().as_u16()));
        }

        let body = resp.text().await?;
        parse_simple_price(token, &body)
    }
}

/// Project a `simple/price` response body onto the record for `token`
fn parse_simple_price(token: &str, body: &str) -> Result<PriceRecord, FetchError> {
    let prices: HashMap<String, SimplePrice> =
        serde_json::from_str(body).map_err(|e| FetchError::Parse(e.to_string()))?;

    let entry = prices.get(token).ok_or_else(|| FetchError::MissingField {
        token: token.to_string(),
        field: "usd",
    })?;

    let price = finite(token, "usd", entry.usd)?;
    let change = finite(token, "usd_24h_change", entry.usd_24h_change)?;

    Ok(PriceRecord::new(token, price, change))
}

fn finite(token: &str, field: &'static str, value: Option<f64>) -> Result<f64, FetchError> {
    match value {
        None => Err(FetchError::MissingField {
            token: token.to_string(),
            field,
        }),
        Some(v) if !v.is_finite() => Err(FetchError::NonFinite {
            token: token.to_string(),
            field,
        }),
        Some(v) => Ok(v),
    }
}
