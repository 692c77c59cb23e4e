//! Price record model - one token's USD price and 24h change at a point in time

use serde::{Deserialize, Serialize};

/// Price and 24-hour change for a single token
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceRecord {
    /// Token identifier in the price API's vocabulary (e.g., "bitcoin")
    pub token: String,

    /// Current price in USD
    pub price: f64,

    /// 24-hour change in percent
    pub change_24h: f64,
}

impl PriceRecord {
    /// Create a new price record
    pub fn new(token: impl Into<String>, price: f64, change_24h: f64) -> Self {
        Self {
            token: token.into(),
            price,
            // -0.0 would print as "-0.00" while counting as a gain
            change_24h: if change_24h == 0.0 { 0.0 } else { change_24h },
        }
    }

    /// Record shown before the first fetch completes
    pub fn empty(token: impl Into<String>) -> Self {
        Self::new(token, 0.0, 0.0)
    }

    /// Whether the 24h change is non-negative
    pub fn is_gain(&self) -> bool {
        self.change_24h >= 0.0
    }
}

/// Static values shown while the price API is unreachable
pub fn placeholder_records() -> Vec<PriceRecord> {
    vec![
        PriceRecord::new("bitcoin", 98000.0, 5.3),
        PriceRecord::new("ethereum", 3500.0, -2.1),
        PriceRecord::new("solana", 150.0, 3.8),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_negative_zero_normalised() {
        let record = PriceRecord::new("bitcoin", 1.0, -0.0);
        assert!(record.change_24h.is_sign_positive());
        assert!(record.is_gain());
    }

    #[test]
    fn test_placeholders() {
        let records = placeholder_records();
        let tokens: Vec<&str> = records.iter().map(|r| r.token.as_str()).collect();
        assert_eq!(tokens, vec!["bitcoin", "ethereum", "solana"]);
        assert!(!records[1].is_gain());
    }
}
