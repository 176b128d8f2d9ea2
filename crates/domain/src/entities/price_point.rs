use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One observation in a token's USD price history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricePoint {
    /// Unix timestamp in milliseconds.
    pub timestamp: i64,
    pub value: Decimal,
}

/// USD price time series for a token, as returned by the market-data
/// collaborator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceChart {
    pub token_id: String,
    pub prices: Vec<PricePoint>,
}

impl PriceChart {
    pub fn new(token_id: impl Into<String>, prices: Vec<PricePoint>) -> Self {
        Self {
            token_id: token_id.into(),
            prices,
        }
    }

    /// Most recent USD price in the series, if any.
    pub fn current_price_usd(&self) -> Option<Decimal> {
        self.prices.last().map(|p| p.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_current_price_is_last_point() {
        let chart = PriceChart::new(
            "ethereum",
            vec![
                PricePoint {
                    timestamp: 1,
                    value: dec!(1900),
                },
                PricePoint {
                    timestamp: 2,
                    value: dec!(2000),
                },
            ],
        );
        assert_eq!(chart.current_price_usd(), Some(dec!(2000)));
        assert_eq!(PriceChart::new("ethereum", vec![]).current_price_usd(), None);
    }
}
