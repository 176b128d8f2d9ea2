//! Token USD price history from a CoinGecko-style market-data API.

use anyhow::{Context, Result};
use async_trait::async_trait;
use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use serde::Deserialize;
use tracing::debug;

use univ3_fee_domain::entities::price_point::{PriceChart, PricePoint};

use crate::PriceHistoryReader;

const DEFAULT_BASE_URL: &str = "https://api.coingecko.com";

/// History window for a market-chart query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryPeriod {
    OneDay,
    OneWeek,
    OneMonth,
    ThreeMonths,
}

impl QueryPeriod {
    pub fn as_days(&self) -> &'static str {
        match self {
            Self::OneDay => "1",
            Self::OneWeek => "7",
            Self::OneMonth => "30",
            Self::ThreeMonths => "90",
        }
    }
}

/// HTTP client for token price charts.
#[derive(Debug, Clone)]
pub struct MarketDataClient {
    http: reqwest::Client,
    base_url: String,
}

#[derive(Deserialize)]
struct MarketChartResponse {
    // Each entry is [timestamp_ms, price_usd].
    prices: Vec<(f64, f64)>,
}

impl MarketDataClient {
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }
}

impl Default for MarketDataClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PriceHistoryReader for MarketDataClient {
    async fn price_history(&self, coin_id: &str, period: QueryPeriod) -> Result<PriceChart> {
        let url = format!(
            "{}/api/v3/coins/{}/market_chart?vs_currency=usd&days={}",
            self.base_url,
            coin_id,
            period.as_days()
        );
        debug!(coin_id, days = period.as_days(), "fetching price chart");
        let response: MarketChartResponse = self
            .http
            .get(&url)
            .send()
            .await
            .context("market data transport failure")?
            .error_for_status()
            .context("market data http error")?
            .json()
            .await
            .context("malformed market chart response")?;

        let prices = response
            .prices
            .into_iter()
            .map(|(timestamp, value)| {
                Ok(PricePoint {
                    timestamp: timestamp as i64,
                    value: Decimal::from_f64(value)
                        .context("price value not representable as decimal")?,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(PriceChart::new(coin_id, prices))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_period_days() {
        assert_eq!(QueryPeriod::OneDay.as_days(), "1");
        assert_eq!(QueryPeriod::OneMonth.as_days(), "30");
    }

    #[test]
    fn test_market_chart_parsing() {
        let payload = r#"{
            "prices": [
                [1700000000000.0, 1998.25],
                [1700003600000.0, 2001.75]
            ],
            "market_caps": [],
            "total_volumes": []
        }"#;
        let parsed: MarketChartResponse = serde_json::from_str(payload).unwrap();
        assert_eq!(parsed.prices.len(), 2);
        assert_eq!(parsed.prices[1].1, 2001.75);
    }
}
