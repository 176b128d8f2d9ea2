//! Subgraph-backed tick and volume retrieval.

use anyhow::{Context, Result, bail};
use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::json;
use tracing::debug;

use univ3_fee_domain::entities::tick::TickRecord;

use crate::{TickReader, VolumeReader};

const TICK_PAGE_SIZE: u32 = 1000;

/// GraphQL client for a subgraph-style indexing endpoint.
#[derive(Debug, Clone)]
pub struct SubgraphClient {
    http: reqwest::Client,
    endpoint: String,
}

#[derive(Deserialize)]
struct GraphQlResponse<T> {
    data: Option<T>,
    errors: Option<Vec<GraphQlError>>,
}

#[derive(Debug, Deserialize)]
struct GraphQlError {
    message: String,
}

#[derive(Deserialize)]
struct TicksData {
    ticks: Vec<RawTick>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawTick {
    index: String,
    liquidity_gross: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PoolsData {
    liquidity_pools: Vec<RawPoolVolumes>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawPoolVolumes {
    daily_snapshots: Vec<RawDailySnapshot>,
}

#[derive(Deserialize)]
struct RawDailySnapshot {
    #[serde(rename = "dailyTotalVolumeUSD")]
    daily_total_volume_usd: String,
}

impl SubgraphClient {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: endpoint.into(),
        }
    }

    async fn query<T: DeserializeOwned>(&self, query: String) -> Result<T> {
        debug!(endpoint = %self.endpoint, "posting subgraph query");
        let response: GraphQlResponse<T> = self
            .http
            .post(&self.endpoint)
            .json(&json!({ "query": query }))
            .send()
            .await
            .context("subgraph transport failure")?
            .error_for_status()
            .context("subgraph http error")?
            .json()
            .await
            .context("malformed subgraph response")?;

        if let Some(errors) = response.errors
            && let Some(first) = errors.first()
        {
            bail!("subgraph query failed: {}", first.message);
        }
        response
            .data
            .context("subgraph response missing data")
    }
}

#[async_trait]
impl TickReader for SubgraphClient {
    async fn fetch_ticks(
        &self,
        pool_address: &str,
        tick_lower: i32,
        tick_upper: i32,
    ) -> Result<Vec<TickRecord>> {
        let query = format!(
            r#"{{
  ticks(first: {TICK_PAGE_SIZE}, where: {{ pool: "{pool_address}", index_gte: "{tick_lower}", index_lte: "{tick_upper}" }}, orderBy: index) {{
    index
    liquidityGross
  }}
}}"#
        );
        let data: TicksData = self.query(query).await?;
        data.ticks
            .into_iter()
            .map(|raw| {
                Ok(TickRecord::new(
                    raw.index
                        .parse()
                        .with_context(|| format!("bad tick index {}", raw.index))?,
                    raw.liquidity_gross
                        .parse()
                        .with_context(|| format!("bad liquidityGross {}", raw.liquidity_gross))?,
                ))
            })
            .collect()
    }
}

#[async_trait]
impl VolumeReader for SubgraphClient {
    async fn average_daily_volume(&self, pool_address: &str, days: u32) -> Result<Decimal> {
        // skip: 1 drops today's partial snapshot.
        let query = format!(
            r#"{{
  liquidityPools(where: {{ id: "{pool_address}" }}) {{
    dailySnapshots(skip: 1, first: {days}, orderBy: timestamp, orderDirection: desc) {{
      dailyTotalVolumeUSD
    }}
  }}
}}"#
        );
        let data: PoolsData = self.query(query).await?;
        let snapshots = &data
            .liquidity_pools
            .first()
            .context("pool not found in subgraph")?
            .daily_snapshots;
        if snapshots.is_empty() {
            bail!("no volume snapshots for pool {pool_address}");
        }
        let mut total = Decimal::ZERO;
        for snapshot in snapshots {
            total += snapshot
                .daily_total_volume_usd
                .parse::<Decimal>()
                .with_context(|| {
                    format!("bad dailyTotalVolumeUSD {}", snapshot.daily_total_volume_usd)
                })?;
        }
        Ok(total / Decimal::from(snapshots.len() as u64))
    }
}
