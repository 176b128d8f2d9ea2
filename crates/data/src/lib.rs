//! External data collaborators for the fee estimator.
//!
//! Everything here is I/O plumbing with no algorithmic content: reading
//! pool state over JSON-RPC, tick and volume data from a subgraph, token
//! price history from a market-data API, and recent event gas costs from
//! receipts. The core consumes these through the traits below and assumes
//! each delivers a complete, internally consistent snapshot; transport
//! failures surface as `anyhow` errors for the caller to handle before any
//! core computation runs.

use async_trait::async_trait;
use rust_decimal::Decimal;

use univ3_fee_domain::entities::pool::PoolSnapshot;
use univ3_fee_domain::entities::price_point::PriceChart;
use univ3_fee_domain::entities::tick::TickRecord;

pub mod gas;
pub mod market;
pub mod network;
pub mod pool_reader;
pub mod rpc;
pub mod subgraph;

pub use gas::{PoolEvent, RpcGasScanner};
pub use market::{MarketDataClient, QueryPeriod};
pub use network::Network;
pub use pool_reader::RpcPoolReader;
pub use rpc::RpcClient;
pub use subgraph::SubgraphClient;

/// Reads current on-chain pool state.
#[async_trait]
pub trait PoolStateReader {
    async fn fetch_pool(&self, pool_address: &str) -> anyhow::Result<PoolSnapshot>;
}

/// Reads initialized ticks for a pool within tick bounds, ordered by index.
#[async_trait]
pub trait TickReader {
    async fn fetch_ticks(
        &self,
        pool_address: &str,
        tick_lower: i32,
        tick_upper: i32,
    ) -> anyhow::Result<Vec<TickRecord>>;
}

/// Reads average daily traded volume in USD over the last `days` days.
#[async_trait]
pub trait VolumeReader {
    async fn average_daily_volume(&self, pool_address: &str, days: u32)
    -> anyhow::Result<Decimal>;
}

/// Reads a token's USD price history.
#[async_trait]
pub trait PriceHistoryReader {
    async fn price_history(&self, coin_id: &str, period: QueryPeriod)
    -> anyhow::Result<PriceChart>;
}

/// Averages the gas cost of recent pool events, in native currency units.
#[async_trait]
pub trait GasCostReader {
    async fn average_event_gas(
        &self,
        pool_address: &str,
        event: PoolEvent,
        from_block: u64,
        limit: usize,
    ) -> anyhow::Result<Decimal>;
}
