//! Average gas cost of recent pool events, from logs and receipts.

use anyhow::{Context, Result, bail};
use async_trait::async_trait;
use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use serde_json::json;
use tracing::debug;

use univ3_fee_domain::math::full_math::u256_to_f64;

use crate::GasCostReader;
use crate::rpc::{RpcClient, parse_hex_u256};

// keccak256 topic0 hashes of the pool events we average.
const MINT_TOPIC: &str = "0x7a53080ba414158be7ec69b987b5fb7d07dee101fe85488f0853ae16239d0bde";
const SWAP_TOPIC: &str = "0xc42079f94a6350d7e6235f29174924f928cc2ac818eb64fed8004e115fbcca67";

const WEI_PER_ETH: f64 = 1e18;

/// Pool event type whose transactions are sampled for gas cost.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PoolEvent {
    Mint,
    Swap,
}

impl PoolEvent {
    fn topic0(&self) -> &'static str {
        match self {
            Self::Mint => MINT_TOPIC,
            Self::Swap => SWAP_TOPIC,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Mint => "Mint",
            Self::Swap => "Swap",
        }
    }
}

/// Scans event logs and averages `gasUsed * effectiveGasPrice` over the
/// most recent matching transactions.
#[derive(Debug, Clone)]
pub struct RpcGasScanner {
    client: RpcClient,
}

impl RpcGasScanner {
    pub fn new(client: RpcClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl GasCostReader for RpcGasScanner {
    async fn average_event_gas(
        &self,
        pool_address: &str,
        event: PoolEvent,
        from_block: u64,
        limit: usize,
    ) -> Result<Decimal> {
        let logs = self
            .client
            .call(
                "eth_getLogs",
                json!([{
                    "fromBlock": format!("0x{from_block:x}"),
                    "toBlock": "latest",
                    "address": pool_address,
                    "topics": [event.topic0()],
                }]),
            )
            .await?;
        let logs = logs
            .as_array()
            .context("eth_getLogs returned non-array result")?;

        let mut hashes: Vec<String> = logs
            .iter()
            .filter_map(|log| log["transactionHash"].as_str().map(str::to_owned))
            .collect();
        hashes.dedup();
        if hashes.is_empty() {
            bail!("no {} events found for pool {pool_address}", event.name());
        }
        let recent = hashes.iter().rev().take(limit);

        let mut total_eth = 0f64;
        let mut count = 0u32;
        for hash in recent {
            let receipt = self
                .client
                .call("eth_getTransactionReceipt", json!([hash]))
                .await?;
            let gas_used = parse_hex_u256(
                receipt["gasUsed"]
                    .as_str()
                    .context("receipt missing gasUsed")?,
            )?;
            let gas_price = parse_hex_u256(
                receipt["effectiveGasPrice"]
                    .as_str()
                    .context("receipt missing effectiveGasPrice")?,
            )?;
            total_eth += u256_to_f64(gas_used) * u256_to_f64(gas_price) / WEI_PER_ETH;
            count += 1;
        }
        debug!(event = event.name(), count, "averaged event gas");

        Decimal::from_f64(total_eth / f64::from(count))
            .context("average gas cost not representable as decimal")
    }
}
