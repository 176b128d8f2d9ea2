//! On-chain pool state over raw `eth_call`s.

use anyhow::{Context, Result};
use async_trait::async_trait;
use tracing::debug;

use univ3_fee_domain::entities::pool::PoolSnapshot;
use univ3_fee_domain::math::full_math::u256_to_u128;

use crate::PoolStateReader;
use crate::rpc::{RpcClient, decode_word, decode_word_i32};

// Uniswap V3 pool function selectors.
const SELECTOR_TICK_SPACING: &str = "0xd0c93a7c";
const SELECTOR_FEE: &str = "0xddca3f43";
const SELECTOR_LIQUIDITY: &str = "0x1a686502";
const SELECTOR_SLOT0: &str = "0x3850c7bd";

/// Reads the four pool-state views in one concurrent batch.
#[derive(Debug, Clone)]
pub struct RpcPoolReader {
    client: RpcClient,
}

impl RpcPoolReader {
    pub fn new(client: RpcClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl PoolStateReader for RpcPoolReader {
    async fn fetch_pool(&self, pool_address: &str) -> Result<PoolSnapshot> {
        debug!(pool = pool_address, "fetching pool state");
        let (tick_spacing, fee, liquidity, slot0) = tokio::try_join!(
            self.client.eth_call(pool_address, SELECTOR_TICK_SPACING),
            self.client.eth_call(pool_address, SELECTOR_FEE),
            self.client.eth_call(pool_address, SELECTOR_LIQUIDITY),
            self.client.eth_call(pool_address, SELECTOR_SLOT0),
        )?;

        Ok(PoolSnapshot {
            address: pool_address.to_string(),
            tick_spacing: decode_word_i32(&tick_spacing, 0).context("decoding tickSpacing()")?,
            fee_tier_bps: decode_word(&fee, 0).context("decoding fee()")?.low_u64() as u32,
            liquidity: u256_to_u128(decode_word(&liquidity, 0).context("decoding liquidity()")?)
                .context("pool liquidity out of range")?,
            sqrt_price_x96: decode_word(&slot0, 0).context("decoding slot0().sqrtPriceX96")?,
            current_tick: decode_word_i32(&slot0, 1).context("decoding slot0().tick")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use primitive_types::U256;
    use univ3_fee_domain::math::full_math::Q96;

    #[test]
    fn test_snapshot_from_encoded_words() {
        // Exercise the decoding path fetch_pool relies on, without a node.
        // Word 0: sqrtPriceX96 = 2^96 (hex 1 followed by 24 zeros).
        let sqrt_word = format!("{}1{}", "0".repeat(39), "0".repeat(24));
        let tick_word = format!("{}{:08x}", "f".repeat(56), -10i32 as u32);
        let slot0 = format!("0x{sqrt_word}{tick_word}");
        assert_eq!(decode_word(&slot0, 0).unwrap(), Q96);
        assert_eq!(decode_word(&slot0, 0).unwrap(), U256::from(1u8) << 96);
        assert_eq!(decode_word_i32(&slot0, 1).unwrap(), -10);

        let fee = format!("0x{:064x}", 500u64);
        assert_eq!(decode_word(&fee, 0).unwrap().low_u64() as u32, 500);
    }
}
