use primitive_types::U256;
use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};
use crate::math::full_math::{Q192, u256_to_f64};

/// Immutable point-in-time read of on-chain pool state.
///
/// Produced by the pool-state collaborator; the core treats it as a value
/// and never refreshes it. Callers are responsible for pairing it with
/// tick/volume data from the same block window.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PoolSnapshot {
    pub address: String,
    pub tick_spacing: i32,
    /// Fee in the pool's native units, hundredths of a basis point
    /// (500 = 0.05%).
    pub fee_tier_bps: u32,
    pub liquidity: u128,
    pub sqrt_price_x96: U256,
    pub current_tick: i32,
}

impl PoolSnapshot {
    /// Human-readable token1-per-token0 price implied by `sqrt_price_x96`,
    /// adjusted for the tokens' smallest-unit exponents:
    /// `(sqrtPriceX96^2 / 2^192) * 10^(decimals0 - decimals1)`.
    pub fn human_price(&self, decimals0: u8, decimals1: u8) -> DomainResult<Decimal> {
        let ratio = u256_to_f64(self.sqrt_price_x96).powi(2) / u256_to_f64(Q192);
        let adjusted = ratio * 10f64.powi(i32::from(decimals0) - i32::from(decimals1));
        if !adjusted.is_finite() || adjusted <= 0.0 {
            return Err(DomainError::Conversion(
                "pool sqrt price does not map to a positive finite price",
            ));
        }
        Decimal::from_f64(adjusted)
            .ok_or(DomainError::Conversion("pool price exceeds decimal range"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use primitive_types::U256;
    use rust_decimal::prelude::ToPrimitive;

    fn snapshot_with_sqrt_price(sqrt_price_x96: U256) -> PoolSnapshot {
        PoolSnapshot {
            address: "0xpool".to_string(),
            tick_spacing: 10,
            fee_tier_bps: 500,
            liquidity: 0,
            sqrt_price_x96,
            current_tick: 0,
        }
    }

    #[test]
    fn test_human_price_unit() {
        // sqrtPriceX96 = 2^96 encodes a raw price of exactly 1.
        let snapshot = snapshot_with_sqrt_price(U256::from(1u8) << 96);
        let price = snapshot.human_price(6, 6).unwrap();
        let diff = (price.to_f64().unwrap() - 1.0).abs();
        assert!(diff < 1e-9);
    }

    #[test]
    fn test_human_price_decimal_adjustment() {
        // Same raw price, 18/6 decimals: human price scales by 10^12.
        let snapshot = snapshot_with_sqrt_price(U256::from(1u8) << 96);
        let price = snapshot.human_price(18, 6).unwrap();
        let as_f64 = price.to_f64().unwrap();
        assert!((as_f64 - 1e12).abs() / 1e12 < 1e-9);
    }
}
