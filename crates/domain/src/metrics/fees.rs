//! Fee income and annualized yield from a position's liquidity share.

use rust_decimal::Decimal;
use rust_decimal::prelude::*;

use crate::error::{DomainError, DomainResult};
use crate::value_objects::estimate_result::{EstimateResult, TokenAllocation};
use crate::value_objects::percentage::Percentage;
use crate::value_objects::price_range::PriceRange;

/// Days used to annualize daily fee income.
const DAYS_PER_YEAR: u32 = 365;

/// Projects daily fee income and annualized yield for a position.
///
/// A position whose current price sits outside `[lower, upper]` earns
/// nothing; an empty pool (`total_liquidity + delta_l == 0`) also yields
/// a zero estimate rather than an error, so callers can always render a
/// number.
#[allow(clippy::too_many_arguments)]
pub fn estimate_fee_and_yield(
    delta_l: u128,
    total_liquidity: u128,
    avg_daily_volume_usd: Decimal,
    fee_tier_bps: u32,
    current_price: Decimal,
    lower: Decimal,
    upper: Decimal,
    deposit_usd: Decimal,
    allocation: TokenAllocation,
) -> DomainResult<EstimateResult> {
    if avg_daily_volume_usd < Decimal::ZERO {
        return Err(DomainError::InvalidVolume(avg_daily_volume_usd));
    }
    let range = PriceRange::bounded(lower, upper)?;
    if !range.contains(current_price) {
        return Ok(EstimateResult::out_of_market(allocation));
    }

    let denominator = total_liquidity.saturating_add(delta_l);
    if denominator == 0 {
        return Ok(EstimateResult::out_of_market(allocation));
    }
    // u128 -> f64 keeps ~15 significant digits, plenty for a share ratio.
    let share = Decimal::from_f64(delta_l as f64 / denominator as f64)
        .ok_or(DomainError::Conversion("liquidity share is not representable"))?;

    let fee_tier_pct = Percentage::from_fee_tier(fee_tier_bps).0;
    let estimated_fee_usd = fee_tier_pct * avg_daily_volume_usd * share;

    let annualized_yield_pct = if deposit_usd > Decimal::ZERO {
        estimated_fee_usd * Decimal::from(DAYS_PER_YEAR) / deposit_usd * Decimal::from(100)
    } else {
        Decimal::ZERO
    };
    let daily_income_usd = annualized_yield_pct / Decimal::from(DAYS_PER_YEAR);

    Ok(EstimateResult {
        estimated_fee_usd,
        annualized_yield_pct,
        daily_income_usd,
        allocation,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn allocation() -> TokenAllocation {
        TokenAllocation {
            amount0: dec!(0.25),
            amount1: dec!(500),
            value0_usd: dec!(500),
            value1_usd: dec!(500),
        }
    }

    #[test]
    fn test_known_scenario() {
        // share 0.001, fee tier 0.05%, 1M USD daily volume:
        // 0.0005 * 1_000_000 * 0.001 = 0.5 USD/day, 18.25% APY.
        let result = estimate_fee_and_yield(
            1,
            999,
            dec!(1000000),
            500,
            dec!(2000),
            dec!(1960),
            dec!(2040),
            dec!(1000),
            allocation(),
        )
        .unwrap();
        assert!((result.estimated_fee_usd - dec!(0.5)).abs() < dec!(0.0001));
        assert!((result.annualized_yield_pct - dec!(18.25)).abs() < dec!(0.004));
        assert!((result.daily_income_usd - dec!(0.05)).abs() < dec!(0.0001));
    }

    #[test]
    fn test_out_of_range_earns_nothing() {
        for price in [dec!(1900), dec!(2100)] {
            let result = estimate_fee_and_yield(
                1000,
                1_000_000,
                dec!(500000),
                500,
                price,
                dec!(1960),
                dec!(2040),
                dec!(1000),
                allocation(),
            )
            .unwrap();
            assert_eq!(result.estimated_fee_usd, Decimal::ZERO);
            assert_eq!(result.annualized_yield_pct, Decimal::ZERO);
        }
    }

    #[test]
    fn test_empty_pool_is_zero_not_a_fault() {
        let result = estimate_fee_and_yield(
            0,
            0,
            dec!(100000),
            500,
            dec!(2000),
            dec!(1960),
            dec!(2040),
            dec!(1000),
            allocation(),
        )
        .unwrap();
        assert_eq!(result.estimated_fee_usd, Decimal::ZERO);
    }

    #[test]
    fn test_negative_volume_rejected() {
        assert!(matches!(
            estimate_fee_and_yield(
                1,
                999,
                dec!(-1),
                500,
                dec!(2000),
                dec!(1960),
                dec!(2040),
                dec!(1000),
                allocation(),
            ),
            Err(DomainError::InvalidVolume(_))
        ));
    }

    #[test]
    fn test_boundary_prices_are_in_range() {
        for price in [dec!(1960), dec!(2040)] {
            let result = estimate_fee_and_yield(
                1,
                999,
                dec!(1000000),
                500,
                price,
                dec!(1960),
                dec!(2040),
                dec!(1000),
                allocation(),
            )
            .unwrap();
            assert!(result.estimated_fee_usd > Decimal::ZERO);
        }
    }
}
