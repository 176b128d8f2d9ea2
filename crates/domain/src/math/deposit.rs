//! Splits a USD deposit into the token amounts a price range requires.

use rust_decimal::Decimal;
use rust_decimal::prelude::*;

use crate::error::{DomainError, DomainResult};
use crate::value_objects::estimate_result::TokenAllocation;

fn to_f64(value: Decimal, what: &'static str) -> DomainResult<f64> {
    value.to_f64().ok_or(DomainError::Conversion(what))
}

/// Clamps a raw token leg: a negative USD contribution becomes zero (the
/// position is single-sided on that side), and a contribution above the
/// whole deposit is capped at `deposit / price`.
fn clamp_leg(raw_amount: f64, price_usd: f64, deposit_usd: f64) -> f64 {
    let value = raw_amount * price_usd;
    if value < 0.0 {
        0.0
    } else if value > deposit_usd {
        deposit_usd / price_usd
    } else {
        raw_amount
    }
}

/// Allocates `deposit_usd` across token0/token1 for a position over
/// `[pl, pu]` at current price `p`.
///
/// Uses the provisional liquidity scale
/// `deltaL = deposit / ((sqrt(P) - sqrt(Pl)) * usd1 + (1/sqrt(P) - 1/sqrt(Pu)) * usd0)`
/// and derives each leg from it, clamped so the allocation never goes
/// negative and its total USD value never exceeds the deposit.
pub fn allocate_deposit(
    p: Decimal,
    pl: Decimal,
    pu: Decimal,
    price_usd0: Decimal,
    price_usd1: Decimal,
    deposit_usd: Decimal,
) -> DomainResult<TokenAllocation> {
    if pl >= pu {
        return Err(DomainError::InvalidRange {
            lower: pl,
            upper: pu,
        });
    }
    for price in [p, pl, pu, price_usd0, price_usd1] {
        if price <= Decimal::ZERO {
            return Err(DomainError::InvalidPrice(price));
        }
    }
    if deposit_usd < Decimal::ZERO {
        return Err(DomainError::InvalidDeposit(deposit_usd));
    }

    let sqrt_p = to_f64(p, "current price does not fit in f64")?.sqrt();
    let sqrt_pl = to_f64(pl, "lower price does not fit in f64")?.sqrt();
    let sqrt_pu = to_f64(pu, "upper price does not fit in f64")?.sqrt();
    let usd0 = to_f64(price_usd0, "token0 USD price does not fit in f64")?;
    let usd1 = to_f64(price_usd1, "token1 USD price does not fit in f64")?;
    let deposit = to_f64(deposit_usd, "deposit does not fit in f64")?;

    let denominator = (sqrt_p - sqrt_pl) * usd1 + (1.0 / sqrt_p - 1.0 / sqrt_pu) * usd0;
    if denominator == 0.0 {
        return Err(DomainError::DegenerateRange);
    }
    let delta_l = deposit / denominator;

    let amount1 = clamp_leg(delta_l * (sqrt_p - sqrt_pl), usd1, deposit);
    let amount0 = clamp_leg(delta_l * (1.0 / sqrt_p - 1.0 / sqrt_pu), usd0, deposit);

    let amount0 =
        Decimal::from_f64(amount0).ok_or(DomainError::Conversion("token0 amount overflow"))?;
    let amount1 =
        Decimal::from_f64(amount1).ok_or(DomainError::Conversion("token1 amount overflow"))?;

    Ok(TokenAllocation {
        amount0,
        amount1,
        value0_usd: amount0 * price_usd0,
        value1_usd: amount1 * price_usd1,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_in_range_splits_roughly_evenly() {
        let allocation = allocate_deposit(
            dec!(2000),
            dec!(1960),
            dec!(2040),
            dec!(2000),
            dec!(1),
            dec!(1000),
        )
        .unwrap();

        assert!(allocation.amount0 > Decimal::ZERO);
        assert!(allocation.amount1 > Decimal::ZERO);
        // Both legs land near half the deposit, neither clamped.
        assert!(allocation.value0_usd > dec!(400) && allocation.value0_usd < dec!(600));
        assert!(allocation.value1_usd > dec!(400) && allocation.value1_usd < dec!(600));
        assert!(allocation.total_value_usd() <= dec!(1000.01));
    }

    #[test]
    fn test_never_exceeds_deposit_or_goes_negative() {
        for p in [dec!(1200), dec!(1960), dec!(2000), dec!(2040), dec!(3000)] {
            let usd0 = p;
            let allocation =
                allocate_deposit(p, dec!(1960), dec!(2040), usd0, dec!(1), dec!(1000)).unwrap();
            assert!(allocation.amount0 >= Decimal::ZERO);
            assert!(allocation.amount1 >= Decimal::ZERO);
            assert!(allocation.total_value_usd() <= dec!(1000.01));
        }
    }

    #[test]
    fn test_price_below_range_is_single_sided_token1() {
        // With USD-coherent prices (usd0 = P * usd1) the whole deposit
        // lands in token1 when the price sits well below the range.
        let allocation = allocate_deposit(
            dec!(1200),
            dec!(1960),
            dec!(2040),
            dec!(1200),
            dec!(1),
            dec!(1000),
        )
        .unwrap();
        assert_eq!(allocation.amount0, Decimal::ZERO);
        assert_eq!(allocation.amount1, dec!(1000));
    }

    #[test]
    fn test_price_above_range_is_single_sided_token0() {
        let allocation = allocate_deposit(
            dec!(3000),
            dec!(1960),
            dec!(2040),
            dec!(3000),
            dec!(1),
            dec!(1000),
        )
        .unwrap();
        assert_eq!(allocation.amount1, Decimal::ZERO);
        assert!(allocation.amount0 > dec!(0.33) && allocation.amount0 < dec!(0.34));
        assert!((allocation.value0_usd - dec!(1000)).abs() < dec!(0.001));
    }

    #[test]
    fn test_zero_deposit_allocates_nothing() {
        let allocation = allocate_deposit(
            dec!(2000),
            dec!(1960),
            dec!(2040),
            dec!(2000),
            dec!(1),
            Decimal::ZERO,
        )
        .unwrap();
        assert_eq!(allocation.amount0, Decimal::ZERO);
        assert_eq!(allocation.amount1, Decimal::ZERO);
    }

    #[test]
    fn test_invalid_inputs() {
        assert!(matches!(
            allocate_deposit(dec!(2000), dec!(2040), dec!(1960), dec!(1), dec!(1), dec!(1000)),
            Err(DomainError::InvalidRange { .. })
        ));
        assert!(matches!(
            allocate_deposit(dec!(0), dec!(1960), dec!(2040), dec!(1), dec!(1), dec!(1000)),
            Err(DomainError::InvalidPrice(_))
        ));
        assert!(matches!(
            allocate_deposit(dec!(2000), dec!(1960), dec!(2040), dec!(1), dec!(1), dec!(-5)),
            Err(DomainError::InvalidDeposit(_))
        ));
    }
}
