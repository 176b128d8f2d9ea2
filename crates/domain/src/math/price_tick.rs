//! Conversion between human prices, tick indices and 2^96-scaled
//! sqrt-prices.
//!
//! Ticks follow the standard CLMM relationship `price = 1.0001^tick`;
//! only multiples of the pool's tick spacing are usable position
//! boundaries. Prices cross into tick space through `f64` logarithms,
//! the one place floating point is allowed on the way into the
//! fixed-point core.

use primitive_types::U256;
use rust_decimal::Decimal;
use rust_decimal::prelude::*;

use crate::error::{DomainError, DomainResult};
use crate::math::full_math::f64_to_u256;
use crate::value_objects::price_range::PriceRange;

/// Base of the tick-price exponential.
const TICK_BASE: f64 = 1.0001;

/// Smallest tick index representable by the protocol.
pub const MIN_TICK: i32 = -887272;
/// Largest tick index representable by the protocol.
pub const MAX_TICK: i32 = 887272;

fn check_spacing(tick_spacing: i32) -> DomainResult<()> {
    if tick_spacing <= 0 {
        return Err(DomainError::InvalidTickSpacing(tick_spacing));
    }
    Ok(())
}

/// Smallest usable position boundary: the least multiple of
/// `tick_spacing` that is >= [`MIN_TICK`].
pub fn min_usable_tick(tick_spacing: i32) -> DomainResult<i32> {
    check_spacing(tick_spacing)?;
    Ok((MIN_TICK + tick_spacing - 1).div_euclid(tick_spacing) * tick_spacing)
}

/// Largest usable position boundary: the greatest multiple of
/// `tick_spacing` that is <= [`MAX_TICK`].
pub fn max_usable_tick(tick_spacing: i32) -> DomainResult<i32> {
    check_spacing(tick_spacing)?;
    Ok(MAX_TICK.div_euclid(tick_spacing) * tick_spacing)
}

fn decimal_to_positive_f64(price: Decimal) -> DomainResult<f64> {
    if price <= Decimal::ZERO {
        return Err(DomainError::InvalidPrice(price));
    }
    let value = price
        .to_f64()
        .ok_or(DomainError::Conversion("price does not fit in f64"))?;
    if !value.is_finite() || value <= 0.0 {
        return Err(DomainError::InvalidPrice(price));
    }
    Ok(value)
}

/// Raw (unsnapped) tick for a decimal-adjusted price:
/// `floor(log(price / 10^(decimals0 - decimals1)) / log(1.0001))`,
/// clamped into `[MIN_TICK, MAX_TICK]`.
pub fn price_to_tick(price: Decimal, decimals0: u8, decimals1: u8) -> DomainResult<i32> {
    let value = decimal_to_positive_f64(price)?;
    let adjusted = value / 10f64.powi(i32::from(decimals0) - i32::from(decimals1));
    let tick = (adjusted.ln() / TICK_BASE.ln()).floor();
    if tick.is_nan() {
        return Err(DomainError::Conversion("price produced a non-finite tick"));
    }
    Ok(tick.clamp(f64::from(MIN_TICK), f64::from(MAX_TICK)) as i32)
}

/// Snaps a tick to the nearest multiple of `tick_spacing`, ties broken
/// toward zero, clamped into the usable boundary interval.
pub fn nearest_usable_tick(tick: i32, tick_spacing: i32) -> DomainResult<i32> {
    check_spacing(tick_spacing)?;
    let quotient = tick.div_euclid(tick_spacing);
    let remainder = tick.rem_euclid(tick_spacing);
    let snapped = if 2 * remainder > tick_spacing {
        (quotient + 1) * tick_spacing
    } else if 2 * remainder < tick_spacing {
        quotient * tick_spacing
    } else if tick >= 0 {
        quotient * tick_spacing
    } else {
        (quotient + 1) * tick_spacing
    };
    Ok(snapped.clamp(min_usable_tick(tick_spacing)?, max_usable_tick(tick_spacing)?))
}

/// Full conversion used at the API boundary: raw tick from the price,
/// then snapped to the pool's usable grid.
pub fn price_to_usable_tick(
    price: Decimal,
    decimals0: u8,
    decimals1: u8,
    tick_spacing: i32,
) -> DomainResult<i32> {
    check_spacing(tick_spacing)?;
    nearest_usable_tick(price_to_tick(price, decimals0, decimals1)?, tick_spacing)
}

/// Price at a tick: `1.0001^tick`, without decimal adjustment.
pub fn tick_to_price(tick: i32) -> DomainResult<Decimal> {
    let price = TICK_BASE.powi(tick);
    Decimal::from_f64(price).ok_or(DomainError::Conversion("tick price exceeds decimal range"))
}

/// 2^96-scaled sqrt price: `sqrt(price) * 2^96`, truncated.
pub fn price_to_sqrt_x96(price: Decimal) -> DomainResult<U256> {
    let value = decimal_to_positive_f64(price)?;
    f64_to_u256(value.sqrt() * 2f64.powi(96))
}

/// Tick boundaries for a position range. A bounded range snaps both
/// prices onto the usable grid; an unbounded range spans the whole
/// usable tick interval instead of relying on sentinel prices.
pub fn tick_range(
    range: &PriceRange,
    decimals0: u8,
    decimals1: u8,
    tick_spacing: i32,
) -> DomainResult<(i32, i32)> {
    match range {
        PriceRange::Bounded { lower, upper } => Ok((
            price_to_usable_tick(lower.value, decimals0, decimals1, tick_spacing)?,
            price_to_usable_tick(upper.value, decimals0, decimals1, tick_spacing)?,
        )),
        PriceRange::Unbounded => Ok((min_usable_tick(tick_spacing)?, max_usable_tick(tick_spacing)?)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_price_to_tick_unit_price() {
        assert_eq!(price_to_tick(dec!(1), 6, 6).unwrap(), 0);
    }

    #[test]
    fn test_price_to_tick_rejects_non_positive() {
        assert!(matches!(
            price_to_tick(Decimal::ZERO, 18, 6),
            Err(DomainError::InvalidPrice(_))
        ));
    }

    #[test]
    fn test_decimal_adjustment_shifts_tick() {
        // price 1 with an 18/6 pair sits 12 decades below raw parity.
        let tick = price_to_tick(dec!(1), 18, 6).unwrap();
        let expected = (1e-12f64.ln() / TICK_BASE.ln()).floor() as i32;
        assert_eq!(tick, expected);
    }

    #[test]
    fn test_nearest_usable_tick_rounding() {
        assert_eq!(nearest_usable_tick(76012, 10).unwrap(), 76010);
        assert_eq!(nearest_usable_tick(76017, 10).unwrap(), 76020);
        assert_eq!(nearest_usable_tick(-76012, 10).unwrap(), -76010);
    }

    #[test]
    fn test_nearest_usable_tick_ties_toward_zero() {
        assert_eq!(nearest_usable_tick(5, 10).unwrap(), 0);
        assert_eq!(nearest_usable_tick(-5, 10).unwrap(), 0);
        assert_eq!(nearest_usable_tick(15, 10).unwrap(), 10);
        assert_eq!(nearest_usable_tick(-15, 10).unwrap(), -10);
    }

    #[test]
    fn test_nearest_usable_tick_clamps_to_usable_bounds() {
        assert_eq!(nearest_usable_tick(MIN_TICK, 60).unwrap(), min_usable_tick(60).unwrap());
        assert_eq!(nearest_usable_tick(MAX_TICK, 60).unwrap(), max_usable_tick(60).unwrap());
    }

    #[test]
    fn test_invalid_spacing() {
        assert!(matches!(
            nearest_usable_tick(100, 0),
            Err(DomainError::InvalidTickSpacing(0))
        ));
        assert!(matches!(
            min_usable_tick(-10),
            Err(DomainError::InvalidTickSpacing(-10))
        ));
    }

    #[test]
    fn test_usable_bounds_are_spacing_multiples() {
        let min = min_usable_tick(10).unwrap();
        let max = max_usable_tick(10).unwrap();
        assert_eq!(min, -887270);
        assert_eq!(max, 887270);
        assert_eq!(min % 10, 0);
        assert_eq!(max % 10, 0);
    }

    #[test]
    fn test_price_round_trip_within_one_spacing() {
        let spacing = 10;
        let price = dec!(2000);
        let tick = price_to_usable_tick(price, 6, 6, spacing).unwrap();
        let reconstructed = tick_to_price(tick).unwrap().to_f64().unwrap();
        let ratio = reconstructed / 2000.0;
        let max_drift = TICK_BASE.powi(spacing);
        assert!(ratio < max_drift && ratio > 1.0 / max_drift);
    }

    #[test]
    fn test_price_to_sqrt_x96_exact_square() {
        let sqrt_price = price_to_sqrt_x96(dec!(4)).unwrap();
        assert_eq!(sqrt_price, U256::from(1u8) << 97);
    }

    #[test]
    fn test_tick_range_unbounded_spans_usable_interval() {
        let (lower, upper) = tick_range(&PriceRange::Unbounded, 18, 6, 10).unwrap();
        assert_eq!(lower, -887270);
        assert_eq!(upper, 887270);
    }

    #[test]
    fn test_tick_range_bounded_preserves_order() {
        let range = PriceRange::bounded(dec!(1960), dec!(2040)).unwrap();
        let (lower, upper) = tick_range(&range, 6, 6, 10).unwrap();
        assert!(lower <= upper);
        assert_eq!(lower % 10, 0);
        assert_eq!(upper % 10, 0);
    }
}
