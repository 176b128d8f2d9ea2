//! Fixed-point liquidity math for a position's token amounts.
//!
//! Liquidity magnitudes are 2^96-scaled integers; both token legs must
//! cover the same liquidity, so the binding side (the minimum of the two
//! candidates) determines how much liquidity a deposit actually buys.

use primitive_types::U256;
use rust_decimal::Decimal;
use rust_decimal::prelude::*;

use crate::entities::tick::TickRecord;
use crate::error::{DomainError, DomainResult};
use crate::math::full_math::{Q96, f64_to_u256, mul_div, u256_to_u128};
use crate::math::price_tick::price_to_sqrt_x96;

fn sort_pair(a: U256, b: U256) -> (U256, U256) {
    if a < b { (a, b) } else { (b, a) }
}

/// Token0-side liquidity candidate:
/// `amount0 * (sqrt_pa * sqrt_pb / 2^96) / (sqrt_pb - sqrt_pa)`.
fn liquidity0(amount0: U256, sqrt_pa: U256, sqrt_pb: U256) -> DomainResult<U256> {
    let (lower, upper) = sort_pair(sqrt_pa, sqrt_pb);
    if lower == upper {
        return Err(DomainError::DegenerateRange);
    }
    let intermediate = mul_div(lower, upper, Q96)?;
    mul_div(amount0, intermediate, upper - lower)
}

/// Token1-side liquidity candidate: `amount1 * 2^96 / (sqrt_pb - sqrt_pa)`.
fn liquidity1(amount1: U256, sqrt_pa: U256, sqrt_pb: U256) -> DomainResult<U256> {
    let (lower, upper) = sort_pair(sqrt_pa, sqrt_pb);
    if lower == upper {
        return Err(DomainError::DegenerateRange);
    }
    mul_div(amount1, Q96, upper - lower)
}

fn scaled_amount(amount: Decimal, scale: f64, what: &'static str) -> DomainResult<U256> {
    let value = amount.to_f64().ok_or(DomainError::Conversion(what))?;
    f64_to_u256(value * scale)
}

/// Converts token amounts plus price bounds into the position's
/// fixed-point liquidity contribution.
///
/// Amounts are normalized to a common decimal base with
/// `10^(decimals0 - decimals1)` before entering fixed point; the result
/// is `floor(min(liquidity0, liquidity1))`.
pub fn compute_liquidity(
    pl: Decimal,
    p: Decimal,
    pu: Decimal,
    amount0: Decimal,
    decimals0: u8,
    amount1: Decimal,
    decimals1: u8,
) -> DomainResult<u128> {
    let sqrt_lower = price_to_sqrt_x96(pl)?;
    let sqrt_current = price_to_sqrt_x96(p)?;
    let sqrt_upper = price_to_sqrt_x96(pu)?;
    if sqrt_current == sqrt_upper || sqrt_current == sqrt_lower {
        return Err(DomainError::DegenerateRange);
    }

    let scale = 10f64.powi(i32::from(decimals0) - i32::from(decimals1));
    let amount0 = scaled_amount(amount0, scale, "token0 amount does not fit in f64")?;
    let amount1 = scaled_amount(amount1, scale, "token1 amount does not fit in f64")?;

    let candidate0 = liquidity0(amount0, sqrt_current, sqrt_upper)?;
    let candidate1 = liquidity1(amount1, sqrt_current, sqrt_lower)?;
    u256_to_u128(candidate0.min(candidate1))
}

/// Cumulative existing liquidity across a queried tick range.
///
/// Sums `liquidity_gross` over all records except the last: the final
/// record marks the range's upper boundary and would double-count its
/// edge. Empty and single-record inputs aggregate to zero. This is a
/// best-effort approximation of in-range active liquidity, suitable only
/// as a share denominator.
pub fn aggregate_gross_liquidity(ticks: &[TickRecord]) -> u128 {
    if ticks.len() < 2 {
        return 0;
    }
    ticks[..ticks.len() - 1]
        .iter()
        .fold(0u128, |acc, tick| acc.saturating_add(tick.liquidity_gross))
}
