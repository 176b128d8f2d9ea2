//! 256-bit helpers shared by the fixed-point liquidity math.

use primitive_types::U256;

use crate::error::{DomainError, DomainResult};

/// 2^96, the sqrt-price fixed-point scale.
pub const Q96: U256 = U256([0, 1 << 32, 0, 0]);

/// 2^192, the square of the sqrt-price scale.
pub const Q192: U256 = U256([0, 0, 0, 1]);

/// Returns `(a * b) / denominator` with a 256-bit intermediate product,
/// rounding down.
pub fn mul_div(a: U256, b: U256, denominator: U256) -> DomainResult<U256> {
    if denominator.is_zero() {
        return Err(DomainError::Arithmetic("division by zero"));
    }
    let product = a
        .checked_mul(b)
        .ok_or(DomainError::Arithmetic("product overflows 256 bits"))?;
    Ok(product / denominator)
}

/// Lossy widening of a `U256` into `f64`, for display-side ratios only.
pub fn u256_to_f64(value: U256) -> f64 {
    value
        .0
        .iter()
        .enumerate()
        .fold(0f64, |acc, (i, limb)| {
            acc + (*limb as f64) * 2f64.powi(64 * i as i32)
        })
}

/// Truncates a non-negative finite `f64` into a `U256`.
///
/// The mantissa carries 53 significant bits; anything beyond that was
/// already lost upstream, so the low bits of very large results are zero.
pub fn f64_to_u256(value: f64) -> DomainResult<U256> {
    if !value.is_finite() || value < 0.0 {
        return Err(DomainError::Conversion(
            "value is negative or not finite",
        ));
    }
    if value < u128::MAX as f64 {
        return Ok(U256::from(value as u128));
    }
    let hi = (value / 2f64.powi(64)).floor();
    if hi >= u128::MAX as f64 {
        return Err(DomainError::Conversion("value exceeds 192 bits"));
    }
    let lo = value - hi * 2f64.powi(64);
    Ok((U256::from(hi as u128) << 64) | U256::from(lo as u128))
}

/// Narrows a `U256` into `u128`, failing instead of truncating.
pub fn u256_to_u128(value: U256) -> DomainResult<u128> {
    if value > U256::from(u128::MAX) {
        return Err(DomainError::Arithmetic(
            "liquidity magnitude overflows 128 bits",
        ));
    }
    Ok(value.low_u128())
}
