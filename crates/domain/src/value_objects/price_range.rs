use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};
use crate::value_objects::price::Price;

/// Price interval for a liquidity position.
///
/// `Unbounded` stands in for "as low and as high as representable" when no
/// tick data constrains the position; the converter maps it to the
/// min/max usable ticks for the pool's spacing. This replaces the numeric
/// sentinel prices the upstream data feed would otherwise require.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PriceRange {
    Bounded { lower: Price, upper: Price },
    Unbounded,
}

impl PriceRange {
    /// Builds a bounded range, enforcing `lower < upper`.
    pub fn bounded(lower: Decimal, upper: Decimal) -> DomainResult<Self> {
        if lower >= upper {
            return Err(DomainError::InvalidRange { lower, upper });
        }
        Ok(Self::Bounded {
            lower: Price::new(lower)?,
            upper: Price::new(upper)?,
        })
    }

    /// Whether `price` falls inside the range, boundaries included.
    pub fn contains(&self, price: Decimal) -> bool {
        match self {
            Self::Bounded { lower, upper } => price >= lower.value && price <= upper.value,
            Self::Unbounded => true,
        }
    }
}
