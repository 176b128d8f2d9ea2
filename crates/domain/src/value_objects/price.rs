use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};

/// Human-readable price, token1 units per token0 unit, decimal-adjusted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Price {
    pub value: Decimal,
}

impl Price {
    /// Wraps a strictly positive price.
    pub fn new(value: Decimal) -> DomainResult<Self> {
        if value <= Decimal::ZERO {
            return Err(DomainError::InvalidPrice(value));
        }
        Ok(Self { value })
    }

    pub fn invert(&self) -> Self {
        // Constructor guarantees a nonzero value.
        Self {
            value: Decimal::ONE / self.value,
        }
    }
}
