use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// USD deposit split into the two token legs a range requires.
///
/// Amounts are in human token units; the paired USD values never sum to
/// more than the deposit target (the allocator clamps).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TokenAllocation {
    pub amount0: Decimal,
    pub amount1: Decimal,
    pub value0_usd: Decimal,
    pub value1_usd: Decimal,
}

impl TokenAllocation {
    pub fn total_value_usd(&self) -> Decimal {
        self.value0_usd + self.value1_usd
    }
}

/// Final output of an estimation request. Fully derived, no hidden state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EstimateResult {
    /// Expected daily fee income in USD.
    pub estimated_fee_usd: Decimal,
    /// Fee income annualized against the deposit, in percent.
    pub annualized_yield_pct: Decimal,
    /// Daily income expressed as percentage points per day
    /// (`annualized_yield_pct / 365`).
    pub daily_income_usd: Decimal,
    pub allocation: TokenAllocation,
}

impl EstimateResult {
    /// Zero-fee result for positions that are out of range or face an
    /// empty pool, so callers can always render a number.
    pub fn out_of_market(allocation: TokenAllocation) -> Self {
        Self {
            estimated_fee_usd: Decimal::ZERO,
            annualized_yield_pct: Decimal::ZERO,
            daily_income_usd: Decimal::ZERO,
            allocation,
        }
    }
}
