use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

/// Fraction-of-one percentage value.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Percentage(pub Decimal);

impl Percentage {
    pub fn from_bps(bps: u32) -> Self {
        Self(Decimal::from(bps) / Decimal::from(10000))
    }

    /// Builds from a pool fee tier expressed in hundredths of a basis
    /// point (Uniswap V3 convention: 500 -> 0.0005).
    pub fn from_fee_tier(fee_tier: u32) -> Self {
        Self(Decimal::from(fee_tier) / Decimal::from(10000) / Decimal::from(100))
    }

    pub fn to_bps(&self) -> u32 {
        (self.0 * Decimal::from(10000)).to_u32().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_fee_tier_units() {
        // 500 hundredths of a bip = 0.05% = 0.0005
        assert_eq!(Percentage::from_fee_tier(500).0, dec!(0.0005));
        assert_eq!(Percentage::from_fee_tier(3000).0, dec!(0.003));
    }

    #[test]
    fn test_bps_round_trip() {
        assert_eq!(Percentage::from_bps(250).to_bps(), 250);
    }
}
