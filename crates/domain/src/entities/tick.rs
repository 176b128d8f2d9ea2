use serde::{Deserialize, Serialize};

/// One initialized tick as reported by the tick-data collaborator.
///
/// A list of these is immutable input data: the core consumes it once to
/// produce an aggregate and never mutates or retains it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickRecord {
    /// Tick index, a multiple of the pool's tick spacing.
    pub index: i32,
    /// Total liquidity referencing this tick from either side.
    pub liquidity_gross: u128,
}

impl TickRecord {
    pub fn new(index: i32, liquidity_gross: u128) -> Self {
        Self {
            index,
            liquidity_gross,
        }
    }
}
