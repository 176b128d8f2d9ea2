//! Core estimation engine for concentrated-liquidity fee yield.
//!
//! Everything in this crate is pure, synchronous computation over immutable
//! snapshots: price/tick conversion, deposit allocation, fixed-point
//! liquidity math and the fee/APY estimate built on top of them. Data
//! retrieval lives in `univ3-fee-data`; this crate never performs I/O.
//!
//! Numeric conventions: USD amounts, prices and percentages are
//! [`rust_decimal::Decimal`] at the API boundary; sqrt-prices and liquidity
//! are 2^96-scaled integers (`U256` / `u128`); `f64` appears only inside
//! transcendental steps (`sqrt`, `log`) with tested conversions at the edges.

pub mod entities;
pub mod error;
pub mod math;
pub mod metrics;
pub mod value_objects;

pub use error::{DomainError, DomainResult};
