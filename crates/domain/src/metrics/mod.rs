pub mod fees;

pub use fees::estimate_fee_and_yield;
