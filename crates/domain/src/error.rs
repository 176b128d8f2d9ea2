//! Unified error type for the estimation core.
//!
//! Every failure the core can produce is local and synchronous: the math
//! never touches the network, so there is no transient class to retry.
//! Degenerate-but-valid situations (single-sided allocation, out-of-range
//! position, empty tick list) are modeled as zero/clamped results instead.

use rust_decimal::Decimal;

/// Errors returned by the estimation core.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DomainError {
    /// A price was zero, negative, or not finite.
    #[error("price must be strictly positive, got {0}")]
    InvalidPrice(Decimal),

    /// A price range had `lower >= upper`.
    #[error("invalid range: lower {lower} must be strictly below upper {upper}")]
    InvalidRange { lower: Decimal, upper: Decimal },

    /// A pool tick spacing was zero or negative.
    #[error("tick spacing must be positive, got {0}")]
    InvalidTickSpacing(i32),

    /// Two sqrt-price bounds collapsed to a zero-width sub-interval.
    #[error("degenerate range: zero-width sqrt-price interval")]
    DegenerateRange,

    /// A trading volume was negative.
    #[error("average daily volume must be non-negative, got {0}")]
    InvalidVolume(Decimal),

    /// A deposit target was negative.
    #[error("deposit must be non-negative, got {0}")]
    InvalidDeposit(Decimal),

    /// A value could not cross the float/decimal/fixed-point boundary.
    #[error("numeric conversion failed: {0}")]
    Conversion(&'static str),

    /// Fixed-point arithmetic overflowed or divided by zero.
    #[error("fixed-point arithmetic failed: {0}")]
    Arithmetic(&'static str),
}

/// Convenience alias used across the crate.
pub type DomainResult<T> = Result<T, DomainError>;
