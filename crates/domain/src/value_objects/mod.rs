pub mod estimate_result;
pub mod percentage;
pub mod price;
pub mod price_range;

pub use estimate_result::{EstimateResult, TokenAllocation};
pub use percentage::Percentage;
pub use price::Price;
pub use price_range::PriceRange;
