pub mod pool;
pub mod price_point;
pub mod tick;
pub mod token;

// Re-export for easier access
pub use pool::PoolSnapshot;
pub use price_point::{PriceChart, PricePoint};
pub use tick::TickRecord;
pub use token::Token;
