pub mod concentrated_liquidity;
pub mod deposit;
pub mod full_math;
pub mod price_tick;

pub use concentrated_liquidity::{aggregate_gross_liquidity, compute_liquidity};
pub use deposit::allocate_deposit;
pub use price_tick::{
    MAX_TICK, MIN_TICK, max_usable_tick, min_usable_tick, nearest_usable_tick, price_to_sqrt_x96,
    price_to_tick, price_to_usable_tick, tick_range, tick_to_price,
};
