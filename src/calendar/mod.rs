pub mod filter_date;
pub mod types;

pub use filter_date::{
    get_display_period_description, get_stock_filter_date, is_during_trading_hours,
    resolve_filter_date,
};
pub use types::{FilterDateDecision, FilterDateRule};
