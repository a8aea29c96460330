pub mod display;
pub mod entry_time;
pub mod policy;

pub use display::should_display_stock;
pub use entry_time::{is_todays_fresh_data, parse_entry_date};
pub use policy::{InclusionReason, classify_snapshot, filter_todays_fresh_stocks};
