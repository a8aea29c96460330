pub mod session_time;
pub mod stock_snapshot;
pub mod trading_days;
pub mod trading_time_config;
