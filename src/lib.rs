pub mod calendar;
pub mod freshness;
pub mod market;
pub mod scenario;
pub mod types;
