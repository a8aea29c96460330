use std::fmt;

use chrono::{DateTime, TimeZone};

use crate::calendar::{
    FilterDateDecision, get_display_period_description, is_during_trading_hours,
    resolve_filter_date,
};
use crate::freshness::filter_todays_fresh_stocks;
use crate::types::stock_snapshot::StockSnapshot;
use crate::types::trading_time_config::TradingTimeConfig;

/// Outcome of one filtering pass, ready for printing.
#[derive(Debug, Clone)]
pub struct FilterReport {
    pub decision: FilterDateDecision,
    pub period: String,
    pub in_session: bool,
    pub received: usize,
    pub snapshots: Vec<StockSnapshot>,
}

impl FilterReport {
    pub fn build<Tz: TimeZone>(
        now: &DateTime<Tz>,
        config: &TradingTimeConfig,
        snapshots: Vec<StockSnapshot>,
    ) -> Self {
        let received = snapshots.len();

        Self {
            decision: resolve_filter_date(now, config),
            period: get_display_period_description(now, config),
            in_session: is_during_trading_hours(now, config),
            received,
            snapshots: filter_todays_fresh_stocks(snapshots, now),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.snapshots)
    }
}

impl fmt::Display for FilterReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "showing data for {} ({}), market {}, {}/{} instruments",
            self.period,
            self.decision.rule,
            if self.in_session { "open" } else { "closed" },
            self.snapshots.len(),
            self.received
        )
    }
}
