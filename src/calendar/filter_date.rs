use chrono::{DateTime, Datelike, Days, NaiveDate, TimeZone, Weekday};

use crate::calendar::types::{FilterDateDecision, FilterDateRule};
use crate::types::session_time::SessionTime;
use crate::types::trading_time_config::TradingTimeConfig;

/// Picks the calendar date whose market data counts as current at `now`,
/// together with the rule that selected it.
///
/// Weekday and time of day are read in `now`'s own time zone. Session
/// boundaries are inclusive. Before the open on a trading day, and on any
/// non-trading day, the previous trading day is used; Saturday and Sunday
/// always map back to Friday.
pub fn resolve_filter_date<Tz: TimeZone>(
    now: &DateTime<Tz>,
    config: &TradingTimeConfig,
) -> FilterDateDecision {
    let today = now.date_naive();
    let weekday = now.weekday();

    if config.trading_days.contains(weekday) {
        let minute = SessionTime::of(now).minutes_of_day();

        if minute < config.start_time.minutes_of_day() {
            return FilterDateDecision {
                date: previous_trading_day(today, config),
                rule: FilterDateRule::BeforeOpen,
            };
        }

        let rule = if minute > config.end_time.minutes_of_day() {
            FilterDateRule::AfterClose
        } else {
            FilterDateRule::InSession
        };

        return FilterDateDecision { date: today, rule };
    }

    match weekday {
        Weekday::Sun => FilterDateDecision {
            date: days_before(today, 2),
            rule: FilterDateRule::Sunday,
        },
        Weekday::Sat => FilterDateDecision {
            date: days_before(today, 1),
            rule: FilterDateRule::Saturday,
        },
        _ => FilterDateDecision {
            date: previous_trading_day(today, config),
            rule: FilterDateRule::NonTradingDay,
        },
    }
}

pub fn get_stock_filter_date<Tz: TimeZone>(
    now: &DateTime<Tz>,
    config: &TradingTimeConfig,
) -> NaiveDate {
    resolve_filter_date(now, config).date
}

pub fn is_during_trading_hours<Tz: TimeZone>(
    now: &DateTime<Tz>,
    config: &TradingTimeConfig,
) -> bool {
    if !config.trading_days.contains(now.weekday()) {
        return false;
    }

    let minute = SessionTime::of(now).minutes_of_day();
    minute >= config.start_time.minutes_of_day() && minute <= config.end_time.minutes_of_day()
}

/// Filter date formatted for banners, e.g. `2024.03.08`.
pub fn get_display_period_description<Tz: TimeZone>(
    now: &DateTime<Tz>,
    config: &TradingTimeConfig,
) -> String {
    get_stock_filter_date(now, config)
        .format("%Y.%m.%d")
        .to_string()
}

fn previous_trading_day(today: NaiveDate, config: &TradingTimeConfig) -> NaiveDate {
    for step in 1..=7 {
        let candidate = days_before(today, step);
        if config.trading_days.contains(candidate.weekday()) {
            return candidate;
        }
    }

    tracing::warn!(%today, "no trading day in the past week, using today");
    today
}

fn days_before(date: NaiveDate, days: u64) -> NaiveDate {
    date.checked_sub_days(Days::new(days)).unwrap_or(date)
}
