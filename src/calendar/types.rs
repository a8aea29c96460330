use std::fmt;

use chrono::NaiveDate;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterDateDecision {
    pub date: NaiveDate,
    pub rule: FilterDateRule,
}

/// Which row of the calendar table selected the filter date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterDateRule {
    InSession,
    AfterClose,
    BeforeOpen,
    Sunday,
    Saturday,
    NonTradingDay,
}

impl fmt::Display for FilterDateRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InSession => write!(f, "in-session"),
            Self::AfterClose => write!(f, "after-close"),
            Self::BeforeOpen => write!(f, "before-open"),
            Self::Sunday => write!(f, "sunday"),
            Self::Saturday => write!(f, "saturday"),
            Self::NonTradingDay => write!(f, "non-trading-day"),
        }
    }
}
