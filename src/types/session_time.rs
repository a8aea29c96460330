use std::fmt;

use anyhow::{Result, bail};
use chrono::Timelike;
use serde::{Deserialize, Serialize};

/// Wall-clock time of day used for session boundaries.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SessionTime {
    /// 0–23
    pub hour: u8,

    /// 0–59
    pub minute: u8,
}

impl SessionTime {
    pub const fn new(hour: u8, minute: u8) -> Self {
        Self { hour, minute }
    }

    pub fn minutes_of_day(self) -> u32 {
        self.hour as u32 * 60 + self.minute as u32
    }

    pub fn of<T: Timelike>(time: &T) -> Self {
        Self::new(time.hour() as u8, time.minute() as u8)
    }

    pub(crate) fn validate(&self) -> Result<()> {
        if self.hour > 23 {
            bail!("hour must be <= 23, got {}", self.hour);
        }
        if self.minute > 59 {
            bail!("minute must be <= 59, got {}", self.minute);
        }
        Ok(())
    }
}

impl fmt::Display for SessionTime {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{:02}:{:02}", self.hour, self.minute)
    }
}
