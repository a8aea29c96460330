use std::fmt;

use anyhow::{Result, bail};
use chrono::Weekday;
use serde::{Deserialize, Serialize};

/// Set of weekdays on which the market trades.
///
/// Serialized as a list of weekday indices where 0 is Sunday and 6 is Saturday.
#[derive(Copy, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(try_from = "Vec<u8>", into = "Vec<u8>")]
pub struct TradingDays(u8);

impl TradingDays {
    pub const MONDAY_TO_FRIDAY: TradingDays = TradingDays(0b0011_1110);

    pub fn from_indices(indices: &[u8]) -> Result<Self> {
        let mut mask = 0u8;
        for &index in indices {
            if index > 6 {
                bail!("weekday index must be within 0..=6, got {index}");
            }
            mask |= 1 << index;
        }
        Ok(Self(mask))
    }

    pub fn contains(&self, weekday: Weekday) -> bool {
        self.0 & (1 << weekday.num_days_from_sunday()) != 0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn indices(&self) -> Vec<u8> {
        (0..7).filter(|index| self.0 & (1 << index) != 0).collect()
    }
}

impl Default for TradingDays {
    fn default() -> Self {
        Self::MONDAY_TO_FRIDAY
    }
}

impl TryFrom<Vec<u8>> for TradingDays {
    type Error = anyhow::Error;

    fn try_from(indices: Vec<u8>) -> Result<Self> {
        Self::from_indices(&indices)
    }
}

impl From<TradingDays> for Vec<u8> {
    fn from(days: TradingDays) -> Self {
        days.indices()
    }
}

impl fmt::Debug for TradingDays {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.indices()).finish()
    }
}
