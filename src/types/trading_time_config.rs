use std::env;
use std::fs;
use std::io;
use std::path::Path;

use anyhow::{Context, Result, bail};
use chrono::FixedOffset;
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};

use crate::types::session_time::SessionTime;
use crate::types::trading_days::TradingDays;

const MAX_OFFSET_MINUTES: i32 = 18 * 60;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct TradingTimeConfig {
    /// Session open (inclusive), exchange wall-clock time
    pub start_time: SessionTime,

    /// Session close (inclusive), exchange wall-clock time
    pub end_time: SessionTime,

    /// Weekdays the exchange trades on, 0 = Sunday
    #[serde(default)]
    pub trading_days: TradingDays,

    /// Exchange offset from UTC. Host local time is used when unset.
    #[serde(default)]
    pub utc_offset_minutes: Option<i32>,
}

impl Default for TradingTimeConfig {
    /// Mongolia Stock Exchange: 09:30–16:00, Monday to Friday.
    fn default() -> Self {
        Self {
            start_time: SessionTime::new(9, 30),
            end_time: SessionTime::new(16, 0),
            trading_days: TradingDays::MONDAY_TO_FRIDAY,
            utc_offset_minutes: None,
        }
    }
}

static CONFIG: OnceCell<TradingTimeConfig> = OnceCell::new();

impl TradingTimeConfig {
    const FILE_NAME: &'static str = "trading_calendar.yml";
    const PATH_VAR: &'static str = "TRADING_CALENDAR_CONFIG";

    /// Process-wide config, read once from `$TRADING_CALENDAR_CONFIG` or
    /// `trading_calendar.yml`. Falls back to the default when no file exists.
    pub fn from_config() -> Result<&'static TradingTimeConfig> {
        CONFIG.get_or_try_init(|| {
            let path = env::var(Self::PATH_VAR).unwrap_or_else(|_| Self::FILE_NAME.to_string());

            Self::load(&path)
        })
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = match fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(error) if error.kind() == io::ErrorKind::NotFound => {
                tracing::info!(path = %path.display(), "no trading calendar config, using defaults");
                return Ok(Self::default());
            }
            Err(error) => {
                return Err(error).with_context(|| {
                    format!("failed to read trading calendar {}", path.display())
                });
            }
        };

        Self::from_yaml_str(&raw)
            .with_context(|| format!("failed to load trading calendar {}", path.display()))
    }

    pub fn from_yaml_str(raw: &str) -> Result<Self> {
        let config: TradingTimeConfig =
            serde_yaml::from_str(raw).context("failed to parse trading calendar")?;

        config
            .validate()
            .context("trading calendar config validation failed")?;

        Ok(config)
    }

    /// Configured exchange offset, or `fallback` when none is set.
    pub fn exchange_offset(&self, fallback: FixedOffset) -> FixedOffset {
        self.utc_offset_minutes
            .and_then(|minutes| FixedOffset::east_opt(minutes * 60))
            .unwrap_or(fallback)
    }

    fn validate(&self) -> Result<()> {
        self.start_time.validate().context("invalid start_time")?;
        self.end_time.validate().context("invalid end_time")?;

        if self.start_time > self.end_time {
            bail!(
                "start_time {} must not be after end_time {}",
                self.start_time,
                self.end_time
            );
        }
        if self.trading_days.is_empty() {
            bail!("trading_days must not be empty");
        }
        if let Some(minutes) = self.utc_offset_minutes {
            if minutes.abs() > MAX_OFFSET_MINUTES {
                bail!("utc_offset_minutes must be within ±{MAX_OFFSET_MINUTES}, got {minutes}");
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Weekday;
    use std::io::Write;

    #[test]
    fn default_is_mongolia_stock_exchange_hours() {
        let config = TradingTimeConfig::default();
        assert_eq!(config.start_time, SessionTime::new(9, 30));
        assert_eq!(config.end_time, SessionTime::new(16, 0));
        assert_eq!(config.trading_days.indices(), vec![1, 2, 3, 4, 5]);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn parses_yaml_with_defaulted_days() {
        let config = TradingTimeConfig::from_yaml_str(
            "start_time: { hour: 10, minute: 0 }\nend_time: { hour: 15, minute: 30 }\nutc_offset_minutes: 480\n",
        )
        .unwrap();

        assert_eq!(config.start_time, SessionTime::new(10, 0));
        assert_eq!(config.end_time, SessionTime::new(15, 30));
        assert!(config.trading_days.contains(Weekday::Tue));
        assert_eq!(config.utc_offset_minutes, Some(480));
    }

    #[test]
    fn rejects_inverted_session() {
        let result = TradingTimeConfig::from_yaml_str(
            "start_time: { hour: 16, minute: 0 }\nend_time: { hour: 9, minute: 30 }\n",
        );
        assert!(result.is_err());
    }

    #[test]
    fn rejects_empty_trading_days() {
        let result = TradingTimeConfig::from_yaml_str(
            "start_time: { hour: 9, minute: 30 }\nend_time: { hour: 16, minute: 0 }\ntrading_days: []\n",
        );
        assert!(result.is_err());
    }

    #[test]
    fn rejects_unknown_weekday_index() {
        let result = TradingTimeConfig::from_yaml_str(
            "start_time: { hour: 9, minute: 30 }\nend_time: { hour: 16, minute: 0 }\ntrading_days: [1, 9]\n",
        );
        assert!(result.is_err());
    }

    #[test]
    fn rejects_misspelled_keys() {
        let result = TradingTimeConfig::from_yaml_str(
            "start_time: { hour: 9, minute: 30 }\nend_time: { hour: 16, minute: 0 }\ntrading_day: [1, 2, 3]\n",
        );
        assert!(result.is_err());

        let result = TradingTimeConfig::from_yaml_str(
            "start_time: { hour: 9, minutes: 30 }\nend_time: { hour: 16, minute: 0 }\n",
        );
        assert!(result.is_err());
    }

    #[test]
    fn rejects_absurd_offset() {
        let result = TradingTimeConfig::from_yaml_str(
            "start_time: { hour: 9, minute: 30 }\nend_time: { hour: 16, minute: 0 }\nutc_offset_minutes: 2000\n",
        );
        assert!(result.is_err());
    }

    #[test]
    fn missing_file_falls_back_to_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = TradingTimeConfig::load(dir.path().join("absent.yml")).unwrap();
        assert_eq!(config, TradingTimeConfig::default());
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "start_time: {{ hour: 9, minute: 0 }}\nend_time: {{ hour: 13, minute: 0 }}\ntrading_days: [0, 1, 2, 3, 4]"
        )
        .unwrap();

        let config = TradingTimeConfig::load(file.path()).unwrap();
        assert!(config.trading_days.contains(Weekday::Sun));
        assert!(!config.trading_days.contains(Weekday::Fri));
    }

    #[test]
    fn offset_falls_back_when_unset() {
        let fallback = FixedOffset::east_opt(3600).unwrap();
        let mut config = TradingTimeConfig::default();
        assert_eq!(config.exchange_offset(fallback), fallback);

        config.utc_offset_minutes = Some(480);
        assert_eq!(
            config.exchange_offset(fallback),
            FixedOffset::east_opt(8 * 3600).unwrap()
        );
    }
}
