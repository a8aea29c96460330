use anyhow::{Context, Result, anyhow};
use chrono::{DateTime, FixedOffset, Local, NaiveDateTime, TimeZone};

use crate::{
    market::{
        file_source::FileSnapshotSource, http_source::HttpSnapshotSource,
        snapshot_source::SnapshotSource,
    },
    scenario::sources::SourceKind,
    types::trading_time_config::TradingTimeConfig,
};

pub struct Scenario;

type DynamicSource = Box<dyn SnapshotSource>;

const NAIVE_NOW_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M"];

impl Scenario {
    pub fn snapshot_source(kind: SourceKind, location: &str) -> Result<DynamicSource> {
        tracing::info!(source = %kind, location, "creating snapshot source");

        let source: DynamicSource = match kind {
            SourceKind::File => Box::new(FileSnapshotSource::new(location)),
            SourceKind::Http => Box::new(HttpSnapshotSource::parse(location)?),
        };

        Ok(source)
    }

    /// Current instant on the exchange clock, or `overridden` when given.
    pub fn now(config: &TradingTimeConfig, overridden: Option<&str>) -> Result<DateTime<FixedOffset>> {
        let local_now = Local::now();
        let offset = config.exchange_offset(*local_now.offset());

        match overridden {
            None => Ok(local_now.with_timezone(&offset)),
            Some(raw) => Self::parse_now(raw, offset),
        }
    }

    fn parse_now(raw: &str, offset: FixedOffset) -> Result<DateTime<FixedOffset>> {
        if let Ok(timestamp) = DateTime::parse_from_rfc3339(raw) {
            return Ok(timestamp.with_timezone(&offset));
        }

        let naive = NAIVE_NOW_FORMATS
            .iter()
            .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
            .ok_or_else(|| anyhow!("invalid --now timestamp: {raw}"))?;

        offset
            .from_local_datetime(&naive)
            .single()
            .context("--now timestamp is ambiguous on the exchange clock")
    }
}
