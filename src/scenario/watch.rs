use std::future::Future;
use std::time::Duration;

use anyhow::Result;
use tokio::time::MissedTickBehavior;
use tracing::{error, info};

use crate::market::snapshot_source::SnapshotSource;
use crate::scenario::report::FilterReport;
use crate::scenario::scenario::Scenario;
use crate::types::trading_time_config::TradingTimeConfig;

pub async fn run_once(
    source: &dyn SnapshotSource,
    config: &TradingTimeConfig,
    now_override: Option<&str>,
) -> Result<()> {
    let now = Scenario::now(config, now_override)?;
    let snapshots = source.fetch().await?;
    let report = FilterReport::build(&now, config, snapshots);

    info!(%now, filter_date = %report.decision.date, rule = %report.decision.rule, "refreshed");

    println!("{report}");
    println!("{}", report.to_json()?);

    Ok(())
}

/// Refreshes every `every` until `shutdown` resolves. A pending fetch is
/// abandoned on shutdown.
pub async fn watch<F>(
    source: &dyn SnapshotSource,
    config: &TradingTimeConfig,
    now_override: Option<&str>,
    every: Duration,
    shutdown: F,
) -> Result<()>
where
    F: Future,
{
    tokio::pin!(shutdown);

    let mut ticker = tokio::time::interval(every);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = ticker.tick() => {}
            _ = &mut shutdown => break,
        }

        tokio::select! {
            result = run_once(source, config, now_override) => {
                if let Err(error) = result {
                    error!("snapshot refresh failed: {error:?}");
                }
            }
            _ = &mut shutdown => break,
        }
    }

    info!("stopping watch");
    Ok(())
}
