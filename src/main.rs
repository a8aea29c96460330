use std::time::Duration;

use anyhow::{Result, bail};
use clap::Parser;
use dotenvy::dotenv;
use tracing::info;
use tracing_subscriber::EnvFilter;

use market_calendar::scenario::scenario::Scenario;
use market_calendar::scenario::sources::SourceKind;
use market_calendar::scenario::watch::{run_once, watch};
use market_calendar::types::trading_time_config::TradingTimeConfig;

#[derive(Debug, Clone, Parser)]
struct Args {
    #[arg(long, value_enum, default_value = "file")]
    pub source: SourceKind,

    /// Snapshot file path or API url
    #[arg(long)]
    pub location: String,

    /// Pin the clock, e.g. 2024-03-04T08:00 or 2024-03-04T00:00:00Z
    #[arg(long)]
    pub now: Option<String>,

    #[arg(long)]
    pub watch: bool,

    #[arg(long, default_value_t = 5)]
    pub interval_secs: u64,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("market_calendar=debug".parse()?),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    if args.interval_secs == 0 {
        bail!("--interval-secs must be greater than zero");
    }

    let config = TradingTimeConfig::from_config()?;
    info!(?config, "loaded trading calendar");

    let source = Scenario::snapshot_source(args.source, &args.location)?;

    if !args.watch {
        return run_once(source.as_ref(), config, args.now.as_deref()).await;
    }

    watch(
        source.as_ref(),
        config,
        args.now.as_deref(),
        Duration::from_secs(args.interval_secs),
        tokio::signal::ctrl_c(),
    )
    .await
}
