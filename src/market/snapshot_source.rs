use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Deserialize;

use crate::types::stock_snapshot::StockSnapshot;

#[async_trait]
pub trait SnapshotSource: Send + Sync {
    async fn fetch(&self) -> Result<Vec<StockSnapshot>>;
}

/* The API answers either with a bare array or with `{ "data": [...] }` */
#[derive(Deserialize)]
#[serde(untagged)]
enum SnapshotPayload {
    List(Vec<StockSnapshot>),
    Wrapped { data: Vec<StockSnapshot> },
}

pub fn decode_snapshots(raw: &str) -> Result<Vec<StockSnapshot>> {
    let payload: SnapshotPayload =
        serde_json::from_str(raw).context("failed to decode instrument snapshots")?;

    Ok(match payload {
        SnapshotPayload::List(snapshots) => snapshots,
        SnapshotPayload::Wrapped { data } => data,
    })
}
