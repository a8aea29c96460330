use std::path::PathBuf;

use anyhow::{Context, Result};
use async_trait::async_trait;

use crate::market::snapshot_source::{SnapshotSource, decode_snapshots};
use crate::types::stock_snapshot::StockSnapshot;

#[derive(Debug, Clone)]
pub struct FileSnapshotSource {
    path: PathBuf,
}

impl FileSnapshotSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl SnapshotSource for FileSnapshotSource {
    async fn fetch(&self) -> Result<Vec<StockSnapshot>> {
        let raw = tokio::fs::read_to_string(&self.path)
            .await
            .with_context(|| format!("failed to read snapshots {}", self.path.display()))?;

        decode_snapshots(&raw).with_context(|| format!("in {}", self.path.display()))
    }
}
