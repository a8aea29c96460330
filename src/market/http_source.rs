use std::time::Duration;

use anyhow::{Context, Result, bail};
use async_trait::async_trait;
use url::Url;

use crate::market::snapshot_source::{SnapshotSource, decode_snapshots};
use crate::types::stock_snapshot::StockSnapshot;

#[derive(Debug, Clone)]
pub struct HttpSnapshotSource {
    client: reqwest::Client,
    url: Url,
}

impl HttpSnapshotSource {
    const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

    pub fn new(url: Url) -> Result<Self> {
        if !matches!(url.scheme(), "http" | "https") {
            bail!("snapshot url must be http or https: {url}");
        }

        let client = reqwest::Client::builder()
            .timeout(Self::REQUEST_TIMEOUT)
            .build()
            .context("failed to build http client")?;

        Ok(Self { client, url })
    }

    pub fn parse(location: &str) -> Result<Self> {
        Self::new(Url::parse(location)?)
    }

    pub fn url(&self) -> &Url {
        &self.url
    }
}

#[async_trait]
impl SnapshotSource for HttpSnapshotSource {
    async fn fetch(&self) -> Result<Vec<StockSnapshot>> {
        let body = self
            .client
            .get(self.url.clone())
            .header("Accept", "application/json")
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        decode_snapshots(&body)
    }
}
