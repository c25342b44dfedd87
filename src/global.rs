use std::sync::Arc;

use anyhow::Context as _;

use crate::config::Config;
use crate::trn::{Fetcher, TrnClient};

/// Everything request handlers need, passed to them as axum state.
pub struct Global {
    pub config: Config,
    pub fetcher: Arc<dyn Fetcher>,
    pub started_at: std::time::Instant,
}

impl Global {
    pub fn init(config: Config) -> anyhow::Result<Arc<Self>> {
        if config.trn.api_key.is_empty() {
            tracing::warn!("trn.api_key is not set, TRN will reject profile lookups");
        }

        let client = TrnClient::new(&config.trn).context("trn client")?;

        tracing::info!(base_url = %config.trn.base_url, "trn client ready");

        Ok(Self::with_fetcher(config, Arc::new(client)))
    }

    pub fn with_fetcher(config: Config, fetcher: Arc<dyn Fetcher>) -> Arc<Self> {
        Arc::new(Self {
            config,
            fetcher,
            started_at: std::time::Instant::now(),
        })
    }
}
