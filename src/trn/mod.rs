use std::sync::Arc;
use std::time::Duration;

use anyhow::Context as _;
use bytes::Bytes;
use reqwest::header::ACCEPT;

use crate::config::TrnConfig;
use crate::lookup::UpstreamDescriptor;

#[cfg(test)]
pub(crate) mod testing;

/// Header carrying the TRN application key.
pub const API_KEY_HEADER: &str = "TRN-Api-Key";

/// Status and raw body of a provider response. The body is left unparsed.
#[derive(Debug, Clone)]
pub struct FetchResponse {
    pub status: u16,
    pub body: Bytes,
}

impl FetchResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("request timed out")]
    Timeout,
    #[error("transport error: {0}")]
    Transport(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            Self::Timeout
        } else {
            Self::Transport(e.to_string())
        }
    }
}

/// Executes upstream descriptors. Any response that arrives, whatever its
/// status, is `Ok`; only a missing response is an error.
#[async_trait::async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, descriptor: &UpstreamDescriptor) -> Result<FetchResponse, FetchError>;
}

#[async_trait::async_trait]
impl<T: Fetcher + ?Sized> Fetcher for Arc<T> {
    async fn fetch(&self, descriptor: &UpstreamDescriptor) -> Result<FetchResponse, FetchError> {
        (**self).fetch(descriptor).await
    }
}

pub struct TrnClient {
    http_client: reqwest::Client,
    api_key: String,
}

impl TrnClient {
    pub fn new(config: &TrnConfig) -> anyhow::Result<Self> {
        let http_client = reqwest::Client::builder()
            .user_agent(&config.user_agent)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .context("http client")?;

        Ok(Self {
            http_client,
            api_key: config.api_key.clone(),
        })
    }
}

#[async_trait::async_trait]
impl Fetcher for TrnClient {
    #[tracing::instrument(skip_all, fields(url = %descriptor.url))]
    async fn fetch(&self, descriptor: &UpstreamDescriptor) -> Result<FetchResponse, FetchError> {
        let resp = self
            .http_client
            .request(descriptor.method.clone(), &descriptor.url)
            .header(API_KEY_HEADER, &self.api_key)
            .header(ACCEPT, "application/json")
            .send()
            .await?;

        let status = resp.status().as_u16();
        let body = resp.bytes().await?;

        tracing::debug!(status, bytes = body.len(), "trn response");

        Ok(FetchResponse { status, body })
    }
}
