use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use bytes::Bytes;

use super::{FetchError, FetchResponse, Fetcher};
use crate::lookup::UpstreamDescriptor;

/// Canned fetcher that records every URL it is asked for.
pub struct FakeFetcher {
    reply: Reply,
    calls: AtomicUsize,
    urls: Mutex<Vec<String>>,
}

enum Reply {
    Response { status: u16, body: Bytes },
    Timeout,
}

impl FakeFetcher {
    pub fn respond(status: u16, body: impl Into<Bytes>) -> Self {
        Self::with_reply(Reply::Response {
            status,
            body: body.into(),
        })
    }

    pub fn json(status: u16, body: serde_json::Value) -> Self {
        Self::respond(status, body.to_string())
    }

    pub fn timeout() -> Self {
        Self::with_reply(Reply::Timeout)
    }

    fn with_reply(reply: Reply) -> Self {
        Self {
            reply,
            calls: AtomicUsize::new(0),
            urls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn urls(&self) -> Vec<String> {
        self.urls.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl Fetcher for FakeFetcher {
    async fn fetch(&self, descriptor: &UpstreamDescriptor) -> Result<FetchResponse, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.urls.lock().unwrap().push(descriptor.url.clone());

        match &self.reply {
            Reply::Response { status, body } => Ok(FetchResponse {
                status: *status,
                body: body.clone(),
            }),
            Reply::Timeout => Err(FetchError::Timeout),
        }
    }
}
