use reqwest::Client;
pub use reqwest::Url;
use std::future::Future;

use crate::error::Result;

/// Status line and body of one upstream reply
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpReply {
    pub status: u16,
    pub reason: Option<String>,
    pub body: String,
}

impl HttpReply {
    pub fn is_error(&self) -> bool {
        self.status >= 400
    }
}

/// Issues the single GET a snapshot query needs.
///
/// [`HttpTransport`] talks to the network; tests swap in an in-memory
/// implementation so the client stays hermetic.
pub trait SnapshotTransport {
    fn get(&self, url: &Url) -> impl Future<Output = Result<HttpReply>> + Send;
}

/// `reqwest` transport with default settings (no custom timeout, no retries)
#[derive(Debug, Clone, Default)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SnapshotTransport for HttpTransport {
    async fn get(&self, url: &Url) -> Result<HttpReply> {
        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();
        let body = response.text().await?;

        Ok(HttpReply {
            status: status.as_u16(),
            reason: status.canonical_reason().map(str::to_string),
            body,
        })
    }
}
