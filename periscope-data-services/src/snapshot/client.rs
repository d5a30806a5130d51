use periscope_core::{SnapshotRequest, SnapshotResponse};
use reqwest::Url;
use tracing::{debug, info, instrument, warn};

use crate::error::{PeriscopeError, Result};
use crate::snapshot::config::Config;
use crate::snapshot::transport::{HttpTransport, SnapshotTransport};

const API_KEY_PARAM: &str = "apiKey";

/// Client for the options chain snapshot endpoint
pub struct MassiveClient<T = HttpTransport> {
    transport: T,
    base_url: String,
    api_key: String,
}

impl MassiveClient<HttpTransport> {
    pub fn new(config: &Config) -> Self {
        Self::with_transport(config, HttpTransport::new())
    }
}

impl<T: SnapshotTransport> MassiveClient<T> {
    pub fn with_transport(config: &Config, transport: T) -> Self {
        Self {
            transport,
            base_url: config.base_url.clone(),
            api_key: config.api_key.clone(),
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Build `{base_url}/snapshot/options/{underlying}?apiKey=...&{filters}`.
    ///
    /// `apiKey` always comes first and always carries the configured key; a
    /// filter with that name is dropped.
    pub fn snapshot_url(&self, request: &SnapshotRequest) -> Result<Url> {
        let raw = format!("{}/snapshot/options/{}", self.base_url, request.underlying);
        let mut url = Url::parse(&raw)
            .map_err(|e| PeriscopeError::InvalidInput(format!("{}: {}", raw, e)))?;

        {
            let mut query = url.query_pairs_mut();
            query.append_pair(API_KEY_PARAM, &self.api_key);
            for (key, value) in &request.filters {
                if key == API_KEY_PARAM {
                    warn!("Ignoring {} filter, the configured key is used", API_KEY_PARAM);
                    continue;
                }
                query.append_pair(key, &value.to_string());
            }
        }

        Ok(url)
    }

    /// Fetch one options chain snapshot.
    ///
    /// A status >= 400 fails with [`PeriscopeError::Http`] carrying the body;
    /// a body that is not a JSON object fails with
    /// [`PeriscopeError::Json`]. The document is returned as decoded; an
    /// empty `results` array is a valid answer.
    #[instrument(skip(self, request), fields(underlying = %request.underlying))]
    pub async fn get_options_chain_snapshot(
        &self,
        request: &SnapshotRequest,
    ) -> Result<SnapshotResponse> {
        let url = self.snapshot_url(request)?;
        debug!("GET {}", redact_api_key(&url));

        let reply = self.transport.get(&url).await?;
        if reply.is_error() {
            warn!("Snapshot request failed with status {}", reply.status);
            return Err(PeriscopeError::http(
                reply.status,
                reply.reason.as_deref(),
                redact_api_key(&url),
                reply.body,
            ));
        }

        let response: SnapshotResponse = serde_json::from_str(&reply.body)?;

        info!(
            "Received {} contracts for {}",
            response.contract_count(),
            request.underlying
        );
        if response.next_url().is_some() {
            debug!("Upstream has more pages; only the first one is fetched");
        }

        Ok(response)
    }
}

/// Render a URL with the `apiKey` value masked, for logs and error messages
pub fn redact_api_key(url: &Url) -> String {
    if !url.query_pairs().any(|(k, _)| k == API_KEY_PARAM) {
        return url.to_string();
    }

    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(k, v)| {
            let v = if k == API_KEY_PARAM { "REDACTED".into() } else { v };
            (k.into_owned(), v.into_owned())
        })
        .collect();

    let mut redacted = url.clone();
    redacted.query_pairs_mut().clear().extend_pairs(pairs);
    redacted.to_string()
}
