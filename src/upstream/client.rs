//! Last.fm API client
//!
//! Thin HTTP client over the upstream metadata API. Transport failures and
//! non-success statuses surface as `ProxyError::Upstream`; unexpected JSON
//! shapes degrade to an empty result set instead.

use std::time::Duration;

use serde_json::Value;
use tracing::{debug, warn};

use crate::error::{ProxyError, Result};
use crate::upstream::{SearchEnvelope, SimilarEnvelope};

/// Request timeout for upstream calls.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Result limit for `track.search`.
const SEARCH_LIMIT: u32 = 10;

/// Result limit for `track.getsimilar`.
const SIMILAR_LIMIT: u32 = 30;

// == Last.fm Client ==
/// HTTP client for the Last.fm track metadata API.
#[derive(Debug, Clone)]
pub struct LastfmClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl LastfmClient {
    // == Constructor ==
    /// Creates a new client for the given base URL and API key.
    ///
    /// The base URL is configurable so tests can point the client at a stub
    /// server.
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| ProxyError::Internal(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.into(),
            api_key: api_key.into(),
        })
    }

    // == Search ==
    /// Calls `track.search` and extracts the track-match list.
    ///
    /// Returns `Value::Null` when the response carries no matches.
    pub async fn search(&self, track: &str) -> Result<Value> {
        let body = self
            .fetch(&[
                ("method", "track.search"),
                ("track", track),
                ("api_key", &self.api_key),
                ("format", "json"),
                ("limit", &SEARCH_LIMIT.to_string()),
            ])
            .await?;

        Ok(parse_lenient::<SearchEnvelope>(body).into_tracks())
    }

    // == Similar ==
    /// Calls `track.getsimilar` and extracts the similar-track list.
    ///
    /// Returns `Value::Null` when the response carries no matches.
    pub async fn similar(&self, artist: &str, track: &str) -> Result<Value> {
        let body = self
            .fetch(&[
                ("method", "track.getsimilar"),
                ("artist", artist),
                ("track", track),
                ("api_key", &self.api_key),
                ("format", "json"),
                ("limit", &SIMILAR_LIMIT.to_string()),
            ])
            .await?;

        Ok(parse_lenient::<SimilarEnvelope>(body).into_tracks())
    }

    // == Fetch ==
    /// Performs the upstream GET and returns the decoded JSON body.
    async fn fetch(&self, query: &[(&str, &str)]) -> Result<Value> {
        let response = self.client.get(&self.base_url).query(query).send().await?;

        let status = response.status();
        if !status.is_success() {
            warn!("Upstream returned {}", status);
            return Err(ProxyError::Upstream(format!(
                "upstream responded with status {}",
                status
            )));
        }

        debug!("Upstream responded {}", status);

        // Failing to read the body is a transport failure; a readable body
        // that is not valid JSON degrades to no results via the lenient parse
        let text = response.text().await?;
        Ok(serde_json::from_str(&text).unwrap_or(Value::Null))
    }
}

/// Deserializes an envelope from the decoded body, falling back to the
/// default (empty) envelope when the shape does not match.
fn parse_lenient<T: serde::de::DeserializeOwned + Default>(body: Value) -> T {
    serde_json::from_value(body).unwrap_or_else(|e| {
        debug!("Unexpected upstream shape, treating as empty: {}", e);
        T::default()
    })
}
