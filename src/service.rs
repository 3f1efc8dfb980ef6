//! Request Orchestrator
//!
//! Ties the cache store and the upstream client together: validate, probe the
//! cache, fetch on miss, store the extracted payload, respond.

use std::sync::Arc;

use serde_json::Value;
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::cache::{cache_key, CacheStore};
use crate::error::{ProxyError, Result};
use crate::upstream::LastfmClient;

// == Metadata Service ==
/// Orchestrates the two query operations over a shared cache.
///
/// Created once at startup and shared by all request handlers. The cache lock
/// is taken only to read or write the map, never across the upstream call.
#[derive(Debug)]
pub struct MetadataService {
    cache: Arc<RwLock<CacheStore>>,
    upstream: LastfmClient,
}

impl MetadataService {
    // == Constructor ==
    /// Creates a new service over the given cache and upstream client.
    pub fn new(cache: Arc<RwLock<CacheStore>>, upstream: LastfmClient) -> Self {
        Self { cache, upstream }
    }

    /// Shared handle to the underlying cache store.
    pub fn cache(&self) -> Arc<RwLock<CacheStore>> {
        self.cache.clone()
    }

    // == Search ==
    /// Track search: cached payload if fresh, otherwise fetched from
    /// upstream and stored.
    pub async fn search(&self, query: &str) -> Result<Value> {
        if query.is_empty() {
            return Err(ProxyError::InvalidQuery(
                "Query parameter 'q' cannot be empty".to_string(),
            ));
        }

        let key = cache_key("search", &[query]);
        self.cached_fetch(&key, self.upstream.search(query)).await
    }

    // == Recommend ==
    /// Similar-track recommendation: cached payload if fresh, otherwise
    /// fetched from upstream and stored.
    pub async fn recommend(&self, artist: &str, track: &str) -> Result<Value> {
        if artist.is_empty() || track.is_empty() {
            return Err(ProxyError::InvalidQuery(
                "Query parameters 'artist' and 'track' cannot be empty".to_string(),
            ));
        }

        let key = cache_key("rec", &[artist, track]);
        self.cached_fetch(&key, self.upstream.similar(artist, track))
            .await
    }

    // == Cached Fetch ==
    /// Cache-aside flow shared by both operations.
    ///
    /// On a fresh hit the upstream is never contacted. On a miss the fetch
    /// runs with no lock held; a transport failure leaves the cache
    /// untouched. Concurrent misses for the same key may each fetch, last
    /// write wins.
    async fn cached_fetch(
        &self,
        key: &str,
        fetch: impl std::future::Future<Output = Result<Value>>,
    ) -> Result<Value> {
        if let Some(value) = self.cache.read().await.get(key) {
            debug!("Cache hit for {}", key);
            return Ok(value);
        }

        debug!("Cache miss for {}, fetching upstream", key);
        let value = fetch.await?;

        self.cache.write().await.set(key.to_string(), value.clone());
        info!("Cached upstream payload for {}", key);

        Ok(value)
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::time::Duration;
    use wiremock::matchers::{method, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn service_for(server: &MockServer, ttl: Duration) -> MetadataService {
        let cache = Arc::new(RwLock::new(CacheStore::new(ttl)));
        let upstream = LastfmClient::new(server.uri(), "test-key").unwrap();
        MetadataService::new(cache, upstream)
    }

    #[tokio::test]
    async fn test_search_empty_query_rejected_before_upstream() {
        // No mocks mounted: an upstream call would 404 and fail the fetch
        let server = MockServer::start().await;
        let service = service_for(&server, Duration::from_secs(1800));

        let result = service.search("").await;
        assert!(matches!(result, Err(ProxyError::InvalidQuery(_))));
        assert_eq!(server.received_requests().await.unwrap().len(), 0);
    }

    #[tokio::test]
    async fn test_recommend_empty_param_rejected() {
        let server = MockServer::start().await;
        let service = service_for(&server, Duration::from_secs(1800));

        assert!(matches!(
            service.recommend("Beatles", "").await,
            Err(ProxyError::InvalidQuery(_))
        ));
        assert!(matches!(
            service.recommend("", "Yesterday").await,
            Err(ProxyError::InvalidQuery(_))
        ));
    }

    #[tokio::test]
    async fn test_search_hit_skips_upstream() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(query_param("track", "imagine"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "results": {"trackmatches": {"track": [{"name": "Imagine"}]}}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let service = service_for(&server, Duration::from_secs(1800));

        let first = service.search("imagine").await.unwrap();
        let second = service.search("imagine").await.unwrap();

        assert_eq!(first, json!([{"name": "Imagine"}]));
        assert_eq!(second, first);
        // The mock's expect(1) verifies on drop that only one call went out
    }

    #[tokio::test]
    async fn test_expired_entry_refetches() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "results": {"trackmatches": {"track": [{"name": "Imagine"}]}}
            })))
            .expect(2)
            .mount(&server)
            .await;

        let service = service_for(&server, Duration::from_millis(30));

        service.search("imagine").await.unwrap();
        tokio::time::sleep(Duration::from_millis(50)).await;
        service.search("imagine").await.unwrap();
    }

    #[tokio::test]
    async fn test_upstream_failure_not_cached() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .expect(2)
            .mount(&server)
            .await;

        let service = service_for(&server, Duration::from_secs(1800));

        assert!(matches!(
            service.recommend("Beatles", "Yesterday").await,
            Err(ProxyError::Upstream(_))
        ));
        assert!(service.cache.read().await.is_empty());

        // A retry misses again and re-contacts upstream
        assert!(service.recommend("Beatles", "Yesterday").await.is_err());
    }

    #[tokio::test]
    async fn test_empty_results_cached() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"results": {}})))
            .expect(1)
            .mount(&server)
            .await;

        let service = service_for(&server, Duration::from_secs(1800));

        assert_eq!(service.search("obscure").await.unwrap(), Value::Null);
        // Second call is served from cache, still null
        assert_eq!(service.search("obscure").await.unwrap(), Value::Null);
    }

    #[tokio::test]
    async fn test_concurrent_writes_leave_complete_entry() {
        let cache = Arc::new(RwLock::new(CacheStore::new(Duration::from_secs(1800))));

        let mut handles = Vec::new();
        for i in 0..16 {
            let cache = cache.clone();
            handles.push(tokio::spawn(async move {
                cache
                    .write()
                    .await
                    .set("k".to_string(), json!({"writer": i}));
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        // The surviving value is one of the written ones, never a torn entry
        let value = cache.read().await.get("k").unwrap();
        let writer = value["writer"].as_u64().unwrap();
        assert!(writer < 16);
    }
}
