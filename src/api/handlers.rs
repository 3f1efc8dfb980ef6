//! API Handlers
//!
//! HTTP request handlers for each proxy endpoint.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::cache::CacheStats;
use crate::error::Result;
use crate::service::MetadataService;

/// Application state shared across all handlers.
///
/// Holds the one orchestrator instance created at startup; the cache lives
/// inside it for the lifetime of the process.
#[derive(Clone)]
pub struct AppState {
    /// Shared request orchestrator
    pub service: Arc<MetadataService>,
}

impl AppState {
    /// Creates a new AppState around the given service.
    pub fn new(service: MetadataService) -> Self {
        Self {
            service: Arc::new(service),
        }
    }
}

/// Query parameters for GET /api/search
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    /// Free-text track query
    #[serde(default)]
    pub q: String,
}

/// Query parameters for GET /api/recommend
#[derive(Debug, Deserialize)]
pub struct RecommendParams {
    /// Artist name
    #[serde(default)]
    pub artist: String,
    /// Track title
    #[serde(default)]
    pub track: String,
}

/// Handler for GET /api/search?q=
///
/// Returns the track-match list for the query, served from cache when fresh.
pub async fn search_handler(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Value>> {
    let tracks = state.service.search(&params.q).await?;
    Ok(Json(tracks))
}

/// Handler for GET /api/recommend?artist=&track=
///
/// Returns the similar-track list for the pair, served from cache when fresh.
pub async fn recommend_handler(
    State(state): State<AppState>,
    Query(params): Query<RecommendParams>,
) -> Result<Json<Value>> {
    let tracks = state.service.recommend(&params.artist, &params.track).await?;
    Ok(Json(tracks))
}

/// Response body for the stats endpoint (GET /stats)
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    /// Number of fresh cache retrievals
    pub hits: u64,
    /// Number of failed retrievals (key absent or past TTL)
    pub misses: u64,
    /// Current number of entries in cache, stale included
    pub total_entries: usize,
    /// Hit rate (hits / (hits + misses))
    pub hit_rate: f64,
    /// Snapshot timestamp in ISO 8601 format
    pub timestamp: String,
}

impl StatsResponse {
    /// Creates a new StatsResponse from a cache statistics snapshot.
    pub fn new(stats: CacheStats) -> Self {
        Self {
            hits: stats.hits,
            misses: stats.misses,
            total_entries: stats.total_entries,
            hit_rate: stats.hit_rate(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Handler for GET /stats
///
/// Returns current cache hit/miss counters.
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    let cache = state.service.cache();
    let stats = cache.read().await.stats();
    Json(StatsResponse::new(stats))
}

/// Handler for GET /health
///
/// Liveness probe; plain `OK` body.
pub async fn health_handler() -> &'static str {
    "OK"
}
