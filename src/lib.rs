//! Track Proxy - A caching reverse proxy for the Last.fm track metadata API
//!
//! Serves track search and similar-track recommendations, caching upstream
//! payloads in memory with a fixed TTL.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod service;
pub mod tasks;
pub mod upstream;

pub use api::AppState;
pub use config::Config;
pub use service::MetadataService;
pub use tasks::spawn_sweep_task;
