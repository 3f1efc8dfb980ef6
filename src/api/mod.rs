//! API Module
//!
//! HTTP layer: route configuration and request handlers.

mod handlers;
mod routes;

pub use handlers::{AppState, RecommendParams, SearchParams, StatsResponse};
pub use routes::create_router;
