//! Error types for the proxy
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// == Proxy Error Enum ==
/// Unified error type for the proxy.
///
/// Note that an unexpected JSON shape from upstream is deliberately NOT an
/// error: it degrades to an empty result set inside the upstream module and
/// never reaches the caller.
#[derive(Error, Debug)]
pub enum ProxyError {
    /// Missing or empty required query parameter
    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    /// Upstream transport failure or non-success status
    #[error("Upstream unavailable: {0}")]
    Upstream(String),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<reqwest::Error> for ProxyError {
    fn from(err: reqwest::Error) -> Self {
        ProxyError::Upstream(err.to_string())
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ProxyError::InvalidQuery(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            ProxyError::Upstream(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg.clone()),
            ProxyError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg.clone()),
        };

        let body = Json(json!({
            "error": message
        }));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the proxy.
pub type Result<T> = std::result::Result<T, ProxyError>;
