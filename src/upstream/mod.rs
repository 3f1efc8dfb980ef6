//! Upstream Module
//!
//! Client and response schemas for the third-party track metadata API.

mod client;
mod types;

pub use client::LastfmClient;
pub use types::{SearchEnvelope, SimilarEnvelope};
