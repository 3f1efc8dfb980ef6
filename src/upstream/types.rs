//! Upstream response envelopes
//!
//! Typed-partial schemas for the Last.fm response shapes. Every nesting level
//! is optional: an absent or mismatched level degrades to "no results"
//! (`Value::Null`) instead of a deserialization error reaching the caller.

use serde::Deserialize;
use serde_json::Value;

// == Search Envelope ==
/// Envelope for `track.search` responses:
/// `{ "results": { "trackmatches": { "track": [...] } } }`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchEnvelope {
    #[serde(default)]
    pub results: Option<SearchResults>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchResults {
    #[serde(default)]
    pub trackmatches: Option<TrackMatches>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TrackMatches {
    /// Kept opaque: Last.fm returns an array here, or a single object for
    /// one-element results. Passed through to the client verbatim.
    #[serde(default)]
    pub track: Option<Value>,
}

impl SearchEnvelope {
    /// Extracts the track-match list, or `Value::Null` when any level of the
    /// envelope is missing.
    pub fn into_tracks(self) -> Value {
        self.results
            .and_then(|r| r.trackmatches)
            .and_then(|m| m.track)
            .unwrap_or(Value::Null)
    }
}

// == Similar Envelope ==
/// Envelope for `track.getsimilar` responses:
/// `{ "similartracks": { "track": [...] } }`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SimilarEnvelope {
    #[serde(default)]
    pub similartracks: Option<SimilarTracks>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SimilarTracks {
    #[serde(default)]
    pub track: Option<Value>,
}

impl SimilarEnvelope {
    /// Extracts the similar-track list, or `Value::Null` when any level of
    /// the envelope is missing.
    pub fn into_tracks(self) -> Value {
        self.similartracks
            .and_then(|s| s.track)
            .unwrap_or(Value::Null)
    }
}
