//! Cache Key Module
//!
//! Deterministic construction of cache keys from an operation tag and its
//! ordered parameters.

/// Separator between the operation tag and each parameter.
///
/// Not expected to appear in legitimate track or artist names often enough to
/// matter; two logically distinct requests still differ somewhere in the
/// joined string.
const KEY_SEPARATOR: char = ':';

// == Cache Key ==
/// Builds a cache key from an operation tag and its ordered parameters.
///
/// The same operation with the same parameters in the same order always
/// produces the identical key, so repeated queries hit the cache. Different
/// operations, parameters, or parameter order produce different keys.
pub fn cache_key(op: &str, params: &[&str]) -> String {
    let mut key = String::with_capacity(
        op.len() + params.iter().map(|p| p.len() + 1).sum::<usize>(),
    );
    key.push_str(op);
    for param in params {
        key.push(KEY_SEPARATOR);
        key.push_str(param);
    }
    key
}
