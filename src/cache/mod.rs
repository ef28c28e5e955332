//! Title cache module
//!
//! This module memoizes the per-title "next link" result across runs:
//! - In-memory lookups with time-based expiration
//! - Newline-delimited JSON persistence
//! - Lazy pruning of expired entries on save
//!
//! Only one process should own a cache file at a time: `save` prunes and
//! rewrites the whole file, so concurrent writers would lose each other's
//! updates.

mod entry;
mod title_cache;

pub use entry::{decode_record, encode_record, CacheEntry};
pub use title_cache::TitleCache;

use thiserror::Error;

/// Errors that can occur while reading or writing the cache file
///
/// These never escape [`TitleCache::load`] or [`TitleCache::save`]; they are
/// exposed for callers that use the fallible variants directly.
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Corrupt cache record on line {line}: {message}")]
    Corrupt { line: usize, message: String },

    #[error("Invalid expiry timestamp on line {line}: {value}")]
    BadTimestamp { line: usize, value: i64 },

    #[error("Failed to encode cache record: {0}")]
    Encode(#[from] serde_json::Error),
}
