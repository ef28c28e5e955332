//! Cache entries and their on-disk record form
//!
//! Each record is one line holding a JSON array:
//! `["host:Title", "Next_title" | null, expiry_epoch_seconds]`

use crate::cache::CacheError;
use chrono::{DateTime, TimeZone, Utc};

/// On-disk shape of one record
type Record = (String, Option<String>, i64);

/// Cached "next link" result for one title
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheEntry {
    /// Title the first link points to; None records a dead end
    pub destination: Option<String>,

    /// When the entry stops being served
    pub expires_at: DateTime<Utc>,
}

impl CacheEntry {
    /// Creates a new entry
    pub fn new(destination: Option<String>, expires_at: DateTime<Utc>) -> Self {
        Self {
            destination,
            expires_at,
        }
    }

    /// An entry is live strictly before its expiry instant
    pub fn is_live(&self, now: DateTime<Utc>) -> bool {
        now < self.expires_at
    }
}

/// Encodes one entry as a record line (without the trailing newline)
pub fn encode_record(key: &str, entry: &CacheEntry) -> Result<String, CacheError> {
    let record: Record = (
        key.to_string(),
        entry.destination.clone(),
        entry.expires_at.timestamp(),
    );
    Ok(serde_json::to_string(&record)?)
}

/// Decodes one record line; `line` is the 1-based line number for errors
pub fn decode_record(text: &str, line: usize) -> Result<(String, CacheEntry), CacheError> {
    let (key, destination, expiry): Record =
        serde_json::from_str(text).map_err(|e| CacheError::Corrupt {
            line,
            message: e.to_string(),
        })?;

    let expires_at = Utc
        .timestamp_opt(expiry, 0)
        .single()
        .ok_or(CacheError::BadTimestamp {
            line,
            value: expiry,
        })?;

    Ok((key, CacheEntry::new(destination, expires_at)))
}
