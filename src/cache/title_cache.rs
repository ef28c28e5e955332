use crate::cache::entry::{decode_record, encode_record, CacheEntry};
use crate::cache::CacheError;
use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use std::fs::{self, File};
use std::io::{BufRead, BufReader, BufWriter, ErrorKind, Write};
use std::path::Path;
use tempfile::NamedTempFile;

/// Longest lifetime an entry can be given (one hundred years)
const MAX_TTL_SECONDS: u64 = 100 * 365 * 24 * 60 * 60;

/// Persisted memo of title -> first-link destination with expiration
///
/// Lookups distinguish "never looked up" (`None`) from "looked up, no link
/// found" (`Some(None)`), so dead ends are cached like any other result.
/// Expired entries are invisible to lookups but stay in memory until the next
/// [`TitleCache::save`], which prunes them before writing.
#[derive(Debug, Clone)]
pub struct TitleCache {
    entries: HashMap<String, CacheEntry>,
    ttl: Duration,
}

impl TitleCache {
    /// Creates an empty cache whose entries live for `ttl`
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: HashMap::new(),
            ttl,
        }
    }

    /// Creates an empty cache with a TTL given in seconds
    pub fn with_ttl_seconds(seconds: u64) -> Self {
        Self::new(ttl_from_seconds(seconds))
    }

    /// Loads the cache from `path`, falling back to an empty cache
    ///
    /// A missing file is the normal first-run case. An unreadable file or any
    /// corrupt record discards the whole file's contents; loading never fails.
    pub fn load(path: &Path, ttl: Duration) -> Self {
        match Self::try_load(path, ttl) {
            Ok(cache) => {
                tracing::debug!("Loaded {} cache entries from {}", cache.len(), path.display());
                cache
            }
            Err(CacheError::Io(e)) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!("No cache file at {}, starting empty", path.display());
                Self::new(ttl)
            }
            Err(e) => {
                tracing::warn!("Ignoring cache file {}: {}", path.display(), e);
                Self::new(ttl)
            }
        }
    }

    /// Loads the cache from `path`, reporting why it could not be read
    pub fn try_load(path: &Path, ttl: Duration) -> Result<Self, CacheError> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file), ttl)
    }

    /// Replays records from `reader`; blank lines are ignored
    pub fn from_reader<R: BufRead>(reader: R, ttl: Duration) -> Result<Self, CacheError> {
        let mut cache = Self::new(ttl);

        for (index, line) in reader.lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }

            let (key, entry) = decode_record(&line, index + 1)?;
            cache.entries.insert(key, entry);
        }

        Ok(cache)
    }

    /// Looks up `key` as of now
    ///
    /// # Returns
    ///
    /// * `None` - Not cached, or the entry has expired
    /// * `Some(None)` - Cached dead end
    /// * `Some(Some(title))` - Cached destination
    pub fn get(&self, key: &str) -> Option<Option<String>> {
        self.get_at(key, Utc::now())
    }

    /// Looks up `key` as of `now`
    pub fn get_at(&self, key: &str, now: DateTime<Utc>) -> Option<Option<String>> {
        self.entries
            .get(key)
            .filter(|entry| entry.is_live(now))
            .map(|entry| entry.destination.clone())
    }

    /// Stores `destination` for `key`, expiring one TTL from now
    ///
    /// A TTL reaching past the representable range never expires.
    pub fn set(&mut self, key: impl Into<String>, destination: Option<String>) {
        let expires_at = Utc::now()
            .checked_add_signed(self.ttl)
            .unwrap_or(DateTime::<Utc>::MAX_UTC);
        self.set_with_expiry(key, destination, expires_at);
    }

    /// Stores `destination` for `key` with an explicit expiry, overwriting any entry
    pub fn set_with_expiry(
        &mut self,
        key: impl Into<String>,
        destination: Option<String>,
        expires_at: DateTime<Utc>,
    ) {
        self.entries
            .insert(key.into(), CacheEntry::new(destination, expires_at));
    }

    /// Removes every entry that is no longer live at `now`
    ///
    /// # Returns
    ///
    /// The number of entries removed
    pub fn prune_expired(&mut self, now: DateTime<Utc>) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_, entry| entry.is_live(now));
        before - self.entries.len()
    }

    /// Prunes expired entries and writes the rest to `path`
    ///
    /// Write failures are logged and reported as `false`; caching is an
    /// optimization and never aborts the caller.
    pub fn save(&mut self, path: &Path) -> bool {
        self.save_at(path, Utc::now())
    }

    /// Same as [`TitleCache::save`], pruning as of `now`
    pub fn save_at(&mut self, path: &Path, now: DateTime<Utc>) -> bool {
        let pruned = self.prune_expired(now);
        if pruned > 0 {
            tracing::debug!("Pruned {} expired cache entries", pruned);
        }

        match self.write_file(path) {
            Ok(()) => {
                tracing::debug!("Saved {} cache entries to {}", self.len(), path.display());
                true
            }
            Err(e) => {
                tracing::warn!("Failed to save cache to {}: {}", path.display(), e);
                false
            }
        }
    }

    /// Writes every entry as one record per line, sorted by key
    pub fn write_records<W: Write>(&self, writer: W) -> Result<(), CacheError> {
        let mut writer = BufWriter::new(writer);

        let mut keys: Vec<&String> = self.entries.keys().collect();
        keys.sort();

        for key in keys {
            let entry = &self.entries[key];
            writeln!(writer, "{}", encode_record(key, entry)?)?;
        }

        writer.flush()?;
        Ok(())
    }

    /// Replaces `path` atomically with the current records
    fn write_file(&self, path: &Path) -> Result<(), CacheError> {
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(dir)?;

        let mut tmp = NamedTempFile::new_in(dir)?;
        self.write_records(tmp.as_file_mut())?;
        tmp.as_file_mut().sync_all()?;
        tmp.persist(path).map_err(|e| CacheError::Io(e.error))?;

        Ok(())
    }

    /// Number of stored entries, including expired ones not yet pruned
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no entries are stored
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn ttl_from_seconds(seconds: u64) -> Duration {
    // Bounded well below chrono's limits, so the cast is lossless
    Duration::seconds(seconds.min(MAX_TTL_SECONDS) as i64)
}
