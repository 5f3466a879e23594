use std::collections::HashMap;
use std::sync::RwLock;
use std::time::{Duration, Instant};

use tracing::debug;

use pkgdiff_diff::Report;

use crate::key::ComparisonKey;
use crate::traits::ReportCache;

/// Default lifetime of a cached report: one year.
pub const DEFAULT_TTL: Duration = Duration::from_secs(365 * 24 * 60 * 60);

struct Entry {
    report: Report,
    stored_at: Instant,
}

/// In-memory, HashMap-based report cache with a fixed time-to-live.
///
/// Entries live behind a `RwLock`. `compute` runs without holding the lock,
/// so two callers missing on the same key may both compute; the later write
/// wins, which is harmless because reports are deterministic.
pub struct InMemoryReportCache {
    ttl: Duration,
    entries: RwLock<HashMap<ComparisonKey, Entry>>,
}

impl InMemoryReportCache {
    /// Create an empty cache whose entries expire after `ttl`.
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: RwLock::new(HashMap::new()),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Number of entries held, including expired ones not yet purged.
    pub fn len(&self) -> usize {
        self.entries.read().expect("lock poisoned").len()
    }

    /// Returns `true` if the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.read().expect("lock poisoned").is_empty()
    }

    /// Remove all entries.
    pub fn clear(&self) {
        self.entries.write().expect("lock poisoned").clear();
    }

    /// Remove expired entries and return how many were dropped.
    pub fn purge_expired(&self) -> usize {
        let now = Instant::now();
        let mut map = self.entries.write().expect("lock poisoned");
        let before = map.len();
        map.retain(|_, entry| self.is_live(entry, now));
        before - map.len()
    }

    fn is_live(&self, entry: &Entry, now: Instant) -> bool {
        now.duration_since(entry.stored_at) < self.ttl
    }
}

impl Default for InMemoryReportCache {
    fn default() -> Self {
        Self::new(DEFAULT_TTL)
    }
}

impl ReportCache for InMemoryReportCache {
    fn get_or_compute<E, F>(&self, key: &ComparisonKey, compute: F) -> Result<Report, E>
    where
        F: FnOnce() -> Result<Report, E>,
    {
        {
            let map = self.entries.read().expect("lock poisoned");
            if let Some(entry) = map.get(key) {
                if self.is_live(entry, Instant::now()) {
                    debug!(%key, "report cache hit");
                    return Ok(entry.report.clone());
                }
            }
        }

        debug!(%key, "report cache miss");
        let report = compute()?;
        let mut map = self.entries.write().expect("lock poisoned");
        map.insert(
            key.clone(),
            Entry {
                report: report.clone(),
                stored_at: Instant::now(),
            },
        );
        Ok(report)
    }

    fn invalidate(&self, key: &ComparisonKey) -> bool {
        let mut map = self.entries.write().expect("lock poisoned");
        map.remove(key).is_some()
    }
}

impl std::fmt::Debug for InMemoryReportCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryReportCache")
            .field("ttl", &self.ttl)
            .field("entry_count", &self.len())
            .finish()
    }
}
