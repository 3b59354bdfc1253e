//! Time-expiring cache for loaded tables.
//!
//! The cache is owned by whoever drives the loader; there is no global
//! state. Entries are keyed by source path and handed out as
//! `Arc<TrafficTable>` so repeated reads within the TTL share one instance.
//! Only successful loads are ever inserted.

use std::{
    collections::HashMap,
    path::{Path, PathBuf},
    sync::Arc,
    time::{Duration, Instant},
};

use crate::dataset::TrafficTable;

pub const DEFAULT_TTL: Duration = Duration::from_secs(3600);

#[derive(Debug, Clone)]
struct CacheEntry {
    table: Arc<TrafficTable>,
    loaded_at: Instant,
}

#[derive(Debug, Clone)]
pub struct TableCache {
    ttl: Duration,
    entries: HashMap<PathBuf, CacheEntry>,
}

impl Default for TableCache {
    fn default() -> Self {
        Self::new(DEFAULT_TTL)
    }
}

impl TableCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: HashMap::new(),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Returns the cached table for `source` unless it has expired by `now`.
    pub fn get(&self, source: &Path, now: Instant) -> Option<Arc<TrafficTable>> {
        let entry = self.entries.get(source)?;
        let age = now.saturating_duration_since(entry.loaded_at);
        (age < self.ttl).then(|| Arc::clone(&entry.table))
    }

    pub fn insert(
        &mut self,
        source: PathBuf,
        table: TrafficTable,
        loaded_at: Instant,
    ) -> Arc<TrafficTable> {
        let table = Arc::new(table);
        self.entries.insert(
            source,
            CacheEntry {
                table: Arc::clone(&table),
                loaded_at,
            },
        );
        table
    }

    pub fn invalidate(&mut self, source: &Path) -> bool {
        self.entries.remove(source).is_some()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
