//! Source file → canonical table.
//!
//! [`load_table`] runs the fallible pipeline: existence check, CSV read,
//! header normalization, schema inference, and record normalization. Rows
//! shorter than the header are kept with their trailing cells missing; a row
//! longer than the header fails the whole file.
//! [`DatasetLoader`] wraps it with the cache and turns every [`LoadError`]
//! into [`TrafficTable::empty`].

use std::{
    path::{Path, PathBuf},
    sync::Arc,
    time::Instant,
};

use encoding_rs::UTF_8;
use log::{debug, info, warn};

use crate::{
    cache::TableCache,
    dataset::{StationRecord, TrafficTable},
    error::{LoadError, ParseFailure},
    io_utils,
    schema::{self, SchemaMapping},
};

pub const DEFAULT_SOURCE_PATH: &str = "trafic-annuel-entrant-par-station-du-reseau-ferre-2021.csv";

pub fn load_table(path: &Path) -> Result<TrafficTable, LoadError> {
    if !path.exists() {
        return Err(LoadError::MissingSource(path.to_path_buf()));
    }
    let mut reader = io_utils::open_csv_reader_from_path(path)?;
    let headers = io_utils::reader_headers(&mut reader, UTF_8)?
        .iter()
        .map(|header| schema::normalize_header(header))
        .collect::<Vec<_>>();
    let mapping = SchemaMapping::infer(&headers);
    debug!("Resolved columns for {path:?}: {:?}", mapping.describe(&headers));

    let mut records = Vec::new();
    for (idx, record) in reader.byte_records().enumerate() {
        let record = record?;
        if record.len() > headers.len() {
            return Err(ParseFailure::TooManyFields {
                record: idx as u64 + 1,
                expected: headers.len(),
                found: record.len(),
            }
            .into());
        }
        let decoded = io_utils::decode_record(&record, UTF_8)?;
        records.push(StationRecord::from_raw(&mapping, &decoded));
    }
    Ok(TrafficTable::new(mapping.fields(), records))
}

/// Loads the configured source through a [`TableCache`].
#[derive(Debug)]
pub struct DatasetLoader {
    source: PathBuf,
    cache: TableCache,
}

impl DatasetLoader {
    pub fn new(source: impl Into<PathBuf>, cache: TableCache) -> Self {
        Self {
            source: source.into(),
            cache,
        }
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn cache(&self) -> &TableCache {
        &self.cache
    }

    pub fn load(&mut self) -> Arc<TrafficTable> {
        self.load_at(Instant::now())
    }

    /// Returns the canonical table as of `now`.
    ///
    /// An empty table means the source was missing or unreadable; callers
    /// must check [`TrafficTable::is_empty`] before using any column.
    pub fn load_at(&mut self, now: Instant) -> Arc<TrafficTable> {
        if let Some(table) = self.cache.get(&self.source, now) {
            debug!("Cache hit for {:?}", self.source);
            return table;
        }
        debug!("Cache miss for {:?}", self.source);
        match load_table(&self.source) {
            Ok(table) => {
                info!("Loaded {} row(s) from {:?}", table.len(), self.source);
                self.cache.insert(self.source.clone(), table, now)
            }
            Err(err) => {
                if err.is_missing_source() {
                    warn!("{err}");
                } else {
                    warn!("Failed to read {:?}: {err}", self.source);
                }
                Arc::new(TrafficTable::empty())
            }
        }
    }
}
