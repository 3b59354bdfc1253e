use std::{io, path::PathBuf};

use thiserror::Error;

/// Reasons a source file could not be turned into a canonical table.
///
/// These never leave the loader: [`crate::loader::DatasetLoader::load`] turns
/// every variant into the empty table.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("source file {0:?} does not exist")]
    MissingSource(PathBuf),
    #[error(transparent)]
    ParseFailure(#[from] ParseFailure),
}

/// The file exists but could not be read as `;`-separated UTF-8 records.
#[derive(Debug, Error)]
pub enum ParseFailure {
    #[error("failed to open {path:?}")]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("malformed CSV input")]
    Csv(#[from] csv::Error),
    #[error("input is not valid {encoding} text")]
    Decode { encoding: &'static str },
    #[error("record {record} has {found} field(s), header has {expected}")]
    TooManyFields {
        record: u64,
        expected: usize,
        found: usize,
    },
}

impl From<csv::Error> for LoadError {
    fn from(err: csv::Error) -> Self {
        LoadError::ParseFailure(ParseFailure::Csv(err))
    }
}

impl LoadError {
    /// Whether the failure is a missing file rather than an unreadable one.
    pub fn is_missing_source(&self) -> bool {
        matches!(self, LoadError::MissingSource(_))
    }
}
