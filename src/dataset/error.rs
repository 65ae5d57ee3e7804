//! Error types for dataset construction.

use std::path::PathBuf;
use thiserror::Error;

/// The primary error type for building the dataset snapshot.
///
/// Only construction can fail. Per-request lookups never return an error:
/// a key that resolves to nothing produces a typed miss result carrying
/// navigation hints instead.
#[derive(Debug, Error)]
pub enum DatasetError {
    /// The source table could not be read from disk.
    #[error("cannot read source table {path}: {source}")]
    SourceUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The source table parsed to zero usable records.
    #[error("source table {path} contains no usable records")]
    EmptyTable { path: PathBuf },

    /// The header row has no `age` column, so rows cannot be keyed.
    #[error("source table {path} is missing the required \"age\" column")]
    MissingAgeColumn { path: PathBuf },
}

/// A convenience `Result` type alias using the crate's `DatasetError` type.
pub type Result<T> = std::result::Result<T, DatasetError>;
