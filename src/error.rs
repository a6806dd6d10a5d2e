use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failures while ingesting a delimited file.
///
/// Both variants are recoverable: the dataset stays usable (and empty or
/// unchanged) after either one is returned.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The file does not exist or cannot be opened/read.
    #[error("{} - not found: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The file opened but contained no lines.
    #[error("{}: missing content", path.display())]
    Empty { path: PathBuf },
}

impl LoadError {
    /// `true` when the file itself could not be opened.
    pub fn is_missing(&self) -> bool {
        matches!(self, LoadError::Open { .. })
    }
}

/// Failures while writing a subset back to disk. Never swallowed.
#[derive(Debug, Error)]
pub enum WriteError {
    #[error("writing {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("serialising CSV record: {0}")]
    Csv(#[from] csv::Error),

    /// A field holds a character the single-byte output codec cannot carry.
    #[error("row {row}, field {field}: character {ch:?} is outside ISO-8859-1")]
    Unencodable { row: usize, field: usize, ch: char },
}
