//! Minimal loader for delimited text datasets: optional header line, rows of
//! string fields, plus slicing, positional train/validation/test splitting,
//! per-class counting, filtering and writing subsets back to disk.

pub mod data;
pub mod error;

pub use data::filter::{
    class_counts, filter_by_class, filter_by_field, ClassCounts, DEFAULT_CLASS_INDEX,
};
pub use data::loader::{LoadMode, LoadOptions};
pub use data::model::{Dataset, HeaderView, Row, Split, SplitRatios, SplitSizes, Table};
pub use data::writer::{write_subset, WriteOptions};
pub use error::{LoadError, WriteError};
