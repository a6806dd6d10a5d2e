use std::fmt;
use std::ops::Range;
use std::path::Path;

use log::{info, warn};
use serde::Serialize;

use super::loader::{read_table, LoadMode, LoadOptions};
use crate::error::LoadError;

// ---------------------------------------------------------------------------
// Row / Table – plain string cells, no type inference
// ---------------------------------------------------------------------------

/// One parsed record: trimmed, delimiter-separated fields in file order.
pub type Row = Vec<String>;

/// All rows of one file, in file order.
pub type Table = Vec<Row>;

/// Placeholder shown when a dataset has no column labels.
pub const NO_HEADER: &str = "Column names do not exist";

// ---------------------------------------------------------------------------
// HeaderView – either the labels or an explicit "no header" marker
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderView<'a> {
    Columns(&'a [String]),
    Missing,
}

impl<'a> HeaderView<'a> {
    pub fn columns(&self) -> Option<&'a [String]> {
        match self {
            HeaderView::Columns(cols) => Some(cols),
            HeaderView::Missing => None,
        }
    }
}

impl fmt::Display for HeaderView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HeaderView::Columns(cols) => write!(f, "{}", cols.join(", ")),
            HeaderView::Missing => f.write_str(NO_HEADER),
        }
    }
}

// ---------------------------------------------------------------------------
// Slicing – same rules as ordinary sequence slicing
// ---------------------------------------------------------------------------

/// Resolve a half-open `start..end` pair against a sequence of `len` items.
///
/// Negative indices count from the end, out-of-range indices clamp, and an
/// inverted range resolves to an empty one. `end = -1` therefore stops one
/// short of the last element.
pub fn resolve_slice(len: usize, start: isize, end: isize) -> Range<usize> {
    let clamp = |idx: isize| -> usize {
        if idx < 0 {
            let from_end = idx.unsigned_abs();
            len.saturating_sub(from_end)
        } else {
            (idx as usize).min(len)
        }
    };
    let (s, e) = (clamp(start), clamp(end));
    if e < s {
        s..s
    } else {
        s..e
    }
}

// ---------------------------------------------------------------------------
// Positional split
// ---------------------------------------------------------------------------

/// Fractions of the table given to the train and validation subsets.
/// The test subset gets whatever remains.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SplitRatios {
    pub train: f64,
    pub validate: f64,
}

impl Default for SplitRatios {
    fn default() -> Self {
        Self {
            train: 0.7,
            validate: 0.1,
        }
    }
}

impl SplitRatios {
    pub fn new(train: f64, validate: f64) -> Self {
        Self { train, validate }
    }

    /// Subset sizes for a table of `len` rows.
    ///
    /// Sizes are rounded half-to-even. Negative products clamp to zero and
    /// the sizes are capped so they never run past the table; fractions
    /// summing above 1 simply leave the later subsets short or empty.
    pub fn sizes(&self, len: usize) -> (usize, usize) {
        let size = |fraction: f64| -> usize {
            let n = (len as f64 * fraction).round_ties_even();
            if n.is_nan() || n <= 0.0 {
                0
            } else {
                (n as usize).min(len)
            }
        };
        let train = size(self.train);
        let validate = size(self.validate).min(len - train);
        (train, validate)
    }
}

/// Borrowed train / validation / test views over one table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Split<'a> {
    pub train: &'a [Row],
    pub validate: &'a [Row],
    pub test: &'a [Row],
}

impl<'a> Split<'a> {
    /// Cut `rows` positionally: no shuffling, no stratification.
    pub fn of(rows: &'a [Row], ratios: SplitRatios) -> Self {
        let (train_size, val_size) = ratios.sizes(rows.len());
        let (train, rest) = rows.split_at(train_size);
        let (validate, test) = rest.split_at(val_size);
        Split {
            train,
            validate,
            test,
        }
    }

    pub fn sizes(&self) -> SplitSizes {
        SplitSizes {
            train: self.train.len(),
            validate: self.validate.len(),
            test: self.test.len(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SplitSizes {
    pub train: usize,
    pub validate: usize,
    pub test: usize,
}

// ---------------------------------------------------------------------------
// Dataset – owns header + table for one delimited file
// ---------------------------------------------------------------------------

/// An in-memory delimited dataset: optional header plus ordered rows.
///
/// Every query on a dataset that was never loaded (or failed to load) sees
/// an empty table rather than an error.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dataset {
    header: Vec<String>,
    body: Table,
}

impl Dataset {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a dataset from already-parsed parts.
    pub fn from_parts(header: Vec<String>, body: Table) -> Self {
        Self { header, body }
    }

    /// Load `path` according to `opts` and return the stored header and rows.
    ///
    /// A missing or unreadable file is logged and returned as
    /// [`LoadError::Open`]; with [`LoadMode::Replace`] the dataset is left
    /// empty. An empty file is logged and returned as [`LoadError::Empty`]
    /// without touching the current contents.
    pub fn load(
        &mut self,
        path: impl AsRef<Path>,
        opts: &LoadOptions,
    ) -> Result<(&[String], &[Row]), LoadError> {
        let path = path.as_ref();
        let parsed = match read_table(path, opts) {
            Ok(parsed) => parsed,
            Err(err) => {
                warn!("{err}");
                if err.is_missing() && opts.mode == LoadMode::Replace {
                    self.clear();
                }
                return Err(err);
            }
        };

        if opts.mode == LoadMode::Replace {
            self.clear();
        }
        if let Some(header) = parsed.header {
            self.header = header;
        }
        let added = parsed.rows.len();
        self.body.extend(parsed.rows);
        info!(
            "Loaded {added} rows from {} ({} total, {} columns)",
            path.display(),
            self.body.len(),
            self.header.len()
        );

        Ok((self.header.as_slice(), self.body.as_slice()))
    }

    /// The column labels, or [`HeaderView::Missing`] when there are none.
    pub fn header(&self) -> HeaderView<'_> {
        if self.header.is_empty() {
            HeaderView::Missing
        } else {
            HeaderView::Columns(&self.header)
        }
    }

    /// Rows `start..end` with sequence-slicing semantics (see [`resolve_slice`]).
    /// `body(0, -1)` leaves out the last row.
    pub fn body(&self, start: isize, end: isize) -> &[Row] {
        &self.body[resolve_slice(self.body.len(), start, end)]
    }

    /// The whole table.
    pub fn rows(&self) -> &[Row] {
        &self.body
    }

    /// Positional train / validation / test split of the whole table.
    pub fn split(&self, ratios: SplitRatios) -> Split<'_> {
        Split::of(&self.body, ratios)
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Drop header and rows.
    pub fn clear(&mut self) {
        self.header.clear();
        self.body.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(n: usize) -> Table {
        (0..n).map(|i| vec![i.to_string()]).collect()
    }

    #[test]
    fn slice_matches_sequence_semantics() {
        assert_eq!(resolve_slice(5, 0, -1), 0..4);
        assert_eq!(resolve_slice(5, -2, 5), 3..5);
        assert_eq!(resolve_slice(5, 1, 100), 1..5);
        assert_eq!(resolve_slice(5, -100, 2), 0..2);
        assert_eq!(resolve_slice(5, 4, 2), 4..4);
        assert_eq!(resolve_slice(0, 0, -1), 0..0);
    }

    #[test]
    fn body_excludes_last_row_by_default_range() {
        let ds = Dataset::from_parts(vec!["a".into()], rows(4));
        let body = ds.body(0, -1);
        assert_eq!(body.len(), 3);
        assert_eq!(body.last().unwrap()[0], "2");
        assert_eq!(ds.body(-2, 100).len(), 2);
    }

    #[test]
    fn header_view_distinguishes_missing() {
        let ds = Dataset::new();
        assert_eq!(ds.header(), HeaderView::Missing);
        assert_eq!(ds.header().to_string(), NO_HEADER);

        let ds = Dataset::from_parts(vec!["class".into(), "alcohol".into()], Table::new());
        assert_eq!(ds.header().columns().unwrap(), ["class", "alcohol"]);
    }

    #[test]
    fn default_split_of_ten_rows() {
        let ds = Dataset::from_parts(Vec::new(), rows(10));
        let split = ds.split(SplitRatios::default());
        assert_eq!(
            split.sizes(),
            SplitSizes {
                train: 7,
                validate: 1,
                test: 2
            }
        );
        assert_eq!(split.train[0][0], "0");
        assert_eq!(split.validate[0][0], "7");
        assert_eq!(split.test[1][0], "9");
    }

    #[test]
    fn split_rounds_half_to_even() {
        // 5 * 0.5 = 2.5 -> 2, 5 * 0.1 = 0.5 -> 0
        assert_eq!(SplitRatios::new(0.5, 0.1).sizes(5), (2, 0));
        // 7 * 0.5 = 3.5 -> 4
        assert_eq!(SplitRatios::new(0.5, 0.0).sizes(7), (4, 0));
    }

    #[test]
    fn split_sizes_always_cover_table() {
        for len in 0..40 {
            let ds = Dataset::from_parts(Vec::new(), rows(len));
            let s = ds.split(SplitRatios::default()).sizes();
            assert_eq!(s.train + s.validate + s.test, len);
        }
    }

    #[test]
    fn oversized_fractions_leave_later_subsets_empty() {
        let ds = Dataset::from_parts(Vec::new(), rows(10));
        let s = ds.split(SplitRatios::new(0.9, 0.5)).sizes();
        assert_eq!((s.train, s.validate, s.test), (9, 1, 0));

        let s = ds.split(SplitRatios::new(-0.3, 0.2)).sizes();
        assert_eq!((s.train, s.validate, s.test), (0, 2, 8));
    }

    #[test]
    fn unloaded_dataset_is_empty_everywhere() {
        let ds = Dataset::new();
        assert!(ds.is_empty());
        assert!(ds.body(0, -1).is_empty());
        let s = ds.split(SplitRatios::default()).sizes();
        assert_eq!((s.train, s.validate, s.test), (0, 0, 0));
    }
}
