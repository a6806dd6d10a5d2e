use std::path::Path;

use log::debug;

use super::model::Row;
use crate::error::LoadError;

// ---------------------------------------------------------------------------
// Options
// ---------------------------------------------------------------------------

/// What a second load does to rows that are already stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadMode {
    /// Drop the previous header and rows first.
    #[default]
    Replace,
    /// Keep existing rows and append the new ones after them.
    Append,
}

/// How a delimited file is read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadOptions {
    /// Treat the first physical line as column labels.
    pub has_header: bool,

    /// Field separator.
    pub delimiter: char,

    /// Also keep the final physical line. Off by default: the final line of
    /// a file is not part of the table.
    pub keep_last_line: bool,

    pub mode: LoadMode,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            has_header: true,
            delimiter: ',',
            keep_last_line: false,
            mode: LoadMode::Replace,
        }
    }
}

impl LoadOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_header(mut self, has_header: bool) -> Self {
        self.has_header = has_header;
        self
    }

    pub fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn keep_last_line(mut self, keep: bool) -> Self {
        self.keep_last_line = keep;
        self
    }

    pub fn with_mode(mut self, mode: LoadMode) -> Self {
        self.mode = mode;
        self
    }
}

// ---------------------------------------------------------------------------
// Reading
// ---------------------------------------------------------------------------

/// Header (when requested) and body rows parsed from one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedTable {
    pub header: Option<Vec<String>>,
    pub rows: Vec<Row>,
}

/// Read `path` and split it into header and rows.
///
/// Layout with a header, for physical lines `l0..ln`:
/// * `l0` → header
/// * `l1 .. ln-1` → rows (the final line is skipped unless
///   `keep_last_line` is set)
///
/// Without a header the rows start at `l0`, with the same final-line rule.
pub fn read_table(path: &Path, opts: &LoadOptions) -> Result<ParsedTable, LoadError> {
    let text = read_latin1(path)?;
    let lines = physical_lines(&text);
    if lines.is_empty() {
        return Err(LoadError::Empty {
            path: path.to_path_buf(),
        });
    }

    let (header, first_row) = if opts.has_header {
        (Some(split_fields(lines[0], opts.delimiter)), 1)
    } else {
        (None, 0)
    };
    let end = if opts.keep_last_line {
        lines.len()
    } else {
        lines.len() - 1
    };

    let rows: Vec<Row> = lines
        .get(first_row..end)
        .unwrap_or_default()
        .iter()
        .map(|line| split_fields(line, opts.delimiter))
        .collect();
    debug!(
        "{}: {} physical lines, {} rows kept",
        path.display(),
        lines.len(),
        rows.len()
    );

    Ok(ParsedTable { header, rows })
}

/// Read the whole file and decode it as ISO-8859-1. Every byte maps to the
/// code point of the same value, so decoding never fails.
fn read_latin1(path: &Path) -> Result<String, LoadError> {
    let bytes = std::fs::read(path).map_err(|source| LoadError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(bytes.iter().map(|&b| char::from(b)).collect())
}

/// Split on `\n`, `\r\n` or a lone `\r`. A trailing terminator does not
/// produce an extra empty line.
pub fn physical_lines(text: &str) -> Vec<&str> {
    let bytes = text.as_bytes();
    let mut lines = Vec::new();
    let mut start = 0;
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'\n' => {
                lines.push(&text[start..i]);
                start = i + 1;
            }
            b'\r' => {
                lines.push(&text[start..i]);
                if bytes.get(i + 1) == Some(&b'\n') {
                    i += 1;
                }
                start = i + 1;
            }
            _ => {}
        }
        i += 1;
    }
    if start < bytes.len() {
        lines.push(&text[start..]);
    }
    lines
}

/// Naive field split: no quoting, every token trimmed.
pub fn split_fields(line: &str, delimiter: char) -> Row {
    line.split(delimiter).map(|tok| tok.trim().to_string()).collect()
}
