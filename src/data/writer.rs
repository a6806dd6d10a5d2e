use std::fs::File;
use std::path::Path;

use csv::{QuoteStyle, Terminator, WriterBuilder};
use log::info;

use super::model::{Dataset, Row};
use crate::error::WriteError;

/// Output format for [`write_subset`]. Independent of the delimiter the
/// data was loaded with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WriteOptions {
    pub delimiter: u8,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self { delimiter: b',' }
    }
}

/// Write `header` (when non-empty) followed by `rows` to `path`.
///
/// Records end in CRLF and fields are quoted only when needed. Text is
/// encoded as ISO-8859-1, the codec the loader reads with, so a written file
/// loads back unchanged with one exception: an empty single-field row is
/// written as `""` and reads back as that two-character text. Every record
/// is encoded before `path` is opened, so an unencodable subset leaves an
/// existing file untouched. Otherwise the file is overwritten; every I/O
/// failure is returned to the caller.
pub fn write_subset(
    header: &[String],
    rows: &[Row],
    path: &Path,
    opts: &WriteOptions,
) -> Result<(), WriteError> {
    let header_rows = usize::from(!header.is_empty());
    let mut records = Vec::with_capacity(rows.len() + header_rows);
    if header_rows == 1 {
        records.push(encode_latin1(header, 0)?);
    }
    for (i, row) in rows.iter().enumerate() {
        records.push(encode_latin1(row, i + header_rows)?);
    }

    let io_err = |source: std::io::Error| WriteError::Io {
        path: path.to_path_buf(),
        source,
    };
    let file = File::create(path).map_err(io_err)?;
    let mut writer = WriterBuilder::new()
        .delimiter(opts.delimiter)
        .terminator(Terminator::CRLF)
        .quote_style(QuoteStyle::Necessary)
        .flexible(true)
        .from_writer(file);
    for record in &records {
        writer.write_record(record)?;
    }
    writer.flush().map_err(io_err)?;

    info!("Wrote {} rows to {}", rows.len(), path.display());
    Ok(())
}

/// Encode each field to single bytes; `record` is the output line number
/// reported on failure.
fn encode_latin1(fields: &[String], record: usize) -> Result<Vec<Vec<u8>>, WriteError> {
    fields
        .iter()
        .enumerate()
        .map(|(field, value)| {
            value
                .chars()
                .map(|ch| {
                    u8::try_from(u32::from(ch)).map_err(|_| WriteError::Unencodable {
                        row: record,
                        field,
                        ch,
                    })
                })
                .collect()
        })
        .collect()
}

impl Dataset {
    /// Write this dataset's header followed by `subset` to `path`.
    pub fn write_subset(
        &self,
        subset: &[Row],
        path: impl AsRef<Path>,
        opts: &WriteOptions,
    ) -> Result<(), WriteError> {
        let header = self.header().columns().unwrap_or_default();
        write_subset(header, subset, path.as_ref(), opts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn strings(fields: &[&str]) -> Row {
        fields.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn writes_header_then_rows_with_crlf() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.csv");
        let header = strings(&["class", "name"]);
        let rows = vec![strings(&["3", "x"]), strings(&["3", "a,b"])];

        write_subset(&header, &rows, &path, &WriteOptions::default()).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        assert_eq!(text, "class,name\r\n3,x\r\n3,\"a,b\"\r\n");
    }

    #[test]
    fn overwrites_existing_file_and_skips_missing_header() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.csv");
        fs::write(&path, "stale content that is longer than the new one\n").unwrap();

        write_subset(&[], &[strings(&["1", "2"])], &path, &WriteOptions { delimiter: b';' })
            .unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "1;2\r\n");
    }

    #[test]
    fn latin1_text_is_written_as_single_bytes() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.csv");
        write_subset(&[], &[strings(&["Café"])], &path, &WriteOptions::default()).unwrap();
        assert_eq!(fs::read(&path).unwrap(), b"Caf\xe9\r\n");
    }

    #[test]
    fn unencodable_characters_are_reported() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.csv");
        let err = write_subset(
            &strings(&["a"]),
            &[strings(&["ok"]), strings(&["x", "€"])],
            &path,
            &WriteOptions::default(),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            WriteError::Unencodable {
                row: 2,
                field: 1,
                ch: '€'
            }
        ));
    }

    #[test]
    fn unencodable_subset_leaves_existing_file_alone() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.csv");
        fs::write(&path, "precious,data\r\n1,2\r\n").unwrap();

        let result = write_subset(
            &strings(&["a"]),
            &[strings(&["ok"]), strings(&["€"])],
            &path,
            &WriteOptions::default(),
        );

        assert!(matches!(result, Err(WriteError::Unencodable { .. })));
        assert_eq!(fs::read_to_string(&path).unwrap(), "precious,data\r\n1,2\r\n");
    }

    #[test]
    fn empty_single_field_row_is_quoted() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.csv");
        write_subset(&strings(&["h"]), &[strings(&[""]), strings(&["x"])], &path, &WriteOptions::default())
            .unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "h\r\n\"\"\r\nx\r\n");
    }

    #[test]
    fn missing_directory_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("no_such_dir").join("out.csv");
        let err = write_subset(&[], &[], &path, &WriteOptions::default()).unwrap_err();
        assert!(matches!(err, WriteError::Io { .. }));
    }
}
