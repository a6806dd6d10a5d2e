/// Data layer: core types, loading, grouping and writing.
///
/// Architecture:
/// ```text
///  delimited text (ISO-8859-1)
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  bytes → physical lines → trimmed fields
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  Dataset  │  header + Vec<Row>, slicing, positional split
///   └──────────┘
///        │
///        ├──────────────┐
///        ▼              ▼
///   ┌──────────┐   ┌──────────┐
///   │  filter   │   │  writer   │  subset → CSV on disk
///   └──────────┘   └──────────┘
///   class counts / row filters
/// ```

pub mod filter;
pub mod loader;
pub mod model;
pub mod writer;
