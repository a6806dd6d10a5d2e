use log::debug;
use serde::Serialize;

use super::model::Row;

/// Field holding the decision class by convention.
pub const DEFAULT_CLASS_INDEX: usize = 0;

// ---------------------------------------------------------------------------
// Class counts
// ---------------------------------------------------------------------------

/// Occurrences per distinct class value, in order of first appearance.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ClassCounts(Vec<(String, usize)>);

impl ClassCounts {
    pub fn get(&self, class: &str) -> Option<usize> {
        self.0
            .iter()
            .find(|(value, _)| value == class)
            .map(|(_, count)| *count)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.0.iter().map(|(value, count)| (value.as_str(), *count))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_vec(self) -> Vec<(String, usize)> {
        self.0
    }
}

/// Count the values found at `class_index` across `rows`.
///
/// Rows too short to have that field are left out of the count.
pub fn class_counts(rows: &[Row], class_index: usize) -> ClassCounts {
    let mut counts: Vec<(String, usize)> = Vec::new();
    for (row_no, row) in rows.iter().enumerate() {
        let Some(value) = row.get(class_index) else {
            debug!("row {row_no} has no field {class_index}, not counted");
            continue;
        };
        match counts.iter().position(|(seen, _)| seen == value) {
            Some(i) => counts[i].1 += 1,
            None => counts.push((value.clone(), 1)),
        }
    }
    ClassCounts(counts)
}

// ---------------------------------------------------------------------------
// Filtering
// ---------------------------------------------------------------------------

/// Rows whose field at `index` equals `value`, copied in table order.
pub fn filter_by_field(rows: &[Row], index: usize, value: &str) -> Vec<Row> {
    rows.iter()
        .filter(|row| row.get(index).is_some_and(|field| field == value))
        .cloned()
        .collect()
}

/// Rows whose decision class (always field 0) equals `class` rendered as text.
///
/// Other fields are never looked at, even if they hold the same text.
pub fn filter_by_class(rows: &[Row], class: impl ToString) -> Vec<Row> {
    filter_by_field(rows, DEFAULT_CLASS_INDEX, &class.to_string())
}
