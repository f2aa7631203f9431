//! Record sorting
//!
//! Stable sort of a record sequence by the string value of one column.
//!
//! ## Collation
//! Numeric-aware: when both values parse as `i64` they compare numerically,
//! otherwise they compare as byte strings. A record missing the sort column
//! sorts as the empty string. Descending reverses the comparison; ties keep
//! their original relative order in both directions.

use std::cmp::Ordering;

use crate::record::Record;

/// Sort direction for select ordering and index-key resorting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// Compare two field values with numeric-aware collation
pub fn compare_values(a: &str, b: &str) -> Ordering {
    match (a.parse::<i64>(), b.parse::<i64>()) {
        (Ok(x), Ok(y)) => x.cmp(&y),
        _ => a.cmp(b),
    }
}

/// Stable sort of records by the value of `column`
pub fn sort_records(records: &mut [Record], column: &str, direction: SortDirection) {
    records.sort_by(|a, b| {
        let va = a.get(column).unwrap_or("");
        let vb = b.get(column).unwrap_or("");
        let ord = compare_values(va, vb);

        match direction {
            SortDirection::Ascending => ord,
            SortDirection::Descending => ord.reverse(),
        }
    });
}
