//! Type coercion
//!
//! Applied to every supplied field value at insert time and to every field
//! present in an update mapping. Never applied to existing unmodified
//! fields. Coercion failures are not errors: they degrade to sentinel
//! values (`"0"` for integers, empty string for dates).

use chrono::Local;

use crate::schema::ColumnType;

/// Timestamp format stored in date columns
pub const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Coerce a raw value to its column type
///
/// - Integer: must be all decimal digits, otherwise `"0"`
/// - Date: the token `NOW()` (any case) becomes the current local time in
///   `YYYY-MM-DD HH:MM:SS` form; any other value must already match that
///   shape, otherwise empty string
/// - String: passed through unchanged
pub fn coerce(ty: ColumnType, value: &str) -> String {
    match ty {
        ColumnType::Integer => {
            if is_integer(value) {
                value.to_string()
            } else {
                "0".to_string()
            }
        }
        ColumnType::Date => {
            if value.eq_ignore_ascii_case("NOW()") {
                Local::now().format(DATE_FORMAT).to_string()
            } else if is_date(value) {
                value.to_string()
            } else {
                String::new()
            }
        }
        ColumnType::String => value.to_string(),
    }
}

/// `^[0-9]+$`
fn is_integer(value: &str) -> bool {
    !value.is_empty() && value.bytes().all(|b| b.is_ascii_digit())
}

/// `^\d{4}-\d{2}-\d{2} \d{2}:\d{2}:\d{2}$` — a shape check, not a calendar
/// validation
fn is_date(value: &str) -> bool {
    let bytes = value.as_bytes();
    if bytes.len() != 19 {
        return false;
    }

    bytes.iter().enumerate().all(|(i, &b)| match i {
        4 | 7 => b == b'-',
        10 => b == b' ',
        13 | 16 => b == b':',
        _ => b.is_ascii_digit(),
    })
}
