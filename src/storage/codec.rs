//! Line codec
//!
//! Encoding and decoding of header and record lines.
//!
//! ## Line Formats
//!
//! ### Header
//! ```text
//! name1[type1]<DELIM>name2[type2]<DELIM>...
//! ```
//!
//! ### Record
//! ```text
//! "field1"<DELIM>"field2"<DELIM>...
//! ```
//! Every field is quote-wrapped; a literal `"` inside a value is written as
//! `\"`. A delimiter byte inside a quoted field is part of the value.

use crate::error::{FlatError, Result};
use crate::record::Record;
use crate::schema::{Column, ColumnType, Schema};

// =============================================================================
// Header Encoding/Decoding
// =============================================================================

/// Encode the schema as a header line (no trailing newline)
pub fn encode_header(schema: &Schema, delimiter: char) -> String {
    let tokens: Vec<String> = schema
        .iter()
        .map(|c| format!("{}[{}]", c.name, c.ty))
        .collect();

    tokens.join(&delimiter.to_string())
}

/// Parse a header line into a schema
///
/// Returns `None` when the line is not a well-formed header (empty line,
/// token without `name[type]` shape, unknown type token, duplicate name).
/// A `None` here means "table not created", not an error.
pub fn parse_header(line: &str, delimiter: char) -> Option<Schema> {
    if line.is_empty() {
        return None;
    }

    let mut columns = Vec::new();

    for token in line.split(delimiter) {
        let open = token.find('[')?;
        if !token.ends_with(']') || open == 0 {
            return None;
        }

        let name = &token[..open];
        let ty = ColumnType::parse(&token[open + 1..token.len() - 1])?;
        columns.push(Column::new(name, ty));
    }

    Schema::new(columns).ok()
}

// =============================================================================
// Record Encoding/Decoding
// =============================================================================

/// Encode a record as a data line (no trailing newline)
///
/// Fields are emitted in record order, each quote-wrapped with `"` escaped
/// as `\"`, joined by the delimiter.
pub fn encode_row(record: &Record, delimiter: char) -> String {
    let fields: Vec<String> = record
        .values()
        .map(|v| format!("\"{}\"", v.replace('"', "\\\"")))
        .collect();

    fields.join(&delimiter.to_string())
}

/// Decode a data line into positional field values
///
/// Fails with `ColumnCountMismatch` when the field count disagrees with the
/// header column count. `row` is the 1-based data row number used in the
/// error.
pub fn decode_row(
    line: &str,
    delimiter: char,
    expected: usize,
    row: usize,
) -> Result<Vec<String>> {
    let fields = split_fields(line, delimiter);

    if fields.len() != expected {
        return Err(FlatError::ColumnCountMismatch {
            row,
            found: fields.len(),
            expected,
        });
    }

    Ok(fields)
}

/// Split a data line into unescaped field values
///
/// Walks the line with a small state machine: inside a quoted field, `\"`
/// yields a literal `"` and a bare `"` closes the field; outside quotes the
/// delimiter separates fields. A field that does not open with a quote is
/// read verbatim up to the next delimiter (lenient, matching the loader's
/// trust-the-writer contract).
fn split_fields(line: &str, delimiter: char) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(ch) = chars.next() {
        if in_quotes {
            match ch {
                '\\' if chars.peek() == Some(&'"') => {
                    chars.next();
                    current.push('"');
                }
                '"' => in_quotes = false,
                _ => current.push(ch),
            }
        } else {
            match ch {
                '"' if current.is_empty() => in_quotes = true,
                c if c == delimiter => {
                    fields.push(std::mem::take(&mut current));
                }
                _ => current.push(ch),
            }
        }
    }

    fields.push(current);
    fields
}
