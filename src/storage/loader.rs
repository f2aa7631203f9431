//! Loader
//!
//! The read path: parses the database file into a schema and an in-memory
//! record set. Invoked at table construction and on every created-state
//! re-check.
//!
//! Reads take no lock; a committer in another process can rewrite the file
//! underneath a concurrent load. That is the documented consistency model.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use tracing::debug;

use crate::config::Config;
use crate::error::Result;
use crate::record::Record;
use crate::schema::Schema;

use super::codec;

/// A schema and record set parsed from disk
#[derive(Debug, Clone)]
pub struct LoadedTable {
    pub schema: Schema,
    pub records: Vec<Record>,
}

/// Load the table from the configured file
///
/// Returns:
/// - `Ok(Some(table))` — a header parsed; records follow positionally
/// - `Ok(None)` — file missing, empty, or header unparsable ("not created")
/// - `Err(_)` — I/O failure or a row whose field count disagrees with the header
pub fn load(config: &Config) -> Result<Option<LoadedTable>> {
    load_path(&config.path, config.delimiter)
}

fn load_path(path: &Path, delimiter: char) -> Result<Option<LoadedTable>> {
    let file = match File::open(path) {
        Ok(f) => f,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e.into()),
    };

    let mut lines = BufReader::new(file).lines();

    // Line 1: the header. An empty or malformed header means "not created".
    let schema = match lines.next() {
        Some(line) => match codec::parse_header(&line?, delimiter) {
            Some(schema) => schema,
            None => return Ok(None),
        },
        None => return Ok(None),
    };

    // Lines 2..N: records, mapped positionally to schema columns.
    let mut records = Vec::new();

    for (i, line) in lines.enumerate() {
        let line = line?;
        if line.is_empty() {
            continue;
        }

        let fields = codec::decode_row(&line, delimiter, schema.len(), i + 1)?;

        let mut record = Record::new();
        for (column, value) in schema.iter().zip(fields) {
            record.push(&column.name, value);
        }
        records.push(record);
    }

    debug!(
        path = %path.display(),
        columns = schema.len(),
        rows = records.len(),
        "table loaded"
    );

    Ok(Some(LoadedTable { schema, records }))
}
