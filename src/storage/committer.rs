//! Committer
//!
//! The write path: serializes the whole in-memory table (header + rows) and
//! rewrites the file under an exclusive advisory lock.
//!
//! Every mutation commits the full file; there are no partial writes. If an
//! index key is set, records are resorted ascending by that key immediately
//! before serialization, so on-disk order always reflects index order after
//! a commit.

use std::fs::OpenOptions;
use std::io::{Seek, SeekFrom, Write};

use fs2::FileExt;
use tracing::debug;

use crate::config::Config;
use crate::error::{FlatError, Result};
use crate::query::{sort_records, SortDirection};
use crate::record::Record;
use crate::schema::Schema;

use super::codec;

/// Serialize the table and rewrite the file
///
/// Resorts `records` by `index_key` (ascending) when one is set, builds the
/// full file contents, then acquires an exclusive lock, truncates, writes,
/// and releases the lock. Fails with `NotWritable` if the file cannot be
/// opened for writing.
pub fn commit(
    config: &Config,
    schema: &Schema,
    records: &mut [Record],
    index_key: Option<&str>,
) -> Result<()> {
    if let Some(key) = index_key {
        sort_records(records, key, SortDirection::Ascending);
    }

    let mut out = codec::encode_header(schema, config.delimiter);
    out.push('\n');

    for record in records.iter() {
        out.push_str(&codec::encode_row(record, config.delimiter));
        out.push('\n');
    }

    write_file(config, &out)?;

    debug!(
        path = %config.path.display(),
        rows = records.len(),
        bytes = out.len(),
        "table committed"
    );

    Ok(())
}

/// Overwrite the file's full contents under an exclusive lock
fn write_file(config: &Config, contents: &str) -> Result<()> {
    let file = OpenOptions::new()
        .write(true)
        .create(true)
        .open(&config.path);

    let mut file = match file {
        Ok(f) => f,
        Err(e) if e.kind() == std::io::ErrorKind::PermissionDenied => {
            return Err(FlatError::NotWritable(config.path.display().to_string()));
        }
        Err(e) => return Err(e.into()),
    };

    // Truncation happens after the lock is held.
    file.lock_exclusive()?;

    let result = (|| -> Result<()> {
        file.set_len(0)?;
        file.seek(SeekFrom::Start(0))?;
        file.write_all(contents.as_bytes())?;
        file.flush()?;
        Ok(())
    })();

    FileExt::unlock(&file)?;

    result
}
