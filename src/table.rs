//! Table Engine
//!
//! The core engine that composes schema, loader, query, and committer.
//!
//! ## Responsibilities
//! - Own the full in-memory table state (schema, records, index key)
//! - Route every operation through load/query/commit in a fixed pipeline
//! - Keep the on-disk file and the in-memory record set consistent
//!
//! ## Control Flow
//! Construction triggers the loader. Every mutating operation (create,
//! insert, update, delete) ends by invoking the committer, which resorts by
//! the index key when one is set and rewrites the whole file under an
//! exclusive lock. Select never commits.
//!
//! ## Concurrency Model
//! Single-threaded, synchronous, blocking I/O. A `Table` owns its state
//! exclusively; two instances opened on the same path are independent
//! caches that can overwrite each other's commits. Reads take no lock.

use std::fs::OpenOptions;
use std::path::Path;

use tracing::{debug, info};

use crate::config::Config;
use crate::error::{FlatError, Result};
use crate::query::{coerce, sort_records, Predicate, SortDirection};
use crate::record::Record;
use crate::schema::{Column, ColumnType, Schema};
use crate::storage::{committer, loader};

/// A single schema-typed table backed by one flat file
pub struct Table {
    /// Table configuration (file path, delimiter)
    config: Config,

    /// Schema parsed from the header; `None` until the table is created
    schema: Option<Schema>,

    /// In-memory record set; load order, or ascending by index key after
    /// a commit when one is set
    records: Vec<Record>,

    /// Integer column driving auto-increment and post-commit ordering
    index_key: Option<String>,

    /// Records touched by the most recent select/update/delete
    affected_rows: usize,
}

impl Table {
    /// Open a table with the given config
    ///
    /// Touches the file if it does not exist, verifies writability, then
    /// loads whatever the file holds. A missing or unparsable header is not
    /// an error; the table is simply not created yet.
    pub fn open(config: Config) -> Result<Self> {
        // Step 1: Touch the file and verify it is writable
        let open = OpenOptions::new()
            .write(true)
            .create(true)
            .open(&config.path);

        match open {
            Ok(_) => {}
            Err(e) if e.kind() == std::io::ErrorKind::PermissionDenied => {
                return Err(FlatError::NotWritable(config.path.display().to_string()));
            }
            Err(e) => return Err(e.into()),
        }

        // Step 2: Load the on-disk state
        let loaded = loader::load(&config)?;
        let (schema, records) = match loaded {
            Some(t) => (Some(t.schema), t.records),
            None => (None, Vec::new()),
        };

        info!(
            path = %config.path.display(),
            created = schema.is_some(),
            rows = records.len(),
            "table opened"
        );

        Ok(Self {
            config,
            schema,
            records,
            index_key: None,
            affected_rows: 0,
        })
    }

    /// Open with a path (convenience method)
    ///
    /// Uses default config with the specified database file.
    pub fn open_path(path: &Path) -> Result<Self> {
        Self::open(Config::new(path))
    }

    // =========================================================================
    // Schema / Table Creation
    // =========================================================================

    /// Create the table with the given columns
    ///
    /// Fails with `AlreadyExists` if the file already holds a parsable
    /// table, and `InvalidSchema` if the column list is empty or carries a
    /// duplicate name. On success the schema and an empty record set are
    /// stored and committed (header line only).
    pub fn create(&mut self, columns: Vec<Column>) -> Result<()> {
        if self.reload()? {
            return Err(FlatError::AlreadyExists(
                self.config.path.display().to_string(),
            ));
        }

        self.schema = Some(Schema::new(columns)?);
        self.records.clear();

        self.commit()
    }

    /// Check whether the table is created, re-reading the file
    ///
    /// Reloads the in-memory state from disk as a side effect.
    pub fn is_created(&mut self) -> Result<bool> {
        self.reload()
    }

    /// Designate an Integer column as the index key
    ///
    /// Fails with `UnknownColumn` if the column does not exist and
    /// `TypeMismatch` if it is not an Integer column. Purely in-memory; no
    /// commit is triggered.
    pub fn set_index_key(&mut self, name: &str) -> Result<()> {
        let column = self
            .schema
            .as_ref()
            .and_then(|s| s.column(name))
            .ok_or_else(|| FlatError::UnknownColumn(name.to_string()))?;

        if column.ty != ColumnType::Integer {
            return Err(FlatError::TypeMismatch(name.to_string()));
        }

        self.index_key = Some(name.to_string());
        Ok(())
    }

    // =========================================================================
    // Query
    // =========================================================================

    /// Fetch records matching a needle
    ///
    /// `column` is a column name or `"*"` (match against the concatenation
    /// of all field values in schema order). `needle` is `"*"` (everything),
    /// `=value` (exact), or a case-insensitive pattern. When `order_by`
    /// names a real column the result is stably sorted by it first; any
    /// other `order_by` (including empty) is ignored.
    ///
    /// Sets `affected_rows` to the match count (or the total row count for
    /// the `"*"` needle). Never mutates stored records and never commits.
    pub fn select(
        &mut self,
        column: &str,
        needle: &str,
        order_by: &str,
        direction: SortDirection,
    ) -> Vec<Record> {
        self.affected_rows = self.records.len();

        // Sorting operates on a copy; stored order is only ever changed by
        // the committer's index-key resort.
        let mut working = self.records.clone();

        let sortable = self
            .schema
            .as_ref()
            .map(|s| s.contains(order_by))
            .unwrap_or(false);
        if sortable {
            sort_records(&mut working, order_by, direction);
        }

        let predicate = Predicate::parse(needle);
        if predicate.is_all() {
            return working;
        }

        let matcher = predicate.compile();
        let result: Vec<Record> = if column == "*" {
            working
                .into_iter()
                .filter(|r| matcher.matches(&r.concatenated()))
                .collect()
        } else {
            working
                .into_iter()
                .filter(|r| matcher.matches(r.get(column).unwrap_or("")))
                .collect()
        };

        self.affected_rows = result.len();
        result
    }

    // =========================================================================
    // Mutation
    // =========================================================================

    /// Insert a record
    ///
    /// `fields` maps column names to raw values; a subset of the schema is
    /// allowed and unspecified columns default to empty string. Every
    /// supplied value passes through type coercion. Fails with
    /// `InvalidInput` if `fields` is empty.
    ///
    /// With an index key set, an unsupplied key is auto-assigned
    /// `max(existing) + 1` (or 1 for an empty table), and a supplied key
    /// equal to an existing one turns the insert into a no-op that still
    /// commits.
    pub fn insert(&mut self, fields: &[(&str, &str)]) -> Result<()> {
        if fields.is_empty() {
            return Err(FlatError::InvalidInput("fields is empty".to_string()));
        }
        let schema = self.created_schema()?;

        // Step 1: Build the record in schema order, coercing supplied values
        let mut record = Record::new();
        for column in schema.iter() {
            let value = fields
                .iter()
                .find(|(name, _)| *name == column.name)
                .map(|(_, raw)| coerce(column.ty, raw))
                .unwrap_or_default();
            record.push(&column.name, value);
        }

        // Step 2: Index-key handling
        if let Some(key) = self.index_key.clone() {
            let supplied = fields.iter().any(|(name, _)| *name == key);

            if !supplied {
                // Auto-increment: max existing value + 1, or 1 when empty
                let mut next: i64 = 1;
                for row in &self.records {
                    let value = row
                        .get(&key)
                        .and_then(|v| v.parse::<i64>().ok())
                        .unwrap_or(0);
                    if value >= next {
                        next = value + 1;
                    }
                }
                record.set(&key, next.to_string());
            } else {
                // Duplicate supplied key: skip the append but still commit
                let candidate = record.get(&key).unwrap_or("").to_string();
                let exists = self
                    .records
                    .iter()
                    .any(|row| row.get(&key) == Some(candidate.as_str()));
                if exists {
                    debug!(key = %candidate, "duplicate index value, insert skipped");
                    return self.commit();
                }
            }
        }

        // Step 3: Append and commit
        self.records.push(record);
        self.commit()
    }

    /// Update matching records
    ///
    /// A record matches when it has `column` and that value satisfies the
    /// needle. For each match, only the columns present in `fields` are
    /// overwritten (coerced); everything else is left untouched. Counts
    /// matches in `affected_rows` and commits once after the full pass.
    pub fn update(&mut self, column: &str, needle: &str, fields: &[(&str, &str)]) -> Result<()> {
        self.affected_rows = 0;
        let schema = self.created_schema()?;

        // Schema columns present in the update mapping, with their raw values
        let updates: Vec<(String, ColumnType, String)> = schema
            .iter()
            .filter_map(|col| {
                fields
                    .iter()
                    .find(|(name, _)| *name == col.name)
                    .map(|(_, raw)| (col.name.clone(), col.ty, raw.to_string()))
            })
            .collect();

        let matcher = Predicate::parse(needle).compile();

        // Row count captured at call start bounds the pass
        let total = self.records.len();

        for i in 0..total {
            let matched = self.records[i]
                .get(column)
                .map(|v| matcher.matches(v))
                .unwrap_or(false);
            if !matched {
                continue;
            }

            self.affected_rows += 1;

            for (name, ty, raw) in &updates {
                let value = coerce(*ty, raw);
                self.records[i].set(name, value);
            }
        }

        debug!(rows = self.affected_rows, "update matched");
        self.commit()
    }

    /// Delete matching records
    ///
    /// A record is kept when it lacks `column` or fails the needle; all
    /// others are dropped. `affected_rows` is the dropped count. Commits
    /// once.
    pub fn delete(&mut self, column: &str, needle: &str) -> Result<()> {
        self.created_schema()?;

        let matcher = Predicate::parse(needle).compile();

        let original = self.records.len();
        self.records.retain(|record| match record.get(column) {
            Some(value) => !matcher.matches(value),
            None => true,
        });
        self.affected_rows = original - self.records.len();

        debug!(rows = self.affected_rows, "delete matched");
        self.commit()
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Records touched by the most recent select/update/delete
    pub fn affected_rows(&self) -> usize {
        self.affected_rows
    }

    /// Index-column value of the last record in storage order
    ///
    /// Returns 0 when the table is empty or no index key is set.
    pub fn last_id(&self) -> i64 {
        let Some(key) = &self.index_key else {
            return 0;
        };

        self.records
            .last()
            .and_then(|r| r.get(key))
            .and_then(|v| v.parse::<i64>().ok())
            .unwrap_or(0)
    }

    /// The schema, if the table is created
    pub fn schema(&self) -> Option<&Schema> {
        self.schema.as_ref()
    }

    /// Number of records currently held in memory
    pub fn record_count(&self) -> usize {
        self.records.len()
    }

    /// The configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    // =========================================================================
    // Private Helpers
    // =========================================================================

    /// Re-read the file; true iff a header parsed
    ///
    /// Replaces the in-memory schema and record set with whatever the file
    /// holds.
    fn reload(&mut self) -> Result<bool> {
        match loader::load(&self.config)? {
            Some(t) => {
                self.schema = Some(t.schema);
                self.records = t.records;
                Ok(true)
            }
            None => {
                self.schema = None;
                self.records.clear();
                Ok(false)
            }
        }
    }

    /// The schema, or `NotCreated` when the table has none yet
    fn created_schema(&self) -> Result<&Schema> {
        self.schema
            .as_ref()
            .ok_or(FlatError::NotCreated)
    }

    /// Serialize and rewrite the file (resorting by index key first)
    fn commit(&mut self) -> Result<()> {
        let schema = self.schema.as_ref().ok_or(FlatError::NotCreated)?;
        committer::commit(
            &self.config,
            schema,
            &mut self.records,
            self.index_key.as_deref(),
        )
    }
}
