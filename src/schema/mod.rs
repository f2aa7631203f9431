//! Schema Module
//!
//! Named, typed column definitions for a table.
//!
//! ## Responsibilities
//! - Declare column names and types (order is significant)
//! - Enforce name uniqueness at creation time
//! - Provide lookup by name for query and index-key validation
//!
//! ## Immutability
//! A schema is established once at table-creation time and persisted in the
//! file header. Column types never change for the life of the table; there
//! is no ALTER.

mod column;

pub use column::{Column, ColumnType};

use crate::error::{FlatError, Result};

/// Ordered sequence of columns defining a table
///
/// Column order defines the on-disk field order.
#[derive(Debug, Clone, PartialEq)]
pub struct Schema {
    columns: Vec<Column>,
}

impl Schema {
    /// Build a schema from a column list
    ///
    /// Fails with `InvalidSchema` if the list is empty or a column name
    /// appears more than once.
    pub fn new(columns: Vec<Column>) -> Result<Self> {
        if columns.is_empty() {
            return Err(FlatError::InvalidSchema("column list is empty".to_string()));
        }

        for (i, column) in columns.iter().enumerate() {
            if columns[..i].iter().any(|c| c.name == column.name) {
                return Err(FlatError::InvalidSchema(format!(
                    "duplicate column \"{}\"",
                    column.name
                )));
            }
        }

        Ok(Self { columns })
    }

    /// Look up a column by name
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Check whether a column exists
    pub fn contains(&self, name: &str) -> bool {
        self.column(name).is_some()
    }

    /// Number of columns
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Iterate columns in declared order
    pub fn iter(&self) -> impl Iterator<Item = &Column> {
        self.columns.iter()
    }
}
