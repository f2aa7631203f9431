//! Error types for FlatDB
//!
//! Provides a unified error type for all operations.

use thiserror::Error;

/// Result type alias using FlatError
pub type Result<T> = std::result::Result<T, FlatError>;

/// Unified error type for FlatDB operations
#[derive(Debug, Error)]
pub enum FlatError {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("\"{0}\" is not writable")]
    NotWritable(String),

    // -------------------------------------------------------------------------
    // Schema Errors
    // -------------------------------------------------------------------------
    #[error("table already created in \"{0}\"")]
    AlreadyExists(String),

    #[error("invalid schema: {0}")]
    InvalidSchema(String),

    #[error("\"{0}\" column not found")]
    UnknownColumn(String),

    #[error("\"{0}\" column is not of type integer")]
    TypeMismatch(String),

    // -------------------------------------------------------------------------
    // Input Errors
    // -------------------------------------------------------------------------
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("table not created")]
    NotCreated,

    // -------------------------------------------------------------------------
    // Format Errors
    // -------------------------------------------------------------------------
    /// A data row whose field count disagrees with the header column count.
    #[error("row {row} has {found} fields, header declares {expected} columns")]
    ColumnCountMismatch {
        row: usize,
        found: usize,
        expected: usize,
    },
}
