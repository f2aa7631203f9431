//! # FlatDB
//!
//! A minimal flat-file record store:
//! - One schema-typed table per file, loaded entirely into memory
//! - Substring/exact-match predicates over single columns
//! - Full-file rewrite on every mutation, under an exclusive write lock
//! - Optional Integer index key with auto-increment and on-disk ordering
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        Table Engine                          │
//! │          (owned state: schema + records + index key)         │
//! └───────┬───────────────────┬───────────────────┬─────────────┘
//!         │                   │                   │
//!         ▼                   ▼                   ▼
//!  ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//!  │   Loader    │     │    Query    │     │  Committer  │
//!  │  (parse)    │     │ (predicate, │     │ (serialize, │
//!  │             │     │ sort, coerce)│    │ lock, write)│
//!  └──────┬──────┘     └─────────────┘     └──────┬──────┘
//!         │                                       │
//!         └──────────────► file ◄─────────────────┘
//!                  header + quoted rows
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod schema;
pub mod record;
pub mod storage;
pub mod query;
pub mod table;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{FlatError, Result};
pub use config::Config;
pub use record::Record;
pub use schema::{Column, ColumnType, Schema};
pub use query::{Predicate, SortDirection};
pub use table::Table;

// =============================================================================
// Version Info
// =============================================================================

/// Current version of FlatDB
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
