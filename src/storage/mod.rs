//! Storage Module
//!
//! The on-disk representation of a table and the read/write paths over it.
//!
//! ## On-Disk Format
//!
//! ```text
//! name1[type1];name2[type2];...          <- header: schema, delimiter-joined
//! "field1";"field2";...                  <- one line per record
//! "field1";"field2";...
//! ```
//!
//! - Header tokens are `name[type]` with `type` one of `int`, `str`, `date`;
//!   no trailing delimiter.
//! - Record fields are quote-wrapped and joined by the delimiter. A literal
//!   `"` inside a value is escaped as `\"`.
//! - Fields map positionally to header columns; the field count of every row
//!   must equal the header column count.
//! - Plain text, byte-transparent UTF-8.
//!
//! ## Responsibilities
//! - `codec`: line-level encoding/decoding and escaping
//! - `loader`: parse the file into a schema + record set
//! - `committer`: serialize and rewrite the whole file under an exclusive lock

pub mod codec;
pub mod committer;
pub mod loader;

pub use loader::LoadedTable;
