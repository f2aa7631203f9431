//! Query Module
//!
//! Predicate parsing/matching, record sorting, and type coercion.
//!
//! ## Responsibilities
//! - Translate a needle string into a tagged predicate and a matcher
//! - Stable sort of records by column value (numeric-aware collation)
//! - Coerce raw field values to their column type at insert/update time

mod coerce;
mod predicate;
mod sort;

pub use coerce::coerce;
pub use predicate::{Matcher, Predicate};
pub use sort::{compare_values, sort_records, SortDirection};
