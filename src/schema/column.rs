//! Column definitions
//!
//! A column is a name paired with one of three value types. Values are
//! stored as text regardless of type; the type drives coercion at
//! insert/update time and index-key eligibility.

/// Value type of a column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    /// Non-negative integer, stored as its decimal text form
    Integer,

    /// Arbitrary text, passed through unchanged
    String,

    /// Timestamp in `YYYY-MM-DD HH:MM:SS` form
    Date,
}

impl ColumnType {
    /// On-disk type token used in the header line
    pub fn as_str(&self) -> &'static str {
        match self {
            ColumnType::Integer => "int",
            ColumnType::String => "str",
            ColumnType::Date => "date",
        }
    }

    /// Parse an on-disk type token
    ///
    /// Returns `None` for anything other than `int`, `str`, `date`.
    pub fn parse(token: &str) -> Option<Self> {
        match token {
            "int" => Some(ColumnType::Integer),
            "str" => Some(ColumnType::String),
            "date" => Some(ColumnType::Date),
            _ => None,
        }
    }
}

impl std::fmt::Display for ColumnType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A named, typed column
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    /// Column name (unique within a schema)
    pub name: String,

    /// Value type
    pub ty: ColumnType,
}

impl Column {
    /// Create a column
    pub fn new(name: impl Into<String>, ty: ColumnType) -> Self {
        Self {
            name: name.into(),
            ty,
        }
    }
}
