//! Error types raised while coercing raw rows or building layouts.

use thiserror::Error;

/// What went wrong with a single row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormatErrorKind {
    /// Date text did not match the layout's date format exactly.
    InvalidDate,
    /// Amount text was not a decimal number once separators were removed.
    InvalidAmount,
    /// Row is missing columns the layout refers to, or has the wrong width.
    WrongFieldCount { expected: usize, found: usize },
}

impl std::fmt::Display for FormatErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FormatErrorKind::InvalidDate => write!(f, "invalid date"),
            FormatErrorKind::InvalidAmount => write!(f, "invalid amount"),
            FormatErrorKind::WrongFieldCount { expected, found } => {
                write!(f, "wrong field count (expected {expected}, found {found})")
            }
        }
    }
}

/// A row that could not be coerced to its layout.
///
/// `row` is the 0-based position of the row in the normalizer input and `raw`
/// is the offending field text (the whole row, comma-joined, for field count
/// failures).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("row {row}: {kind}: '{raw}'")]
pub struct FormatError {
    pub kind: FormatErrorKind,
    pub row: usize,
    pub raw: String,
}

impl FormatError {
    pub fn new(kind: FormatErrorKind, row: usize, raw: impl Into<String>) -> Self {
        Self {
            kind,
            row,
            raw: raw.into(),
        }
    }
}

/// A column layout that can never match any row.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutError {
    #[error("layout has no description columns")]
    NoDescriptionColumns,

    #[error("thousands separator '{0}' collides with number syntax")]
    InvalidSeparator(char),

    #[error("field count {field_count} is too small for column index {column}")]
    FieldCountTooSmall { field_count: usize, column: usize },

    #[error("date format '{pattern}': {reason}")]
    InvalidDateFormat { pattern: String, reason: String },
}
