//! stmtkit-core: layout-driven normalization of bank export rows into typed transactions.

pub mod amount;
pub mod date_format;
pub mod error;
pub mod layout;
pub mod normalize;
pub mod types;

pub use amount::parse_amount;
pub use date_format::DateFormat;
pub use error::{FormatError, FormatErrorKind, LayoutError};
pub use layout::{ColumnLayout, ColumnLayoutBuilder, DESCRIPTION_SEPARATOR};
pub use normalize::{normalize, normalize_partitioned, normalize_row};
pub use types::{RawRow, Transaction};
