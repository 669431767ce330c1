//! Built-in profiles for the two common export shapes.
//!
//! Simple export:
//!   Date,Description,Amount
//!   2024-04-04,My Online Shop XYZ - Invoice 1234,-123.45
//!
//! Split-description export (payee and memo in separate columns, grouped amounts):
//!   Date,Payee,Memo,Amount
//!   20240402,My Employer,April 2024,"1,234.56"

use crate::config::{ColumnRef, LayoutProfile};
use crate::reader::ReadOptions;

pub const SIMPLE: &str = "simple";
pub const SPLIT_DESCRIPTION: &str = "split-description";

pub fn simple_export() -> LayoutProfile {
    LayoutProfile {
        date: ColumnRef::Index(0),
        date_format: "yyyy-mm-dd".to_string(),
        description: vec![ColumnRef::Index(1)],
        amount: ColumnRef::Index(2),
        thousands_separator: None,
        skip_empty_fragments: false,
        field_count: None,
        read: ReadOptions::default(),
    }
}

pub fn split_description_export() -> LayoutProfile {
    LayoutProfile {
        date: ColumnRef::Index(0),
        date_format: "yyyymmdd".to_string(),
        description: vec![ColumnRef::Index(1), ColumnRef::Index(2)],
        amount: ColumnRef::Index(3),
        thousands_separator: Some(','),
        skip_empty_fragments: false,
        field_count: None,
        read: ReadOptions::default(),
    }
}
