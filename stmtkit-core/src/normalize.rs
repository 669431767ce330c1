//! Transaction normalizer: raw positional rows in, typed transactions out.
//!
//! Pure and reentrant; no state is kept between calls.

use crate::amount::parse_amount;
use crate::error::{FormatError, FormatErrorKind};
use crate::layout::{ColumnLayout, DESCRIPTION_SEPARATOR};
use crate::types::{RawRow, Transaction};

/// Normalize every row, stopping at the first row that does not fit `layout`.
///
/// Output order is input order and `rows.len()` transactions are returned on
/// success.
pub fn normalize(rows: &[RawRow], layout: &ColumnLayout) -> Result<Vec<Transaction>, FormatError> {
    rows.iter()
        .enumerate()
        .map(|(i, row)| normalize_row(i, row, layout))
        .collect()
}

/// Normalize every row, keeping good rows and collecting the failures.
pub fn normalize_partitioned(
    rows: &[RawRow],
    layout: &ColumnLayout,
) -> (Vec<Transaction>, Vec<FormatError>) {
    let mut ok = Vec::with_capacity(rows.len());
    let mut failed = Vec::new();
    for (i, row) in rows.iter().enumerate() {
        match normalize_row(i, row, layout) {
            Ok(txn) => ok.push(txn),
            Err(e) => failed.push(e),
        }
    }
    (ok, failed)
}

/// Normalize one row. `index` is only used to label errors.
pub fn normalize_row(
    index: usize,
    row: &RawRow,
    layout: &ColumnLayout,
) -> Result<Transaction, FormatError> {
    check_field_count(index, row, layout)?;

    let date_raw = field(row, layout.date_column());
    let date = layout
        .date_format()
        .parse(date_raw)
        .ok_or_else(|| FormatError::new(FormatErrorKind::InvalidDate, index, date_raw))?;

    let description = assemble_description(row, layout);

    let amount_raw = field(row, layout.amount_column());
    let amount = parse_amount(amount_raw, layout.thousands_separator())
        .ok_or_else(|| FormatError::new(FormatErrorKind::InvalidAmount, index, amount_raw))?;

    Ok(Transaction {
        date,
        description,
        amount,
    })
}

fn check_field_count(index: usize, row: &RawRow, layout: &ColumnLayout) -> Result<(), FormatError> {
    let expected = layout.required_fields();
    let found = row.len();
    let fits = match layout.field_count() {
        Some(_) => found == expected,
        None => found >= expected,
    };
    if fits {
        Ok(())
    } else {
        Err(FormatError::new(
            FormatErrorKind::WrongFieldCount { expected, found },
            index,
            row.joined(),
        ))
    }
}

// Field count has been checked, so every layout column is present.
fn field(row: &RawRow, idx: usize) -> &str {
    row.get(idx).unwrap_or_default()
}

fn assemble_description(row: &RawRow, layout: &ColumnLayout) -> String {
    let fragments = layout
        .description_columns()
        .iter()
        .map(|&idx| field(row, idx))
        .filter(|s| !(layout.skip_empty_fragments() && s.is_empty()));
    fragments.collect::<Vec<_>>().join(DESCRIPTION_SEPARATOR)
}

#[cfg(test)]
mod tests {
    use super::*;
    use bigdecimal::BigDecimal;
    use chrono::NaiveDate;
    use std::str::FromStr;

    fn dec(s: &str) -> BigDecimal {
        BigDecimal::from_str(s).unwrap()
    }

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn split_layout() -> ColumnLayout {
        ColumnLayout::builder()
            .date(0, "yyyymmdd")
            .description([1, 2])
            .amount(3)
            .thousands_separator(Some(','))
            .build()
            .unwrap()
    }

    #[test]
    fn test_simple_layout_row() {
        let layout = ColumnLayout::builder().build().unwrap();
        let rows = vec![RawRow::from([
            "2024-04-04",
            "My Online Shop XYZ - Invoice 1234",
            "-123.45",
        ])];

        let txns = normalize(&rows, &layout).unwrap();
        assert_eq!(txns.len(), 1);
        assert_eq!(txns[0].date, ymd(2024, 4, 4));
        assert_eq!(txns[0].description, "My Online Shop XYZ - Invoice 1234");
        assert_eq!(txns[0].amount, dec("-123.45"));
        assert!(txns[0].is_outflow());
    }

    #[test]
    fn test_split_description_with_thousands_separator() {
        let rows = vec![RawRow::from(["20240402", "My Employer", "April 2024", "1,234.56"])];

        let txns = normalize(&rows, &split_layout()).unwrap();
        assert_eq!(txns[0].date, ymd(2024, 4, 2));
        assert_eq!(txns[0].description, "My Employer - April 2024");
        assert_eq!(txns[0].amount, dec("1234.56"));
    }

    #[test]
    fn test_date_format_mismatch() {
        let rows = vec![RawRow::from(["2024-04-04", "My Employer", "April 2024", "1.00"])];

        let err = normalize(&rows, &split_layout()).unwrap_err();
        assert_eq!(err.kind, FormatErrorKind::InvalidDate);
        assert_eq!(err.row, 0);
        assert_eq!(err.raw, "2024-04-04");
    }

    #[test]
    fn test_separator_stripped_everywhere() {
        let rows = vec![RawRow::from(["20240402", "A", "B", "1,23"])];
        let txns = normalize(&rows, &split_layout()).unwrap();
        assert_eq!(txns[0].amount, dec("123"));
    }

    #[test]
    fn test_invalid_amount_reports_raw_text() {
        let rows = vec![
            RawRow::from(["20240401", "A", "B", "10.00"]),
            RawRow::from(["20240402", "A", "B", "ten"]),
        ];
        let err = normalize(&rows, &split_layout()).unwrap_err();
        assert_eq!(err.kind, FormatErrorKind::InvalidAmount);
        assert_eq!(err.row, 1);
        assert_eq!(err.raw, "ten");
    }

    #[test]
    fn test_stops_at_first_bad_row() {
        let rows = vec![
            RawRow::from(["20240401", "A", "B", "x"]),
            RawRow::from(["bad", "A", "B", "1"]),
        ];
        let err = normalize(&rows, &split_layout()).unwrap_err();
        assert_eq!(err.row, 0);
        assert_eq!(err.kind, FormatErrorKind::InvalidAmount);
    }

    #[test]
    fn test_short_row_is_wrong_field_count() {
        let rows = vec![RawRow::from(["20240402", "My Employer", "1.00"])];
        let err = normalize(&rows, &split_layout()).unwrap_err();
        assert_eq!(err.kind, FormatErrorKind::WrongFieldCount { expected: 4, found: 3 });
        assert_eq!(err.raw, "20240402,My Employer,1.00");
    }

    #[test]
    fn test_extra_fields_allowed_unless_exact_count() {
        let row = RawRow::from(["2024-04-04", "Shop", "1.00", "extra"]);

        let loose = ColumnLayout::builder().build().unwrap();
        assert!(normalize_row(0, &row, &loose).is_ok());

        let exact = ColumnLayout::builder().field_count(Some(3)).build().unwrap();
        let err = normalize_row(7, &row, &exact).unwrap_err();
        assert_eq!(err.row, 7);
        assert_eq!(err.kind, FormatErrorKind::WrongFieldCount { expected: 3, found: 4 });
    }

    #[test]
    fn test_empty_fragments_kept_by_default() {
        let rows = vec![RawRow::from(["20240402", "My Employer", "", "5"])];
        let txns = normalize(&rows, &split_layout()).unwrap();
        assert_eq!(txns[0].description, "My Employer - ");

        let skipping = ColumnLayout::builder()
            .date(0, "yyyymmdd")
            .description([1, 2])
            .amount(3)
            .skip_empty_fragments(true)
            .build()
            .unwrap();
        let txns = normalize(&rows, &skipping).unwrap();
        assert_eq!(txns[0].description, "My Employer");
    }

    #[test]
    fn test_fragment_order_follows_layout() {
        let layout = ColumnLayout::builder()
            .date(0, "yyyymmdd")
            .description([2, 1])
            .amount(3)
            .build()
            .unwrap();
        let rows = vec![RawRow::from(["20240402", "first", "second", "0"])];
        let txns = normalize(&rows, &layout).unwrap();
        assert_eq!(txns[0].description, "second - first");
    }

    #[test]
    fn test_order_count_and_determinism() {
        let rows: Vec<RawRow> = (1..=9)
            .map(|d| {
                RawRow::from(vec![
                    format!("2024040{d}"),
                    format!("payee {d}"),
                    "memo".to_string(),
                    format!("-{d},000.0{d}"),
                ])
            })
            .collect();
        let layout = split_layout();

        let first = normalize(&rows, &layout).unwrap();
        let second = normalize(&rows, &layout).unwrap();
        assert_eq!(first.len(), rows.len());
        assert_eq!(first, second);
        for (i, txn) in first.iter().enumerate() {
            let d = i as u32 + 1;
            assert_eq!(txn.date, ymd(2024, 4, d));
            assert_eq!(txn.description, format!("payee {d} - memo"));
        }
        assert_eq!(first[2].amount, dec("-3000.03"));
    }

    #[test]
    fn test_partitioned_keeps_good_rows_in_order() {
        let rows = vec![
            RawRow::from(["20240401", "A", "B", "1"]),
            RawRow::from(["2024-04-02", "A", "B", "2"]),
            RawRow::from(["20240403", "A", "B", "3"]),
            RawRow::from(["20240404", "A"]),
        ];
        let (ok, failed) = normalize_partitioned(&rows, &split_layout());
        assert_eq!(ok.len(), 2);
        assert_eq!(ok[0].amount, dec("1"));
        assert_eq!(ok[1].amount, dec("3"));
        assert_eq!(failed.len(), 2);
        assert_eq!(failed[0].row, 1);
        assert_eq!(failed[0].kind, FormatErrorKind::InvalidDate);
        assert_eq!(failed[1].row, 3);
    }

    #[test]
    fn test_empty_input() {
        let txns = normalize(&[], &split_layout()).unwrap();
        assert!(txns.is_empty());
    }
}
