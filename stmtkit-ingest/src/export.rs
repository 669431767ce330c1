//! Write normalized transactions back out as delimited text.

use anyhow::{Context, Result, anyhow, bail};
use std::fmt::Write as _;
use std::fs::File;
use std::io::Write;
use std::path::Path;

use stmtkit_core::Transaction;

/// Output shape. Header names can be renamed per target tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportOptions {
    pub delimiter: char,
    pub write_headers: bool,
    pub date_header: String,
    pub description_header: String,
    pub amount_header: String,
    /// chrono strftime pattern for the date column.
    pub date_format: String,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            delimiter: ',',
            write_headers: true,
            date_header: "date".to_string(),
            description_header: "description".to_string(),
            amount_header: "amount".to_string(),
            date_format: "%Y-%m-%d".to_string(),
        }
    }
}

pub fn write_csv<W: Write>(writer: W, txns: &[Transaction], opts: &ExportOptions) -> Result<()> {
    if !opts.delimiter.is_ascii() {
        bail!("delimiter '{}' is not a single ASCII character", opts.delimiter);
    }
    let mut wtr = csv::WriterBuilder::new()
        .delimiter(opts.delimiter as u8)
        .from_writer(writer);

    if opts.write_headers {
        wtr.write_record([
            opts.date_header.as_str(),
            opts.description_header.as_str(),
            opts.amount_header.as_str(),
        ])?;
    }

    for txn in txns {
        let mut date = String::new();
        write!(date, "{}", txn.date.format(&opts.date_format))
            .map_err(|_| anyhow!("invalid date format '{}'", opts.date_format))?;
        let amount = txn.amount.to_plain_string();
        wtr.write_record([date.as_str(), txn.description.as_str(), amount.as_str()])?;
    }

    wtr.flush().context("flush csv output")?;
    Ok(())
}

pub fn write_csv_path(path: impl AsRef<Path>, txns: &[Transaction], opts: &ExportOptions) -> Result<()> {
    let p = path.as_ref();
    let file = File::create(p).with_context(|| format!("create {}", p.display()))?;
    write_csv(file, txns, opts).with_context(|| format!("write {}", p.display()))?;
    log::info!("wrote {} transactions to {}", txns.len(), p.display());
    Ok(())
}

pub fn to_csv_string(txns: &[Transaction], opts: &ExportOptions) -> Result<String> {
    let mut buf = Vec::new();
    write_csv(&mut buf, txns, opts)?;
    Ok(String::from_utf8(buf)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use bigdecimal::BigDecimal;
    use chrono::NaiveDate;
    use std::str::FromStr;

    fn sample() -> Vec<Transaction> {
        vec![
            Transaction {
                date: NaiveDate::from_ymd_opt(2024, 4, 2).unwrap(),
                description: "My Employer - April 2024".to_string(),
                amount: BigDecimal::from_str("1234.56").unwrap(),
            },
            Transaction {
                date: NaiveDate::from_ymd_opt(2024, 4, 4).unwrap(),
                description: "Cafe, Main St".to_string(),
                amount: BigDecimal::from_str("-4.50").unwrap(),
            },
        ]
    }

    #[test]
    fn test_default_export() {
        let out = to_csv_string(&sample(), &ExportOptions::default()).unwrap();
        assert_eq!(
            out,
            "date,description,amount\n\
             2024-04-02,My Employer - April 2024,1234.56\n\
             2024-04-04,\"Cafe, Main St\",-4.50\n"
        );
    }

    #[test]
    fn test_renamed_headers_and_date_format() {
        let opts = ExportOptions {
            delimiter: ';',
            date_header: "Booking Date".to_string(),
            description_header: "Payee".to_string(),
            amount_header: "Value".to_string(),
            date_format: "%d.%m.%Y".to_string(),
            ..ExportOptions::default()
        };
        let out = to_csv_string(&sample()[..1], &opts).unwrap();
        assert_eq!(out, "Booking Date;Payee;Value\n02.04.2024;My Employer - April 2024;1234.56\n");
    }

    #[test]
    fn test_tiny_amounts_stay_plain_decimal() {
        let date = NaiveDate::from_ymd_opt(2024, 4, 2).unwrap();
        let txns: Vec<Transaction> = ["0.0000001", "-0.000000010"]
            .iter()
            .map(|a| Transaction {
                date,
                description: "x".to_string(),
                amount: BigDecimal::from_str(a).unwrap(),
            })
            .collect();
        let opts = ExportOptions {
            write_headers: false,
            ..ExportOptions::default()
        };
        let out = to_csv_string(&txns, &opts).unwrap();
        assert_eq!(out, "2024-04-02,x,0.0000001\n2024-04-02,x,-0.000000010\n");
    }

    #[test]
    fn test_bad_date_format_is_an_error() {
        let opts = ExportOptions {
            date_format: "%Q".to_string(),
            ..ExportOptions::default()
        };
        assert!(to_csv_string(&sample(), &opts).is_err());
    }

    #[test]
    fn test_without_headers() {
        let opts = ExportOptions {
            write_headers: false,
            ..ExportOptions::default()
        };
        let out = to_csv_string(&[], &opts).unwrap();
        assert!(out.is_empty());
    }
}
