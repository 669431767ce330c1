//! Delimited-text reading into raw rows. No typing happens here.

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::Path;

use stmtkit_core::RawRow;

/// How to split a file into records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReadOptions {
    /// Field delimiter; must be a single ASCII character.
    ///
    /// Rows are split here and nowhere else: a `WrongFieldCount` error reports
    /// the row re-joined with `,` whatever this delimiter was.
    pub delimiter: char,
    /// First record after `skip_rows` holds column names.
    pub has_headers: bool,
    /// Preamble records dropped before anything else (account banners, blank lines).
    pub skip_rows: usize,
    /// Trim whitespace around every field.
    pub trim: bool,
    /// Allow records of differing widths.
    pub flexible: bool,
}

impl Default for ReadOptions {
    fn default() -> Self {
        Self {
            delimiter: ',',
            has_headers: true,
            skip_rows: 0,
            trim: false,
            flexible: true,
        }
    }
}

impl ReadOptions {
    fn delimiter_byte(&self) -> Result<u8> {
        if !self.delimiter.is_ascii() {
            bail!("delimiter '{}' is not a single ASCII character", self.delimiter);
        }
        Ok(self.delimiter as u8)
    }
}

/// Records from one file, split into the optional header row and data rows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawTable {
    pub headers: Option<Vec<String>>,
    pub rows: Vec<RawRow>,
}

impl RawTable {
    /// Position of the header named `name`, compared trimmed and case-insensitively.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        find_header(self.headers.as_deref()?, name)
    }
}

pub(crate) fn find_header(headers: &[String], name: &str) -> Option<usize> {
    let wanted = name.trim();
    headers
        .iter()
        .position(|h| h.trim().eq_ignore_ascii_case(wanted))
}

/// Read a whole file into a [`RawTable`].
pub fn read_table(path: impl AsRef<Path>, opts: &ReadOptions) -> Result<RawTable> {
    let path = path.as_ref();
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    let table = read_table_from_reader(file, opts)
        .with_context(|| format!("reading {}", path.display()))?;
    log::debug!(
        "read {} rows from {} (headers: {})",
        table.rows.len(),
        path.display(),
        table.headers.is_some()
    );
    Ok(table)
}

/// Read delimited text from any reader.
pub fn read_table_from_reader<R: Read>(reader: R, opts: &ReadOptions) -> Result<RawTable> {
    let mut rdr = csv::ReaderBuilder::new()
        .delimiter(opts.delimiter_byte()?)
        .has_headers(false)
        .flexible(true)
        .trim(if opts.trim { csv::Trim::All } else { csv::Trim::None })
        .from_reader(reader);

    let mut records = rdr.records().skip(opts.skip_rows);

    let headers = if opts.has_headers {
        match records.next() {
            Some(rec) => {
                let rec = rec.context("reading header row")?;
                Some(rec.iter().map(str::to_string).collect::<Vec<_>>())
            }
            None => None,
        }
    } else {
        None
    };

    let mut rows = Vec::new();
    let mut width = headers.as_ref().map(Vec::len);
    for result in records {
        let record = result.context("reading record")?;
        let line = record.position().map(|p| p.line()).unwrap_or(0);

        if !opts.flexible {
            match width {
                Some(w) if w != record.len() => {
                    bail!("line {line}: expected {w} fields, found {}", record.len());
                }
                Some(_) => {}
                None => width = Some(record.len()),
            }
        }

        rows.push(record.iter().map(str::to_string).collect::<RawRow>());
    }

    Ok(RawTable { headers, rows })
}
