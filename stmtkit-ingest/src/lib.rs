//! stmtkit-ingest: read bank CSV exports, map their columns, and write normalized tables.

pub mod config;
pub mod export;
pub mod presets;
pub mod reader;

use anyhow::{Context, Result};
use std::path::Path;

use stmtkit_core::{ColumnLayout, FormatError, Transaction, normalize, normalize_partitioned};

pub use config::{ColumnRef, LayoutProfile, LayoutsConfig, load_layouts, load_layouts_or_default, save_layouts};
pub use export::{ExportOptions, to_csv_string, write_csv, write_csv_path};
pub use reader::{RawTable, ReadOptions, read_table, read_table_from_reader};

/// Read `path` and normalize every data row, failing on the first bad row.
pub fn load_transactions(
    path: impl AsRef<Path>,
    read: &ReadOptions,
    layout: &ColumnLayout,
) -> Result<Vec<Transaction>> {
    let path = path.as_ref();
    let table = read_table(path, read)?;
    let txns = normalize(&table.rows, layout)
        .with_context(|| format!("normalizing {}", path.display()))?;
    log::info!("loaded {} transactions from {}", txns.len(), path.display());
    Ok(txns)
}

fn read_with_profile(path: &Path, profile: &LayoutProfile) -> Result<(RawTable, ColumnLayout)> {
    let table = read_table(path, &profile.read)?;
    let layout = profile
        .resolve(table.headers.as_deref())
        .with_context(|| format!("layout for {}", path.display()))?;
    Ok((table, layout))
}

/// Read `path` with a profile, resolving named columns against the header row.
pub fn load_with_profile(path: impl AsRef<Path>, profile: &LayoutProfile) -> Result<Vec<Transaction>> {
    let path = path.as_ref();
    let (table, layout) = read_with_profile(path, profile)?;
    let txns = normalize(&table.rows, &layout)
        .with_context(|| format!("normalizing {}", path.display()))?;
    log::info!("loaded {} transactions from {}", txns.len(), path.display());
    Ok(txns)
}

/// Like [`load_with_profile`], but rows that fail are returned instead of aborting.
pub fn load_with_profile_partitioned(
    path: impl AsRef<Path>,
    profile: &LayoutProfile,
) -> Result<(Vec<Transaction>, Vec<FormatError>)> {
    let path = path.as_ref();
    let (table, layout) = read_with_profile(path, profile)?;
    let (txns, failed) = normalize_partitioned(&table.rows, &layout);
    for err in &failed {
        log::warn!("{}: skipped {err}", path.display());
    }
    log::info!(
        "loaded {} transactions from {} ({} rows skipped)",
        txns.len(),
        path.display(),
        failed.len()
    );
    Ok((txns, failed))
}
