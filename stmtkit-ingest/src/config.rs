//! Named layout profiles stored as TOML.
//!
//! ```toml
//! [layouts.giro]
//! date = "Buchungstag"
//! date_format = "yyyymmdd"
//! description = ["Auftraggeber", "Verwendungszweck"]
//! amount = 3
//! thousands_separator = ","
//!
//! [layouts.giro.read]
//! delimiter = ";"
//! ```

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use stmtkit_core::ColumnLayout;

use crate::presets;
use crate::reader::{ReadOptions, find_header};

/// A column given by position or by header name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ColumnRef {
    Index(usize),
    Name(String),
}

impl ColumnRef {
    pub fn resolve(&self, headers: Option<&[String]>) -> Result<usize> {
        match self {
            ColumnRef::Index(i) => Ok(*i),
            ColumnRef::Name(name) => {
                let headers = headers.ok_or_else(|| {
                    anyhow!("column '{name}' is referenced by name but the file has no header row")
                })?;
                find_header(headers, name).ok_or_else(|| anyhow!("no column named '{name}'"))
            }
        }
    }
}

impl From<usize> for ColumnRef {
    fn from(i: usize) -> Self {
        ColumnRef::Index(i)
    }
}

impl From<&str> for ColumnRef {
    fn from(name: &str) -> Self {
        ColumnRef::Name(name.to_string())
    }
}

/// Everything needed to load one export shape: read options plus column mapping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutProfile {
    pub date: ColumnRef,
    pub date_format: String,
    pub description: Vec<ColumnRef>,
    pub amount: ColumnRef,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thousands_separator: Option<char>,
    #[serde(default)]
    pub skip_empty_fragments: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field_count: Option<usize>,
    #[serde(default)]
    pub read: ReadOptions,
}

impl LayoutProfile {
    /// Turn named columns into positions and validate the result.
    pub fn resolve(&self, headers: Option<&[String]>) -> Result<ColumnLayout> {
        let date = self.date.resolve(headers).context("date column")?;
        let amount = self.amount.resolve(headers).context("amount column")?;
        let description = self
            .description
            .iter()
            .map(|c| c.resolve(headers))
            .collect::<Result<Vec<_>>>()
            .context("description columns")?;

        let layout = ColumnLayout::builder()
            .date(date, self.date_format.as_str())
            .description(description)
            .amount(amount)
            .thousands_separator(self.thousands_separator)
            .skip_empty_fragments(self.skip_empty_fragments)
            .field_count(self.field_count)
            .build()?;

        log::debug!(
            "resolved layout: date={} description={:?} amount={}",
            layout.date_column(),
            layout.description_columns(),
            layout.amount_column()
        );
        Ok(layout)
    }
}

/// The contents of a layouts file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutsConfig {
    #[serde(default)]
    pub layouts: BTreeMap<String, LayoutProfile>,
}

impl Default for LayoutsConfig {
    fn default() -> Self {
        let mut layouts = BTreeMap::new();
        layouts.insert(presets::SIMPLE.to_string(), presets::simple_export());
        layouts.insert(
            presets::SPLIT_DESCRIPTION.to_string(),
            presets::split_description_export(),
        );
        Self { layouts }
    }
}

impl LayoutsConfig {
    pub fn from_toml_str(s: &str) -> Result<Self> {
        Ok(toml::from_str(s).context("parse layouts toml")?)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).context("serialize layouts")
    }

    pub fn get(&self, name: &str) -> Result<&LayoutProfile> {
        self.layouts
            .get(name)
            .ok_or_else(|| anyhow!("unknown layout '{name}'"))
    }
}

pub fn load_layouts(path: impl AsRef<Path>) -> Result<LayoutsConfig> {
    let p = path.as_ref();
    let s = fs::read_to_string(p).with_context(|| format!("read {}", p.display()))?;
    LayoutsConfig::from_toml_str(&s).with_context(|| format!("load {}", p.display()))
}

/// Like [`load_layouts`], but a missing file yields the built-in presets.
pub fn load_layouts_or_default(path: impl AsRef<Path>) -> Result<LayoutsConfig> {
    let p = path.as_ref();
    if !p.exists() {
        log::info!("{} not found, using built-in layouts", p.display());
        return Ok(LayoutsConfig::default());
    }
    load_layouts(p)
}

pub fn save_layouts(path: impl AsRef<Path>, cfg: &LayoutsConfig) -> Result<()> {
    let p = path.as_ref();
    let s = cfg.to_toml_string()?;
    fs::write(p, s).with_context(|| format!("write {}", p.display()))?;
    Ok(())
}
