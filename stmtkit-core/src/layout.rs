//! Column layouts: which positional column means what, per source file shape.

use crate::date_format::DateFormat;
use crate::error::LayoutError;

/// Separator placed between description fragments.
pub const DESCRIPTION_SEPARATOR: &str = " - ";

/// Validated description of one source file shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnLayout {
    date_column: usize,
    date_format: DateFormat,
    description_columns: Vec<usize>,
    amount_column: usize,
    thousands_separator: Option<char>,
    skip_empty_fragments: bool,
    field_count: Option<usize>,
}

impl ColumnLayout {
    pub fn builder() -> ColumnLayoutBuilder {
        ColumnLayoutBuilder::default()
    }

    pub fn date_column(&self) -> usize {
        self.date_column
    }

    pub fn date_format(&self) -> &DateFormat {
        &self.date_format
    }

    pub fn description_columns(&self) -> &[usize] {
        &self.description_columns
    }

    pub fn amount_column(&self) -> usize {
        self.amount_column
    }

    pub fn thousands_separator(&self) -> Option<char> {
        self.thousands_separator
    }

    pub fn skip_empty_fragments(&self) -> bool {
        self.skip_empty_fragments
    }

    pub fn field_count(&self) -> Option<usize> {
        self.field_count
    }

    /// Highest column index the layout reads.
    pub fn max_column(&self) -> usize {
        self.description_columns
            .iter()
            .copied()
            .chain([self.date_column, self.amount_column])
            .max()
            .unwrap_or(0)
    }

    /// Number of fields a row must have to be read with this layout.
    pub fn required_fields(&self) -> usize {
        self.field_count.unwrap_or(self.max_column() + 1)
    }
}

/// Builder for [`ColumnLayout`].
///
/// Defaults describe the plainest export: `yyyy-mm-dd` dates in column 0, a
/// single description in column 1, the amount in column 2, no separator.
#[derive(Debug, Clone)]
pub struct ColumnLayoutBuilder {
    date_column: usize,
    date_pattern: String,
    description_columns: Vec<usize>,
    amount_column: usize,
    thousands_separator: Option<char>,
    skip_empty_fragments: bool,
    field_count: Option<usize>,
}

impl Default for ColumnLayoutBuilder {
    fn default() -> Self {
        Self {
            date_column: 0,
            date_pattern: "yyyy-mm-dd".to_string(),
            description_columns: vec![1],
            amount_column: 2,
            thousands_separator: None,
            skip_empty_fragments: false,
            field_count: None,
        }
    }
}

impl ColumnLayoutBuilder {
    pub fn date(mut self, column: usize, pattern: impl Into<String>) -> Self {
        self.date_column = column;
        self.date_pattern = pattern.into();
        self
    }

    pub fn description(mut self, columns: impl IntoIterator<Item = usize>) -> Self {
        self.description_columns = columns.into_iter().collect();
        self
    }

    pub fn amount(mut self, column: usize) -> Self {
        self.amount_column = column;
        self
    }

    pub fn thousands_separator(mut self, sep: Option<char>) -> Self {
        self.thousands_separator = sep;
        self
    }

    pub fn skip_empty_fragments(mut self, skip: bool) -> Self {
        self.skip_empty_fragments = skip;
        self
    }

    /// Require every row to have exactly `count` fields.
    pub fn field_count(mut self, count: Option<usize>) -> Self {
        self.field_count = count;
        self
    }

    pub fn build(self) -> Result<ColumnLayout, LayoutError> {
        if self.description_columns.is_empty() {
            return Err(LayoutError::NoDescriptionColumns);
        }
        if let Some(sep) = self.thousands_separator {
            if sep.is_ascii_digit() || matches!(sep, '.' | '-' | '+') {
                return Err(LayoutError::InvalidSeparator(sep));
            }
        }

        let date_format: DateFormat = self.date_pattern.parse()?;
        let layout = ColumnLayout {
            date_column: self.date_column,
            date_format,
            description_columns: self.description_columns,
            amount_column: self.amount_column,
            thousands_separator: self.thousands_separator,
            skip_empty_fragments: self.skip_empty_fragments,
            field_count: self.field_count,
        };

        if let Some(field_count) = layout.field_count {
            let column = layout.max_column();
            if field_count <= column {
                return Err(LayoutError::FieldCountTooSmall { field_count, column });
            }
        }

        Ok(layout)
    }
}
