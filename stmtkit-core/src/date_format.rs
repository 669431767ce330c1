//! Strict date patterns for statement date columns.
//!
//! A pattern is built from the tokens `yyyy`, `mm` and `dd` (any case) or the
//! strftime spellings `%Y`, `%m` and `%d`. Every other character is a literal
//! that must appear verbatim. Each field is fixed width: four year digits, two
//! month digits, two day digits.
//!
//!   "yyyy-mm-dd"  matches 2024-04-04
//!   "yyyymmdd"    matches 20240402
//!   "%d/%m/%Y"    matches 02/04/2024

use chrono::NaiveDate;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::LayoutError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Year,
    Month,
    Day,
}

impl Field {
    fn width(self) -> usize {
        match self {
            Field::Year => 4,
            Field::Month | Field::Day => 2,
        }
    }
}

/// Compiled date pattern.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DateFormat {
    pattern: String,
    re: Regex,
    order: [Field; 3],
}

impl DateFormat {
    pub fn new(pattern: &str) -> Result<Self, LayoutError> {
        let invalid = |reason: String| LayoutError::InvalidDateFormat {
            pattern: pattern.to_string(),
            reason,
        };

        let mut fields: Vec<Field> = Vec::with_capacity(3);
        let mut re_src = String::from("^");
        let mut rest = pattern;

        while let Some(c) = rest.chars().next() {
            let (field, consumed) = match c {
                '%' => match rest[1..].chars().next() {
                    Some('Y') => (Some(Field::Year), 2),
                    Some('m') => (Some(Field::Month), 2),
                    Some('d') => (Some(Field::Day), 2),
                    Some('%') => {
                        re_src.push_str(&regex::escape("%"));
                        rest = &rest[2..];
                        continue;
                    }
                    Some(other) => return Err(invalid(format!("unsupported directive %{other}"))),
                    None => return Err(invalid("trailing %".to_string())),
                },
                'y' | 'Y' => {
                    if starts_with_run(rest, 'y', 4) {
                        (Some(Field::Year), 4)
                    } else {
                        return Err(invalid("year must be written yyyy".to_string()));
                    }
                }
                'm' | 'M' => {
                    if starts_with_run(rest, 'm', 2) {
                        (Some(Field::Month), 2)
                    } else {
                        return Err(invalid("month must be written mm".to_string()));
                    }
                }
                'd' | 'D' => {
                    if starts_with_run(rest, 'd', 2) {
                        (Some(Field::Day), 2)
                    } else {
                        return Err(invalid("day must be written dd".to_string()));
                    }
                }
                _ => (None, c.len_utf8()),
            };

            match field {
                Some(f) => {
                    if fields.contains(&f) {
                        return Err(invalid(format!("{f:?} appears more than once").to_lowercase()));
                    }
                    fields.push(f);
                    re_src.push_str(&format!("([0-9]{{{}}})", f.width()));
                }
                None => re_src.push_str(&regex::escape(&rest[..consumed])),
            }
            rest = &rest[consumed..];
        }
        re_src.push('$');

        let order: [Field; 3] = fields
            .try_into()
            .map_err(|_| invalid("pattern needs a year, a month and a day".to_string()))?;

        let re = Regex::new(&re_src).map_err(|e| invalid(e.to_string()))?;

        Ok(Self {
            pattern: pattern.to_string(),
            re,
            order,
        })
    }

    /// Pattern text this format was compiled from.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Parse `text` exactly; no trimming, no partial matches.
    pub fn parse(&self, text: &str) -> Option<NaiveDate> {
        let caps = self.re.captures(text)?;
        let (mut year, mut month, mut day) = (0i32, 0u32, 0u32);
        for (i, field) in self.order.iter().enumerate() {
            let digits = caps.get(i + 1)?.as_str();
            match field {
                Field::Year => year = digits.parse().ok()?,
                Field::Month => month = digits.parse().ok()?,
                Field::Day => day = digits.parse().ok()?,
            }
        }
        NaiveDate::from_ymd_opt(year, month, day)
    }
}

/// True when `s` starts with `n` copies of `c`, ignoring ASCII case.
fn starts_with_run(s: &str, c: char, n: usize) -> bool {
    s.chars().take(n).filter(|x| x.eq_ignore_ascii_case(&c)).count() == n
}

impl PartialEq for DateFormat {
    fn eq(&self, other: &Self) -> bool {
        self.re.as_str() == other.re.as_str() && self.order == other.order
    }
}

impl Eq for DateFormat {}

impl std::str::FromStr for DateFormat {
    type Err = LayoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for DateFormat {
    type Error = LayoutError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value)
    }
}

impl From<DateFormat> for String {
    fn from(value: DateFormat) -> Self {
        value.pattern
    }
}

impl std::fmt::Display for DateFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.pattern)
    }
}
