use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize, Serializer};

/// One source line's fields, before any typing. Meaning is positional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawRow(pub Vec<String>);

impl RawRow {
    pub fn get(&self, idx: usize) -> Option<&str> {
        self.0.get(idx).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Fields joined with `,`, used when reporting whole-row failures. The
    /// source delimiter is not known here, so `,` is used for every file.
    pub fn joined(&self) -> String {
        self.0.join(",")
    }
}

impl From<Vec<String>> for RawRow {
    fn from(fields: Vec<String>) -> Self {
        Self(fields)
    }
}

impl<const N: usize> From<[&str; N]> for RawRow {
    fn from(fields: [&str; N]) -> Self {
        fields.iter().map(|s| s.to_string()).collect()
    }
}

impl FromIterator<String> for RawRow {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Normalized transaction (bank-agnostic).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub date: NaiveDate,
    pub description: String,
    /// Negative means outflow; positive means inflow. No currency symbol.
    /// Serialized as plain decimal text, never exponent form.
    #[serde(serialize_with = "serialize_plain_decimal")]
    pub amount: BigDecimal,
}

fn serialize_plain_decimal<S: Serializer>(value: &BigDecimal, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(&value.to_plain_string())
}

impl Transaction {
    pub fn is_outflow(&self) -> bool {
        self.amount < BigDecimal::from(0)
    }

    pub fn is_inflow(&self) -> bool {
        self.amount > BigDecimal::from(0)
    }
}
