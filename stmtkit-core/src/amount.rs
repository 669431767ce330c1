//! Amount coercion: thousands-separator stripping plus strict decimal parsing.

use std::str::FromStr;

use bigdecimal::BigDecimal;

/// Parse a statement amount.
///
/// Every occurrence of `thousands_separator` is removed, not just the ones
/// between digit groups, so `"1,23"` reads as `123`. The remainder, trimmed,
/// must be an optional sign followed by digits with at most one `.`.
pub fn parse_amount(text: &str, thousands_separator: Option<char>) -> Option<BigDecimal> {
    let stripped = match thousands_separator {
        Some(sep) => text.replace(sep, ""),
        None => text.to_string(),
    };
    let s = stripped.trim();
    if !is_plain_decimal(s) {
        return None;
    }
    BigDecimal::from_str(s).ok()
}

fn is_plain_decimal(s: &str) -> bool {
    let body = s.strip_prefix(['-', '+']).unwrap_or(s);
    let (int_part, frac_part) = match body.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (body, None),
    };
    let digits = |p: &str| p.chars().all(|c| c.is_ascii_digit());

    match frac_part {
        None => !int_part.is_empty() && digits(int_part),
        Some(frac) => {
            (!int_part.is_empty() || !frac.is_empty()) && digits(int_part) && digits(frac)
        }
    }
}
