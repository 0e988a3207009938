// Key and amount normalization applied to raw cell values before matching.

use std::sync::OnceLock;

use contrecon_core::CellValue;
use regex::Regex;

/// ISO 6346 shape: owner code + category letter, then the serial digits.
fn container_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[A-Z]{4}[0-9]+").expect("valid container regex"))
}

/// A token containing at least one digit. Boundaries are ASCII-only, so an
/// accented letter glued to the number still ends the token.
fn bill_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?-u:\b)[A-Z0-9]*[0-9][A-Z0-9]*(?-u:\b)").expect("valid bill regex"))
}

/// The longest prefix `parseFloat` would accept once junk is stripped.
fn leading_float_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^-?(\d+\.?\d*|\.\d+)").expect("valid float regex"))
}

fn upper_trim(value: &CellValue) -> String {
    value.display().trim().to_uppercase()
}

/// `"msku1906227 re"` → `"MSKU1906227"`. Values without a container-number
/// shape are returned upper-cased and trimmed.
pub fn normalize_container_no(value: &CellValue) -> String {
    let s = upper_trim(value);
    match container_pattern().find(&s) {
        Some(m) => m.as_str().to_string(),
        None => s,
    }
}

/// Date cells format as `YYYY-MM-DD`; anything else is compared as its
/// upper-cased, trimmed text.
pub fn normalize_date(value: &CellValue) -> String {
    match value {
        CellValue::Date(d) => d.format("%Y-%m-%d").to_string(),
        other => upper_trim(other),
    }
}

/// First digit-bearing token of the cell: annotations around a bill number
/// ("7265053640 này đã hủy- bill đúng 7265123020") are dropped and the first
/// number is kept. Falls back to the upper-cased, trimmed text.
pub fn normalize_bill_no(value: &CellValue) -> String {
    let s = upper_trim(value);
    match bill_pattern().find(&s) {
        Some(m) => m.as_str().to_string(),
        None => s,
    }
}

/// Parse a cost cell. Numbers pass through; text keeps only digits, `.` and
/// `-` (dropping thousands separators and currency marks) and is read like
/// `parseFloat`. Anything unreadable is 0.
pub fn parse_cost(value: &CellValue) -> f64 {
    match value {
        CellValue::Number(n) => *n,
        CellValue::Text(s) => {
            let cleaned: String = s
                .chars()
                .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
                .collect();
            leading_float_pattern()
                .find(&cleaned)
                .and_then(|m| m.as_str().parse::<f64>().ok())
                .unwrap_or(0.0)
        }
        CellValue::Empty | CellValue::Date(_) => 0.0,
    }
}
