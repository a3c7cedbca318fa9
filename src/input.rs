//! Coercion of raw text from input fields into numbers
//!
//! Numeric fields never reject input. The longest numeric prefix of the
//! text is used and anything without one becomes 0, so "12 kg" reads as 12
//! and "abc" as 0.

use std::sync::LazyLock;

use regex::Regex;

static DECIMAL_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*([+-]?(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?)").expect("decimal prefix pattern")
});

static INTEGER_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*([+-]?\d+)").expect("integer prefix pattern"));

/// Parse a decimal number from the start of `text`, 0 when there is none
pub fn parse_number(text: &str) -> f64 {
    DECIMAL_PREFIX
        .captures(text)
        .and_then(|cap| cap[1].parse::<f64>().ok())
        .filter(|value| value.is_finite())
        .unwrap_or(0.0)
}

/// Parse a whole number from the start of `text`, 0 when there is none.
/// A fractional part is dropped, not rounded.
pub fn parse_integer(text: &str) -> i64 {
    INTEGER_PREFIX
        .captures(text)
        .and_then(|cap| cap[1].parse::<i64>().ok())
        .unwrap_or(0)
}

/// Checkbox-style input
pub fn parse_flag(text: &str) -> bool {
    matches!(
        text.trim().to_ascii_lowercase().as_str(),
        "true" | "yes" | "on" | "1" | "checked"
    )
}
