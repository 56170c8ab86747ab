//! Parsing and formatting of `pt-BR` amounts such as `"1.234,56"`.

use std::fmt;
use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// A monetary value as submitted by a client.
///
/// Clients send either a locale string (`"1.234,56"`, `"R$ 50,00"`) or a
/// JSON number. Strings are tried first so that `"1.234"` is read as one
/// thousand two hundred thirty-four, never as a fraction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawAmount {
    /// Locale-formatted text.
    Text(String),
    /// Plain numeric value.
    Number(Decimal),
}

impl From<&str> for RawAmount {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for RawAmount {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<Decimal> for RawAmount {
    fn from(value: Decimal) -> Self {
        Self::Number(value)
    }
}

/// Converts a raw amount into a canonical decimal.
///
/// Returns `None` when the input is not a number. This never fails loudly:
/// rejecting `None` is the validator's job.
#[must_use]
pub fn parse_brl(raw: &RawAmount) -> Option<Decimal> {
    match raw {
        RawAmount::Number(value) => Some(*value),
        RawAmount::Text(text) => parse_brl_str(text),
    }
}

/// Parses a `pt-BR` formatted string.
///
/// Everything except digits, the comma and the minus sign is discarded
/// first, which removes thousands dots, currency symbols and whitespace.
/// The remaining comma, if any, is the decimal separator.
#[must_use]
pub fn parse_brl_str(text: &str) -> Option<Decimal> {
    let cleaned: String = text
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == ',' || *c == '-')
        .collect();

    if !cleaned.chars().any(|c| c.is_ascii_digit()) || cleaned.matches(',').count() > 1 {
        return None;
    }

    Decimal::from_str(&cleaned.replacen(',', ".", 1)).ok()
}

/// Renders a value as `pt-BR` text with exactly two fractional digits.
///
/// Midpoints round away from zero. No currency symbol is added.
#[must_use]
pub fn format_brl(value: Decimal) -> String {
    let mut rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let negative = rounded.is_sign_negative() && !rounded.is_zero();
    rounded.set_sign_positive(true);
    rounded.rescale(2);

    let digits = rounded.to_string();
    let (integer, fraction) = digits.split_once('.').unwrap_or((digits.as_str(), "00"));

    let mut grouped = String::with_capacity(integer.len() + integer.len() / 3 + 4);
    if negative {
        grouped.push('-');
    }
    for (index, digit) in integer.chars().enumerate() {
        if index > 0 && (integer.len() - index) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(digit);
    }
    grouped.push(',');
    grouped.push_str(fraction);
    grouped
}

/// Display adapter for an amount in reais.
///
/// ```
/// use mymoney_core::currency::Brl;
/// use rust_decimal::Decimal;
///
/// assert_eq!(Brl(Decimal::new(12345, 1)).to_string(), "1.234,50");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Brl(pub Decimal);

impl fmt::Display for Brl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_brl(self.0))
    }
}

impl Serialize for Brl {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format_brl(self.0))
    }
}
