/// Lenient integer coercion
///
/// Clients send numeric fields either as JSON numbers or as text (HTML forms
/// only ever send text). Text is read the way a browser's `parseInt` reads
/// it: leading whitespace is skipped, an optional sign is honoured, and
/// parsing stops at the first non-digit, so `"25 min"` becomes `25`.

use serde::de::{self, Deserialize, Deserializer, Unexpected, Visitor};
use std::fmt;

/// Parses the leading integer of `input`
///
/// Returns `None` when no digits precede the first other character, or when
/// the value does not fit in an `i64`.
///
/// # Example
///
/// ```
/// use exercise_tracker_shared::coerce::parse_int_prefix;
///
/// assert_eq!(parse_int_prefix("25"), Some(25));
/// assert_eq!(parse_int_prefix(" 30 minutes"), Some(30));
/// assert_eq!(parse_int_prefix("-4"), Some(-4));
/// assert_eq!(parse_int_prefix("abc"), None);
/// ```
pub fn parse_int_prefix(input: &str) -> Option<i64> {
    let trimmed = input.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let digits_end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    if digits_end == 0 {
        return None;
    }

    let magnitude: i64 = rest[..digits_end].parse().ok()?;
    Some(if negative { -magnitude } else { magnitude })
}

/// An integer accepted from either a JSON number or a text value
///
/// Fractional numbers are truncated toward zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LenientInt(pub i64);

impl LenientInt {
    pub fn get(self) -> i64 {
        self.0
    }
}

impl<'de> Deserialize<'de> for LenientInt {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(LenientIntVisitor)
    }
}

struct LenientIntVisitor;

impl<'de> Visitor<'de> for LenientIntVisitor {
    type Value = LenientInt;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an integer or a string starting with an integer")
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<Self::Value, E> {
        Ok(LenientInt(value))
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<Self::Value, E> {
        i64::try_from(value)
            .map(LenientInt)
            .map_err(|_| E::invalid_value(Unexpected::Unsigned(value), &self))
    }

    fn visit_f64<E: de::Error>(self, value: f64) -> Result<Self::Value, E> {
        if value.is_finite() && value.abs() < i64::MAX as f64 {
            Ok(LenientInt(value.trunc() as i64))
        } else {
            Err(E::invalid_value(Unexpected::Float(value), &self))
        }
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
        parse_int_prefix(value)
            .map(LenientInt)
            .ok_or_else(|| E::invalid_value(Unexpected::Str(value), &self))
    }
}
