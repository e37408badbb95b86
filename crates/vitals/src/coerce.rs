//! Loose numeric coercion for client-supplied values
//!
//! Insight request bodies and risk query strings are not typed. A value counts
//! as a number when it reads as one the way a browser's `Number()` would:
//! `"60"` is 60, `null` and `""` are 0, `"high"` is not a number. Anything
//! that is not a number is reported as `None`.

use serde_json::Value;

/// Numeric reading of a string. Surrounding whitespace is ignored and a blank
/// string reads as 0. Accepts decimal and exponent forms, `Infinity`, and
/// unsigned `0x`/`0o`/`0b` integers.
pub fn number_from_str(raw: &str) -> Option<f64> {
  let text = raw.trim_matches(|c: char| c.is_whitespace() || c == '\u{feff}');
  if text.is_empty() {
    return Some(0.0);
  }

  if let Some(value) = radix_integer(text) {
    return value;
  }

  let (sign, unsigned) = match text.as_bytes()[0] {
    b'+' => (1.0, &text[1..]),
    b'-' => (-1.0, &text[1..]),
    _ => (1.0, text),
  };
  if unsigned == "Infinity" {
    return Some(sign * f64::INFINITY);
  }

  // Rules out `inf`, `nan` and friends, which Rust parses but are not numbers here
  let starts_numeric = unsigned.bytes().next().is_some_and(|b| b.is_ascii_digit() || b == b'.');
  let numeric_chars = unsigned.bytes().all(|b| b.is_ascii_digit() || matches!(b, b'.' | b'e' | b'E' | b'+' | b'-'));
  if !starts_numeric || !numeric_chars {
    return None;
  }
  unsigned.parse::<f64>().ok().map(|value| sign * value)
}

/// `Some(None)` for a malformed prefixed literal, `None` when there is no prefix
fn radix_integer(text: &str) -> Option<Option<f64>> {
  let radix = match text.get(..2)? {
    "0x" | "0X" => 16,
    "0o" | "0O" => 8,
    "0b" | "0B" => 2,
    _ => return None,
  };
  let digits = &text[2..];
  if digits.is_empty() {
    return Some(None);
  }
  Some(digits.chars().try_fold(0.0_f64, |acc, c| c.to_digit(radix).map(|d| acc * radix as f64 + d as f64)))
}

/// Numeric reading of a JSON value. `null` and `false` are 0, `true` is 1, a
/// one-element array reads as its element, an empty array as 0.
pub fn number_from_value(value: &Value) -> Option<f64> {
  match value {
    Value::Null => Some(0.0),
    Value::Bool(flag) => Some(if *flag { 1.0 } else { 0.0 }),
    Value::Number(number) => number.as_f64(),
    Value::String(text) => number_from_str(text),
    Value::Array(items) => match items.as_slice() {
      [] => Some(0.0),
      [only] => element_number(only),
      _ => None,
    },
    Value::Object(_) => None,
  }
}

/// An array element is read through its string form, so `[true]` is not a number
fn element_number(value: &Value) -> Option<f64> {
  match value {
    Value::Bool(_) | Value::Object(_) => None,
    other => number_from_value(other),
  }
}
