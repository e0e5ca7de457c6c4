//! Scalar coercers.
//!
//! Each function converts one raw query value and, on failure, returns the
//! message that ends up in the decode error set. Values are parsed as
//! given: no trimming and no case folding.

use std::str::FromStr;

fn invalid(field: &str, kind: &str, raw: &str) -> String {
    format!(
        "Field {} does not contain a valid {} ({})",
        field, kind, raw
    )
}

/// Parses a base-10 `i32`.
pub fn parse_int(field: &str, raw: &str) -> Result<i32, String> {
    raw.parse().map_err(|_| invalid(field, "integer", raw))
}

/// Parses a base-10 `i64`.
pub fn parse_int64(field: &str, raw: &str) -> Result<i64, String> {
    raw.parse().map_err(|_| invalid(field, "integer", raw))
}

pub fn parse_float32(field: &str, raw: &str) -> Result<f32, String> {
    parse_float(raw, f32::is_infinite).ok_or_else(|| invalid(field, "float", raw))
}

pub fn parse_float64(field: &str, raw: &str) -> Result<f64, String> {
    parse_float(raw, f64::is_infinite).ok_or_else(|| invalid(field, "float", raw))
}

// A finite literal that overflows to infinity is out of range, not a value.
fn parse_float<F: FromStr + Copy>(raw: &str, is_infinite: fn(F) -> bool) -> Option<F> {
    let value = raw.parse::<F>().ok()?;
    if is_infinite(value) && !is_infinity_literal(raw) {
        return None;
    }
    Some(value)
}

fn is_infinity_literal(raw: &str) -> bool {
    let unsigned = raw
        .strip_prefix('+')
        .or_else(|| raw.strip_prefix('-'))
        .unwrap_or(raw);
    unsigned.eq_ignore_ascii_case("inf") || unsigned.eq_ignore_ascii_case("infinity")
}

/// Strings are assigned verbatim.
pub fn parse_string(raw: &str) -> String {
    raw.to_string()
}
