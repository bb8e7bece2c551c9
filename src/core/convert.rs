//! Conversion arithmetic and display helpers

use super::error::{FxError, Result};

/// Rounds `value` to `decimals` places, half away from zero.
///
/// Values too large to scale have no fractional digits left and are
/// returned unchanged.
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    let scaled = value * factor;
    if !scaled.is_finite() {
        return value;
    }
    scaled.round() / factor
}

/// Converts `amount` using `rate`, rounded to two decimals.
///
/// Fails when the amount or the product is not a finite number.
pub fn convert(amount: f64, rate: f64) -> Result<f64> {
    if !amount.is_finite() {
        return Err(FxError::InvalidAmount(amount));
    }
    let result = round_to(amount * rate, 2);
    if !result.is_finite() {
        return Err(FxError::InvalidAmount(amount));
    }
    Ok(result)
}

/// Formats a rate with a precision that keeps small rates readable.
pub fn format_rate(rate: f64) -> String {
    if rate < 0.01 {
        format!("{rate:.6}")
    } else if rate < 1.0 {
        format!("{rate:.4}")
    } else {
        format!("{rate:.2}")
    }
}

/// Parses user supplied amount text.
///
/// Only the leading numeric part is considered, so `"12.5usd"` is `12.5`.
/// Input that yields no finite number is treated as `0.0`.
pub fn parse_amount(input: &str) -> f64 {
    numeric_prefix(input.trim_start())
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

fn numeric_prefix(s: &str) -> &str {
    let bytes = s.as_bytes();
    let mut end = 0;
    let mut i = 0;

    if i < bytes.len() && (bytes[i] == b'+' || bytes[i] == b'-') {
        i += 1;
    }
    let mut seen_digit = false;
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
        seen_digit = true;
        end = i;
    }
    if i < bytes.len() && bytes[i] == b'.' {
        i += 1;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
            seen_digit = true;
            end = i;
        }
    }
    if !seen_digit {
        return "";
    }

    // Exponent only counts when followed by at least one digit
    if i < bytes.len() && (bytes[i] == b'e' || bytes[i] == b'E') {
        let mut j = i + 1;
        if j < bytes.len() && (bytes[j] == b'+' || bytes[j] == b'-') {
            j += 1;
        }
        let digits_start = j;
        while j < bytes.len() && bytes[j].is_ascii_digit() {
            j += 1;
        }
        if j > digits_start {
            end = j;
        }
    }

    &s[..end]
}
