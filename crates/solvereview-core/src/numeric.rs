//! Rounding, thousands-separated parsing and number formatting.
//!
//! Two rounding flavors exist because stored baselines were produced with
//! both: memory normalization rounds the exact decimal value of a single
//! float, while table columns round `x * 100` half-to-even.

use num_format::{Locale, ToFormattedString};

/// Rounds to 2 decimals using the correctly rounded decimal expansion.
///
/// # Example
///
/// ```
/// use solvereview_core::numeric::round_decimal2;
///
/// assert_eq!(round_decimal2(2451.234 / 1000.0), 2.45);
/// assert_eq!(round_decimal2(1.005), 1.0);
/// ```
pub fn round_decimal2(value: f64) -> f64 {
    if !value.is_finite() {
        return value;
    }
    format!("{value:.2}").parse().unwrap_or(value)
}

/// Rounds `value * 100` half-to-even and scales back.
///
/// # Example
///
/// ```
/// use solvereview_core::numeric::round_half_even2;
///
/// assert_eq!(round_half_even2(10.004), 10.0);
/// assert_eq!(round_half_even2(-3.14159), -3.14);
/// assert!(round_half_even2(f64::NAN).is_nan());
/// ```
pub fn round_half_even2(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}

/// Parses an integer that may carry `,` thousands separators.
///
/// # Example
///
/// ```
/// use solvereview_core::numeric::parse_grouped_u64;
///
/// assert_eq!(parse_grouped_u64("1,234,567"), Some(1_234_567));
/// assert_eq!(parse_grouped_u64("12a"), None);
/// ```
pub fn parse_grouped_u64(text: &str) -> Option<u64> {
    let digits: String = text.chars().filter(|&c| c != ',').collect();
    digits.parse().ok()
}

/// Formats an integer with `,` thousands separators.
pub fn format_grouped_int(value: u64) -> String {
    value.to_formatted_string(&Locale::en)
}

/// Formats a float with `,` thousands separators and 2 decimals.
///
/// Non-finite values render as `nan`, `inf` and `-inf`.
///
/// # Example
///
/// ```
/// use solvereview_core::numeric::format_grouped_float;
///
/// assert_eq!(format_grouped_float(1234567.891), "1,234,567.89");
/// assert_eq!(format_grouped_float(-0.5), "-0.50");
/// assert_eq!(format_grouped_float(f64::NAN), "nan");
/// ```
pub fn format_grouped_float(value: f64) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }

    let fixed = format!("{:.2}", value.abs());
    let (whole, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    let grouped = match whole.parse::<u128>() {
        Ok(n) => n.to_formatted_string(&Locale::en),
        Err(_) => whole.to_string(),
    };
    let sign = if value < 0.0 { "-" } else { "" };
    format!("{sign}{grouped}.{fraction}")
}

/// Formats an optional float, rendering a missing value as `nan`.
pub fn format_optional_float(value: Option<f64>) -> String {
    value.map_or_else(|| "nan".to_string(), format_grouped_float)
}
