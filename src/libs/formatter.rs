//! Number and date formatting for console output and API paths.
//!
//! Amounts are shown the Chilean way: `.` groups thousands and `,` separates
//! decimals. Indicator values use four decimals, hours and salaries two.
//!
//! ## Examples
//!
//! ```rust
//! use ecotech::libs::formatter::{format_number, format_indicator_value};
//!
//! assert_eq!(format_indicator_value(12345.6789), "12.345,6789");
//! assert_eq!(format_number(1500000.0, 0), "1.500.000");
//! assert_eq!(format_number(-8.5, 2), "-8,50");
//! ```

use crate::libs::error::AppError;
use crate::libs::messages::Message;
use chrono::NaiveDate;

pub const INDICATOR_DECIMALS: usize = 4;
pub const ISO_DATE_FORMAT: &str = "%Y-%m-%d";
/// Date format expected in the indicator API path.
pub const API_DATE_FORMAT: &str = "%d-%m-%Y";

/// Rounds half away from zero to `decimals` places.
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}

/// Formats `value` with `decimals` places, `.` as thousands separator and
/// `,` as decimal separator.
pub fn format_number(value: f64, decimals: usize) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    let fixed = format!("{:.*}", decimals, value.abs());
    let (integer, fraction) = match fixed.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (fixed.as_str(), None),
    };

    let mut grouped = String::with_capacity(integer.len() + integer.len() / 3);
    for (i, digit) in integer.chars().enumerate() {
        if i > 0 && (integer.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(digit);
    }

    let is_zero = fixed.chars().all(|c| c == '0' || c == '.');
    let sign = if value < 0.0 && !is_zero { "-" } else { "" };

    match fraction {
        Some(fraction) => format!("{}{},{}", sign, grouped, fraction),
        None => format!("{}{}", sign, grouped),
    }
}

pub fn format_indicator_value(value: f64) -> String {
    format_number(value, INDICATOR_DECIMALS)
}

pub fn format_hours(hours: f64) -> String {
    format_number(hours, 2)
}

/// `$1.250.000` style, no decimals.
pub fn format_money(amount: f64) -> String {
    format!("${}", format_number(amount, 0))
}

pub fn api_date(date: NaiveDate) -> String {
    date.format(API_DATE_FORMAT).to_string()
}

/// Parses `YYYY-MM-DD`.
pub fn parse_iso_date(input: &str) -> Result<NaiveDate, AppError> {
    let input = input.trim();
    NaiveDate::parse_from_str(input, ISO_DATE_FORMAT).map_err(|_| AppError::Validation(Message::InvalidDate(input.to_string())))
}

/// Parses an optional `YYYY-MM-DD`; blank input is `None`.
pub fn parse_optional_date(input: &str) -> Result<Option<NaiveDate>, AppError> {
    if input.trim().is_empty() {
        return Ok(None);
    }
    parse_iso_date(input).map(Some)
}

/// Accepts `8.5` as well as `8,5`.
pub fn parse_decimal(input: &str) -> Result<f64, AppError> {
    let normalized = input.trim().replace(',', ".");
    normalized
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or_else(|| AppError::Validation(Message::InvalidNumber(input.trim().to_string())))
}

/// Cuts `text` to `max` characters, marking the cut with `…`.
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(max.saturating_sub(1)).collect();
    cut.push('…');
    cut
}
