//! Classification of raw message text and the parse steps behind it.
//!
//! Classification is by shape only. A numeric-looking `70.5` or a date-shaped `31.02.2000`
//! is classified, then rejected by [`parse_lifespan`] / [`parse_birth_date`].

use crate::commands::Command;
use crate::date_math::DATE_FORMAT;
use crate::error::DialogError;
use chrono::NaiveDate;

/// Accepted lifespan range, in years.
pub const MAX_LIFESPAN_YEARS: u32 = 150;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    /// Integer or floating-point literal.
    Numeric(String),
    /// `DD.MM.YYYY` shape.
    Date(String),
    Command(Command),
    Unrecognized(String),
}

/// Classifies trimmed text: numeric, then date, then command label, else unrecognized.
pub fn classify(text: &str) -> Input {
    let text = text.trim();

    if is_number(text) {
        return Input::Numeric(text.to_string());
    }

    if is_date_shaped(text) {
        return Input::Date(text.to_string());
    }

    match Command::from_label(text) {
        Some(cmd) => Input::Command(cmd),
        None => Input::Unrecognized(text.to_string()),
    }
}

fn is_number(text: &str) -> bool {
    // Rust's float parser accepts "inf" and "NaN"; only digit-bearing literals count here.
    text.chars().any(|c| c.is_ascii_digit())
        && (text.parse::<i64>().is_ok() || text.parse::<f64>().is_ok())
}

fn is_date_shaped(text: &str) -> bool {
    let bytes = text.as_bytes();
    bytes.len() == 10
        && bytes[2] == b'.'
        && bytes[5] == b'.'
        && bytes
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != 2 && *i != 5)
            .all(|(_, b)| b.is_ascii_digit())
}

/// Whole years in `1..=MAX_LIFESPAN_YEARS`.
pub fn parse_lifespan(raw: &str) -> Result<u32, DialogError> {
    let years: u32 = raw
        .parse()
        .map_err(|_| DialogError::Parse(format!("lifespan is not a whole number of years: {raw}")))?;

    if years == 0 || years > MAX_LIFESPAN_YEARS {
        return Err(DialogError::Parse(format!(
            "lifespan out of range 1..={MAX_LIFESPAN_YEARS}: {years}"
        )));
    }

    Ok(years)
}

/// A real calendar date in `DD.MM.YYYY`.
pub fn parse_birth_date(raw: &str) -> Result<NaiveDate, DialogError> {
    NaiveDate::parse_from_str(raw, DATE_FORMAT)
        .map_err(|e| DialogError::Parse(format!("invalid birth date {raw}: {e}")))
}
