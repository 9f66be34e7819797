//! Coercion of raw urlencoded form values into typed inputs.
//!
//! Forms are deserialized as optional strings so that a bad value produces a [FormError] naming
//! the field instead of a generic payload error.

use rust_decimal::Decimal;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    #[error("{0} is required")]
    MissingField(&'static str),
    #[error("could not convert {field} value '{value}' to a number")]
    InvalidNumber { field: &'static str, value: String },
    #[error("unknown action '{0}'")]
    UnknownAction(String),
    #[error("amounts are too large to calculate")]
    Overflow,
}

/// Longest submitted value repeated back in an error message, in characters.
pub const MAX_ECHOED_LEN: usize = 64;

/// Copies `value` for an error message, cut to [MAX_ECHOED_LEN] characters. Messages end up in the
/// flash cookie, which browsers drop beyond a few kilobytes.
pub fn echoed(value: &str) -> String {
    match value.char_indices().nth(MAX_ECHOED_LEN) {
        Some((end, _)) => format!("{}...", &value[..end]),
        None => value.to_owned(),
    }
}

/// Trims the value and maps blank strings to `None`.
pub fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
}

pub fn optional_decimal(
    field: &'static str,
    value: Option<&str>,
) -> Result<Option<Decimal>, FormError> {
    let Some(value) = value.map(str::trim).filter(|v| !v.is_empty()) else {
        return Ok(None);
    };
    Decimal::from_str(value)
        .map(Some)
        .map_err(|_| FormError::InvalidNumber {
            field,
            value: echoed(value),
        })
}

pub fn required_decimal(field: &'static str, value: Option<&str>) -> Result<Decimal, FormError> {
    optional_decimal(field, value)?.ok_or(FormError::MissingField(field))
}

/// Blank or missing values count as zero.
pub fn decimal_or_zero(field: &'static str, value: Option<&str>) -> Result<Decimal, FormError> {
    Ok(optional_decimal(field, value)?.unwrap_or(Decimal::ZERO))
}

pub fn optional_int(field: &'static str, value: Option<&str>) -> Result<Option<i32>, FormError> {
    let Some(value) = value.map(str::trim).filter(|v| !v.is_empty()) else {
        return Ok(None);
    };
    value
        .parse()
        .map(Some)
        .map_err(|_| FormError::InvalidNumber {
            field,
            value: echoed(value),
        })
}
