//! Common validation rules for form fields.

use crate::error::ValidationError;

const NAME_MAX_CHARS: usize = 40;
const DESCRIPTION_MAX_CHARS: usize = 255;

/// A form field value: text input or numeric input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue<'a> {
    Text(&'a str),
    Number(f64),
}

impl FieldValue<'_> {
    fn is_empty(&self) -> bool {
        match self {
            FieldValue::Text(s) => s.is_empty(),
            FieldValue::Number(n) => *n == 0.0 || n.is_nan(),
        }
    }

    fn text(&self) -> String {
        match self {
            FieldValue::Text(s) => s.to_string(),
            FieldValue::Number(n) => number_text(*n),
        }
    }
}

/// Number rendered the way a browser form field shows it: plain decimals,
/// switching to exponent form at 1e21 and below 1e-6.
fn number_text(n: f64) -> String {
    if n.is_nan() {
        return "NaN".to_string();
    }
    if n.is_infinite() {
        return if n > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if n == 0.0 {
        return "0".to_string();
    }
    let magnitude = n.abs();
    if (1e-6..1e21).contains(&magnitude) {
        return n.to_string();
    }
    let text = format!("{:e}", n);
    match text.split_once('e') {
        Some((mantissa, exponent)) if !exponent.starts_with('-') => {
            format!("{}e+{}", mantissa, exponent)
        }
        _ => text,
    }
}

impl<'a> From<&'a str> for FieldValue<'a> {
    fn from(value: &'a str) -> Self {
        FieldValue::Text(value)
    }
}

impl<'a> From<&'a String> for FieldValue<'a> {
    fn from(value: &'a String) -> Self {
        FieldValue::Text(value.as_str())
    }
}

impl From<f64> for FieldValue<'_> {
    fn from(value: f64) -> Self {
        FieldValue::Number(value)
    }
}

impl From<i64> for FieldValue<'_> {
    fn from(value: i64) -> Self {
        FieldValue::Number(value as f64)
    }
}

/// Fails on an empty string or zero.
pub fn required<'a>(value: impl Into<FieldValue<'a>>) -> Result<(), ValidationError> {
    if value.into().is_empty() {
        Err(ValidationError::Required)
    } else {
        Ok(())
    }
}

/// Names: 1 to 40 characters, no whitespace. Empty input passes; pair with
/// [`required`] to reject it.
pub fn name_pattern<'a>(value: impl Into<FieldValue<'a>>) -> Result<(), ValidationError> {
    let text = value.into().text();
    if text.is_empty() {
        return Ok(());
    }
    let valid = text.chars().count() <= NAME_MAX_CHARS && !text.chars().any(char::is_whitespace);
    if valid {
        Ok(())
    } else {
        Err(ValidationError::NamePattern)
    }
}

/// Descriptions: at most 255 characters, no tabs or newlines.
pub fn description_pattern<'a>(value: impl Into<FieldValue<'a>>) -> Result<(), ValidationError> {
    let text = value.into().text();
    if text.is_empty() {
        return Ok(());
    }
    let valid = text.chars().count() <= DESCRIPTION_MAX_CHARS
        && !text.chars().any(|c| c == '\t' || c == '\n');
    if valid {
        Ok(())
    } else {
        Err(ValidationError::DescriptionPattern)
    }
}
