//! Internal helpers for command validation.
//!
//! These utilities are **not** part of the public API. They centralize
//! field checks so every write path rejects the same inputs before touching
//! the database.

use crate::{EngineError, ResultEngine};

pub(crate) const NAME_MAX_LEN: usize = 60;
pub(crate) const EMAIL_MAX_LEN: usize = 100;
pub(crate) const PROFESSION_MAX_LEN: usize = 100;
pub(crate) const DESCRIPTION_MAX_LEN: usize = 255;

fn ensure_max_len(value: &str, label: &str, max: usize) -> ResultEngine<()> {
    if value.chars().count() > max {
        return Err(EngineError::Validation(format!(
            "{label} must be at most {max} characters"
        )));
    }
    Ok(())
}

/// Trim a mandatory text field and check it is neither blank nor too long.
pub(crate) fn normalize_required_text(value: &str, label: &str, max: usize) -> ResultEngine<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(EngineError::Validation(format!("{label} must not be empty")));
    }
    ensure_max_len(trimmed, label, max)?;
    Ok(trimmed.to_string())
}

/// Trim an optional text field. Blank values collapse to `None`.
pub(crate) fn normalize_optional_text(
    value: Option<&str>,
    label: &str,
    max: usize,
) -> ResultEngine<Option<String>> {
    match value.map(str::trim).filter(|s| !s.is_empty()) {
        Some(text) => {
            ensure_max_len(text, label, max)?;
            Ok(Some(text.to_string()))
        }
        None => Ok(None),
    }
}

/// Trim a free-form text field that may be empty.
pub(crate) fn normalize_text(value: &str, label: &str, max: usize) -> ResultEngine<String> {
    let trimmed = value.trim();
    ensure_max_len(trimmed, label, max)?;
    Ok(trimmed.to_string())
}

/// A transaction value must be a finite, non-negative number; the debt flag
/// carries the direction.
pub(crate) fn validate_value(value: f64) -> ResultEngine<f64> {
    if !value.is_finite() {
        return Err(EngineError::Validation(
            "value must be a finite number".to_string(),
        ));
    }
    if value < 0.0 {
        return Err(EngineError::Validation("value must be >= 0".to_string()));
    }
    Ok(value)
}
