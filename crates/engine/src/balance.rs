//! Balance arithmetic.
//!
//! A credit increases a balance, a debt decreases it. These functions are
//! pure: they never look at the database and never fail, so callers decide
//! which values are acceptable before getting here.

/// Returns the balance obtained by applying a transaction of `value` to
/// `current`.
pub fn adjust(current: f64, value: f64, is_debt: bool) -> f64 {
    if is_debt {
        current - value
    } else {
        current + value
    }
}

/// Returns the balance obtained by undoing a transaction of `value` that was
/// previously applied to `current`.
pub fn revert(current: f64, value: f64, is_debt: bool) -> f64 {
    adjust(current, value, !is_debt)
}

/// Signed effect of a transaction on its owner's balance.
pub fn signed_effect(value: f64, is_debt: bool) -> f64 {
    adjust(0.0, value, is_debt)
}
