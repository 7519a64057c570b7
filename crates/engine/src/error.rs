//! The module contains the error the engine can throw.
//!
//! The errors are:
//!
//! - [`KeyNotFound`] thrown when a user or a transaction does not exist.
//! - [`Validation`] thrown when a command carries a missing or malformed field.
//! - [`Database`] wraps any storage failure.
//!
//!  [`KeyNotFound`]: EngineError::KeyNotFound
//!  [`Validation`]: EngineError::Validation
//!  [`Database`]: EngineError::Database
use sea_orm::DbErr;
use thiserror::Error;

/// Engine custom errors.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("\"{0}\" key not found!")]
    KeyNotFound(String),
    #[error("Validation error: {0}")]
    Validation(String),
    #[error(transparent)]
    Database(#[from] DbErr),
}

impl PartialEq for EngineError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::KeyNotFound(a), Self::KeyNotFound(b)) => a == b,
            (Self::Validation(a), Self::Validation(b)) => a == b,
            (Self::Database(a), Self::Database(b)) => a.to_string() == b.to_string(),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages() {
        assert_eq!(
            EngineError::KeyNotFound("user 3".to_string()).to_string(),
            "\"user 3\" key not found!"
        );
        assert_eq!(
            EngineError::Validation("value is required".to_string()).to_string(),
            "Validation error: value is required"
        );
    }

    #[test]
    fn database_errors_compare_by_message() {
        let a = EngineError::from(DbErr::Custom("boom".to_string()));
        let b = EngineError::from(DbErr::Custom("boom".to_string()));
        assert_eq!(a, b);
        assert_ne!(a, EngineError::Validation("boom".to_string()));
    }
}
