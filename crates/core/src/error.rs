//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Every variant describes a rejected operation that left all collections
/// untouched. The `Display` output is the text shown to the user when the
/// failure is surfaced as a notification.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A value failed validation (e.g. blank name, zero quantity).
    #[error("{0}")]
    Validation(String),

    /// An identifier was invalid (e.g. parse failure).
    #[error("invalid identifier: {0}")]
    InvalidId(String),

    /// A referenced record does not exist.
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: String },

    /// A batch does not hold enough remaining stock for the request.
    #[error("Not enough inventory for {product} in batch {batch_code}")]
    InsufficientStock {
        product: String,
        batch_code: String,
        available: u32,
        requested: u32,
    },

    /// Deletion blocked because other records still reference the target.
    #[error("{0}")]
    InUse(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    pub fn in_use(msg: impl Into<String>) -> Self {
        Self::InUse(msg.into())
    }

    /// Unknown-id failures are not reported to the user; everything else is.
    pub fn is_silent(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_not_found_is_silent() {
        assert!(DomainError::not_found("batch", "x").is_silent());
        assert!(!DomainError::validation("bad").is_silent());
        assert!(!DomainError::in_use("busy").is_silent());
    }

    #[test]
    fn insufficient_stock_renders_user_text() {
        let err = DomainError::InsufficientStock {
            product: "Gouda".to_string(),
            batch_code: "2401-2".to_string(),
            available: 3,
            requested: 5,
        };
        assert_eq!(err.to_string(), "Not enough inventory for Gouda in batch 2401-2");
    }
}
