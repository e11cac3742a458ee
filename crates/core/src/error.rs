//! # Error Module
//!
//! The four domain error kinds reported by every ledger operation.

use std::fmt;
use thiserror::Error;

/// Kind of entity a lookup failed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Training,
    Officer,
    Certificate,
}

impl EntityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Training => "Training",
            EntityKind::Officer => "Officer",
            EntityKind::Certificate => "Certificate",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Core domain errors.
///
/// Reported synchronously to the caller; nothing is retried internally.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// Malformed or out-of-range input to a mutation.
    #[error("Validation error: {0}")]
    Validation(String),

    /// A referenced identifier does not exist.
    #[error("{kind} not found: {id}")]
    NotFound { kind: EntityKind, id: String },

    /// A uniqueness invariant would be violated.
    #[error("Duplicate: {0}")]
    Duplicate(String),

    /// The operation needs prior state that has not been reached yet.
    #[error("Precondition failed: {0}")]
    Precondition(String),
}

/// Result type alias with CoreError
pub type CoreResult<T> = Result<T, CoreError>;

impl CoreError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn not_found(kind: EntityKind, id: impl fmt::Display) -> Self {
        Self::NotFound {
            kind,
            id: id.to_string(),
        }
    }

    pub fn training_not_found(id: impl fmt::Display) -> Self {
        Self::not_found(EntityKind::Training, id)
    }

    pub fn officer_not_found(id: impl fmt::Display) -> Self {
        Self::not_found(EntityKind::Officer, id)
    }

    pub fn duplicate(message: impl Into<String>) -> Self {
        Self::Duplicate(message.into())
    }

    pub fn precondition(message: impl Into<String>) -> Self {
        Self::Precondition(message.into())
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, CoreError::Validation(_))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, CoreError::NotFound { .. })
    }

    pub fn is_duplicate(&self) -> bool {
        matches!(self, CoreError::Duplicate(_))
    }

    pub fn is_precondition(&self) -> bool {
        matches!(self, CoreError::Precondition(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CoreError::training_not_found("t9");
        assert_eq!(err.to_string(), "Training not found: t9");

        let err = CoreError::officer_not_found("officer-000");
        assert_eq!(err.to_string(), "Officer not found: officer-000");

        let err = CoreError::validation("capacity must be positive");
        assert_eq!(err.to_string(), "Validation error: capacity must be positive");
    }

    #[test]
    fn test_error_checks() {
        assert!(CoreError::validation("x").is_validation());
        assert!(CoreError::training_not_found("t1").is_not_found());
        assert!(CoreError::duplicate("x").is_duplicate());
        assert!(CoreError::precondition("x").is_precondition());
        assert!(!CoreError::precondition("x").is_duplicate());
    }
}
