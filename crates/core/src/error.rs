//! Domain error model.

use thiserror::Error;

use crate::id::ItemId;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// A value failed a field-level constraint.
///
/// This is the only failure an entity setter can produce. The message names
/// the constraint that was broken and is meant to be shown to an operator as-is.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct ValidationError {
    message: String,
}

impl ValidationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Domain-level error for operations that address an entity by identifier.
///
/// Keep this focused on deterministic, business/domain failures.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A value failed validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// No entity carries the requested identifier.
    #[error("item {0} not found")]
    NotFound(ItemId),

    /// The entity has been written off and can no longer be edited.
    #[error("cannot edit a written-off item ({0})")]
    WrittenOff(ItemId),

    /// An identifier was invalid (e.g. parse failure).
    #[error("invalid identifier: {0}")]
    InvalidId(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(ValidationError::new(msg))
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    pub fn not_found(id: ItemId) -> Self {
        Self::NotFound(id)
    }

    pub fn written_off(id: ItemId) -> Self {
        Self::WrittenOff(id)
    }

    /// Returns the validation failure, if this is one.
    pub fn as_validation(&self) -> Option<&ValidationError> {
        match self {
            DomainError::Validation(e) => Some(e),
            _ => None,
        }
    }
}
