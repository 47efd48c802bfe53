//! Domain error type shared by every service
//!
//! Services never retry and never swallow errors. Each variant maps to one
//! of the failure kinds a caller can act on.

use std::fmt;
use thiserror::Error;

use crate::ports::PortError;

/// Error raised by domain services
#[derive(Debug, Error)]
pub enum DomainError {
    /// A referenced entity does not exist
    #[error("{entity} with id {id} not found")]
    NotFound { entity: &'static str, id: String },

    /// The operation is not allowed in the entity's current state
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    /// A monetary or cross-entity constraint was violated
    #[error("Business rule violation: {0}")]
    BusinessRuleViolation(String),

    /// Input failed validation before any lookup
    #[error("Validation error: {0}")]
    Validation(String),

    /// Credentials did not verify
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// The persistence port failed
    #[error(transparent)]
    Port(#[from] PortError),
}

impl DomainError {
    pub fn not_found(entity: &'static str, id: impl fmt::Display) -> Self {
        DomainError::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    pub fn invalid_operation(message: impl Into<String>) -> Self {
        DomainError::InvalidOperation(message.into())
    }

    pub fn business_rule(message: impl Into<String>) -> Self {
        DomainError::BusinessRuleViolation(message.into())
    }

    pub fn validation(message: impl Into<String>) -> Self {
        DomainError::Validation(message.into())
    }

    pub fn authentication(message: impl Into<String>) -> Self {
        DomainError::Authentication(message.into())
    }

    /// Returns true for a missing entity, whether reported by a service or a port
    pub fn is_not_found(&self) -> bool {
        match self {
            DomainError::NotFound { .. } => true,
            DomainError::Port(e) => e.is_not_found(),
            _ => false,
        }
    }

    /// Returns true when a stale version or unique constraint rejected a write
    pub fn is_conflict(&self) -> bool {
        matches!(self, DomainError::Port(e) if e.is_conflict())
    }
}

/// Result alias used by domain services
pub type DomainResult<T> = Result<T, DomainError>;
