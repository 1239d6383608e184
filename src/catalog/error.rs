use thiserror::Error;

use crate::store::StoreError;

use super::EntityKind;

/// Errors that can occur during catalog operations.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Invalid {field}: {reason}")]
    Validation { field: &'static str, reason: String },
    #[error("{kind} not found: {id}")]
    NotFound { kind: EntityKind, id: u64 },
    #[error("Catalog storage error: {0}")]
    Store(#[from] StoreError),
    #[error("Actor communication error: {0}")]
    ActorCommunication(String),
}

impl CatalogError {
    pub fn validation(field: &'static str, reason: impl Into<String>) -> Self {
        CatalogError::Validation {
            field,
            reason: reason.into(),
        }
    }

    /// The offending field of a validation failure.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            CatalogError::Validation { field, .. } => Some(field),
            _ => None,
        }
    }
}
