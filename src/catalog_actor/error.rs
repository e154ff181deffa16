use thiserror::Error;

use crate::actor_framework::FrameworkError;

/// Errors that can occur during catalog operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CatalogError {
    #[error("Catalog unit not found: {0}")]
    NotFound(String),
    #[error("Catalog unit is inactive: {0}")]
    Inactive(String),
    #[error("Catalog validation error: {0}")]
    ValidationError(String),
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<FrameworkError<CatalogError>> for CatalogError {
    fn from(err: FrameworkError<CatalogError>) -> Self {
        match err {
            FrameworkError::NotFound { id, .. } => CatalogError::NotFound(id),
            FrameworkError::Entity(e) => e,
            other => CatalogError::ActorCommunicationError(other.to_string()),
        }
    }
}
