use thiserror::Error;

use crate::actor_framework::FrameworkError;
use crate::catalog_actor::CatalogError;
use crate::pricing::PricingError;
use crate::submission::SubmissionError;

/// Errors that can occur during document operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum DocumentError {
    #[error("Document not found: {0}")]
    NotFound(String),
    #[error("Catalog unit cannot be resolved: {0}")]
    UnitNotFound(String),
    #[error(transparent)]
    Pricing(#[from] PricingError),
    #[error("Catalog error: {0}")]
    Catalog(CatalogError),
    #[error(transparent)]
    Submission(#[from] SubmissionError),
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<FrameworkError<PricingError>> for DocumentError {
    fn from(err: FrameworkError<PricingError>) -> Self {
        match err {
            FrameworkError::NotFound { id, .. } => DocumentError::NotFound(id),
            FrameworkError::Entity(e) => DocumentError::Pricing(e),
            other => DocumentError::ActorCommunicationError(other.to_string()),
        }
    }
}
