//! Service layer running the CSUGR operations against a [`Model`].
//!
//! [`Model`]: crate::repository::Model

use thiserror::Error;

use crate::domain::types::TypeConstraintError;
use crate::repository::errors::RepositoryError;

pub mod document;
pub mod resource;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error("Invalid parameters: {0}")]
    InvalidParams(String),

    #[error("Type constraint: {0}")]
    TypeConstraint(#[from] TypeConstraintError),

    #[error("Hook failed: {0}")]
    Hook(String),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl From<serde_json::Error> for ServiceError {
    fn from(err: serde_json::Error) -> Self {
        ServiceError::InvalidParams(err.to_string())
    }
}
