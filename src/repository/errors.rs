use mongodb::bson::{de::Error as BsonDeError, ser::Error as BsonSerError};
use mongodb::error::{Error as MongoError, ErrorKind, WriteFailure};
use thiserror::Error;

/// Server error code reported for unique index violations.
const DUPLICATE_KEY_CODE: i32 = 11000;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;

impl From<MongoError> for RepositoryError {
    fn from(err: MongoError) -> Self {
        match err.kind.as_ref() {
            ErrorKind::Write(WriteFailure::WriteError(write_error))
                if write_error.code == DUPLICATE_KEY_CODE =>
            {
                RepositoryError::ConstraintViolation(format!(
                    "Unique constraint violation: {}",
                    write_error.message
                ))
            }

            ErrorKind::Write(_) | ErrorKind::Command(_) => {
                RepositoryError::DatabaseError(err.to_string())
            }

            ErrorKind::InvalidArgument { .. } => RepositoryError::ValidationError(err.to_string()),

            ErrorKind::BsonSerialization(e) => {
                RepositoryError::ValidationError(format!("Serialization error: {e}"))
            }

            ErrorKind::BsonDeserialization(e) => {
                RepositoryError::ValidationError(format!("Deserialization error: {e}"))
            }

            ErrorKind::ServerSelection { .. } | ErrorKind::Io(_) => {
                RepositoryError::ConnectionError(format!("Connection error: {err}"))
            }

            _ => RepositoryError::Unexpected(format!("Unexpected mongodb error: {err}")),
        }
    }
}

impl From<BsonSerError> for RepositoryError {
    fn from(err: BsonSerError) -> Self {
        RepositoryError::ValidationError(format!("Serialization error: {err}"))
    }
}

impl From<BsonDeError> for RepositoryError {
    fn from(err: BsonDeError) -> Self {
        RepositoryError::ValidationError(format!("Deserialization error: {err}"))
    }
}
