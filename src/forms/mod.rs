//! Form definitions parsed from query strings.

use thiserror::Error;
use validator::ValidationErrors;

pub mod search;

#[derive(Debug, Error)]
/// Errors that can occur when processing form data.
pub enum FormError {
    #[error("validation errors: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("malformed query string: {0}")]
    Malformed(#[from] serde::de::value::Error),

    #[error("invalid number for `{0}`")]
    InvalidNumber(String),

    #[error("operator `{0}` is not allowed")]
    Operator(String),

    #[error("invalid field name")]
    InvalidField,
}
