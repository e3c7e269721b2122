use serde::Serialize;
use serde_json::{Value, json};

use crate::services::ServiceResult;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Status {
    Ok,
    Created,
    NoContent,
    BadRequest,
    NotFound,
    Conflict,
}

impl Status {
    pub const fn code(self) -> u16 {
        match self {
            Status::Ok => 200,
            Status::Created => 201,
            Status::NoContent => 204,
            Status::BadRequest => 400,
            Status::NotFound => 404,
            Status::Conflict => 409,
        }
    }
}

/// Outcome of a resource operation or of an aborting hook.
#[derive(Clone, Debug, PartialEq)]
pub struct ResourceResponse {
    pub status: Status,
    pub body: Option<Value>,
}

impl ResourceResponse {
    pub fn new(status: Status) -> Self {
        Self { status, body: None }
    }

    pub fn with_body(status: Status, body: Value) -> Self {
        Self {
            status,
            body: Some(body),
        }
    }

    pub fn ok() -> Self {
        Self::new(Status::Ok)
    }

    pub fn ok_json<T: Serialize>(body: &T) -> ServiceResult<Self> {
        Ok(Self::with_body(Status::Ok, serde_json::to_value(body)?))
    }

    pub fn created_json<T: Serialize>(body: &T) -> ServiceResult<Self> {
        Ok(Self::with_body(Status::Created, serde_json::to_value(body)?))
    }

    pub fn no_content() -> Self {
        Self::new(Status::NoContent)
    }

    pub fn not_found() -> Self {
        Self::new(Status::NotFound)
    }

    /// 400 with `{ "error": message }`.
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::with_body(Status::BadRequest, json!({ "error": message.into() }))
    }

    /// 409 with `{ "error": message }`.
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::with_body(Status::Conflict, json!({ "error": message.into() }))
    }
}
