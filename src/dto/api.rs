//! Response payloads shared by the CSUGR operations.

use serde::{Deserialize, Serialize};

use crate::domain::types::Id;

/// Wraps a payload under a top-level `data` key.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Envelope<T> {
    pub data: T,
}

impl<T> Envelope<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

/// Body of a successful create: `{ "data": { "id": ... } }`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CreatedId {
    pub id: Id,
}
