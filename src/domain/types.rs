//! Strongly-typed value objects used by the resource operations.
//!
//! Document identifiers arrive as untyped path segments; [`Id`] decides once
//! how such a segment is represented in BSON so that every later query agrees
//! on it.
use std::fmt::{Display, Formatter};

use mongodb::bson::{Bson, oid::ObjectId};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Name of the identifier field MongoDB assigns to every document.
pub const OBJECT_ID_FIELD: &str = "_id";

/// Errors produced when attempting to construct a constrained value object.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeConstraintError {
    /// Provided identifier contained no non-whitespace characters.
    #[error("id cannot be empty")]
    EmptyId,
}

/// Identifier of a single document within a collection.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Id(Bson);

impl Id {
    /// Parses a raw path segment for the given id field.
    ///
    /// Object ids are only recognised when the id field is `_id`. Otherwise
    /// numeric segments become 64-bit integers and everything else stays a
    /// string.
    pub fn parse(raw: &str, id_field: &str) -> Result<Self, TypeConstraintError> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(TypeConstraintError::EmptyId);
        }

        if id_field == OBJECT_ID_FIELD {
            if let Ok(oid) = ObjectId::parse_str(raw) {
                return Ok(Self(Bson::ObjectId(oid)));
            }
        }

        match raw.parse::<i64>() {
            Ok(n) => Ok(Self(Bson::Int64(n))),
            Err(_) => Ok(Self(Bson::String(raw.to_string()))),
        }
    }

    /// Borrow the BSON value backing this identifier.
    pub fn as_bson(&self) -> &Bson {
        &self.0
    }

    /// Convert into the owned inner BSON value.
    pub fn into_inner(self) -> Bson {
        self.0
    }
}

impl Display for Id {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match &self.0 {
            Bson::String(s) => write!(f, "{s}"),
            Bson::ObjectId(oid) => write!(f, "{}", oid.to_hex()),
            other => write!(f, "{other}"),
        }
    }
}

impl From<Bson> for Id {
    fn from(value: Bson) -> Self {
        Self(value)
    }
}

impl From<i64> for Id {
    fn from(value: i64) -> Self {
        Self(Bson::Int64(value))
    }
}
