//! Per-request state (PRS).
//!
//! A key/value store carried by every [`ResourceRequest`] so hooks can hand
//! values to the operations and to each other.
//!
//! [`ResourceRequest`]: crate::resource::request::ResourceRequest

use std::collections::HashMap;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::services::ServiceResult;

/// Id of the document inserted by `create`.
pub const KEY_CREATE_ID: &str = "resource.mongodb.create.id";
/// [`SearchParams`](crate::domain::params::SearchParams) for `search`.
pub const KEY_SEARCH_PARAMS: &str = "resource.mongodb.search.params";
/// [`UpdateParams`](crate::domain::params::UpdateParams) for `update`.
pub const KEY_UPDATE_PARAMS: &str = "resource.mongodb.update.params";
/// [`GetParams`](crate::domain::params::GetParams) for `get`.
pub const KEY_GET_PARAMS: &str = "resource.mongodb.get.params";
/// [`RemoveParams`](crate::domain::params::RemoveParams) for `remove`.
pub const KEY_REMOVE_PARAMS: &str = "resource.mongodb.remove.params";

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Prs {
    values: HashMap<String, Value>,
}

impl Prs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads and deserializes the value stored under `key`.
    ///
    /// A value that does not deserialize into `T` is an error rather than a
    /// missing value.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> ServiceResult<Option<T>> {
        match self.values.get(key) {
            Some(value) => Ok(Some(serde_json::from_value(value.clone())?)),
            None => Ok(None),
        }
    }

    pub fn get_or_else<T: DeserializeOwned>(&self, key: &str, default: T) -> ServiceResult<T> {
        Ok(self.get(key)?.unwrap_or(default))
    }

    pub fn set<T: Serialize>(&mut self, key: impl Into<String>, value: T) -> ServiceResult<()> {
        self.values.insert(key.into(), serde_json::to_value(value)?);
        Ok(())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.values.remove(key)
    }

    /// Borrow the raw JSON value stored under `key`.
    pub fn raw(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }
}

#[cfg(test)]
mod tests {
    use mongodb::bson::doc;
    use serde_json::json;

    use super::*;
    use crate::domain::params::{GetParams, SearchParams};
    use crate::services::ServiceError;

    #[test]
    fn stores_and_reads_typed_params() {
        let mut prs = Prs::new();
        let params = SearchParams::new(doc! { "name": "Chippy" }).paginate(2, 10);

        prs.set(KEY_SEARCH_PARAMS, &params).unwrap();

        assert!(prs.contains(KEY_SEARCH_PARAMS));
        assert_eq!(prs.get::<SearchParams>(KEY_SEARCH_PARAMS).unwrap(), Some(params));
    }

    #[test]
    fn missing_keys_fall_back_to_default() {
        let prs = Prs::new();

        let params = prs
            .get_or_else(KEY_GET_PARAMS, GetParams::default())
            .unwrap();

        assert_eq!(params, GetParams::default());
    }

    #[test]
    fn malformed_values_are_errors() {
        let mut prs = Prs::new();
        prs.set(KEY_GET_PARAMS, json!({ "query": "not a document" }))
            .unwrap();

        let result = prs.get_or_else(KEY_GET_PARAMS, GetParams::default());

        assert!(matches!(result, Err(ServiceError::InvalidParams(_))));
    }

    #[test]
    fn remove_returns_the_raw_value() {
        let mut prs = Prs::new();
        prs.set(KEY_CREATE_ID, 7).unwrap();

        assert_eq!(prs.remove(KEY_CREATE_ID), Some(json!(7)));
        assert!(!prs.contains(KEY_CREATE_ID));
    }
}
