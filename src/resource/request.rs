use std::collections::HashMap;

use serde_json::Value;

use crate::resource::prs::Prs;

/// Path parameter holding the target document id.
pub const ID_PARAM: &str = "id";

/// Framework independent view of an inbound request.
#[derive(Clone, Debug, Default)]
pub struct ResourceRequest {
    /// Path parameters matched by the router.
    pub params: HashMap<String, String>,
    /// Raw query string without the leading `?`.
    pub query_string: String,
    /// Parsed JSON body. `Null` when absent or not valid JSON.
    pub body: Value,
    pub prs: Prs,
}

impl ResourceRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(name.into(), value.into());
        self
    }

    pub fn query_string(mut self, query_string: impl Into<String>) -> Self {
        self.query_string = query_string.into();
        self
    }

    pub fn body(mut self, body: Value) -> Self {
        self.body = body;
        self
    }

    /// The non-empty `id` path parameter, if any.
    pub fn id(&self) -> Option<&str> {
        self.params
            .get(ID_PARAM)
            .map(String::as_str)
            .filter(|id| !id.trim().is_empty())
    }
}
