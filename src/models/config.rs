//! Configuration model loaded from external sources.

use std::collections::HashMap;

use serde::Deserialize;

use crate::db::{ConnectionOptions, DEFAULT_CONNECTION};
use crate::resource::DEFAULT_ID_FIELD;

#[derive(Clone, Debug, Deserialize)]
/// Basic configuration shared across handlers.
pub struct ServerConfig {
    pub address: String,
    pub port: u16,
    /// Named MongoDB connections.
    pub connections: HashMap<String, ConnectionOptions>,
    /// Resources mounted by the server.
    #[serde(default)]
    pub resources: Vec<ResourceConfig>,
}

#[derive(Clone, Debug, Deserialize)]
/// A collection exposed under an HTTP path.
pub struct ResourceConfig {
    /// Scope path, e.g. `/users`.
    pub path: String,
    pub collection: String,
    #[serde(default = "default_connection")]
    pub connection: String,
    #[serde(default = "default_id_field")]
    pub id_field: String,
    /// Page size used when a search does not ask for one.
    #[serde(default)]
    pub default_limit: Option<u64>,
}

fn default_connection() -> String {
    DEFAULT_CONNECTION.to_string()
}

fn default_id_field() -> String {
    DEFAULT_ID_FIELD.to_string()
}
