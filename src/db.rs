//! Database connection helpers.
//!
//! The MongoDB driver keeps its own connection pool per client. This module
//! maps connection names to database handles so resources can check out the
//! connection they were configured with.

use std::collections::HashMap;
use std::time::Duration;

use log::error;
use mongodb::options::ClientOptions;
use mongodb::{Client, Database};
use serde::Deserialize;

use crate::repository::errors::{RepositoryError, RepositoryResult};

/// Connection name used when a resource does not specify one.
pub const DEFAULT_CONNECTION: &str = "main";

#[derive(Clone, Debug, Deserialize)]
/// Options for a single named connection.
pub struct ConnectionOptions {
    /// MongoDB connection string.
    pub url: String,
    /// Database selected on the connection.
    pub database: String,
    /// Maximum number of pooled sockets kept by the driver.
    #[serde(default)]
    pub max_pool_size: Option<u32>,
    /// Timeout for selecting a server before an operation fails.
    #[serde(default)]
    pub server_selection_timeout_secs: Option<u64>,
}

/// Named database handles shared by every request.
#[derive(Clone, Debug, Default)]
pub struct MongoPool {
    connections: HashMap<String, Database>,
}

impl MongoPool {
    pub fn insert(&mut self, name: impl Into<String>, database: Database) {
        self.connections.insert(name.into(), database);
    }
}

/// Create a client for every configured connection.
///
/// The driver connects lazily, so this only fails on malformed options.
pub async fn establish_connection_pool(
    connections: &HashMap<String, ConnectionOptions>,
) -> Result<MongoPool, mongodb::error::Error> {
    let mut pool = MongoPool::default();

    for (name, options) in connections {
        let mut client_options = ClientOptions::parse(&options.url).await?;
        client_options.app_name = Some(env!("CARGO_PKG_NAME").to_string());
        if let Some(size) = options.max_pool_size {
            client_options.max_pool_size = Some(size);
        }
        if let Some(secs) = options.server_selection_timeout_secs {
            client_options.server_selection_timeout = Some(Duration::from_secs(secs));
        }

        let client = Client::with_options(client_options)?;
        pool.insert(name.clone(), client.database(&options.database));
    }

    Ok(pool)
}

/// Retrieve a named connection from the pool
pub fn get_connection(pool: &MongoPool, name: &str) -> RepositoryResult<Database> {
    match pool.connections.get(name) {
        Some(db) => Ok(db.clone()),
        None => {
            error!("Failed to get connection from pool: unknown connection `{name}`");
            Err(RepositoryError::ConnectionError(format!(
                "Unknown connection: {name}"
            )))
        }
    }
}
