//! MongoDB collections exposed as JSON CSUGR resources.
//!
//! The `data` feature builds the resource core: [`resource::Resource`] runs
//! create, search, update, get and remove through a chain of hooks against a
//! [`repository::Model`]. The `server` feature adds the actix-web application
//! mounting one resource per configured collection.

#[cfg(feature = "data")]
pub mod db;
#[cfg(feature = "data")]
pub mod domain;
#[cfg(feature = "data")]
pub mod dto;
#[cfg(feature = "server")]
pub mod forms;
#[cfg(feature = "server")]
pub mod models;
#[cfg(feature = "data")]
pub mod pagination;
#[cfg(feature = "data")]
pub mod repository;
#[cfg(feature = "data")]
pub mod resource;
#[cfg(feature = "server")]
pub mod routes;
#[cfg(feature = "data")]
pub mod services;

#[cfg(feature = "server")]
pub use server::{build_resources, run};

#[cfg(feature = "server")]
mod server {
    use std::sync::Arc;

    use actix_cors::Cors;
    use actix_web::{App, HttpServer, middleware};

    use crate::db::{MongoPool, establish_connection_pool, get_connection};
    use crate::models::config::ServerConfig;
    use crate::repository::CollectionSource;
    use crate::resource::Resource;
    use crate::routes::resource_scope;
    use crate::routes::search::QueryStringSearch;

    /// Builds one resource per configured collection, keyed by its path.
    ///
    /// Fails when a resource names a connection that is not configured.
    pub fn build_resources(
        server_config: &ServerConfig,
        pool: &MongoPool,
    ) -> std::io::Result<Vec<(String, Resource)>> {
        let mut resources = Vec::with_capacity(server_config.resources.len());

        for config in &server_config.resources {
            get_connection(pool, &config.connection).map_err(|e| {
                std::io::Error::other(format!("Resource `{}`: {e}", config.path))
            })?;

            let source = CollectionSource::new(
                pool.clone(),
                config.connection.as_str(),
                config.collection.as_str(),
                config.id_field.as_str(),
            );
            let id_field = source.id_field().to_string();
            let resource = Resource::new(source)
                .id_field(id_field)
                .with_hooks(Arc::new(QueryStringSearch::new(config.default_limit)));

            log::info!(
                "Mounting collection `{}` on `{}` at {}",
                config.collection,
                config.connection,
                config.path
            );
            resources.push((config.path.clone(), resource));
        }

        Ok(resources)
    }

    /// Builds and runs the Actix-Web HTTP server using the provided configuration.
    pub async fn run(server_config: ServerConfig) -> std::io::Result<()> {
        // The driver connects lazily; this only validates the options.
        let pool = establish_connection_pool(&server_config.connections)
            .await
            .map_err(|e| {
                std::io::Error::other(format!("Failed to establish database connection: {e}"))
            })?;

        let resources = build_resources(&server_config, &pool)?;

        let bind_address = (server_config.address.clone(), server_config.port);

        HttpServer::new(move || {
            let mut app = App::new()
                .wrap(Cors::permissive())
                .wrap(middleware::Compress::default())
                .wrap(middleware::Logger::default());

            for (path, resource) in &resources {
                app = app.service(resource_scope(path, resource.clone()));
            }

            app
        })
        .bind(bind_address)?
        .run()
        .await
    }
}
