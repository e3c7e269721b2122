use std::sync::Arc;

use async_trait::async_trait;
use mongodb::bson::Document;

use crate::{domain::types::Id, repository::errors::RepositoryResult};

pub mod errors;
#[cfg(any(test, feature = "test-mocks"))]
pub mod mock;
pub mod mongo;

pub use mongo::{CollectionSource, MongoModel};

/// Options forwarded to [`Model::search`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchOptions {
    pub skip: u64,
    pub limit: u64,
    pub sort: Document,
    pub projection: Document,
}

/// Options forwarded to [`Model::get`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GetOptions {
    pub projection: Document,
}

/// Data access over a single collection.
///
/// Every method targeting one document receives the id plus an additional
/// `query` the document must also match.
#[async_trait]
pub trait Model: Send + Sync {
    async fn create(&self, data: Document) -> RepositoryResult<Id>;
    async fn search(&self, query: Document, options: SearchOptions)
    -> RepositoryResult<Vec<Document>>;
    async fn count(&self, query: Document) -> RepositoryResult<u64>;
    async fn update(&self, id: Id, changes: Document, query: Document) -> RepositoryResult<bool>;
    async fn get(
        &self,
        id: Id,
        query: Document,
        options: GetOptions,
    ) -> RepositoryResult<Option<Document>>;
    async fn remove(&self, id: Id, query: Document) -> RepositoryResult<bool>;
}

/// Resolves the [`Model`] a resource works against for one request.
pub trait ModelSource: Send + Sync {
    fn checkout(&self) -> RepositoryResult<Arc<dyn Model>>;
}

impl ModelSource for Arc<dyn Model> {
    fn checkout(&self) -> RepositoryResult<Arc<dyn Model>> {
        Ok(Arc::clone(self))
    }
}
