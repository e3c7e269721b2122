//! Mock model implementation for isolating services in tests.

use async_trait::async_trait;
use mockall::mock;
use mongodb::bson::Document;

use crate::domain::types::Id;
use crate::repository::errors::RepositoryResult;
use crate::repository::{GetOptions, Model, SearchOptions};

mock! {
    pub Collection {}

    #[async_trait]
    impl Model for Collection {
        async fn create(&self, data: Document) -> RepositoryResult<Id>;
        async fn search(
            &self,
            query: Document,
            options: SearchOptions,
        ) -> RepositoryResult<Vec<Document>>;
        async fn count(&self, query: Document) -> RepositoryResult<u64>;
        async fn update(
            &self,
            id: Id,
            changes: Document,
            query: Document,
        ) -> RepositoryResult<bool>;
        async fn get(
            &self,
            id: Id,
            query: Document,
            options: GetOptions,
        ) -> RepositoryResult<Option<Document>>;
        async fn remove(&self, id: Id, query: Document) -> RepositoryResult<bool>;
    }
}
