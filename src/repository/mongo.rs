use std::sync::Arc;

use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::Collection;
use mongodb::bson::{Bson, Document, doc, oid::ObjectId};
use mongodb::options::{FindOneOptions, FindOptions};

use crate::db::{MongoPool, get_connection};
use crate::domain::types::{Id, OBJECT_ID_FIELD};
use crate::repository::errors::RepositoryResult;
use crate::repository::{GetOptions, Model, ModelSource, SearchOptions};

/// MongoDB implementation of [`Model`].
#[derive(Clone, Debug)]
pub struct MongoModel {
    collection: Collection<Document>,
    id_field: String,
}

impl MongoModel {
    pub fn new(collection: Collection<Document>, id_field: impl Into<String>) -> Self {
        Self {
            collection,
            id_field: id_field.into(),
        }
    }
}

/// Makes sure `data` carries its id under `id_field` before insertion.
///
/// Returns the document's own id when present. For `_id` the driver assigns
/// the id, so `None` is returned. Any other field receives a fresh ObjectId
/// as hex text, the same form a path segment parses into for that field.
pub(crate) fn assign_id(data: &mut Document, id_field: &str) -> Option<Bson> {
    if let Some(id) = data.get(id_field) {
        return Some(id.clone());
    }
    if id_field == OBJECT_ID_FIELD {
        return None;
    }

    let id = Bson::String(ObjectId::new().to_hex());
    data.insert(id_field, id.clone());
    Some(id)
}

/// Combines the caller's query with the id condition. The id wins.
pub(crate) fn target_filter(id_field: &str, id: Id, query: Document) -> Document {
    let mut filter = query;
    filter.insert(id_field, id.into_inner());
    filter
}

/// Driver options for a search. Empty sort and projection are left unset.
pub(crate) fn find_options(options: SearchOptions) -> FindOptions {
    let mut find_options = FindOptions::default();
    find_options.skip = Some(options.skip);
    find_options.limit = Some(i64::try_from(options.limit).unwrap_or(i64::MAX));
    if !options.sort.is_empty() {
        find_options.sort = Some(options.sort);
    }
    if !options.projection.is_empty() {
        find_options.projection = Some(options.projection);
    }
    find_options
}

pub(crate) fn find_one_options(options: GetOptions) -> FindOneOptions {
    let mut find_options = FindOneOptions::default();
    if !options.projection.is_empty() {
        find_options.projection = Some(options.projection);
    }
    find_options
}

#[async_trait]
impl Model for MongoModel {
    async fn create(&self, mut data: Document) -> RepositoryResult<Id> {
        let own_id = assign_id(&mut data, &self.id_field);

        let result = self.collection.insert_one(data).await?;

        Ok(Id::from(own_id.unwrap_or(result.inserted_id)))
    }

    async fn search(
        &self,
        query: Document,
        options: SearchOptions,
    ) -> RepositoryResult<Vec<Document>> {
        let items = self
            .collection
            .find(query)
            .with_options(find_options(options))
            .await?
            .try_collect::<Vec<Document>>()
            .await?;

        Ok(items)
    }

    async fn count(&self, query: Document) -> RepositoryResult<u64> {
        let total = self.collection.count_documents(query).await?;
        Ok(total)
    }

    async fn update(&self, id: Id, changes: Document, query: Document) -> RepositoryResult<bool> {
        let filter = target_filter(&self.id_field, id, query);

        let result = self
            .collection
            .update_one(filter, doc! { "$set": Bson::Document(changes) })
            .await?;

        Ok(result.matched_count > 0)
    }

    async fn get(
        &self,
        id: Id,
        query: Document,
        options: GetOptions,
    ) -> RepositoryResult<Option<Document>> {
        let filter = target_filter(&self.id_field, id, query);

        let item = self
            .collection
            .find_one(filter)
            .with_options(find_one_options(options))
            .await?;

        Ok(item)
    }

    async fn remove(&self, id: Id, query: Document) -> RepositoryResult<bool> {
        let filter = target_filter(&self.id_field, id, query);

        let result = self.collection.delete_one(filter).await?;

        Ok(result.deleted_count > 0)
    }
}

/// [`ModelSource`] checking out a named pooled connection per request.
#[derive(Clone, Debug)]
pub struct CollectionSource {
    pool: MongoPool,
    connection: String,
    collection: String,
    id_field: String,
}

impl CollectionSource {
    pub fn new(
        pool: MongoPool,
        connection: impl Into<String>,
        collection: impl Into<String>,
        id_field: impl Into<String>,
    ) -> Self {
        Self {
            pool,
            connection: connection.into(),
            collection: collection.into(),
            id_field: id_field.into(),
        }
    }

    pub fn id_field(&self) -> &str {
        &self.id_field
    }
}

impl ModelSource for CollectionSource {
    fn checkout(&self) -> RepositoryResult<Arc<dyn Model>> {
        let db = get_connection(&self.pool, &self.connection)?;
        let collection = db.collection::<Document>(&self.collection);

        Ok(Arc::new(MongoModel::new(collection, self.id_field.clone())))
    }
}
