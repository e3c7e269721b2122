//! Shared helpers for integration tests.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use mongodb::bson::{Bson, Document};

use resource_mongodb::domain::types::Id;
use resource_mongodb::repository::errors::RepositoryResult;
use resource_mongodb::repository::{GetOptions, Model, SearchOptions};

/// [`Model`] keeping documents in memory. Filters and projections cover
/// top-level fields only.
pub struct InMemoryModel {
    id_field: String,
    documents: Mutex<Vec<Document>>,
    next_id: Mutex<i64>,
}

impl InMemoryModel {
    pub fn new(id_field: &str) -> Arc<Self> {
        Arc::new(Self {
            id_field: id_field.to_string(),
            documents: Mutex::new(Vec::new()),
            next_id: Mutex::new(1),
        })
    }

    pub fn len(&self) -> usize {
        self.documents.lock().unwrap().len()
    }

    fn target(&self, id: &Id, query: &Document) -> Document {
        let mut target = query.clone();
        target.insert(self.id_field.clone(), id.as_bson().clone());
        target
    }
}

fn matches(document: &Document, query: &Document) -> bool {
    query
        .iter()
        .all(|(key, value)| document.get(key) == Some(value))
}

fn project(document: &Document, projection: &Document) -> Document {
    let included: Vec<&String> = projection
        .iter()
        .filter(|(_, value)| !matches!(value, Bson::Int32(0) | Bson::Int64(0)))
        .map(|(key, _)| key)
        .collect();

    let mut projected = Document::new();
    for (key, value) in document {
        let keep = if included.is_empty() {
            !projection.contains_key(key)
        } else {
            included.contains(&key)
        };
        if keep {
            projected.insert(key.clone(), value.clone());
        }
    }
    projected
}

#[async_trait]
impl Model for InMemoryModel {
    async fn create(&self, mut data: Document) -> RepositoryResult<Id> {
        let id = match data.get(&self.id_field) {
            Some(id) => id.clone(),
            None => {
                let mut next_id = self.next_id.lock().unwrap();
                let id = Bson::Int64(*next_id);
                *next_id += 1;
                data.insert(self.id_field.clone(), id.clone());
                id
            }
        };
        self.documents.lock().unwrap().push(data);
        Ok(Id::from(id))
    }

    async fn search(
        &self,
        query: Document,
        options: SearchOptions,
    ) -> RepositoryResult<Vec<Document>> {
        let documents = self.documents.lock().unwrap();
        Ok(documents
            .iter()
            .filter(|document| matches(document, &query))
            .skip(options.skip as usize)
            .take(options.limit as usize)
            .map(|document| project(document, &options.projection))
            .collect())
    }

    async fn count(&self, query: Document) -> RepositoryResult<u64> {
        let documents = self.documents.lock().unwrap();
        Ok(documents
            .iter()
            .filter(|document| matches(document, &query))
            .count() as u64)
    }

    async fn update(&self, id: Id, changes: Document, query: Document) -> RepositoryResult<bool> {
        let target = self.target(&id, &query);
        let mut documents = self.documents.lock().unwrap();
        match documents.iter_mut().find(|document| matches(document, &target)) {
            Some(document) => {
                for (key, value) in changes {
                    document.insert(key, value);
                }
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn get(
        &self,
        id: Id,
        query: Document,
        options: GetOptions,
    ) -> RepositoryResult<Option<Document>> {
        let target = self.target(&id, &query);
        let documents = self.documents.lock().unwrap();
        Ok(documents
            .iter()
            .find(|document| matches(document, &target))
            .map(|document| project(document, &options.projection)))
    }

    async fn remove(&self, id: Id, query: Document) -> RepositoryResult<bool> {
        let target = self.target(&id, &query);
        let mut documents = self.documents.lock().unwrap();
        match documents.iter().position(|document| matches(document, &target)) {
            Some(index) => {
                documents.remove(index);
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
