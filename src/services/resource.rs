//! The five CSUGR operations.
//!
//! Data passed to these functions must be validated by the caller. The query
//! documents are handed to the database unchanged.

use mongodb::bson::Document;

use crate::domain::params::{GetParams, RemoveParams, SearchParams, UpdateParams};
use crate::domain::search::{SearchMeta, SearchResult};
use crate::domain::types::{Id, OBJECT_ID_FIELD};
use crate::pagination::PageWindow;
use crate::repository::{GetOptions, Model, SearchOptions};
use crate::services::ServiceResult;
use crate::services::document::{flatten, merge};

/// Creates a new document returning its id.
pub async fn run_create<M>(model: &M, data: Document) -> ServiceResult<Id>
where
    M: Model + ?Sized,
{
    let id = model.create(data).await?;
    Ok(id)
}

/// Searches for documents matching the params, one page at a time.
pub async fn run_search<M>(model: &M, params: SearchParams) -> ServiceResult<SearchResult<Document>>
where
    M: Model + ?Sized,
{
    let page = params.resolved_page();
    let limit = params.resolved_limit();
    let SearchParams {
        query,
        sort,
        fields,
        ..
    } = params;

    let total = model.count(query.clone()).await?;

    let window = PageWindow::new(total, page, limit);

    let options = SearchOptions {
        skip: window.skip,
        limit: window.limit,
        sort,
        projection: fields,
    };

    let data = model.search(query, options).await?;

    log::debug!(
        "Search served page {} of {} ({} of {total} documents)",
        window.current + 1,
        window.page_count,
        data.len()
    );

    let meta = SearchMeta {
        pagination: window.meta(data.len()),
    };

    Ok(SearchResult { data, meta })
}

/// Updates a single document by id using `$set`.
///
/// `params.changes` is merged over `changes`. Returns `false` without
/// touching the model when nothing is left to change.
pub async fn run_update<M>(
    model: &M,
    id: Id,
    changes: Document,
    params: UpdateParams,
) -> ServiceResult<bool>
where
    M: Model + ?Sized,
{
    let changes = merge(changes, params.changes);

    if changes.is_empty() {
        return Ok(false);
    }

    let updated = model.update(id, flatten(changes), params.query).await?;
    Ok(updated)
}

/// Retrieves a single document by id.
///
/// The MongoDB `_id` field is excluded unless `params.fields` says otherwise.
pub async fn run_get<M>(model: &M, id: Id, params: GetParams) -> ServiceResult<Option<Document>>
where
    M: Model + ?Sized,
{
    let mut hidden = Document::new();
    hidden.insert(OBJECT_ID_FIELD, 0);
    let projection = merge(hidden, params.fields);

    let document = model
        .get(id, params.query, GetOptions { projection })
        .await?;
    Ok(document)
}

/// Removes a single document by id.
pub async fn run_remove<M>(model: &M, id: Id, params: RemoveParams) -> ServiceResult<bool>
where
    M: Model + ?Sized,
{
    let removed = model.remove(id, params.query).await?;
    Ok(removed)
}
