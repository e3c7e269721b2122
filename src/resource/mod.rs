//! The resource: CSUGR operations wrapped in the hook chain.
//!
//! Each public operation walks the same stages:
//!
//! `before` → `before_<op>` → local validation → core action →
//! `after_<op>` → `after`
//!
//! A hook aborting in either `before*` stage ends the chain with the hook's
//! response, as does a failed local validation. The model is checked out from
//! the [`ModelSource`] only once the core action is reached.
//!
//! Warning: query documents reach MongoDB unchanged. Everything stored in the
//! params and the request body must be validated by the hooks.

use std::fmt::{Display, Formatter};
use std::sync::Arc;

use mongodb::bson::{Document, to_document};
use serde_json::Value;

use crate::domain::types::Id;
use crate::dto::api::{CreatedId, Envelope};
use crate::repository::ModelSource;
use crate::resource::hooks::{Flow, HookResult, NoHooks, ResourceHooks};
use crate::resource::params::{ParamsFactory, PrsParams};
use crate::resource::prs::KEY_CREATE_ID;
use crate::resource::request::ResourceRequest;
use crate::resource::response::ResourceResponse;
use crate::services::ServiceResult;
use crate::services::resource::{run_create, run_get, run_remove, run_search, run_update};

pub mod hooks;
pub mod params;
pub mod prs;
pub mod request;
pub mod response;

pub const ERR_PAYLOAD_INVALID: &str = "payload invalid";
pub const ERR_NO_QUERY: &str = "no query parameters detected";

/// Id field used when a resource does not configure one.
pub const DEFAULT_ID_FIELD: &str = "id";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operation {
    Create,
    Search,
    Update,
    Get,
    Remove,
}

impl Display for Operation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Operation::Create => "create",
            Operation::Search => "search",
            Operation::Update => "update",
            Operation::Get => "get",
            Operation::Remove => "remove",
        };
        write!(f, "{name}")
    }
}

/// JSON CSUGR interface over one collection.
#[derive(Clone)]
pub struct Resource {
    source: Arc<dyn ModelSource>,
    hooks: Arc<dyn ResourceHooks>,
    params: Arc<dyn ParamsFactory>,
    id_field: String,
}

impl Resource {
    pub fn new(source: impl ModelSource + 'static) -> Self {
        Self {
            source: Arc::new(source),
            hooks: Arc::new(NoHooks),
            params: Arc::new(PrsParams),
            id_field: DEFAULT_ID_FIELD.to_string(),
        }
    }

    pub fn with_hooks(mut self, hooks: Arc<dyn ResourceHooks>) -> Self {
        self.hooks = hooks;
        self
    }

    pub fn with_params(mut self, params: Arc<dyn ParamsFactory>) -> Self {
        self.params = params;
        self
    }

    /// Field path ids are parsed for. Must match the model's id field.
    pub fn id_field(mut self, id_field: impl Into<String>) -> Self {
        self.id_field = id_field.into();
        self
    }

    async fn run_before(&self, op: Operation, req: ResourceRequest) -> HookResult {
        let req = match self.hooks.before(req).await? {
            Flow::Continue(req) => req,
            abort => return Ok(abort),
        };

        let flow = match op {
            Operation::Create => self.hooks.before_create(req).await?,
            Operation::Search => self.hooks.before_search(req).await?,
            Operation::Update => self.hooks.before_update(req).await?,
            Operation::Get => self.hooks.before_get(req).await?,
            Operation::Remove => self.hooks.before_remove(req).await?,
        };

        if let Flow::Abort(res) = &flow {
            log::debug!("{op} aborted by hook with status {}", res.status.code());
        }

        Ok(flow)
    }

    /// The response is already decided here; failures are only logged.
    async fn run_after(&self, op: Operation, req: &ResourceRequest, res: &ResourceResponse) {
        let result = match op {
            Operation::Create => self.hooks.after_create(req, res).await,
            Operation::Search => self.hooks.after_search(req, res).await,
            Operation::Update => self.hooks.after_update(req, res).await,
            Operation::Get => self.hooks.after_get(req, res).await,
            Operation::Remove => self.hooks.after_remove(req, res).await,
        };
        if let Err(e) = result {
            log::error!("after_{op} hook failed: {e}");
        }

        if let Err(e) = self.hooks.after(req, res).await {
            log::error!("after hook failed for {op}: {e}");
        }
    }

    fn target_id(&self, req: &ResourceRequest) -> ServiceResult<Option<Id>> {
        match req.id() {
            Some(raw) => Ok(Some(Id::parse(raw, &self.id_field)?)),
            None => Ok(None),
        }
    }

    /// Creates a document from the request body.
    ///
    /// Responds 201 with `{ data: { id } }` and stores the id in the PRS under
    /// [`KEY_CREATE_ID`] for the after hooks.
    pub async fn create(&self, req: ResourceRequest) -> ServiceResult<ResourceResponse> {
        let mut req = match self.run_before(Operation::Create, req).await? {
            Flow::Continue(req) => req,
            Flow::Abort(res) => return Ok(res),
        };

        let Some(data) = body_document(&req.body) else {
            return Ok(ResourceResponse::conflict(ERR_PAYLOAD_INVALID));
        };

        let model = self.source.checkout()?;
        let id = run_create(model.as_ref(), data).await?;

        req.prs.set(KEY_CREATE_ID, &id)?;
        log::info!("Created document {id}");

        let res = ResourceResponse::created_json(&Envelope::new(CreatedId { id }))?;

        self.run_after(Operation::Create, &req, &res).await;
        Ok(res)
    }

    /// Searches the collection with the params supplied by the factory.
    ///
    /// Responds 200 with a search result, 204 when the page is empty and 400
    /// when no search params were supplied.
    pub async fn search(&self, req: ResourceRequest) -> ServiceResult<ResourceResponse> {
        let req = match self.run_before(Operation::Search, req).await? {
            Flow::Continue(req) => req,
            Flow::Abort(res) => return Ok(res),
        };

        let Some(params) = self.params.search(&req)? else {
            return Ok(ResourceResponse::bad_request(ERR_NO_QUERY));
        };

        let model = self.source.checkout()?;
        let result = run_search(model.as_ref(), params).await?;

        let res = if result.is_empty() {
            ResourceResponse::no_content()
        } else {
            ResourceResponse::ok_json(&result)?
        };

        self.run_after(Operation::Search, &req, &res).await;
        Ok(res)
    }

    /// Applies the request body as a partial update of the target document.
    ///
    /// Responds 200 when a document was updated, 404 otherwise.
    pub async fn update(&self, req: ResourceRequest) -> ServiceResult<ResourceResponse> {
        let req = match self.run_before(Operation::Update, req).await? {
            Flow::Continue(req) => req,
            Flow::Abort(res) => return Ok(res),
        };

        let Some(changes) = body_document(&req.body) else {
            return Ok(ResourceResponse::conflict(ERR_PAYLOAD_INVALID));
        };

        let Some(id) = self.target_id(&req)? else {
            return Ok(ResourceResponse::not_found());
        };

        let params = self.params.update(&req)?;

        let model = self.source.checkout()?;
        let updated = run_update(model.as_ref(), id, changes, params).await?;

        let res = if updated {
            ResourceResponse::ok()
        } else {
            ResourceResponse::not_found()
        };

        self.run_after(Operation::Update, &req, &res).await;
        Ok(res)
    }

    /// Fetches the target document.
    ///
    /// Responds 200 with `{ data: document }` or 404.
    pub async fn get(&self, req: ResourceRequest) -> ServiceResult<ResourceResponse> {
        let req = match self.run_before(Operation::Get, req).await? {
            Flow::Continue(req) => req,
            Flow::Abort(res) => return Ok(res),
        };

        let Some(id) = self.target_id(&req)? else {
            return Ok(ResourceResponse::not_found());
        };

        let params = self.params.get(&req)?;

        let model = self.source.checkout()?;
        let document = run_get(model.as_ref(), id, params).await?;

        let res = match document {
            Some(document) => ResourceResponse::ok_json(&Envelope::new(document))?,
            None => ResourceResponse::not_found(),
        };

        self.run_after(Operation::Get, &req, &res).await;
        Ok(res)
    }

    /// Removes the target document.
    ///
    /// Responds 200 when a document was removed, 404 otherwise.
    pub async fn remove(&self, req: ResourceRequest) -> ServiceResult<ResourceResponse> {
        let req = match self.run_before(Operation::Remove, req).await? {
            Flow::Continue(req) => req,
            Flow::Abort(res) => return Ok(res),
        };

        let Some(id) = self.target_id(&req)? else {
            return Ok(ResourceResponse::not_found());
        };

        let params = self.params.remove(&req)?;

        let model = self.source.checkout()?;
        let removed = run_remove(model.as_ref(), id, params).await?;

        let res = if removed {
            ResourceResponse::ok()
        } else {
            ResourceResponse::not_found()
        };

        self.run_after(Operation::Remove, &req, &res).await;
        Ok(res)
    }
}

/// Converts an object body into a document. Anything else, or an object BSON
/// cannot hold, is `None`.
fn body_document(body: &Value) -> Option<Document> {
    if !body.is_object() {
        return None;
    }
    match to_document(body) {
        Ok(document) => Some(document),
        Err(e) => {
            log::warn!("Rejected payload: {e}");
            None
        }
    }
}
