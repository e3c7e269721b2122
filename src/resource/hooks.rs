//! Lifecycle hooks around the CSUGR operations.
//!
//! For every operation the chain runs `before`, then `before_<op>`, the core
//! action, `after_<op>` and finally `after`. A `before*` hook returning
//! [`Flow::Abort`] ends the chain with its response; no later hook runs.

use async_trait::async_trait;

use crate::resource::request::ResourceRequest;
use crate::resource::response::ResourceResponse;
use crate::services::ServiceResult;

/// Decision taken by a `before*` hook.
#[derive(Debug)]
pub enum Flow {
    /// Continue the chain with the (possibly modified) request.
    Continue(ResourceRequest),
    /// Stop the chain and answer with this response.
    Abort(ResourceResponse),
}

pub type HookResult = ServiceResult<Flow>;

/// Hooks a resource runs around each operation. Every method defaults to a
/// no-op so implementors only override what they need.
#[async_trait]
pub trait ResourceHooks: Send + Sync {
    /// Runs before every operation.
    async fn before(&self, req: ResourceRequest) -> HookResult {
        Ok(Flow::Continue(req))
    }

    async fn before_create(&self, req: ResourceRequest) -> HookResult {
        Ok(Flow::Continue(req))
    }

    async fn before_search(&self, req: ResourceRequest) -> HookResult {
        Ok(Flow::Continue(req))
    }

    async fn before_update(&self, req: ResourceRequest) -> HookResult {
        Ok(Flow::Continue(req))
    }

    async fn before_get(&self, req: ResourceRequest) -> HookResult {
        Ok(Flow::Continue(req))
    }

    async fn before_remove(&self, req: ResourceRequest) -> HookResult {
        Ok(Flow::Continue(req))
    }

    async fn after_create(&self, _req: &ResourceRequest, _res: &ResourceResponse) -> ServiceResult<()> {
        Ok(())
    }

    async fn after_search(&self, _req: &ResourceRequest, _res: &ResourceResponse) -> ServiceResult<()> {
        Ok(())
    }

    async fn after_update(&self, _req: &ResourceRequest, _res: &ResourceResponse) -> ServiceResult<()> {
        Ok(())
    }

    async fn after_get(&self, _req: &ResourceRequest, _res: &ResourceResponse) -> ServiceResult<()> {
        Ok(())
    }

    async fn after_remove(&self, _req: &ResourceRequest, _res: &ResourceResponse) -> ServiceResult<()> {
        Ok(())
    }

    /// Runs after every operation that produced a response.
    async fn after(&self, _req: &ResourceRequest, _res: &ResourceResponse) -> ServiceResult<()> {
        Ok(())
    }
}

/// Hooks that never intervene.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoHooks;

impl ResourceHooks for NoHooks {}
