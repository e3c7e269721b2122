//! Sources of per-operation parameters.

use crate::domain::params::{GetParams, RemoveParams, SearchParams, UpdateParams};
use crate::resource::prs::{KEY_GET_PARAMS, KEY_REMOVE_PARAMS, KEY_SEARCH_PARAMS, KEY_UPDATE_PARAMS};
use crate::resource::request::ResourceRequest;
use crate::services::ServiceResult;

/// Supplies the parameters each operation runs with.
///
/// Called after the `before*` hooks, so hooks may prepare whatever state the
/// factory reads.
pub trait ParamsFactory: Send + Sync {
    /// Search params, or `None` when the request carries none.
    fn search(&self, req: &ResourceRequest) -> ServiceResult<Option<SearchParams>>;
    fn update(&self, req: &ResourceRequest) -> ServiceResult<UpdateParams>;
    fn get(&self, req: &ResourceRequest) -> ServiceResult<GetParams>;
    fn remove(&self, req: &ResourceRequest) -> ServiceResult<RemoveParams>;
}

/// Reads params from the request's PRS keys.
#[derive(Clone, Copy, Debug, Default)]
pub struct PrsParams;

impl ParamsFactory for PrsParams {
    fn search(&self, req: &ResourceRequest) -> ServiceResult<Option<SearchParams>> {
        req.prs.get(KEY_SEARCH_PARAMS)
    }

    fn update(&self, req: &ResourceRequest) -> ServiceResult<UpdateParams> {
        req.prs.get_or_else(KEY_UPDATE_PARAMS, UpdateParams::default())
    }

    fn get(&self, req: &ResourceRequest) -> ServiceResult<GetParams> {
        req.prs.get_or_else(KEY_GET_PARAMS, GetParams::default())
    }

    fn remove(&self, req: &ResourceRequest) -> ServiceResult<RemoveParams> {
        req.prs.get_or_else(KEY_REMOVE_PARAMS, RemoveParams::default())
    }
}
