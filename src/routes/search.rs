//! Hooks translating query strings into search params.

use async_trait::async_trait;

use crate::forms::search::SearchForm;
use crate::resource::hooks::{Flow, HookResult, ResourceHooks};
use crate::resource::prs::KEY_SEARCH_PARAMS;
use crate::resource::request::ResourceRequest;
use crate::resource::response::ResourceResponse;

/// Parses the request query string into [`SearchParams`] for every search.
///
/// An empty query string searches the whole collection. Invalid input aborts
/// the chain with `400 { error }`.
///
/// [`SearchParams`]: crate::domain::params::SearchParams
#[derive(Clone, Debug, Default)]
pub struct QueryStringSearch {
    default_limit: Option<u64>,
}

impl QueryStringSearch {
    pub fn new(default_limit: Option<u64>) -> Self {
        Self { default_limit }
    }
}

#[async_trait]
impl ResourceHooks for QueryStringSearch {
    async fn before_search(&self, mut req: ResourceRequest) -> HookResult {
        let form = match SearchForm::parse(&req.query_string) {
            Ok(form) => form,
            Err(e) => {
                log::warn!("Rejected search query `{}`: {e}", req.query_string);
                return Ok(Flow::Abort(ResourceResponse::bad_request(e.to_string())));
            }
        };

        req.prs
            .set(KEY_SEARCH_PARAMS, form.into_params(self.default_limit))?;
        Ok(Flow::Continue(req))
    }
}

#[cfg(test)]
mod tests {
    use mongodb::bson::doc;

    use super::*;
    use crate::domain::params::SearchParams;
    use crate::resource::response::Status;

    #[actix_web::test]
    async fn stores_params_in_prs() {
        let hooks = QueryStringSearch::new(Some(20));
        let req = ResourceRequest::new().query_string("name=Chippy&page=2");

        let Flow::Continue(req) = hooks.before_search(req).await.unwrap() else {
            panic!("search was aborted");
        };

        let params: SearchParams = req.prs.get(KEY_SEARCH_PARAMS).unwrap().unwrap();
        assert_eq!(params.query, doc! { "name": "Chippy" });
        assert_eq!(params.page, 2);
        assert_eq!(params.limit, 20);
    }

    #[actix_web::test]
    async fn invalid_query_aborts_with_bad_request() {
        let hooks = QueryStringSearch::default();
        let req = ResourceRequest::new().query_string("%24gt=1");

        let Flow::Abort(res) = hooks.before_search(req).await.unwrap() else {
            panic!("search was not aborted");
        };

        assert_eq!(res.status, Status::BadRequest);
    }
}
