//! Search API access.

use std::{future::Future, rc::Rc};

use common::{error::FetchError, search_result::SearchResponse, session::FetchRequest};

pub mod search;
pub mod search_api_client;

pub use search_api_client::SearchApiClient;

/// Anything that can answer a [`FetchRequest`].
pub trait SearchApi {
    fn search(&self, request: &FetchRequest) -> impl Future<Output = Result<SearchResponse, FetchError>>;
}

impl<T: SearchApi> SearchApi for Rc<T> {
    fn search(&self, request: &FetchRequest) -> impl Future<Output = Result<SearchResponse, FetchError>> {
        (**self).search(request)
    }
}
