//! Client API calls for search endpoints.

use common::{config::ChartConfig, search_result::FetchedPage, session::FetchRequest};
use dioxus::prelude::*;

#[server]
pub async fn fetch_search_page(request: FetchRequest) -> Result<FetchedPage, ServerFnError> {
    let x = backend::api::search::search_page(request).await;
    x.map_err(|e| ServerFnError::ServerError { message: e.to_string(), code: 500, details: None })
}

#[server]
pub async fn chart_config() -> Result<ChartConfig, ServerFnError> {
    Ok(backend::api::search::chart_config())
}
