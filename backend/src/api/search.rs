//! One-shot page fetch used by the frontend's server functions.

use common::{config::ChartConfig, search_result::FetchedPage, session::FetchRequest};

use crate::{api::SearchApiClient, config::FetcherConfig, driver::now_ms, fetcher::ResultFetcher};

pub async fn search_page(request: FetchRequest) -> anyhow::Result<FetchedPage> {
    let config = FetcherConfig::from_env();
    let fetcher = ResultFetcher::new(SearchApiClient::new(&config)?, &config);
    let result = fetcher.fetch(&request).await;
    Ok(FetchedPage { result, fetched_at_ms: now_ms() })
}

/// Chart layout for the search view, with the secondary order taken from the environment.
pub fn chart_config() -> ChartConfig {
    FetcherConfig::from_env().chart
}
