use common::{error::FetchError, search_result::SearchResponse, session::FetchRequest};
use reqwest::header::{ACCEPT, COOKIE};

use crate::{api::SearchApi, config::FetcherConfig};

const MAX_ERROR_BODY: usize = 500;

/// HTTP client for the portal's `/search/` endpoint.
#[derive(Debug, Clone)]
pub struct SearchApiClient {
    http: reqwest::Client,
    base_url: String,
    session_cookie: Option<String>,
}

impl SearchApiClient {
    pub fn new(config: &FetcherConfig) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder().build()?;
        Ok(Self {
            http,
            base_url: config.api_url.trim_end_matches('/').to_string(),
            session_cookie: config.session_cookie.clone(),
        })
    }

    pub fn url_for(&self, request: &FetchRequest) -> String {
        format!("{}/search/?{}", self.base_url, request.query_string())
    }
}

fn truncate(mut body: String) -> String {
    if body.len() > MAX_ERROR_BODY {
        let mut cut = MAX_ERROR_BODY;
        while !body.is_char_boundary(cut) {
            cut -= 1;
        }
        body.truncate(cut);
    }
    body
}

impl SearchApi for SearchApiClient {
    async fn search(&self, request: &FetchRequest) -> Result<SearchResponse, FetchError> {
        let url = self.url_for(request);
        tracing::debug!("GET {url}");
        let mut builder = self.http.get(&url).header(ACCEPT, "application/json");
        if let Some(cookie) = &self.session_cookie {
            builder = builder.header(COOKIE, cookie.as_str());
        }
        let t0 = std::time::Instant::now();
        let response = builder.send().await.map_err(|e| FetchError::Network(e.to_string()))?;
        let status = response.status();
        let response_txt = response.text().await.map_err(|e| FetchError::Network(e.to_string()))?;
        tracing::info!(
            "search response: status = {status}, len = {}, took {}ms",
            response_txt.len(),
            t0.elapsed().as_millis()
        );

        // the portal answers an empty result set with 404 and a regular body
        if status == reqwest::StatusCode::NOT_FOUND {
            if let Ok(empty) = serde_json::from_str::<SearchResponse>(&response_txt) {
                return Ok(empty);
            }
        }
        if !status.is_success() {
            return Err(FetchError::Status { status: status.as_u16(), body: truncate(response_txt) });
        }
        serde_json::from_str(&response_txt).map_err(|e| FetchError::Decode(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::{config::ChartConfig, query_model::parse_params, session::SearchSession};

    #[test]
    fn builds_search_url() {
        let config = FetcherConfig { api_url: "http://localhost:8000/".into(), ..Default::default() };
        let client = SearchApiClient::new(&config).unwrap();
        let mut session = SearchSession::new(parse_params("type=File&status!=deleted"), ChartConfig::default());
        let request = session.refresh();
        assert_eq!(
            client.url_for(&request),
            "http://localhost:8000/search/?status!=deleted&type=File&from=0&limit=25&format=json"
        );
    }

    #[test]
    fn truncate_respects_char_boundaries() {
        let body = "é".repeat(400);
        let cut = truncate(body);
        assert!(cut.len() <= MAX_ERROR_BODY);
        assert!(cut.chars().all(|c| c == 'é'));
    }
}
