use std::{
    net::SocketAddr,
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
    time::Duration,
};

use axum::{
    Router,
    extract::{RawQuery, State},
    http::{HeaderMap, StatusCode, header},
    response::IntoResponse,
    routing::get,
};
use backend::{
    api::{SearchApi, SearchApiClient},
    config::FetcherConfig,
    fetcher::ResultFetcher,
};
use common::{
    config::ChartConfig,
    error::FetchError,
    query_model::parse_params,
    session::{FetchRequest, SearchSession},
};

/// Stand-in for the portal's `/search/` endpoint. The `type` filter picks the behaviour.
async fn search(State(hits): State<Arc<AtomicUsize>>, headers: HeaderMap, RawQuery(query): RawQuery) -> impl IntoResponse {
    hits.fetch_add(1, Ordering::SeqCst);
    let query = query.unwrap_or_default();
    let cookie = headers.get(header::COOKIE).and_then(|v| v.to_str().ok()).unwrap_or("");
    let json = [(header::CONTENT_TYPE, "application/json")];

    if query.contains("type=Missing") {
        return (StatusCode::NOT_FOUND, json, r#"{"@graph": [], "total": 0, "notification": "No results found"}"#.to_string());
    }
    if query.contains("type=Broken") {
        return (StatusCode::INTERNAL_SERVER_ERROR, json, "boom".to_string());
    }
    if query.contains("type=Garbled") {
        return (StatusCode::OK, json, "{\"@graph\": [".to_string());
    }
    let body = serde_json::json!({
        "@graph": [{
            "@id": "/experiment-set-replicates/4DNESXP5VE8C/",
            "@type": ["ExperimentSetReplicate", "ExperimentSet", "Item"],
            "display_title": cookie,
            "query": query,
        }],
        "facets": [{"field": "award.project", "terms": [{"key": "4DN", "doc_count": 1}]}],
        "total": 1,
    });
    (StatusCode::OK, json, body.to_string())
}

async fn serve() -> (SocketAddr, Arc<AtomicUsize>) {
    let hits = Arc::new(AtomicUsize::new(0));
    let app = Router::new().route("/search/", get(search)).with_state(hits.clone());
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move { axum::serve(listener, app).await.unwrap() });
    (addr, hits)
}

fn config(addr: SocketAddr) -> FetcherConfig {
    FetcherConfig {
        api_url: format!("http://{addr}/"),
        timeout: Duration::from_secs(5),
        session_cookie: Some("searchSessionID=a1b2c3".into()),
        ..Default::default()
    }
}

fn request(query: &str) -> FetchRequest {
    SearchSession::new(parse_params(query), ChartConfig::default()).refresh()
}

#[tokio::test]
async fn decodes_rows_and_passes_session_cookie_through() {
    let (addr, _) = serve().await;
    let client = SearchApiClient::new(&config(addr)).unwrap();

    let response = client.search(&request("type=ExperimentSetReplicate&award.project=4DN")).await.unwrap();
    assert_eq!(response.total, 1);
    assert_eq!(response.facets[0].field, "award.project");

    let row = &response.graph[0];
    assert_eq!(row.title(), "searchSessionID=a1b2c3");
    assert_eq!(
        row.field_str("query"),
        Some("award.project=4DN&type=ExperimentSetReplicate&from=0&limit=25&format=json")
    );
}

#[tokio::test]
async fn not_found_with_search_body_is_an_empty_result() {
    let (addr, _) = serve().await;
    let client = SearchApiClient::new(&config(addr)).unwrap();

    let response = client.search(&request("type=Missing")).await.unwrap();
    assert!(response.graph.is_empty());
    assert_eq!(response.total, 0);
}

#[tokio::test]
async fn server_error_is_a_status_error() {
    let (addr, _) = serve().await;
    let client = SearchApiClient::new(&config(addr)).unwrap();

    let err = client.search(&request("type=Broken")).await.unwrap_err();
    assert_eq!(err, FetchError::Status { status: 500, body: "boom".into() });
    assert!(err.is_retryable());
}

#[tokio::test]
async fn invalid_json_is_a_decode_error() {
    let (addr, _) = serve().await;
    let client = SearchApiClient::new(&config(addr)).unwrap();

    let err = client.search(&request("type=Garbled")).await.unwrap_err();
    assert!(matches!(err, FetchError::Decode(_)), "{err:?}");
    assert!(!err.is_retryable());
}

#[tokio::test]
async fn refused_connection_is_a_network_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    let client = SearchApiClient::new(&config(addr)).unwrap();

    let err = client.search(&request("type=File")).await.unwrap_err();
    assert!(matches!(err, FetchError::Network(_)), "{err:?}");
}

#[tokio::test]
async fn fetcher_retries_server_errors_once() {
    let (addr, hits) = serve().await;
    let config = config(addr);
    let fetcher = ResultFetcher::new(SearchApiClient::new(&config).unwrap(), &config);

    let err = fetcher.fetch(&request("type=Broken")).await.unwrap_err();
    assert_eq!(err, FetchError::Status { status: 500, body: "boom".into() });
    assert_eq!(hits.load(Ordering::SeqCst), 2);

    fetcher.fetch(&request("type=Garbled")).await.unwrap_err();
    assert_eq!(hits.load(Ordering::SeqCst), 3);
}
