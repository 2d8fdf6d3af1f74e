//! Search API access for the portal: HTTP client, fetcher and session driver.

use tracing_subscriber::{EnvFilter, fmt};

pub mod api;
pub mod config;
pub mod fetcher;
pub mod driver;

/// Installs the `fmt` subscriber, filtered by `RUST_LOG`.
pub fn init_logging() -> anyhow::Result<()> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to install tracing subscriber: {e}"))
}
