use std::{env, fmt::Display, str::FromStr, time::Duration};

use common::config::ChartConfig;
use tracing::{info, warn};

pub const DEFAULT_API_URL: &str = "https://data.4dnucleome.org";
pub const DEFAULT_TIMEOUT_MS: u64 = 15_000;

/// Fetch attempts per request: the first try plus one automatic retry.
pub const MAX_ATTEMPTS: u32 = 2;

#[derive(Debug, Clone, PartialEq)]
pub struct FetcherConfig {
    pub api_url: String,
    pub timeout: Duration,
    /// Sent verbatim as the `Cookie` header so paginated results keep a stable order.
    pub session_cookie: Option<String>,
    pub chart: ChartConfig,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
            session_cookie: None,
            chart: ChartConfig::default(),
        }
    }
}

impl FetcherConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let chart = match var("CHART_SECONDARY_ORDER") {
            Some(order) => defaults.chart.clone().with_secondary_order(
                order.split(',').map(str::trim).filter(|s| !s.is_empty()),
            ),
            None => defaults.chart.clone(),
        };
        Self {
            api_url: var("SEARCH_API_URL").unwrap_or(defaults.api_url),
            timeout: Duration::from_millis(try_load("SEARCH_API_TIMEOUT_MS", DEFAULT_TIMEOUT_MS)),
            session_cookie: var("SEARCH_SESSION_COOKIE").filter(|c| !c.is_empty()),
            chart,
        }
    }
}

fn var(key: &str) -> Option<String> {
    env::var(key).ok()
}

fn try_load<T: FromStr + Display>(key: &str, default: T) -> T
where
    T::Err: Display,
{
    parse_or_default(key, var(key), default)
}

fn parse_or_default<T: FromStr + Display>(key: &str, raw: Option<String>, default: T) -> T
where
    T::Err: Display,
{
    let Some(raw) = raw else {
        info!("{key} not set, using default: {default}");
        return default;
    };
    raw.trim().parse().unwrap_or_else(|e| {
        warn!("Invalid {key} value {raw:?}: {e}, using default: {default}");
        default
    })
}
