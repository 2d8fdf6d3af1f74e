//! The browse page's query string as a route parameter.

use std::fmt::Display;

use common::query_model::{parse_params, serialize_params};
use common::search_query::SearchParams;

/// Search state carried in the URL query, e.g. `type=Experiment&status!=deleted&sort=-date_created`.
///
/// Parsing is tolerant: malformed pairs are dropped, never rejected, so any
/// bookmarked link opens. Display always produces the canonical form.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SearchUrl(pub SearchParams);

impl From<SearchParams> for SearchUrl {
    fn from(value: SearchParams) -> Self {
        SearchUrl(value)
    }
}

impl From<&str> for SearchUrl {
    fn from(query: &str) -> Self {
        SearchUrl(parse_params(query.trim_start_matches('?')))
    }
}

impl Display for SearchUrl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", serialize_params(&self.0))
    }
}
