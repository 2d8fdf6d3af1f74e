//! Error taxonomy for search state handling.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Why a single `field=term` pair was dropped while parsing a query string.
///
/// Never surfaced to the user: the query model logs it and keeps going.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryParseError {
    #[error("pair {0:?} has no '='")]
    MissingSeparator(String),
    #[error("pair {0:?} has an empty field")]
    EmptyField(String),
    #[error("pair {0:?} has an empty term")]
    EmptyTerm(String),
    #[error("pair {0:?} is not valid percent-encoded UTF-8")]
    BadEncoding(String),
    #[error("pair {0:?} excludes a search option")]
    ExcludedOption(String),
    #[error("invalid value {value:?} for {key}")]
    InvalidValue { key: String, value: String },
}

/// A state transition that would corrupt the session.
///
/// These are programming defects. Use [`invariant_violated`] to report one.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvariantViolation {
    #[error("duplicate filter term {field}={term}")]
    DuplicateTerm { field: String, term: String },
    #[error("page {page_index} inserted out of order, next expected page is {expected}")]
    PageOutOfOrder { page_index: u32, expected: u32 },
}

/// Asserts in debug builds, logs in release builds.
///
/// Callers must leave the state untouched after reporting.
pub fn invariant_violated(violation: &InvariantViolation) {
    tracing::error!("invariant violation, ignoring action: {violation}");
    debug_assert!(false, "invariant violation: {violation}");
}

/// The `FetchFailed` condition: a search request that produced no usable response.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum FetchError {
    #[error("search request timed out after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },
    #[error("search API returned {status}: {body}")]
    Status { status: u16, body: String },
    #[error("network error: {0}")]
    Network(String),
    #[error("could not decode search response: {0}")]
    Decode(String),
}

impl FetchError {
    /// Whether one automatic retry may help.
    pub fn is_retryable(&self) -> bool {
        match self {
            FetchError::Timeout { .. } | FetchError::Network(_) => true,
            FetchError::Status { status, .. } => *status >= 500,
            FetchError::Decode(_) => false,
        }
    }
}
