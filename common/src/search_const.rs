//! Search constants shared by frontend and backend.

/// Rows per page when the URL does not carry a `limit`.
pub const PAGE_SIZE: u32 = 25;

/// Upper bound accepted for a `limit` parameter.
pub const MAX_PAGE_SIZE: u32 = 500;

/// Query keys that carry search options rather than filter terms.
pub const RESERVED_KEYS: &[&str] = &["q", "sort", "limit", "from", "format"];

pub const TEXT_QUERY_KEY: &str = "q";
pub const SORT_KEY: &str = "sort";
pub const LIMIT_KEY: &str = "limit";

/// Filter field that scopes a search to one item type.
pub const TYPE_FIELD: &str = "type";

pub fn is_reserved_key(key: &str) -> bool {
    RESERVED_KEYS.contains(&key)
}
