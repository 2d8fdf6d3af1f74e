//! Shared search query models and helpers.

use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::filter::FilterSet;
use crate::search_const::TYPE_FIELD;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

/// One sort key. URL form is `field` or `-field`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SortSpec {
    pub field: String,
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn ascending(field: impl Into<String>) -> Self {
        Self { field: field.into(), direction: SortDirection::Ascending }
    }
    pub fn descending(field: impl Into<String>) -> Self {
        Self { field: field.into(), direction: SortDirection::Descending }
    }

    /// Parses `field` / `-field`. Returns None for an empty field.
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        let (field, direction) = match s.strip_prefix('-') {
            Some(rest) => (rest, SortDirection::Descending),
            None => (s, SortDirection::Ascending),
        };
        if field.is_empty() {
            return None;
        }
        Some(Self { field: field.to_string(), direction })
    }
}

impl Display for SortSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.direction {
            SortDirection::Ascending => write!(f, "{}", self.field),
            SortDirection::Descending => write!(f, "-{}", self.field),
        }
    }
}

/// Everything the search URL carries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SearchParams {
    pub filters: FilterSet,
    pub text_query: Option<String>,
    pub sort: Option<SortSpec>,
    pub limit: Option<u32>,
}

impl SearchParams {
    pub fn from_filters(filters: FilterSet) -> Self {
        Self { filters, ..Default::default() }
    }

    /// The `type=` filter, if exactly one included type is selected.
    pub fn type_name(&self) -> Option<&str> {
        let mut types = self.filters.terms_for(TYPE_FIELD).filter(|t| t.mode == crate::filter::FilterMode::Include);
        let first = types.next()?;
        if types.next().is_some() {
            return None;
        }
        Some(first.term.as_str())
    }
}
