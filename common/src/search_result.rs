use serde::{Deserialize, Deserializer, Serialize};

use crate::aggregation::RawAggregations;
use crate::error::FetchError;
use crate::item_type::ItemType;

/// One response of the portal's `/search/` endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct SearchResponse {
    #[serde(rename = "@graph", default)]
    pub graph: Vec<ResultRow>,
    #[serde(default)]
    pub facets: Vec<Facet>,
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub aggregations: Option<RawAggregations>,
}

/// A fetch outcome stamped with the time it arrived.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FetchedPage {
    pub result: Result<SearchResponse, FetchError>,
    pub fetched_at_ms: u64,
}

/// A search hit. Everything besides the identifier is passed through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultRow {
    #[serde(rename = "@id")]
    pub row_id: String,
    #[serde(rename = "@type", default)]
    pub item_types: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_title: Option<String>,
    #[serde(flatten)]
    pub fields: serde_json::Map<String, serde_json::Value>,
}

impl ResultRow {
    pub fn new(row_id: impl Into<String>) -> Self {
        Self { row_id: row_id.into(), item_types: vec![], display_title: None, fields: serde_json::Map::new() }
    }

    pub fn item_type(&self) -> Option<ItemType> {
        ItemType::from_type_list(&self.item_types)
    }

    pub fn title(&self) -> &str {
        self.display_title.as_deref().unwrap_or(&self.row_id)
    }

    /// Looks up a dotted path such as `lab.display_title`.
    pub fn field(&self, path: &str) -> Option<&serde_json::Value> {
        let mut parts = path.split('.');
        let mut value = self.fields.get(parts.next()?)?;
        for part in parts {
            value = value.get(part)?;
        }
        Some(value)
    }

    pub fn field_str(&self, path: &str) -> Option<&str> {
        self.field(path).and_then(|v| v.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Facet {
    pub field: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub terms: Vec<FacetTerm>,
}

impl Facet {
    pub fn title(&self) -> &str {
        self.title.as_deref().unwrap_or(&self.field)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacetTerm {
    #[serde(deserialize_with = "string_or_number")]
    pub key: String,
    #[serde(default)]
    pub doc_count: u64,
}

fn string_or_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        serde_json::Value::Bool(b) => Ok(b.to_string()),
        other => Err(serde::de::Error::custom(format!("invalid facet term key: {other}"))),
    }
}
