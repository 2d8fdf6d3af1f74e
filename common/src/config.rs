//! Bar chart configuration.

use serde::{Deserialize, Serialize};

/// Which two fields the aggregation chart groups by, and how segments are ordered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    pub primary_field: String,
    pub secondary_field: String,
    /// Which count to read when the API returns several per bucket.
    pub count_kind: String,
    /// Presentation order of secondary keys. Keys not listed go last.
    pub secondary_order: Vec<String>,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            primary_field: "experiments_in_set.experiment_type.display_title".to_string(),
            secondary_field: "experiments_in_set.biosample.biosource.organism.name".to_string(),
            count_kind: "experiment_sets".to_string(),
            secondary_order: ["human", "mouse", "fruit-fly", "zebrafish", "chicken", "yeast"]
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }
}

impl ChartConfig {
    pub fn with_secondary_order(mut self, order: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.secondary_order = order.into_iter().map(Into::into).collect();
        self
    }

    /// Position of a secondary key in the configured order.
    pub fn secondary_rank(&self, key: &str) -> Option<usize> {
        self.secondary_order.iter().position(|k| k == key)
    }
}
