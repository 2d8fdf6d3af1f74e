//! Portal item types.
//!
//! Per-type behaviour is a `match` on [`ItemType`] rather than a lookup in a
//! registry keyed by type name.

use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::filter::{FilterSet, FilterTerm};
use crate::search_const::TYPE_FIELD;
use crate::search_query::{SearchParams, SortSpec};

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ItemType {
    ExperimentSetReplicate,
    ExperimentSet,
    Experiment,
    File,
    Biosource,
    Biosample,
    Other(String),
}

impl ItemType {
    pub fn as_str(&self) -> &str {
        match self {
            ItemType::ExperimentSetReplicate => "ExperimentSetReplicate",
            ItemType::ExperimentSet => "ExperimentSet",
            ItemType::Experiment => "Experiment",
            ItemType::File => "File",
            ItemType::Biosource => "Biosource",
            ItemType::Biosample => "Biosample",
            ItemType::Other(name) => name,
        }
    }

    pub fn display_name(&self) -> &str {
        match self {
            ItemType::ExperimentSetReplicate => "Experiment Sets",
            ItemType::ExperimentSet => "Custom Experiment Sets",
            ItemType::Experiment => "Experiments",
            ItemType::File => "Files",
            ItemType::Biosource => "Biosources",
            ItemType::Biosample => "Biosamples",
            ItemType::Other(name) => name,
        }
    }

    /// First known type in an `@type` list (most specific first), else the first entry.
    pub fn from_type_list(types: &[String]) -> Option<Self> {
        let parsed = types.iter().map(|t| Self::from(t.as_str())).collect::<Vec<_>>();
        if let Some(known) = parsed.iter().find(|t| !matches!(t, ItemType::Other(_))) {
            return Some(known.clone());
        }
        parsed.into_iter().next()
    }

    /// Filters a fresh search of this type starts from.
    pub fn baseline_filters(&self) -> FilterSet {
        let mut filters = FilterSet::from_terms([FilterTerm::include(TYPE_FIELD, self.as_str())]);
        match self {
            ItemType::ExperimentSetReplicate => {
                filters.insert(FilterTerm::include("experimentset_type", "replicate"));
            }
            ItemType::File => {
                filters.insert(FilterTerm::exclude("status", "deleted"));
            }
            _ => {}
        }
        filters
    }

    pub fn default_sort(&self) -> Option<SortSpec> {
        match self {
            ItemType::ExperimentSetReplicate | ItemType::ExperimentSet => Some(SortSpec::descending("date_created")),
            ItemType::File => Some(SortSpec::ascending("accession")),
            _ => None,
        }
    }

    /// Baseline URL state for this type.
    pub fn baseline_params(&self) -> SearchParams {
        SearchParams { filters: self.baseline_filters(), sort: self.default_sort(), ..Default::default() }
    }
}

impl From<&str> for ItemType {
    fn from(s: &str) -> Self {
        match s {
            "ExperimentSetReplicate" => ItemType::ExperimentSetReplicate,
            "ExperimentSet" => ItemType::ExperimentSet,
            "Experiment" => ItemType::Experiment,
            "File" => ItemType::File,
            "Biosource" => ItemType::Biosource,
            "Biosample" => ItemType::Biosample,
            other => ItemType::Other(other.to_string()),
        }
    }
}

impl FromStr for ItemType {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s))
    }
}

impl Display for ItemType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query_model::serialize_params;

    #[test]
    fn resolves_most_specific_known_type() {
        let types = ["FileProcessed", "File", "Item"].map(String::from);
        assert_eq!(ItemType::from_type_list(&types), Some(ItemType::File));
        let unknown = ["Award", "Item"].map(String::from);
        assert_eq!(ItemType::from_type_list(&unknown), Some(ItemType::Other("Award".into())));
        assert_eq!(ItemType::from_type_list(&[]), None);
    }

    #[test]
    fn browse_baseline() {
        let params = ItemType::ExperimentSetReplicate.baseline_params();
        assert_eq!(
            serialize_params(&params),
            "experimentset_type=replicate&type=ExperimentSetReplicate&sort=-date_created"
        );
        assert_eq!(params.type_name(), Some("ExperimentSetReplicate"));
    }

    #[test]
    fn round_trips_through_strings() {
        for t in [ItemType::Experiment, ItemType::Biosample, ItemType::Other("Lab".into())] {
            assert_eq!(t.to_string().parse::<ItemType>().unwrap(), t);
        }
    }
}
