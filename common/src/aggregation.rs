//! Two-level bar chart aggregation.
//!
//! The search API reports counts grouped by a primary field (one bar each)
//! and a secondary field (one segment each). [`reconcile`] flattens that
//! into an ordered bucket list; the list is rebuilt from scratch for every
//! response and never merged with a previous one.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::config::ChartConfig;
use crate::filter::{FilterMode, FilterSet};

/// A count as returned by the API: either a bare number or one number per count kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawCount {
    Single(u64),
    ByKind(BTreeMap<String, u64>),
}

impl RawCount {
    pub fn get(&self, kind: &str) -> u64 {
        match self {
            RawCount::Single(n) => *n,
            RawCount::ByKind(counts) => counts.get(kind).copied().unwrap_or(0),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct RawPrimaryBucket {
    #[serde(default)]
    pub total: Option<RawCount>,
    #[serde(default)]
    pub terms: BTreeMap<String, RawCount>,
}

/// `primary term -> { total, terms: { secondary term -> counts } }`
pub type RawAggregations = BTreeMap<String, RawPrimaryBucket>;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AggregationBucket {
    pub primary_key: String,
    pub secondary_key: String,
    pub count: u64,
}

fn segment_order(config: &ChartConfig, a: &(&String, u64), b: &(&String, u64)) -> std::cmp::Ordering {
    match (config.secondary_rank(a.0), config.secondary_rank(b.0)) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)),
    }
}

/// Flattens raw aggregations into ordered buckets.
///
/// Bars are ordered by descending summed count, ties by key. Segments follow
/// the configured secondary order; unlisted keys go last by descending count.
/// Zero counts are kept.
pub fn reconcile(raw: &RawAggregations, config: &ChartConfig) -> Vec<AggregationBucket> {
    let mut bars = raw
        .iter()
        .map(|(primary, bucket)| {
            let segments = bucket.terms.iter().map(|(k, c)| (k, c.get(&config.count_kind))).collect::<Vec<_>>();
            let total = segments.iter().map(|(_, c)| c).sum::<u64>();
            (primary, total, segments)
        })
        .filter(|(_, _, segments)| !segments.is_empty())
        .collect::<Vec<_>>();
    bars.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));

    let mut buckets = Vec::new();
    for (primary, _total, mut segments) in bars {
        segments.sort_by(|a, b| segment_order(config, a, b));
        buckets.extend(segments.into_iter().map(|(secondary, count)| AggregationBucket {
            primary_key: primary.clone(),
            secondary_key: secondary.clone(),
            count,
        }));
    }
    buckets
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartSegment {
    pub secondary_key: String,
    pub count: u64,
    pub selected: Option<FilterMode>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartBar {
    pub primary_key: String,
    pub total: u64,
    pub selected: Option<FilterMode>,
    pub segments: Vec<ChartSegment>,
}

/// Groups ordered buckets into bars, marking the ones the active filters select.
pub fn bars(buckets: &[AggregationBucket], filters: &FilterSet, config: &ChartConfig) -> Vec<ChartBar> {
    let mut bars: Vec<ChartBar> = Vec::new();
    for bucket in buckets {
        let segment = ChartSegment {
            secondary_key: bucket.secondary_key.clone(),
            count: bucket.count,
            selected: filters.mode_of(&config.secondary_field, &bucket.secondary_key),
        };
        match bars.last_mut() {
            Some(bar) if bar.primary_key == bucket.primary_key => {
                bar.total += bucket.count;
                bar.segments.push(segment);
            }
            _ => bars.push(ChartBar {
                primary_key: bucket.primary_key.clone(),
                total: bucket.count,
                selected: filters.mode_of(&config.primary_field, &bucket.primary_key),
                segments: vec![segment],
            }),
        }
    }
    bars
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::FilterTerm;

    const RAW: &str = r#"{
        "in situ Hi-C": {
            "total": {"experiment_sets": 40},
            "terms": {
                "zebrafish": {"experiment_sets": 0, "experiments": 1},
                "human": {"experiment_sets": 30, "experiments": 80},
                "mouse": {"experiment_sets": 10}
            }
        },
        "ChIA-PET": {
            "terms": {"human": 7, "Xenopus": 2, "Drosophila": 2}
        },
        "DNase Hi-C": {
            "terms": {"mouse": {"experiment_sets": 50}}
        },
        "empty": {"terms": {}}
    }"#;

    fn keys(buckets: &[AggregationBucket]) -> Vec<(&str, &str, u64)> {
        buckets.iter().map(|b| (b.primary_key.as_str(), b.secondary_key.as_str(), b.count)).collect()
    }

    #[test]
    fn orders_bars_by_total_and_segments_by_config() {
        let raw: RawAggregations = serde_json::from_str(RAW).unwrap();
        let buckets = reconcile(&raw, &ChartConfig::default());
        assert_eq!(
            keys(&buckets),
            vec![
                ("DNase Hi-C", "mouse", 50),
                ("in situ Hi-C", "human", 30),
                ("in situ Hi-C", "mouse", 10),
                ("in situ Hi-C", "zebrafish", 0),
                ("ChIA-PET", "human", 7),
                ("ChIA-PET", "Drosophila", 2),
                ("ChIA-PET", "Xenopus", 2),
            ]
        );
    }

    #[test]
    fn secondary_order_is_never_alphabetical() {
        let raw: RawAggregations = serde_json::from_str(RAW).unwrap();
        let config = ChartConfig::default().with_secondary_order(["zebrafish", "mouse", "human"]);
        let buckets = reconcile(&raw, &config);
        let hic = buckets.iter().filter(|b| b.primary_key == "in situ Hi-C").map(|b| b.secondary_key.as_str()).collect::<Vec<_>>();
        assert_eq!(hic, vec!["zebrafish", "mouse", "human"]);
    }

    #[test]
    fn equal_totals_break_ties_by_key() {
        let raw: RawAggregations = serde_json::from_str(r#"{"b": {"terms": {"human": 3}}, "a": {"terms": {"mouse": 3}}}"#).unwrap();
        let buckets = reconcile(&raw, &ChartConfig::default());
        assert_eq!(keys(&buckets), vec![("a", "mouse", 3), ("b", "human", 3)]);
    }

    #[test]
    fn bars_group_and_mark_selection() {
        let raw: RawAggregations = serde_json::from_str(RAW).unwrap();
        let config = ChartConfig::default();
        let buckets = reconcile(&raw, &config);
        let filters = FilterSet::from_terms([
            FilterTerm::include(config.primary_field.clone(), "in situ Hi-C"),
            FilterTerm::exclude(config.secondary_field.clone(), "mouse"),
        ]);
        let bars = bars(&buckets, &filters, &config);
        assert_eq!(bars.len(), 3);
        assert_eq!(bars[1].primary_key, "in situ Hi-C");
        assert_eq!(bars[1].total, 40);
        assert_eq!(bars[1].selected, Some(FilterMode::Include));
        assert_eq!(bars[1].segments.len(), 3);
        assert_eq!(bars[1].segments[1].selected, Some(FilterMode::Exclude));
        assert_eq!(bars[2].selected, None);
    }
}
