//! URL query string <-> filter set.
//!
//! Include terms are written `field=term`, exclude terms `field!=term`. A
//! leading `!` on the raw term is also read as exclude, for links produced by
//! older versions of the portal. Field and term are percent-encoded, so a
//! literal `!` inside either never collides with the exclude marker.
//!
//! Parsing is tolerant: malformed pairs are dropped and logged at `trace`.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

use crate::error::QueryParseError;
use crate::filter::{FilterMode, FilterSet, FilterTerm};
use crate::search_const::{LIMIT_KEY, MAX_PAGE_SIZE, SORT_KEY, TEXT_QUERY_KEY, is_reserved_key};
use crate::search_query::{SearchParams, SortSpec};

/// One decoded `key=value` pair, with the exclude marker already stripped.
#[derive(Debug, Clone, PartialEq, Eq)]
struct RawPair<'a> {
    key: Cow<'a, str>,
    value: Cow<'a, str>,
    exclude: bool,
}

fn decode_component(raw: &str) -> Option<Cow<'_, str>> {
    if raw.contains('+') {
        let spaced = raw.replace('+', " ");
        return urlencoding::decode(&spaced).ok().map(|s| Cow::Owned(s.into_owned()));
    }
    urlencoding::decode(raw).ok()
}

fn split_pair(raw: &str) -> Result<RawPair<'_>, QueryParseError> {
    let Some((raw_key, raw_value)) = raw.split_once('=') else {
        return Err(QueryParseError::MissingSeparator(raw.to_string()));
    };
    let (raw_key, mut exclude) = match raw_key.strip_suffix('!') {
        Some(k) => (k, true),
        None => (raw_key, false),
    };
    let key = decode_component(raw_key).ok_or_else(|| QueryParseError::BadEncoding(raw.to_string()))?;
    if key.is_empty() {
        return Err(QueryParseError::EmptyField(raw.to_string()));
    }
    // exclude markers only mean something on filter keys; option values are taken as written
    let raw_value = if is_reserved_key(&key) {
        if exclude {
            return Err(QueryParseError::ExcludedOption(raw.to_string()));
        }
        raw_value
    } else {
        match raw_value.strip_prefix('!') {
            Some(v) => {
                exclude = true;
                v
            }
            None => raw_value,
        }
    };
    let value = decode_component(raw_value).ok_or_else(|| QueryParseError::BadEncoding(raw.to_string()))?;
    if value.is_empty() {
        return Err(QueryParseError::EmptyTerm(raw.to_string()));
    }
    Ok(RawPair { key, value, exclude })
}

fn pairs(query: &str) -> impl Iterator<Item = RawPair<'_>> {
    let query = query.strip_prefix('?').unwrap_or(query);
    query.split('&').filter(|p| !p.is_empty()).filter_map(|p| match split_pair(p) {
        Ok(pair) => Some(pair),
        Err(e) => {
            tracing::trace!("dropping query pair: {e}");
            None
        }
    })
}

/// Parses the filter terms of a query string. Reserved keys are skipped.
pub fn parse(query: &str) -> FilterSet {
    let mut filters = FilterSet::new();
    for pair in pairs(query) {
        if is_reserved_key(&pair.key) {
            continue;
        }
        let mode = if pair.exclude { FilterMode::Exclude } else { FilterMode::Include };
        if !filters.insert(FilterTerm::new(pair.key.into_owned(), pair.value.into_owned(), mode)) {
            tracing::trace!("dropping repeated query pair");
        }
    }
    filters
}

fn encode_term(t: &FilterTerm) -> String {
    let marker = match t.mode {
        FilterMode::Include => "",
        FilterMode::Exclude => "!",
    };
    format!("{}{}={}", urlencoding::encode(&t.field), marker, urlencoding::encode(&t.term))
}

/// Canonical query string for a filter set: sorted by field, then term.
pub fn serialize(filters: &FilterSet) -> String {
    filters.canonical().into_iter().map(encode_term).collect::<Vec<_>>().join("&")
}

/// Parses the whole URL state: filters plus `q`, `sort` and `limit`.
pub fn parse_params(query: &str) -> SearchParams {
    let mut params = SearchParams { filters: parse(query), ..Default::default() };
    for pair in pairs(query) {
        match &*pair.key {
            TEXT_QUERY_KEY if params.text_query.is_none() => {
                params.text_query = Some(pair.value.into_owned());
            }
            SORT_KEY if params.sort.is_none() => {
                params.sort = SortSpec::parse(&pair.value);
            }
            LIMIT_KEY if params.limit.is_none() => match parse_limit(&pair.value) {
                Ok(limit) => params.limit = Some(limit),
                Err(e) => tracing::trace!("dropping query pair: {e}"),
            },
            _ => {}
        }
    }
    params
}

fn parse_limit(value: &str) -> Result<u32, QueryParseError> {
    let invalid = || QueryParseError::InvalidValue { key: LIMIT_KEY.to_string(), value: value.to_string() };
    let limit = value.parse::<u32>().map_err(|_| invalid())?;
    if limit == 0 {
        return Err(invalid());
    }
    Ok(limit.min(MAX_PAGE_SIZE))
}

fn option_parts(params: &SearchParams) -> Vec<String> {
    let mut parts = Vec::new();
    if let Some(q) = params.text_query.as_deref().filter(|q| !q.is_empty()) {
        parts.push(format!("{TEXT_QUERY_KEY}={}", urlencoding::encode(q)));
    }
    if let Some(sort) = &params.sort {
        parts.push(format!("{SORT_KEY}={}", urlencoding::encode(&sort.to_string())));
    }
    parts
}

/// Canonical, bookmarkable query string for the whole URL state.
pub fn serialize_params(params: &SearchParams) -> String {
    let mut parts = vec![serialize(&params.filters)];
    parts.extend(option_parts(params));
    if let Some(limit) = params.limit {
        parts.push(format!("{LIMIT_KEY}={limit}"));
    }
    parts.retain(|p| !p.is_empty());
    parts.join("&")
}

/// Query string sent to the search API for one page of results.
pub fn api_query(params: &SearchParams, from: u64, limit: u32) -> String {
    let mut parts = vec![serialize(&params.filters)];
    parts.extend(option_parts(params));
    parts.push(format!("from={from}"));
    parts.push(format!("limit={limit}"));
    parts.push("format=json".to_string());
    parts.retain(|p| !p.is_empty());
    parts.join("&")
}

/// Terms that appeared or disappeared between two filter sets.
///
/// A term whose mode changed is listed in both.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FilterDiff {
    pub added: Vec<FilterTerm>,
    pub removed: Vec<FilterTerm>,
}

impl FilterDiff {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }
}

pub fn diff(old: &FilterSet, new: &FilterSet) -> FilterDiff {
    let added = new
        .canonical()
        .into_iter()
        .filter(|t| old.mode_of(&t.field, &t.term) != Some(t.mode))
        .cloned()
        .collect();
    let removed = old
        .canonical()
        .into_iter()
        .filter(|t| new.mode_of(&t.field, &t.term) != Some(t.mode))
        .cloned()
        .collect();
    FilterDiff { added, removed }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search_query::SortDirection;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    #[test]
    fn parses_include_and_both_exclude_forms() {
        let set = parse("award.project=External&status!=deleted&lab.title=!Ren%20Lab");
        assert_eq!(set.mode_of("award.project", "External"), Some(FilterMode::Include));
        assert_eq!(set.mode_of("status", "deleted"), Some(FilterMode::Exclude));
        assert_eq!(set.mode_of("lab.title", "Ren Lab"), Some(FilterMode::Exclude));
        assert_eq!(set.len(), 3);
    }

    #[test]
    fn malformed_pairs_are_dropped() {
        let set = parse("novalue&=orphan&empty=&!=x&good=yes&bad=%FF%FE&&");
        assert_eq!(set, FilterSet::from_terms([FilterTerm::include("good", "yes")]));
    }

    #[test]
    fn plus_decodes_to_space() {
        let set = parse("?biosource_type=immortalized+cell+line");
        assert!(set.contains("biosource_type", "immortalized cell line"));
    }

    #[test]
    fn reserved_keys_are_not_filters() {
        let set = parse("type=File&sort=-date_created&limit=10&from=20&q=ctcf&format=json");
        assert_eq!(set, FilterSet::from_terms([FilterTerm::include("type", "File")]));
    }

    #[test]
    fn serialize_is_canonical() {
        let a = FilterSet::from_terms([
            FilterTerm::include("status", "released"),
            FilterTerm::exclude("award.project", "External"),
            FilterTerm::include("award.project", "4DN"),
        ]);
        let b = FilterSet::from_terms(a.canonical().into_iter().rev().cloned());
        assert_eq!(serialize(&a), "award.project=4DN&award.project!=External&status=released");
        assert_eq!(serialize(&a), serialize(&b));
    }

    #[test]
    fn literal_bang_survives_round_trip() {
        let set = FilterSet::from_terms([FilterTerm::include("note", "!important"), FilterTerm::include("odd!", "x")]);
        let s = serialize(&set);
        assert_eq!(s, "note=%21important&odd%21=x");
        assert_eq!(parse(&s), set);
    }

    #[test]
    fn scenario_award_project_external() {
        let set = FilterSet::from_terms([FilterTerm::include("award.project", "External")]);
        assert_eq!(serialize(&set), "award.project=External");
        assert_eq!(serialize(&FilterSet::new()), "");
    }

    #[test]
    fn params_round_trip() {
        let params = parse_params("q=CTCF%20binding&type=ExperimentSetReplicate&sort=-date_created&limit=50&status!=deleted");
        assert_eq!(params.text_query.as_deref(), Some("CTCF binding"));
        assert_eq!(params.sort, Some(SortSpec { field: "date_created".into(), direction: SortDirection::Descending }));
        assert_eq!(params.limit, Some(50));
        assert_eq!(params.filters.len(), 2);
        let s = serialize_params(&params);
        assert_eq!(s, "status!=deleted&type=ExperimentSetReplicate&q=CTCF%20binding&sort=-date_created&limit=50");
        assert_eq!(parse_params(&s), params);
    }

    #[test]
    fn options_keep_a_leading_bang_and_refuse_the_exclude_form() {
        let params = parse_params("q=!foo&sort!=accession&type=File");
        assert_eq!(params.text_query.as_deref(), Some("!foo"));
        assert_eq!(params.sort, None);
        assert_eq!(parse_params("q!=foo").text_query, None);
        assert_eq!(parse_params(&serialize_params(&params)), params);
    }

    #[test]
    fn reserved_key_filters_never_reach_the_url() {
        let set = FilterSet::from_terms([FilterTerm::include("sort", "x"), FilterTerm::include("lab", "y")]);
        assert_eq!(serialize(&set), "lab=y");
        let params = SearchParams::from_filters(set);
        let back = parse_params(&serialize_params(&params));
        assert_eq!(back.sort, None);
        assert_eq!(back, params);
    }

    #[test]
    fn invalid_limit_is_dropped_and_large_limit_clamped() {
        assert_eq!(parse_params("limit=abc").limit, None);
        assert_eq!(parse_params("limit=0").limit, None);
        assert_eq!(parse_params("limit=100000").limit, Some(MAX_PAGE_SIZE));
    }

    #[test]
    fn api_query_carries_pagination() {
        let params = parse_params("type=File&sort=accession");
        assert_eq!(api_query(&params, 25, 25), "type=File&sort=accession&from=25&limit=25&format=json");
        assert_eq!(api_query(&SearchParams::default(), 0, 10), "from=0&limit=10&format=json");
    }

    #[test]
    fn diff_reports_mode_changes_on_both_sides() {
        let old = FilterSet::from_terms([FilterTerm::include("a", "1"), FilterTerm::include("b", "2")]);
        let new = FilterSet::from_terms([FilterTerm::exclude("a", "1"), FilterTerm::include("c", "3")]);
        let d = diff(&old, &new);
        assert_eq!(d.added, vec![FilterTerm::exclude("a", "1"), FilterTerm::include("c", "3")]);
        assert_eq!(d.removed, vec![FilterTerm::include("a", "1"), FilterTerm::include("b", "2")]);
        assert!(diff(&new, &new.clone()).is_empty());
    }

    fn arb_filter_set() -> impl Strategy<Value = FilterSet> {
        let field = prop_oneof![
            Just("type".to_string()),
            Just("award.project".to_string()),
            Just("sort".to_string()),
            Just("q".to_string()),
            "[a-z!&= .%+]{1,8}",
        ];
        let term = "\\PC{1,10}";
        let mode = prop_oneof![Just(FilterMode::Include), Just(FilterMode::Exclude)];
        proptest::collection::vec((field, term, mode), 0..8)
            .prop_map(|v| v.into_iter().map(|(f, t, m)| FilterTerm::new(f, t, m)).collect::<FilterSet>())
    }

    fn arb_params() -> impl Strategy<Value = SearchParams> {
        let sort = ("[a-z_.]{1,12}", any::<bool>()).prop_map(|(field, descending)| {
            if descending { SortSpec::descending(field) } else { SortSpec::ascending(field) }
        });
        (
            arb_filter_set(),
            proptest::option::of("\\PC{1,12}"),
            proptest::option::of(sort),
            proptest::option::of(1..=MAX_PAGE_SIZE),
        )
            .prop_map(|(filters, text_query, sort, limit)| SearchParams { filters, text_query, sort, limit })
    }

    proptest! {
        #[test]
        fn parse_serialize_round_trip(set in arb_filter_set()) {
            prop_assert_eq!(parse(&serialize(&set)), set);
        }

        #[test]
        fn params_parse_serialize_round_trip(params in arb_params()) {
            prop_assert_eq!(parse_params(&serialize_params(&params)), params);
        }

        #[test]
        fn serialize_is_stable_under_reordering(set in arb_filter_set()) {
            let reversed = FilterSet::from_terms(set.iter().rev().cloned());
            prop_assert_eq!(serialize(&set), serialize(&reversed));
        }
    }
}
