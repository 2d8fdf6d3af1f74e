//! Facet selection state machine.
//!
//! [`reduce`] is pure: the same state and action always give the same next
//! state, and the no-duplicate invariant is checked after every transition.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::invariant_violated;
use crate::filter::{FilterMode, FilterSet, FilterTerm};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FilterAction {
    /// Select the term, or deselect it if already selected in any mode.
    Toggle { field: String, term: String },
    /// Switch a facet panel between include and exclude.
    SetMode { field: String, mode: FilterMode },
    /// Drop every term, or only those of one field.
    Clear { field: Option<String> },
    ResetToDefault { baseline: FilterSet },
}

impl FilterAction {
    pub fn toggle(field: impl Into<String>, term: impl Into<String>) -> Self {
        Self::Toggle { field: field.into(), term: term.into() }
    }
    pub fn set_mode(field: impl Into<String>, mode: FilterMode) -> Self {
        Self::SetMode { field: field.into(), mode }
    }
    pub fn clear_all() -> Self {
        Self::Clear { field: None }
    }
    pub fn clear_field(field: impl Into<String>) -> Self {
        Self::Clear { field: Some(field.into()) }
    }
}

/// Filter set plus the mode each facet panel is showing.
///
/// Panel modes matter only while a field has no terms: once it has terms,
/// they all carry the panel's mode.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FilterState {
    pub filters: FilterSet,
    panel_modes: BTreeMap<String, FilterMode>,
}

impl FilterState {
    pub fn new(filters: FilterSet) -> Self {
        Self { filters, panel_modes: BTreeMap::new() }
    }

    /// Mode a newly selected term of `field` gets.
    pub fn active_mode(&self, field: &str) -> FilterMode {
        if let Some(mode) = self.panel_modes.get(field) {
            return *mode;
        }
        self.filters.terms_for(field).next().map(|t| t.mode).unwrap_or_default()
    }
}

pub fn reduce(state: &FilterState, action: &FilterAction) -> FilterState {
    let mut next = state.clone();
    match action {
        FilterAction::Toggle { field, term } => {
            if let Some(removed) = next.filters.remove(field, term) {
                next.panel_modes.insert(field.clone(), removed.mode);
            } else {
                let mode = state.active_mode(field);
                next.filters.insert(FilterTerm::new(field.clone(), term.clone(), mode));
            }
        }
        FilterAction::SetMode { field, mode } => {
            next.filters.set_field_mode(field, *mode);
            next.panel_modes.insert(field.clone(), *mode);
        }
        FilterAction::Clear { field: Some(field) } => {
            next.filters.clear_field(field);
            next.panel_modes.remove(field);
        }
        FilterAction::Clear { field: None } => {
            next.filters.clear();
            next.panel_modes.clear();
        }
        FilterAction::ResetToDefault { baseline } => {
            next.filters = baseline.clone();
            next.panel_modes.clear();
        }
    }
    if let Err(violation) = next.filters.check_unique() {
        invariant_violated(&violation);
        return state.clone();
    }
    next
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query_model::serialize;
    use proptest::prelude::*;

    fn toggle(state: &FilterState, field: &str, term: &str) -> FilterState {
        reduce(state, &FilterAction::toggle(field, term))
    }

    #[test]
    fn scenario_toggle_award_project_twice() {
        let empty = FilterState::default();
        let one = toggle(&empty, "award.project", "External");
        assert_eq!(one.filters, FilterSet::from_terms([FilterTerm::include("award.project", "External")]));
        assert_eq!(serialize(&one.filters), "award.project=External");
        let back = toggle(&one, "award.project", "External");
        assert_eq!(back.filters, FilterSet::new());
    }

    #[test]
    fn toggle_on_a_reserved_key_changes_nothing() {
        let state = FilterState::default();
        for key in ["sort", "q", "limit"] {
            assert_eq!(toggle(&state, key, "x"), state);
        }
    }

    #[test]
    fn toggle_uses_panel_mode() {
        let state = reduce(&FilterState::default(), &FilterAction::set_mode("status", FilterMode::Exclude));
        let state = toggle(&state, "status", "deleted");
        assert_eq!(state.filters.mode_of("status", "deleted"), Some(FilterMode::Exclude));
        // other fields keep including
        let state = toggle(&state, "lab", "x");
        assert_eq!(state.filters.mode_of("lab", "x"), Some(FilterMode::Include));
    }

    #[test]
    fn toggle_follows_existing_terms_mode() {
        let state = FilterState::new(FilterSet::from_terms([FilterTerm::exclude("status", "deleted")]));
        let state = toggle(&state, "status", "replaced");
        assert_eq!(state.filters.mode_of("status", "replaced"), Some(FilterMode::Exclude));
    }

    #[test]
    fn toggle_removes_term_selected_in_other_mode() {
        let state = FilterState::new(FilterSet::from_terms([
            FilterTerm::include("status", "released"),
            FilterTerm::exclude("status", "deleted"),
        ]));
        let removed = toggle(&state, "status", "deleted");
        assert!(!removed.filters.contains("status", "deleted"));
        let restored = toggle(&removed, "status", "deleted");
        assert_eq!(restored.filters, state.filters);
    }

    #[test]
    fn set_mode_retags_without_changing_presence() {
        let state = FilterState::new(FilterSet::from_terms([
            FilterTerm::include("lab", "a"),
            FilterTerm::include("lab", "b"),
            FilterTerm::include("type", "File"),
        ]));
        let next = reduce(&state, &FilterAction::set_mode("lab", FilterMode::Exclude));
        assert_eq!(next.filters.len(), 3);
        assert!(next.filters.terms_for("lab").all(|t| t.mode == FilterMode::Exclude));
        assert_eq!(next.filters.mode_of("type", "File"), Some(FilterMode::Include));
        assert_eq!(next.active_mode("lab"), FilterMode::Exclude);
    }

    #[test]
    fn clear_scoped_and_unscoped() {
        let state = FilterState::new(FilterSet::from_terms([
            FilterTerm::include("lab", "a"),
            FilterTerm::include("type", "File"),
        ]));
        let scoped = reduce(&state, &FilterAction::clear_field("lab"));
        assert_eq!(scoped.filters, FilterSet::from_terms([FilterTerm::include("type", "File")]));
        let all = reduce(&state, &FilterAction::clear_all());
        assert!(all.filters.is_empty());
    }

    #[test]
    fn reset_to_default_replaces_filters_and_panel_modes() {
        let state = reduce(&FilterState::default(), &FilterAction::set_mode("lab", FilterMode::Exclude));
        let baseline = FilterSet::from_terms([FilterTerm::include("type", "ExperimentSetReplicate")]);
        let next = reduce(&state, &FilterAction::ResetToDefault { baseline: baseline.clone() });
        assert_eq!(next.filters, baseline);
        assert_eq!(next.active_mode("lab"), FilterMode::Include);
    }

    #[test]
    fn reduce_does_not_mutate_input() {
        let state = FilterState::new(FilterSet::from_terms([FilterTerm::include("lab", "a")]));
        let before = state.clone();
        let _ = toggle(&state, "lab", "b");
        assert_eq!(state, before);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "duplicate filter term")]
    fn corrupt_state_is_caught() {
        let mut filters = FilterSet::from_terms([FilterTerm::include("lab", "a")]);
        filters.push_unchecked(FilterTerm::exclude("lab", "a"));
        let _ = reduce(&FilterState::new(filters), &FilterAction::toggle("type", "File"));
    }

    fn arb_action() -> impl Strategy<Value = FilterAction> {
        let field = prop_oneof![Just("lab"), Just("status"), Just("type")].prop_map(str::to_string);
        let term = prop_oneof![Just("a"), Just("b"), Just("c")].prop_map(str::to_string);
        let mode = prop_oneof![Just(FilterMode::Include), Just(FilterMode::Exclude)];
        prop_oneof![
            4 => (field.clone(), term.clone()).prop_map(|(f, t)| FilterAction::Toggle { field: f, term: t }),
            2 => (field.clone(), mode).prop_map(|(f, m)| FilterAction::SetMode { field: f, mode: m }),
            1 => proptest::option::of(field).prop_map(|f| FilterAction::Clear { field: f }),
            1 => (Just("type".to_string()), term).prop_map(|(f, t)| FilterAction::ResetToDefault {
                baseline: FilterSet::from_terms([FilterTerm::include(f, t)]),
            }),
        ]
    }

    proptest! {
        #[test]
        fn no_duplicates_after_any_sequence(actions in proptest::collection::vec(arb_action(), 0..40)) {
            let mut state = FilterState::default();
            for action in &actions {
                state = reduce(&state, action);
                prop_assert!(state.filters.check_unique().is_ok());
            }
        }

        #[test]
        fn toggle_twice_is_identity(
            actions in proptest::collection::vec(arb_action(), 0..20),
            field in prop_oneof![Just("lab"), Just("status")],
            term in prop_oneof![Just("a"), Just("z")],
        ) {
            let mut state = FilterState::default();
            for action in &actions {
                state = reduce(&state, action);
            }
            let twice = toggle(&toggle(&state, field, term), field, term);
            prop_assert_eq!(twice.filters, state.filters);
        }
    }
}
