//! Facet lists reconciled with the active filters.

use serde::{Deserialize, Serialize};

use crate::filter::{FilterMode, FilterSet};
use crate::search_result::Facet;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacetTermView {
    pub key: String,
    pub doc_count: u64,
    pub selected: Option<FilterMode>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacetView {
    pub field: String,
    pub title: String,
    pub terms: Vec<FacetTermView>,
}

impl FacetView {
    pub fn has_selection(&self) -> bool {
        self.terms.iter().any(|t| t.selected.is_some())
    }
}

/// Annotates facet terms with their filter mode.
///
/// Selected terms the API did not return are appended with a zero count, so
/// they stay visible and can be deselected. Selected fields with no facet at
/// all get a facet of their own.
pub fn reconcile_facets(facets: &[Facet], filters: &FilterSet) -> Vec<FacetView> {
    let mut views = facets
        .iter()
        .map(|facet| {
            let mut terms = facet
                .terms
                .iter()
                .map(|t| FacetTermView {
                    key: t.key.clone(),
                    doc_count: t.doc_count,
                    selected: filters.mode_of(&facet.field, &t.key),
                })
                .collect::<Vec<_>>();
            for selected in filters.terms_for(&facet.field) {
                if !terms.iter().any(|t| t.key == selected.term) {
                    terms.push(FacetTermView { key: selected.term.clone(), doc_count: 0, selected: Some(selected.mode) });
                }
            }
            FacetView { field: facet.field.clone(), title: facet.title().to_string(), terms }
        })
        .collect::<Vec<_>>();

    for field in filters.fields() {
        if views.iter().any(|v| v.field == field) {
            continue;
        }
        let terms = filters
            .terms_for(field)
            .map(|t| FacetTermView { key: t.term.clone(), doc_count: 0, selected: Some(t.mode) })
            .collect();
        views.push(FacetView { field: field.to_string(), title: field.to_string(), terms });
    }
    views
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::FilterTerm;
    use crate::search_result::FacetTerm;

    fn facet(field: &str, terms: &[(&str, u64)]) -> Facet {
        Facet {
            field: field.to_string(),
            title: None,
            total: terms.iter().map(|(_, c)| c).sum(),
            terms: terms.iter().map(|(k, c)| FacetTerm { key: k.to_string(), doc_count: *c }).collect(),
        }
    }

    #[test]
    fn selected_terms_missing_from_response_are_kept() {
        let facets = [facet("lab.display_title", &[("Dekker", 40), ("Ren", 12)])];
        let filters = FilterSet::from_terms([
            FilterTerm::include("lab.display_title", "Ren"),
            FilterTerm::exclude("lab.display_title", "Bing"),
            FilterTerm::include("type", "ExperimentSetReplicate"),
        ]);
        let views = reconcile_facets(&facets, &filters);
        assert_eq!(views.len(), 2);

        let lab = &views[0];
        assert_eq!(lab.terms.len(), 3);
        assert_eq!(lab.terms[0].selected, None);
        assert_eq!(lab.terms[1].selected, Some(FilterMode::Include));
        assert_eq!(lab.terms[2], FacetTermView { key: "Bing".into(), doc_count: 0, selected: Some(FilterMode::Exclude) });

        let type_view = &views[1];
        assert_eq!(type_view.field, "type");
        assert!(type_view.has_selection());
    }
}
