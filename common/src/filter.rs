//! Filter terms and filter sets.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::error::InvariantViolation;
use crate::search_const::is_reserved_key;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
pub enum FilterMode {
    #[default]
    Include,
    Exclude,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FilterTerm {
    pub field: String,
    pub term: String,
    pub mode: FilterMode,
}

impl FilterTerm {
    pub fn new(field: impl Into<String>, term: impl Into<String>, mode: FilterMode) -> Self {
        Self { field: field.into(), term: term.into(), mode }
    }
    pub fn include(field: impl Into<String>, term: impl Into<String>) -> Self {
        Self::new(field, term, FilterMode::Include)
    }
    pub fn exclude(field: impl Into<String>, term: impl Into<String>) -> Self {
        Self::new(field, term, FilterMode::Exclude)
    }

    fn key(&self) -> (&str, &str) {
        (&self.field, &self.term)
    }
}

/// Active filter selections.
///
/// Holds at most one term per `(field, term)` pair, and never a term on a
/// reserved URL key such as `sort` or `q`. Insertion order is kept but has no
/// meaning: two sets are equal when they hold the same terms.
///
/// Serialized as a plain list of terms; deserializing goes through
/// [`FilterSet::from_terms`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "Vec<FilterTerm>", into = "Vec<FilterTerm>")]
pub struct FilterSet {
    terms: Vec<FilterTerm>,
}

impl FilterSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a set, keeping the first occurrence of each `(field, term)`.
    pub fn from_terms(terms: impl IntoIterator<Item = FilterTerm>) -> Self {
        let mut set = Self::new();
        for term in terms {
            set.insert(term);
        }
        set
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FilterTerm> {
        self.terms.iter()
    }

    pub fn get(&self, field: &str, term: &str) -> Option<&FilterTerm> {
        self.terms.iter().find(|t| t.key() == (field, term))
    }

    pub fn contains(&self, field: &str, term: &str) -> bool {
        self.get(field, term).is_some()
    }

    pub fn mode_of(&self, field: &str, term: &str) -> Option<FilterMode> {
        self.get(field, term).map(|t| t.mode)
    }

    pub fn terms_for<'a>(&'a self, field: &'a str) -> impl Iterator<Item = &'a FilterTerm> + 'a {
        self.terms.iter().filter(move |t| t.field == field)
    }

    /// Distinct fields in canonical order.
    pub fn fields(&self) -> BTreeSet<&str> {
        self.terms.iter().map(|t| t.field.as_str()).collect()
    }

    /// Adds a term. Returns false (and changes nothing) if `(field, term)` is already
    /// present or the field is a reserved URL key.
    pub fn insert(&mut self, term: FilterTerm) -> bool {
        if is_reserved_key(&term.field) {
            tracing::debug!("refusing filter on reserved key {}={}", term.field, term.term);
            return false;
        }
        if self.contains(&term.field, &term.term) {
            return false;
        }
        self.terms.push(term);
        true
    }

    pub fn remove(&mut self, field: &str, term: &str) -> Option<FilterTerm> {
        let pos = self.terms.iter().position(|t| t.key() == (field, term))?;
        Some(self.terms.remove(pos))
    }

    /// Re-tags every term of `field`. Returns how many terms changed mode.
    pub fn set_field_mode(&mut self, field: &str, mode: FilterMode) -> usize {
        let mut changed = 0;
        for t in self.terms.iter_mut().filter(|t| t.field == field) {
            if t.mode != mode {
                t.mode = mode;
                changed += 1;
            }
        }
        changed
    }

    pub fn clear_field(&mut self, field: &str) {
        self.terms.retain(|t| t.field != field);
    }

    pub fn clear(&mut self) {
        self.terms.clear();
    }

    /// Terms in canonical `(field, term)` order.
    pub fn canonical(&self) -> Vec<&FilterTerm> {
        let mut terms = self.terms.iter().collect::<Vec<_>>();
        terms.sort_by(|a, b| a.key().cmp(&b.key()));
        terms
    }

    /// Checks the one-term-per-`(field, term)` invariant.
    pub fn check_unique(&self) -> Result<(), InvariantViolation> {
        let mut seen = BTreeSet::new();
        for t in &self.terms {
            if !seen.insert(t.key()) {
                return Err(InvariantViolation::DuplicateTerm { field: t.field.clone(), term: t.term.clone() });
            }
        }
        Ok(())
    }

    /// Pushes without the duplicate check. Only for exercising invariant handling.
    #[cfg(test)]
    pub(crate) fn push_unchecked(&mut self, term: FilterTerm) {
        self.terms.push(term);
    }
}

impl PartialEq for FilterSet {
    fn eq(&self, other: &Self) -> bool {
        self.canonical() == other.canonical()
    }
}

impl Eq for FilterSet {}

impl FromIterator<FilterTerm> for FilterSet {
    fn from_iter<I: IntoIterator<Item = FilterTerm>>(iter: I) -> Self {
        Self::from_terms(iter)
    }
}

impl From<Vec<FilterTerm>> for FilterSet {
    fn from(terms: Vec<FilterTerm>) -> Self {
        Self::from_terms(terms)
    }
}

impl From<FilterSet> for Vec<FilterTerm> {
    fn from(set: FilterSet) -> Self {
        set.terms
    }
}

impl<'a> IntoIterator for &'a FilterSet {
    type Item = &'a FilterTerm;
    type IntoIter = std::slice::Iter<'a, FilterTerm>;

    fn into_iter(self) -> Self::IntoIter {
        self.terms.iter()
    }
}
