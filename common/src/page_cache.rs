//! Loaded result pages for infinite scroll.

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::error::InvariantViolation;
use crate::search_result::ResultRow;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultPage {
    pub page_index: u32,
    pub rows: Vec<ResultRow>,
    pub fetched_at_ms: u64,
}

/// Pages fetched for one filter set and sort ("epoch").
///
/// Pages are contiguous from 0: page `n` is only accepted once `n - 1` is
/// present. [`PageCache::invalidate_all`] is the only way pages leave.
#[derive(Debug, Clone, Default)]
pub struct PageCache {
    epoch: u64,
    pages: BTreeMap<u32, ResultPage>,
    row_ids: HashSet<String>,
}

impl PageCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn get(&self, page_index: u32) -> Option<&ResultPage> {
        self.pages.get(&page_index)
    }

    pub fn contains(&self, page_index: u32) -> bool {
        self.pages.contains_key(&page_index)
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Index the next loaded page must have.
    pub fn next_page_index(&self) -> u32 {
        self.pages.len() as u32
    }

    pub fn row_count(&self) -> usize {
        self.pages.values().map(|p| p.rows.len()).sum()
    }

    pub fn rows(&self) -> impl Iterator<Item = &ResultRow> {
        self.pages.values().flat_map(|p| p.rows.iter())
    }

    /// Stores the next page. Rows already seen on an earlier page are dropped.
    pub fn put(&mut self, mut page: ResultPage) -> Result<(), InvariantViolation> {
        let expected = self.next_page_index();
        if page.page_index != expected {
            return Err(InvariantViolation::PageOutOfOrder { page_index: page.page_index, expected });
        }
        let before = page.rows.len();
        let mut seen = HashSet::new();
        page.rows.retain(|row| !self.row_ids.contains(&row.row_id) && seen.insert(row.row_id.clone()));
        if page.rows.len() < before {
            tracing::warn!(
                "page {} repeated {} row(s) already loaded, dropping them",
                page.page_index,
                before - page.rows.len()
            );
        }
        self.row_ids.extend(seen);
        self.pages.insert(page.page_index, page);
        Ok(())
    }

    /// Drops every page and starts a new epoch.
    pub fn invalidate_all(&mut self) {
        self.pages.clear();
        self.row_ids.clear();
        self.epoch += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(page_index: u32, ids: &[&str]) -> ResultPage {
        ResultPage { page_index, rows: ids.iter().map(|id| ResultRow::new(*id)).collect(), fetched_at_ms: 0 }
    }

    #[test]
    fn pages_must_be_contiguous() {
        let mut cache = PageCache::new();
        assert_eq!(cache.put(page(1, &["b"])), Err(InvariantViolation::PageOutOfOrder { page_index: 1, expected: 0 }));
        assert!(cache.is_empty());
        cache.put(page(0, &["a"])).unwrap();
        assert_eq!(cache.put(page(0, &["a"])), Err(InvariantViolation::PageOutOfOrder { page_index: 0, expected: 1 }));
        cache.put(page(1, &["b"])).unwrap();
        assert_eq!(cache.next_page_index(), 2);
        assert_eq!(cache.rows().map(|r| r.row_id.as_str()).collect::<Vec<_>>(), vec!["a", "b"]);
    }

    #[test]
    fn repeated_rows_are_dropped() {
        let mut cache = PageCache::new();
        cache.put(page(0, &["a", "b"])).unwrap();
        cache.put(page(1, &["b", "c", "c"])).unwrap();
        assert_eq!(cache.row_count(), 3);
        assert_eq!(cache.get(1).unwrap().rows.len(), 1);
    }

    #[test]
    fn invalidate_clears_and_bumps_epoch() {
        let mut cache = PageCache::new();
        cache.put(page(0, &["a"])).unwrap();
        let epoch = cache.epoch();
        cache.invalidate_all();
        assert!(cache.is_empty());
        assert_eq!(cache.epoch(), epoch + 1);
        cache.put(page(0, &["a"])).unwrap();
        assert_eq!(cache.row_count(), 1);
    }
}
