//! Search session: the state behind one search view.
//!
//! The session never performs I/O. Operations that need results return a
//! [`FetchRequest`]; whoever runs the request hands the outcome back through
//! [`SearchSession::complete`]. Every request carries a sequence number and
//! only the most recently issued one is honored, whatever order responses
//! arrive in.

use serde::{Deserialize, Serialize};

use crate::aggregation::{self, AggregationBucket, ChartBar};
use crate::config::ChartConfig;
use crate::error::{FetchError, InvariantViolation, invariant_violated};
use crate::facets::{FacetView, reconcile_facets};
use crate::filter::FilterSet;
use crate::page_cache::{PageCache, ResultPage};
use crate::query_model::{api_query, diff};
use crate::reducer::{FilterAction, FilterState, reduce};
use crate::search_const::PAGE_SIZE;
use crate::search_query::{SearchParams, SortSpec};
use crate::search_result::{Facet, ResultRow, SearchResponse};

/// Identifies one issued request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RequestTicket {
    pub seq: u64,
    pub epoch: u64,
    pub page_index: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchRequest {
    pub ticket: RequestTicket,
    pub params: SearchParams,
    pub from: u64,
    pub limit: u32,
}

impl FetchRequest {
    /// Query string for the search API.
    pub fn query_string(&self) -> String {
        api_query(&self.params, self.from, self.limit)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompletionOutcome {
    Applied,
    /// A newer request was issued after this one; the response was ignored.
    StaleDiscarded,
    /// The request failed; the previous rows and buckets are still shown.
    Failed(FetchError),
    /// Applying the response would have broken the page cache; it was ignored.
    Rejected(InvariantViolation),
}

#[derive(Debug, Clone)]
pub struct SearchSession {
    state: FilterState,
    text_query: Option<String>,
    sort: Option<SortSpec>,
    limit: Option<u32>,
    chart: ChartConfig,
    total_count: u64,
    buckets: Vec<AggregationBucket>,
    facets: Vec<Facet>,
    pages: PageCache,
    next_seq: u64,
    in_flight: Option<RequestTicket>,
    last_failed: Option<RequestTicket>,
    last_error: Option<FetchError>,
}

impl SearchSession {
    /// A session with nothing loaded yet. Call [`SearchSession::refresh`] to load page 0.
    pub fn new(params: SearchParams, chart: ChartConfig) -> Self {
        Self {
            state: FilterState::new(params.filters),
            text_query: params.text_query,
            sort: params.sort,
            limit: params.limit,
            chart,
            total_count: 0,
            buckets: Vec::new(),
            facets: Vec::new(),
            pages: PageCache::new(),
            next_seq: 1,
            in_flight: None,
            last_failed: None,
            last_error: None,
        }
    }

    pub fn params(&self) -> SearchParams {
        SearchParams {
            filters: self.state.filters.clone(),
            text_query: self.text_query.clone(),
            sort: self.sort.clone(),
            limit: self.limit,
        }
    }

    pub fn filters(&self) -> &FilterSet {
        &self.state.filters
    }

    pub fn filter_state(&self) -> &FilterState {
        &self.state
    }

    pub fn sort(&self) -> Option<&SortSpec> {
        self.sort.as_ref()
    }

    pub fn page_size(&self) -> u32 {
        self.limit.unwrap_or(PAGE_SIZE)
    }

    pub fn chart_config(&self) -> &ChartConfig {
        &self.chart
    }

    pub fn total_count(&self) -> u64 {
        self.total_count
    }

    pub fn buckets(&self) -> &[AggregationBucket] {
        &self.buckets
    }

    pub fn bars(&self) -> Vec<ChartBar> {
        aggregation::bars(&self.buckets, &self.state.filters, &self.chart)
    }

    pub fn facets(&self) -> Vec<FacetView> {
        reconcile_facets(&self.facets, &self.state.filters)
    }

    pub fn pages(&self) -> &PageCache {
        &self.pages
    }

    pub fn rows(&self) -> impl Iterator<Item = &ResultRow> {
        self.pages.rows()
    }

    pub fn epoch(&self) -> u64 {
        self.pages.epoch()
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn last_error(&self) -> Option<&FetchError> {
        self.last_error.as_ref()
    }

    /// Whether the API has rows beyond the loaded pages.
    pub fn has_more(&self) -> bool {
        !self.pages.is_empty() && u64::from(self.pages.next_page_index()) * u64::from(self.page_size()) < self.total_count
    }

    fn issue(&mut self, page_index: u32) -> FetchRequest {
        let ticket = RequestTicket { seq: self.next_seq, epoch: self.pages.epoch(), page_index };
        self.next_seq += 1;
        self.in_flight = Some(ticket);
        let limit = self.page_size();
        tracing::info!("issuing search request seq={} epoch={} page={}", ticket.seq, ticket.epoch, page_index);
        FetchRequest { ticket, params: self.params(), from: u64::from(page_index) * u64::from(limit), limit }
    }

    fn start_epoch(&mut self) -> FetchRequest {
        self.pages.invalidate_all();
        self.last_failed = None;
        self.issue(0)
    }

    /// Drops loaded pages and requests page 0 again.
    pub fn refresh(&mut self) -> FetchRequest {
        self.start_epoch()
    }

    /// Re-issues the request that last failed. Returns None while another request
    /// is in flight, since that one supersedes the failure.
    pub fn retry(&mut self) -> Option<FetchRequest> {
        if self.in_flight.is_some() {
            return None;
        }
        let failed = self.last_failed.take()?;
        if failed.epoch != self.pages.epoch() || failed.page_index == 0 {
            return Some(self.start_epoch());
        }
        self.request_page(failed.page_index)
    }

    /// Adopts URL state. Returns a request only if the search changed.
    pub fn sync_params(&mut self, params: SearchParams) -> Option<FetchRequest> {
        let unchanged = diff(&self.state.filters, &params.filters).is_empty()
            && self.text_query == params.text_query
            && self.sort == params.sort
            && self.limit == params.limit;
        if unchanged {
            return None;
        }
        self.state = FilterState::new(params.filters);
        self.text_query = params.text_query;
        self.sort = params.sort;
        self.limit = params.limit;
        Some(self.start_epoch())
    }

    pub fn dispatch(&mut self, action: &FilterAction) -> Option<FetchRequest> {
        let next = reduce(&self.state, action);
        let changed = !diff(&self.state.filters, &next.filters).is_empty();
        self.state = next;
        changed.then(|| self.start_epoch())
    }

    pub fn set_sort(&mut self, sort: Option<SortSpec>) -> Option<FetchRequest> {
        if self.sort == sort {
            return None;
        }
        self.sort = sort;
        Some(self.start_epoch())
    }

    pub fn set_text_query(&mut self, text_query: Option<String>) -> Option<FetchRequest> {
        let text_query = text_query.filter(|q| !q.trim().is_empty());
        if self.text_query == text_query {
            return None;
        }
        self.text_query = text_query;
        Some(self.start_epoch())
    }

    /// Requests the page after the last loaded one.
    pub fn load_more(&mut self) -> Option<FetchRequest> {
        if !self.has_more() {
            return None;
        }
        self.request_page(self.pages.next_page_index())
    }

    /// Requests a page of the current epoch. Refused unless the previous page is loaded
    /// and this one is not.
    pub fn request_page(&mut self, page_index: u32) -> Option<FetchRequest> {
        if page_index == 0 {
            return Some(self.start_epoch());
        }
        if !self.pages.contains(page_index - 1) {
            tracing::debug!("refusing to load page {page_index}: page {} is not loaded", page_index - 1);
            return None;
        }
        if self.pages.contains(page_index) {
            return None;
        }
        Some(self.issue(page_index))
    }

    /// Applies the outcome of a request issued by this session.
    pub fn complete(
        &mut self,
        ticket: RequestTicket,
        result: Result<SearchResponse, FetchError>,
        fetched_at_ms: u64,
    ) -> CompletionOutcome {
        if self.in_flight != Some(ticket) || ticket.epoch != self.pages.epoch() {
            tracing::debug!("discarding stale response seq={} (latest {:?})", ticket.seq, self.in_flight.map(|t| t.seq));
            return CompletionOutcome::StaleDiscarded;
        }
        self.in_flight = None;

        let response = match result {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!("search request seq={} failed: {e}", ticket.seq);
                self.last_error = Some(e.clone());
                self.last_failed = Some(ticket);
                return CompletionOutcome::Failed(e);
            }
        };

        let expected = self.pages.next_page_index();
        if ticket.page_index != expected {
            let violation = InvariantViolation::PageOutOfOrder { page_index: ticket.page_index, expected };
            invariant_violated(&violation);
            return CompletionOutcome::Rejected(violation);
        }

        let SearchResponse { graph, facets, total, aggregations } = response;
        let row_count = graph.len();
        if let Err(violation) = self.pages.put(ResultPage { page_index: ticket.page_index, rows: graph, fetched_at_ms }) {
            invariant_violated(&violation);
            return CompletionOutcome::Rejected(violation);
        }
        self.total_count = total;
        if ticket.page_index == 0 || aggregations.is_some() {
            self.buckets = aggregation::reconcile(&aggregations.unwrap_or_default(), &self.chart);
        }
        if ticket.page_index == 0 || !facets.is_empty() {
            self.facets = facets;
        }
        self.last_error = None;
        self.last_failed = None;
        tracing::info!("applied search response seq={} page={} rows={row_count} total={total}", ticket.seq, ticket.page_index);
        CompletionOutcome::Applied
    }
}
