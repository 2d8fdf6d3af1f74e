//! Single-task event loop around a [`SearchSession`].
//!
//! Fetches run concurrently inside one `FuturesUnordered`, but only the
//! driver touches the session, one completion at a time. No locks.

use std::{
    rc::Rc,
    time::{SystemTime, UNIX_EPOCH},
};

use common::{
    error::FetchError,
    reducer::FilterAction,
    search_query::{SearchParams, SortSpec},
    search_result::SearchResponse,
    session::{CompletionOutcome, FetchRequest, RequestTicket, SearchSession},
};
use futures::{StreamExt, future::LocalBoxFuture, stream::FuturesUnordered};

use crate::{api::SearchApi, fetcher::ResultFetcher};

type Completion = (RequestTicket, Result<SearchResponse, FetchError>);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DriverEvent {
    pub ticket: RequestTicket,
    pub outcome: CompletionOutcome,
}

pub struct SearchDriver<A> {
    session: SearchSession,
    fetcher: Rc<ResultFetcher<A>>,
    in_flight: FuturesUnordered<LocalBoxFuture<'static, Completion>>,
}

pub fn now_ms() -> u64 {
    SystemTime::now().duration_since(UNIX_EPOCH).map(|d| d.as_millis() as u64).unwrap_or(0)
}

impl<A: SearchApi + 'static> SearchDriver<A> {
    pub fn new(session: SearchSession, fetcher: ResultFetcher<A>) -> Self {
        Self { session, fetcher: Rc::new(fetcher), in_flight: FuturesUnordered::new() }
    }

    pub fn session(&self) -> &SearchSession {
        &self.session
    }

    /// Requests still on the wire, superseded ones included.
    pub fn pending(&self) -> usize {
        self.in_flight.len()
    }

    fn spawn(&mut self, request: Option<FetchRequest>) -> Option<RequestTicket> {
        let request = request?;
        let ticket = request.ticket;
        let fetcher = self.fetcher.clone();
        self.in_flight.push(Box::pin(async move {
            let result = fetcher.fetch(&request).await;
            (request.ticket, result)
        }));
        Some(ticket)
    }

    pub fn refresh(&mut self) -> RequestTicket {
        let request = self.session.refresh();
        let ticket = request.ticket;
        self.spawn(Some(request));
        ticket
    }

    pub fn dispatch(&mut self, action: &FilterAction) -> Option<RequestTicket> {
        let request = self.session.dispatch(action);
        self.spawn(request)
    }

    pub fn sync_params(&mut self, params: SearchParams) -> Option<RequestTicket> {
        let request = self.session.sync_params(params);
        self.spawn(request)
    }

    pub fn set_sort(&mut self, sort: Option<SortSpec>) -> Option<RequestTicket> {
        let request = self.session.set_sort(sort);
        self.spawn(request)
    }

    pub fn load_more(&mut self) -> Option<RequestTicket> {
        let request = self.session.load_more();
        self.spawn(request)
    }

    pub fn retry(&mut self) -> Option<RequestTicket> {
        let request = self.session.retry();
        self.spawn(request)
    }

    /// Waits for the next fetch to finish and applies it. `None` once nothing is in flight.
    pub async fn next_event(&mut self) -> Option<DriverEvent> {
        let (ticket, result) = self.in_flight.next().await?;
        let outcome = self.session.complete(ticket, result, now_ms());
        Some(DriverEvent { ticket, outcome })
    }

    /// Runs until every in-flight fetch has completed.
    pub async fn settle(&mut self) -> Vec<DriverEvent> {
        let mut events = Vec::new();
        while let Some(event) = self.next_event().await {
            events.push(event);
        }
        events
    }

    pub fn into_session(self) -> SearchSession {
        self.session
    }
}
