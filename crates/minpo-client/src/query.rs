//! Top-level search state machine.

use crate::http::{ApiClient, ApiError};
use minpo_core::AnswerPayload;
use tracing::debug;

/// Where the current search stands. `Loading` replaces any earlier
/// result the moment a new search is issued, so stale results are never
/// shown next to a spinner.
#[derive(Debug, Clone, Default)]
pub enum SearchState {
    #[default]
    Idle,
    Loading,
    Ready(AnswerPayload),
    Failed(String),
}

/// Token for one issued search. Feed the fetch result back through
/// [`QueryController::apply`]; a ticket older than the latest `begin`
/// is discarded there.
#[derive(Debug)]
pub struct SearchTicket {
    seq: u64,
    pub query: String,
}

/// Owns the lifecycle of one search at a time. A new `begin` supersedes
/// any outstanding one: the older response is ignored on arrival, the
/// transport request itself is not aborted.
#[derive(Debug, Default)]
pub struct QueryController {
    state: SearchState,
    seq: u64,
}

impl QueryController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &SearchState {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, SearchState::Loading)
    }

    /// Issue a search. Blank queries are a no-op (no request, no state
    /// change) and return `None`. Otherwise prior results are cleared
    /// immediately and a ticket for the new request is returned.
    pub fn begin(&mut self, query: &str) -> Option<SearchTicket> {
        let query = query.trim();
        if query.is_empty() {
            return None;
        }
        self.seq += 1;
        self.state = SearchState::Loading;
        Some(SearchTicket {
            seq: self.seq,
            query: query.to_string(),
        })
    }

    /// Apply the outcome of a ticket's request. Returns `false` when
    /// the ticket was superseded by a later `begin`, in which case the
    /// result is dropped without touching visible state.
    pub fn apply(
        &mut self,
        ticket: SearchTicket,
        result: Result<AnswerPayload, ApiError>,
    ) -> bool {
        if ticket.seq != self.seq {
            debug!(seq = ticket.seq, current = self.seq, "discarding stale search response");
            return false;
        }
        self.state = match result {
            Ok(payload) => SearchState::Ready(payload),
            Err(err) => SearchState::Failed(err.to_string()),
        };
        true
    }

    /// Convenience for sequential callers: begin, fetch, apply.
    pub async fn run(&mut self, api: &ApiClient, query: &str) -> &SearchState {
        if let Some(ticket) = self.begin(query) {
            let result = api.search(&ticket.query).await;
            self.apply(ticket, result);
        }
        &self.state
    }
}
