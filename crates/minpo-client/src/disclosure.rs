//! Per-card article disclosure state machine.
//!
//! Each displayed source card owns one controller; cards never share
//! state and may resolve their fetches in any order.

use crate::http::{ApiClient, ApiError};
use minpo_core::{ArticleDetail, LawSource, lookup_key};
use tracing::debug;

/// Fetch lifecycle of one card: `Idle → Loading → Loaded | Failed`,
/// with `Loaded`/`Failed → Loading` on re-trigger. A successful detail
/// is memoised for the card's lifetime; a failure is retried on the
/// next open or explicit retry.
#[derive(Debug, Clone, Default)]
pub enum FetchState {
    #[default]
    Idle,
    Loading,
    Loaded(ArticleDetail),
    Failed(String),
}

/// Token for one issued article fetch; hand the result back through
/// [`DisclosureController::apply`].
#[derive(Debug)]
pub struct FetchTicket {
    seq: u64,
    pub key: String,
}

/// State machine behind one source card's "show article" control.
#[derive(Debug)]
pub struct DisclosureController {
    key: String,
    expanded: bool,
    state: FetchState,
    seq: u64,
}

impl DisclosureController {
    /// Build a controller for one source, deriving its lookup key once.
    pub fn new(source: &LawSource) -> Self {
        Self::for_key(lookup_key(source))
    }

    pub fn for_key(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            expanded: false,
            state: FetchState::Idle,
            seq: 0,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    pub fn state(&self) -> &FetchState {
        &self.state
    }

    /// The memoised detail, if a fetch has succeeded.
    pub fn detail(&self) -> Option<&ArticleDetail> {
        match &self.state {
            FetchState::Loaded(detail) => Some(detail),
            _ => None,
        }
    }

    /// Open or close the card.
    ///
    /// Opening returns a ticket unless a successful detail is already
    /// cached; closing keeps state as-is and never cancels an in-flight
    /// fetch (its response is still applied, or discarded only if a
    /// later fetch superseded it).
    pub fn toggle(&mut self) -> Option<FetchTicket> {
        if self.expanded {
            self.expanded = false;
            return None;
        }
        self.expanded = true;
        match self.state {
            FetchState::Loaded(_) => None,
            _ => Some(self.issue()),
        }
    }

    /// Retry after a failure while the card is open.
    pub fn retry(&mut self) -> Option<FetchTicket> {
        if self.expanded && matches!(self.state, FetchState::Failed(_)) {
            Some(self.issue())
        } else {
            None
        }
    }

    fn issue(&mut self) -> FetchTicket {
        self.seq += 1;
        self.state = FetchState::Loading;
        FetchTicket {
            seq: self.seq,
            key: self.key.clone(),
        }
    }

    /// Apply a fetch outcome. A ticket that is not the most recently
    /// issued for this card is stale and dropped; returns `false` in
    /// that case.
    pub fn apply(
        &mut self,
        ticket: FetchTicket,
        result: Result<ArticleDetail, ApiError>,
    ) -> bool {
        if ticket.seq != self.seq {
            debug!(
                key = %self.key,
                seq = ticket.seq,
                current = self.seq,
                "discarding stale article response"
            );
            return false;
        }
        self.state = match result {
            Ok(detail) => FetchState::Loaded(detail),
            Err(err) => FetchState::Failed(err.to_string()),
        };
        true
    }

    /// Convenience for sequential callers: toggle, fetch, apply.
    pub async fn open(&mut self, api: &ApiClient) -> &FetchState {
        if let Some(ticket) = self.toggle() {
            let result = api.fetch_article(&ticket.key).await;
            self.apply(ticket, result);
        }
        &self.state
    }
}
