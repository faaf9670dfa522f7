//! Client for the minpo search backend: the HTTP surface plus the
//! query and per-card disclosure state machines that sit on top of it.
//!
//! Controllers are plain `&mut self` state machines. Network calls are
//! issued by whoever holds a ticket from `begin`/`toggle`, and results
//! re-enter through `apply`, which discards anything superseded in the
//! meantime. That keeps the machines deterministic no matter in which
//! order responses land.

pub mod disclosure;
pub mod http;
pub mod query;

pub use disclosure::{DisclosureController, FetchState, FetchTicket};
pub use http::{ApiClient, ApiError};
pub use query::{QueryController, SearchState, SearchTicket};
