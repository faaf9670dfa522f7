//! Core types and pure logic for the minpo civil-code search client:
//! answer payloads, source reconciliation, and article lookup keys.

pub mod article_key;
pub mod payload;
pub mod reconcile;

pub use article_key::lookup_key;
pub use payload::{AnswerPayload, ArticleDetail, LawSource};
pub use reconcile::{Reconciled, reconcile};
