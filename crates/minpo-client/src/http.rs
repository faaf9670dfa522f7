//! HTTP client for the search and article-lookup endpoints.

use minpo_core::{AnswerPayload, ArticleDetail};
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("server returned {status}: {body}")]
    Server { status: u16, body: String },
    #[error("malformed response body: {0}")]
    Json(#[from] serde_json::Error),
}

/// Client for the backend's read-only endpoints.
///
/// The base address is injected, never assumed; responses are decoded
/// through explicit serde types so shape mismatches surface as
/// [`ApiError::Json`] instead of leaking undefined fields downstream.
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Create a client for the given backend base URL.
    ///
    /// `base_url` should be like `http://localhost:8000` (no trailing
    /// slash).
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Run a natural-language search and decode the answer payload.
    pub async fn search(&self, query: &str) -> Result<AnswerPayload, ApiError> {
        let url = format!("{}/search", self.base_url);
        info!(url = %url, query = %query, "searching");
        let resp = self
            .client
            .get(&url)
            .query(&[("query", query)])
            .send()
            .await?;
        let payload: AnswerPayload = decode(resp).await?;
        info!(
            used = payload.used_sources.len(),
            candidates = payload.sources.len(),
            "search complete"
        );
        Ok(payload)
    }

    /// Fetch the full text of one provision by lookup key.
    ///
    /// Sent with `Cache-Control: no-store`: statute text must always be
    /// current, and the only caching is the card-level memoisation in
    /// [`crate::DisclosureController`].
    pub async fn fetch_article(&self, key: &str) -> Result<ArticleDetail, ApiError> {
        let url = format!("{}/laws/civilcode", self.base_url);
        info!(url = %url, key = %key, "fetching article");
        let resp = self
            .client
            .get(&url)
            .query(&[("q", key)])
            .header(reqwest::header::CACHE_CONTROL, "no-store")
            .send()
            .await?;
        decode(resp).await
    }
}

/// Check status, then decode the body through serde so a malformed
/// body is reported as such rather than as a transport failure.
async fn decode<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, ApiError> {
    let status = resp.status();
    if !status.is_success() {
        let body = resp.text().await.unwrap_or_default();
        return Err(ApiError::Server {
            status: status.as_u16(),
            body,
        });
    }
    let body = resp.text().await?;
    Ok(serde_json::from_str(&body)?)
}
