//! Transport abstraction for the multi-search endpoint
//!
//! [`ApiClient`] is the seam between [`MultiSearch`](crate::MultiSearch) and
//! the wire. [`HttpTransport`] is the reqwest-backed implementation; tests
//! and embedders can supply their own.

mod http;

pub use http::{HttpTransport, API_KEY_HEADER};

use crate::error::Result;
use crate::types::{MultiSearchParams, MultiSearchResult, SearchRequestList};
use async_trait::async_trait;
use bytes::Bytes;
use futures::Stream;
use reqwest::header::HeaderMap;
use std::pin::Pin;

/// Response body that has not been read yet. Dropping it releases the
/// underlying connection.
pub type BodyStream = Pin<Box<dyn Stream<Item = std::io::Result<Bytes>> + Send>>;

/// Response decoded as far as status, headers and (for a JSON 200) the
/// per-search results
#[derive(Debug, Clone, Default)]
pub struct MultiSearchResponse {
    pub status: u16,
    pub headers: HeaderMap,
    pub body: Option<Bytes>,
    pub json200: Option<MultiSearchResult>,
}

/// Response whose body is still an open stream
pub struct RawResponse {
    pub status: u16,
    pub headers: HeaderMap,
    pub body: BodyStream,
}

impl std::fmt::Debug for RawResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RawResponse")
            .field("status", &self.status)
            .field("headers", &self.headers)
            .finish_non_exhaustive()
    }
}

/// Multi-search transport primitives
#[async_trait]
pub trait ApiClient: Send + Sync {
    /// Send `body` as JSON and decode a 200 response into `json200`
    async fn multi_search_with_response(
        &self,
        common: &MultiSearchParams,
        body: &SearchRequestList,
    ) -> Result<MultiSearchResponse>;

    /// Send `body` as JSON and hand back the unread response
    async fn multi_search(
        &self,
        common: &MultiSearchParams,
        body: &SearchRequestList,
    ) -> Result<RawResponse>;

    /// Send a pre-encoded body with an explicit content type. A 200 body that
    /// does not decode as per-search results leaves `json200` empty.
    async fn multi_search_with_body_with_response(
        &self,
        common: &MultiSearchParams,
        content_type: &str,
        body: Bytes,
    ) -> Result<MultiSearchResponse>;
}
