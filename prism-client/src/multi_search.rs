//! Multi-search operations
//!
//! Three ways to run a multi-search, each with its own success criterion:
//!
//! - [`MultiSearch::perform`]: per-search results, success means a decoded
//!   JSON 200 payload.
//! - [`MultiSearch::perform_union`]: one merged result set, success means a
//!   2xx status.
//! - [`MultiSearch::perform_with_content_type`]: caller-chosen content type,
//!   success means the response carried a body.

use crate::error::{ClientError, Result};
use crate::transport::{ApiClient, BodyStream, MultiSearchResponse, RawResponse};
use crate::types::{MultiSearchParams, MultiSearchResult, SearchRequestList, SearchResult};
use bytes::{Bytes, BytesMut};
use futures::TryStreamExt;
use std::future::Future;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Multi-search operations over an [`ApiClient`]
#[derive(Clone)]
pub struct MultiSearch {
    api: Arc<dyn ApiClient>,
}

impl MultiSearch {
    pub fn new(api: Arc<dyn ApiClient>) -> Self {
        Self { api }
    }

    /// Run every search and return one result set per search.
    ///
    /// `requests.union` must not be `true`; use [`perform_union`](Self::perform_union).
    pub async fn perform(
        &self,
        cancel: &CancellationToken,
        common: &MultiSearchParams,
        requests: &SearchRequestList,
    ) -> Result<MultiSearchResult> {
        if requests.union == Some(true) {
            return Err(ClientError::Usage(
                "union must be false for perform; use perform_union".to_string(),
            ));
        }

        debug!(searches = requests.searches.len(), "multi_search perform");
        let response = cancellable(
            cancel,
            self.api.multi_search_with_response(common, requests),
        )
        .await?;

        match response.json200 {
            Some(result) => Ok(result),
            None => Err(ClientError::http(response.status, response.body)),
        }
    }

    /// Run every search and merge the hits into one ranked result set.
    ///
    /// The request is always sent with `union = true`; `requests` itself is
    /// left unchanged. `requests.union` must not be `false`.
    pub async fn perform_union(
        &self,
        cancel: &CancellationToken,
        common: &MultiSearchParams,
        requests: &SearchRequestList,
    ) -> Result<SearchResult> {
        if requests.union == Some(false) {
            return Err(ClientError::Usage(
                "union must be true for perform_union".to_string(),
            ));
        }
        let requests = requests.with_union(true);

        debug!(searches = requests.searches.len(), "multi_search perform_union");
        cancellable(cancel, self.send_union(common, &requests)).await
    }

    async fn send_union(
        &self,
        common: &MultiSearchParams,
        requests: &SearchRequestList,
    ) -> Result<SearchResult> {
        let RawResponse { status, body, .. } = self.api.multi_search(common, requests).await?;

        // Consumes the stream, so it is released before any of the checks below
        let body = read_body(body).await?;

        if !(200..300).contains(&status) {
            return Err(ClientError::Http { status, body });
        }

        serde_json::from_slice(&body).map_err(ClientError::Decode)
    }

    /// Send the searches with a caller-chosen `Content-Type` and return the
    /// response without interpreting it.
    pub async fn perform_with_content_type(
        &self,
        cancel: &CancellationToken,
        common: &MultiSearchParams,
        requests: &SearchRequestList,
        content_type: &str,
    ) -> Result<MultiSearchResponse> {
        let body = Bytes::from(serde_json::to_vec(requests).map_err(ClientError::Encode)?);

        debug!(
            searches = requests.searches.len(),
            content_type, "multi_search perform_with_content_type"
        );
        let response = cancellable(
            cancel,
            self.api.multi_search_with_body_with_response(common, content_type, body),
        )
        .await?;

        if response.body.is_none() {
            return Err(ClientError::http(response.status, None));
        }
        Ok(response)
    }
}

impl std::fmt::Debug for MultiSearch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MultiSearch").finish_non_exhaustive()
    }
}

/// Race `fut` against the cancellation token
async fn cancellable<T>(
    cancel: &CancellationToken,
    fut: impl Future<Output = Result<T>>,
) -> Result<T> {
    tokio::select! {
        biased;
        _ = cancel.cancelled() => Err(ClientError::Cancelled),
        result = fut => result,
    }
}

/// Read a body stream to the end, releasing it afterwards
async fn read_body(mut body: BodyStream) -> Result<Bytes> {
    let mut buf = BytesMut::new();
    while let Some(chunk) = body.try_next().await? {
        buf.extend_from_slice(&chunk);
    }
    Ok(buf.freeze())
}
