//! reqwest-backed transport

use super::{ApiClient, MultiSearchResponse, RawResponse};
use crate::config::ClientConfig;
use crate::error::{ClientError, Result};
use crate::types::{MultiSearchParams, SearchRequestList};
use async_trait::async_trait;
use bytes::Bytes;
use futures::TryStreamExt;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::{Client, RequestBuilder, Response};
use tracing::debug;

/// Header carrying the API key on every request
pub const API_KEY_HEADER: &str = "x-typesense-api-key";

/// HTTP transport for a single search server
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    url: String,
}

impl HttpTransport {
    /// Build a transport from configuration
    pub fn new(config: &ClientConfig) -> Result<Self> {
        if config.api_key.is_empty() {
            return Err(ClientError::Config("api_key must not be empty".to_string()));
        }

        let base = url::Url::parse(&config.server_url)?;
        if base.cannot_be_a_base() {
            return Err(ClientError::Config(format!(
                "server_url '{}' is not a base URL",
                config.server_url
            )));
        }

        let mut headers = HeaderMap::new();
        let mut key = HeaderValue::from_str(&config.api_key)
            .map_err(|e| ClientError::Config(format!("Invalid api_key: {}", e)))?;
        key.set_sensitive(true);
        headers.insert(API_KEY_HEADER, key);

        let client = Client::builder()
            .default_headers(headers)
            .connect_timeout(config.connect_timeout())
            .timeout(config.request_timeout())
            .build()?;

        Ok(Self {
            client,
            url: base.as_str().trim_end_matches('/').to_string(),
        })
    }

    /// Base URL without trailing slash
    pub fn url(&self) -> &str {
        &self.url
    }

    fn request(&self, common: &MultiSearchParams) -> RequestBuilder {
        self.client
            .post(format!("{}/multi_search", self.url))
            .query(&common.to_query_pairs())
    }

    /// Read the whole body and decode a JSON 200 into `json200`.
    ///
    /// With `strict` unset a body that does not decode leaves `json200` empty
    /// instead of failing the call.
    async fn read_response(response: Response, strict: bool) -> Result<MultiSearchResponse> {
        let status = response.status().as_u16();
        let headers = response.headers().clone();
        let body = response.bytes().await?;
        debug!("multi_search responded with {} ({} bytes)", status, body.len());

        let is_json = headers
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|ct| ct.contains("json"));

        let json200 = if status == 200 && is_json {
            match serde_json::from_slice(&body) {
                Ok(result) => Some(result),
                Err(e) if strict => return Err(ClientError::Decode(e)),
                Err(_) => None,
            }
        } else {
            None
        };

        Ok(MultiSearchResponse {
            status,
            headers,
            body: Some(body),
            json200,
        })
    }
}

#[async_trait]
impl ApiClient for HttpTransport {
    async fn multi_search_with_response(
        &self,
        common: &MultiSearchParams,
        body: &SearchRequestList,
    ) -> Result<MultiSearchResponse> {
        let response = self.request(common).json(body).send().await?;
        Self::read_response(response, true).await
    }

    async fn multi_search(
        &self,
        common: &MultiSearchParams,
        body: &SearchRequestList,
    ) -> Result<RawResponse> {
        let response = self.request(common).json(body).send().await?;
        let status = response.status().as_u16();
        let headers = response.headers().clone();
        debug!("multi_search responded with {} (streaming)", status);

        let stream = response.bytes_stream().map_err(std::io::Error::other);

        Ok(RawResponse {
            status,
            headers,
            body: Box::pin(stream),
        })
    }

    async fn multi_search_with_body_with_response(
        &self,
        common: &MultiSearchParams,
        content_type: &str,
        body: Bytes,
    ) -> Result<MultiSearchResponse> {
        let response = self
            .request(common)
            .header(CONTENT_TYPE, content_type)
            .body(body)
            .send()
            .await?;
        Self::read_response(response, false).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(url: &str, key: &str) -> ClientConfig {
        ClientConfig {
            server_url: url.to_string(),
            api_key: key.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_trailing_slash_trimmed() {
        let transport = HttpTransport::new(&config("http://localhost:8108/", "xyz")).unwrap();
        assert_eq!(transport.url(), "http://localhost:8108");
    }

    #[test]
    fn test_empty_api_key_rejected() {
        let err = HttpTransport::new(&config("http://localhost:8108", "")).unwrap_err();
        assert!(matches!(err, ClientError::Config(_)));
    }

    #[test]
    fn test_invalid_url_rejected() {
        let err = HttpTransport::new(&config("not a url", "xyz")).unwrap_err();
        assert!(matches!(err, ClientError::InvalidUrl(_)));

        let err = HttpTransport::new(&config("mailto:search@example.com", "xyz")).unwrap_err();
        assert!(matches!(err, ClientError::Config(_)));
    }
}
