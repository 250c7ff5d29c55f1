//! Top-level client handle

use crate::config::ClientConfig;
use crate::error::Result;
use crate::multi_search::MultiSearch;
use crate::transport::{ApiClient, HttpTransport};
use std::sync::Arc;
use tracing::debug;

/// Client for one search server
#[derive(Clone)]
pub struct Client {
    api: Arc<dyn ApiClient>,
}

impl Client {
    /// Create a client talking HTTP to `config.server_url`
    pub fn new(config: ClientConfig) -> Result<Self> {
        let transport = HttpTransport::new(&config)?;
        debug!("Created search client for {}", transport.url());
        Ok(Self::with_transport(Arc::new(transport)))
    }

    /// Create a client over a custom transport
    pub fn with_transport(api: Arc<dyn ApiClient>) -> Self {
        Self { api }
    }

    /// Multi-search operations
    pub fn multi_search(&self) -> MultiSearch {
        MultiSearch::new(Arc::clone(&self.api))
    }
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client").finish_non_exhaustive()
    }
}
