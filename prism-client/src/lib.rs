//! prism-client: async client for Typesense-compatible multi-search APIs
//!
//! A multi-search bundles several independent searches into one HTTP call.
//! [`MultiSearch`] offers three ways to issue one:
//!
//! - `perform` - one result set per search
//! - `perform_union` - all searches merged into one ranked result set
//! - `perform_with_content_type` - caller-chosen content type, raw response
//!
//! ```no_run
//! use prism_client::{Client, ClientConfig, MultiSearchCollectionParameters, MultiSearchParams, SearchRequestList};
//! use tokio_util::sync::CancellationToken;
//!
//! # async fn run() -> prism_client::Result<()> {
//! let client = Client::new(ClientConfig {
//!     api_key: "xyz".to_string(),
//!     ..Default::default()
//! })?;
//!
//! let searches = SearchRequestList::new(vec![
//!     MultiSearchCollectionParameters::new("products").query("shoe").query_by("name"),
//!     MultiSearchCollectionParameters::new("brands").query("shoe").query_by("name"),
//! ]);
//!
//! let results = client
//!     .multi_search()
//!     .perform(&CancellationToken::new(), &MultiSearchParams::default(), &searches)
//!     .await?;
//! println!("{} result sets", results.results.len());
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod transport;
pub mod types;

mod client;
mod multi_search;

pub use client::Client;
pub use config::ClientConfig;
pub use error::{ClientError, Result};
pub use multi_search::MultiSearch;
pub use transport::{ApiClient, BodyStream, HttpTransport, MultiSearchResponse, RawResponse};
pub use types::{
    MultiSearchCollectionParameters, MultiSearchParams, MultiSearchResult, MultiSearchResultItem,
    SearchOptions, SearchRequestList, SearchResult, SearchResultHit,
};
