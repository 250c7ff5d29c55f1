//! Request and response types for the multi-search API
//!
//! Field names follow the wire format of the Typesense-compatible
//! `/multi_search` endpoint. Unknown response fields are kept in `extra`
//! maps so newer servers do not break decoding.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Search options accepted both as common parameters and per search
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub q: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub facet_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_facet_values: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub per_page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_fields: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exclude_fields: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub highlight_fields: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub num_typos: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search_cutoff_ms: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub use_cache: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cache_ttl: Option<u32>,
}

/// Parameters shared by every search in one multi-search call.
///
/// Sent as URL query parameters, not in the body.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MultiSearchParams {
    #[serde(flatten)]
    pub options: SearchOptions,
    /// Scoped API key applied to every search
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x_typesense_api_key: Option<String>,
}

impl MultiSearchParams {
    /// Encode set parameters as `(name, value)` pairs, sorted by name
    pub fn to_query_pairs(&self) -> Vec<(String, String)> {
        let value = match serde_json::to_value(self) {
            Ok(Value::Object(map)) => map,
            _ => return Vec::new(),
        };

        let mut pairs: Vec<(String, String)> = value
            .into_iter()
            .filter_map(|(key, value)| {
                let rendered = match value {
                    Value::Null => return None,
                    Value::String(s) => s,
                    other => other.to_string(),
                };
                Some((key, rendered))
            })
            .collect();
        pairs.sort();
        pairs
    }
}

/// One search inside a multi-search request
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MultiSearchCollectionParameters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collection: Option<String>,
    #[serde(flatten)]
    pub options: SearchOptions,
    /// Scoped API key for this search only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x_typesense_api_key: Option<String>,
    /// Engine options not modelled above, passed through as-is
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl MultiSearchCollectionParameters {
    pub fn new(collection: impl Into<String>) -> Self {
        Self {
            collection: Some(collection.into()),
            ..Default::default()
        }
    }

    pub fn query(mut self, q: impl Into<String>) -> Self {
        self.options.q = Some(q.into());
        self
    }

    pub fn query_by(mut self, fields: impl Into<String>) -> Self {
        self.options.query_by = Some(fields.into());
        self
    }

    pub fn filter_by(mut self, filter: impl Into<String>) -> Self {
        self.options.filter_by = Some(filter.into());
        self
    }

    pub fn param(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(name.into(), value.into());
        self
    }
}

/// Ordered list of searches plus the union flag.
///
/// With `union` set to `true` the server merges all searches into a single
/// ranked result set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchRequestList {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub union: Option<bool>,
    pub searches: Vec<MultiSearchCollectionParameters>,
}

impl SearchRequestList {
    pub fn new(searches: Vec<MultiSearchCollectionParameters>) -> Self {
        Self {
            union: None,
            searches,
        }
    }

    /// Copy of this list with the union flag set
    pub fn with_union(&self, union: bool) -> Self {
        Self {
            union: Some(union),
            searches: self.searches.clone(),
        }
    }
}

/// A single hit
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchResultHit {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document: Option<Map<String, Value>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub highlights: Vec<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub highlight: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_match: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_match_info: Option<Value>,
    /// Index of the originating search in a union result
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search_index: Option<usize>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FacetCount {
    #[serde(default)]
    pub count: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub highlighted: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FacetCounts {
    #[serde(default)]
    pub field_name: String,
    #[serde(default)]
    pub counts: Vec<FacetCount>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stats: Option<Value>,
}

/// One result set. Returned directly by union searches and embedded in
/// every [`MultiSearchResultItem`] otherwise.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub found: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub found_docs: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub out_of: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search_time_ms: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search_cutoff: Option<bool>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub hits: Vec<SearchResultHit>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub grouped_hits: Vec<Value>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub facet_counts: Vec<FacetCounts>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_params: Option<Value>,
    /// Per-search request parameters echoed back by union searches
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub union_request_params: Vec<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Result of one search in a non-union multi-search.
///
/// A failed search carries `code` and `error` instead of hits.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MultiSearchResultItem {
    #[serde(flatten)]
    pub result: SearchResult,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl MultiSearchResultItem {
    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}

/// Per-search results of a non-union multi-search, in request order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MultiSearchResult {
    pub results: Vec<MultiSearchResultItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conversation: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
