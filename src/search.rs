//! Query Execution Service
//!
//! Seam between the enumeration engine and the search backend. The engine
//! only shapes requests and post-processes responses; executing the query is
//! delegated through [`QueryExecutor`]. The production implementation posts
//! to an Elasticsearch-compatible `_search` endpoint; tests substitute stub
//! executors.

use crate::config::SearchConfig;
use crate::error::SearchError;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

/// A shaped search request: target index plus full request body.
#[derive(Debug, Clone, Serialize)]
pub struct QueryRequest {
    pub index: String,
    pub body: Value,
}

/// One distinct field value and its document count, as returned by the
/// terms aggregation.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Bucket {
    pub key: String,
    pub doc_count: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TermsAggregation {
    pub buckets: Vec<Bucket>,

    #[serde(default)]
    pub doc_count_error_upper_bound: i64,

    #[serde(default)]
    pub sum_other_doc_count: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Aggregations {
    pub terms: TermsAggregation,
}

/// Search backend response, reduced to the parts the engine consumes.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchResponse {
    pub aggregations: Aggregations,
}

/// Query execution service client trait
///
/// `correlation` associates the request with its originating field; it is
/// opaque here and only surfaced for logging by implementations.
#[async_trait]
pub trait QueryExecutor: Send + Sync {
    async fn run_query(
        &self,
        request: QueryRequest,
        correlation: &str,
    ) -> Result<SearchResponse, SearchError>;
}

const SEARCH_USER_AGENT: &str = concat!("hostfacet/", env!("CARGO_PKG_VERSION"));

fn map_http_error(error: reqwest::Error) -> SearchError {
    if error.is_timeout() {
        SearchError::RequestFailed(format!("Request timeout: {}", error))
    } else if error.is_connect() {
        SearchError::RequestFailed(format!("Connection error: {}", error))
    } else {
        SearchError::RequestFailed(format!("HTTP error: {}", error))
    }
}

/// HTTP query executor against an Elasticsearch-compatible backend
pub struct HttpQueryExecutor {
    client: Client,
    base_url: String,
}

impl HttpQueryExecutor {
    pub fn new(config: &SearchConfig) -> Result<Self, SearchError> {
        let client = Client::builder()
            .user_agent(SEARCH_USER_AGENT)
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| SearchError::ClientError(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl QueryExecutor for HttpQueryExecutor {
    async fn run_query(
        &self,
        request: QueryRequest,
        correlation: &str,
    ) -> Result<SearchResponse, SearchError> {
        let url = format!("{}/{}/_search", self.base_url, request.index);
        debug!(index = %request.index, correlation, "Executing search query");

        let response = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .header("X-Correlation-Id", correlation)
            .json(&request.body)
            .send()
            .await
            .map_err(map_http_error)?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(SearchError::BackendError { status, body });
        }

        response
            .json()
            .await
            .map_err(|e| SearchError::MalformedResponse(format!("Failed to parse response: {}", e)))
    }
}
