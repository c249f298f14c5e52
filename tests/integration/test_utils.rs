//! Shared test utilities for integration tests
//!
//! Provides a stub query executor that records requests and serves canned
//! bucket sets, so tests can assert on both the shaped request and the
//! paginated result without a live backend.

use async_trait::async_trait;
use hostfacet::error::SearchError;
use hostfacet::search::{Aggregations, Bucket, QueryExecutor, QueryRequest, SearchResponse, TermsAggregation};
use serde_json::Value;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// Stub query executor with canned buckets, request capture, call counting,
/// and optional failure injection.
pub struct StubExecutor {
    buckets: Vec<Bucket>,
    fail_with: Option<String>,
    calls: AtomicUsize,
    requests: Mutex<Vec<(String, String, Value)>>,
}

impl StubExecutor {
    pub fn new(buckets: Vec<Bucket>) -> Self {
        Self {
            buckets,
            fail_with: None,
            calls: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            buckets: vec![],
            fail_with: Some(message.to_string()),
            calls: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Captured `(index, correlation, body)` triples in call order.
    pub fn requests(&self) -> Vec<(String, String, Value)> {
        self.requests.lock().unwrap().clone()
    }

    pub fn last_body(&self) -> Value {
        self.requests
            .lock()
            .unwrap()
            .last()
            .map(|(_, _, body)| body.clone())
            .expect("no query was executed")
    }
}

#[async_trait]
impl QueryExecutor for StubExecutor {
    async fn run_query(
        &self,
        request: QueryRequest,
        correlation: &str,
    ) -> Result<SearchResponse, SearchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests
            .lock()
            .unwrap()
            .push((request.index, correlation.to_string(), request.body));

        if let Some(message) = &self.fail_with {
            return Err(SearchError::RequestFailed(message.clone()));
        }

        Ok(SearchResponse {
            aggregations: Aggregations {
                terms: TermsAggregation {
                    buckets: self.buckets.clone(),
                    doc_count_error_upper_bound: 0,
                    sum_other_doc_count: 0,
                },
            },
        })
    }
}

pub fn bucket(key: &str, doc_count: u64) -> Bucket {
    Bucket {
        key: key.to_string(),
        doc_count,
    }
}

/// The operating-system bucket set used across the paging scenarios: one
/// dominant value and a doc-count tie resolved by ascending key.
pub fn os_buckets() -> Vec<Bucket> {
    vec![
        bucket("rhel", 50),
        bucket("centos", 30),
        bucket("ubuntu", 30),
    ]
}
