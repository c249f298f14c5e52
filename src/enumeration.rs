//! Enumeration Engine
//!
//! Turns `(field, converter, args, filter clause)` into a deterministic,
//! paginated, counted value listing. The engine shapes one terms-aggregation
//! request, delegates execution to a [`QueryExecutor`], then windows and
//! converts the returned buckets. It is stateless; concurrent invocations
//! for different fields only read the shared filter clause.

use crate::config::QueriesConfig;
use crate::error::EnumerationError;
use crate::filter::FilterClause;
use crate::search::{Bucket, QueryExecutor, QueryRequest};
use crate::validation::{check_limit, check_offset};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::debug;

/// Default page size when the caller omits `limit`
pub const DEFAULT_LIMIT: i64 = 10;

/// Default page start when the caller omits `offset`
pub const DEFAULT_OFFSET: i64 = 0;

/// Aggregation sort key selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderBy {
    #[default]
    Value,
    Count,
}

impl OrderBy {
    /// Backend sort field for this order key
    pub fn sort_field(self) -> &'static str {
        match self {
            OrderBy::Value => "_key",
            OrderBy::Count => "_count",
        }
    }
}

/// Sort direction, passed through verbatim as the backend direction token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderHow {
    #[default]
    Asc,
    Desc,
}

impl OrderHow {
    pub fn as_str(self) -> &'static str {
        match self {
            OrderHow::Asc => "ASC",
            OrderHow::Desc => "DESC",
        }
    }
}

/// Optional value restriction. `eq` wins when both are supplied.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchFilter {
    pub eq: Option<String>,
    pub regex: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ValueFilter {
    pub search: Option<SearchFilter>,
}

/// Caller input for one enumeration call. Validated, never mutated.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EnumerationArgs {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
    pub order_by: OrderBy,
    pub order_how: OrderHow,
    pub filter: Option<ValueFilter>,
}

/// One converted bucket
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultItem<T> {
    pub value: T,
    pub count: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ResultMeta {
    /// Size of the returned page
    pub count: usize,
    /// Size of the full bucket set, before pagination
    pub total: usize,
}

/// A page of converted buckets plus metadata
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultPage<T> {
    pub data: Vec<ResultItem<T>>,
    pub meta: ResultMeta,
}

/// Conversion from a raw bucket key into a typed value.
///
/// Implementations must accept every key the backend can legitimately return
/// for their field; a failure aborts the enumeration.
pub trait ValueConverter {
    type Value;

    fn convert(&self, key: &str) -> anyhow::Result<Self::Value>;
}

/// Enumerate the distinct values of `field` over the filtered host set.
///
/// Issues one aggregation query through `executor`, then extracts the
/// `[offset, offset + limit)` window of the ordered bucket sequence and
/// converts it. `meta.total` reports the full bucket count (capped at the
/// configured maximum by the backend, a known approximation).
pub async fn enumerate<C: ValueConverter>(
    field: &str,
    converter: &C,
    args: &EnumerationArgs,
    host_query: &FilterClause,
    executor: &dyn QueryExecutor,
    queries: &QueriesConfig,
) -> Result<ResultPage<C::Value>, EnumerationError> {
    check_limit(args.limit, queries.max_limit)?;
    check_offset(args.offset)?;

    let limit = args.limit.unwrap_or(DEFAULT_LIMIT) as usize;
    let offset = args.offset.unwrap_or(DEFAULT_OFFSET) as usize;

    let body = build_enumeration_body(field, host_query, args, queries.max_buckets);
    let request = QueryRequest {
        index: queries.hosts_index.clone(),
        body,
    };

    let response = executor.run_query(request, field).await?;
    let buckets = response.aggregations.terms.buckets;

    let page = extract_page(&buckets, limit, offset);
    let mut data = Vec::with_capacity(page.len());
    for bucket in page {
        let value = converter
            .convert(&bucket.key)
            .map_err(|source| EnumerationError::Conversion {
                key: bucket.key.clone(),
                source,
            })?;
        data.push(ResultItem {
            value,
            count: bucket.doc_count,
        });
    }

    debug!(
        field,
        total = buckets.len(),
        page = data.len(),
        "Enumerated field values"
    );

    Ok(ResultPage {
        meta: ResultMeta {
            count: data.len(),
            total: buckets.len(),
        },
        data,
    })
}

/// Build the aggregation request body over the seeded filter clause.
fn build_enumeration_body(
    field: &str,
    host_query: &FilterClause,
    args: &EnumerationArgs,
    max_buckets: u32,
) -> Value {
    let mut body = json!({
        "_source": [],
        "query": host_query.as_json(),
        "size": 0,
        "aggs": {
            "terms": {
                "terms": {
                    "field": field,
                    "size": max_buckets,
                    "order": [
                        { (args.order_by.sort_field()): args.order_how.as_str() },
                        // secondary key sort keeps tie order deterministic
                        { "_key": "ASC" }
                    ],
                    "show_term_doc_count_error": true
                }
            }
        }
    });

    if let Some(search) = args.filter.as_ref().and_then(|f| f.search.as_ref()) {
        if let Some(eq) = &search.eq {
            body["aggs"]["terms"]["terms"]["include"] = json!([eq]);
        } else if let Some(regex) = &search.regex {
            body["aggs"]["terms"]["terms"]["include"] = json!(regex);
        }
    }

    body
}

/// Contiguous window of the ordered bucket sequence starting at `offset`,
/// at most `limit` long. An offset past the end yields an empty page.
fn extract_page(buckets: &[Bucket], limit: usize, offset: usize) -> &[Bucket] {
    if offset >= buckets.len() {
        return &[];
    }
    let end = offset.saturating_add(limit).min(buckets.len());
    &buckets[offset..end]
}
