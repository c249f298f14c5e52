//! Integration tests for the enumeration engine: request shaping, ordering,
//! pagination, and error propagation against a stub execution service.

use super::test_utils::{bucket, os_buckets, StubExecutor};
use hostfacet::config::QueriesConfig;
use hostfacet::enumeration::{
    enumerate, EnumerationArgs, OrderBy, OrderHow, SearchFilter, ValueFilter,
};
use hostfacet::error::EnumerationError;
use hostfacet::fields::{self, StringValue};
use hostfacet::filter::build_filter_query;
use serde_json::json;

fn count_desc(limit: i64, offset: i64) -> EnumerationArgs {
    EnumerationArgs {
        limit: Some(limit),
        offset: Some(offset),
        order_by: OrderBy::Count,
        order_how: OrderHow::Desc,
        filter: None,
    }
}

#[tokio::test]
async fn test_count_desc_first_page_resolves_ties_by_key() {
    let executor = StubExecutor::new(os_buckets());
    let clause = build_filter_query(None, "901234");

    let page = enumerate(
        "host.os_release",
        &StringValue,
        &count_desc(2, 0),
        &clause,
        &executor,
        &QueriesConfig::default(),
    )
    .await
    .unwrap();

    assert_eq!(page.data.len(), 2);
    assert_eq!(page.data[0].value, "rhel");
    assert_eq!(page.data[0].count, 50);
    assert_eq!(page.data[1].value, "centos");
    assert_eq!(page.data[1].count, 30);
    assert_eq!(page.meta.count, 2);
    assert_eq!(page.meta.total, 3);

    // the request itself must carry the deterministic two-level order
    let body = executor.last_body();
    assert_eq!(
        body["aggs"]["terms"]["terms"]["order"],
        json!([{ "_count": "DESC" }, { "_key": "ASC" }])
    );
}

#[tokio::test]
async fn test_offset_past_first_page_truncates_tail() {
    let executor = StubExecutor::new(os_buckets());
    let clause = build_filter_query(None, "901234");

    let page = enumerate(
        "host.os_release",
        &StringValue,
        &count_desc(10, 2),
        &clause,
        &executor,
        &QueriesConfig::default(),
    )
    .await
    .unwrap();

    assert_eq!(page.data.len(), 1);
    assert_eq!(page.data[0].value, "ubuntu");
    assert_eq!(page.data[0].count, 30);
    assert_eq!(page.meta.count, 1);
    assert_eq!(page.meta.total, 3);
}

#[tokio::test]
async fn test_offset_beyond_bucket_count_yields_empty_page() {
    let executor = StubExecutor::new(os_buckets());
    let clause = build_filter_query(None, "901234");

    let page = enumerate(
        "host.os_release",
        &StringValue,
        &count_desc(10, 3),
        &clause,
        &executor,
        &QueriesConfig::default(),
    )
    .await
    .unwrap();

    assert!(page.data.is_empty());
    assert_eq!(page.meta.count, 0);
    assert_eq!(page.meta.total, 3);
}

#[tokio::test]
async fn test_total_is_independent_of_paging() {
    let clause = build_filter_query(None, "901234");

    for (limit, offset) in [(1, 0), (2, 1), (3, 3), (10, 0)] {
        let executor = StubExecutor::new(os_buckets());
        let page = enumerate(
            "host.os_release",
            &StringValue,
            &count_desc(limit, offset),
            &clause,
            &executor,
            &QueriesConfig::default(),
        )
        .await
        .unwrap();

        assert_eq!(page.meta.total, 3);
        assert_eq!(page.meta.count, page.data.len());
    }
}

#[tokio::test]
async fn test_oversized_limit_is_rejected_before_any_backend_call() {
    let executor = StubExecutor::new(os_buckets());
    let clause = build_filter_query(None, "901234");
    let args = EnumerationArgs {
        limit: Some(1000),
        ..Default::default()
    };

    let result = enumerate(
        "host.os_release",
        &StringValue,
        &args,
        &clause,
        &executor,
        &QueriesConfig::default(),
    )
    .await;

    assert!(matches!(result, Err(EnumerationError::Validation(_))));
    assert_eq!(executor.call_count(), 0);
}

#[tokio::test]
async fn test_eq_search_restricts_to_single_term() {
    // backend honors the include list: only the matching bucket comes back
    let executor = StubExecutor::new(vec![bucket("centos", 30)]);
    let clause = build_filter_query(None, "901234");
    let args = EnumerationArgs {
        filter: Some(ValueFilter {
            search: Some(SearchFilter {
                eq: Some("centos".to_string()),
                regex: None,
            }),
        }),
        ..Default::default()
    };

    let page = enumerate(
        "host.os_release",
        &StringValue,
        &args,
        &clause,
        &executor,
        &QueriesConfig::default(),
    )
    .await
    .unwrap();

    assert_eq!(
        executor.last_body()["aggs"]["terms"]["terms"]["include"],
        json!(["centos"])
    );
    assert!(page.data.len() <= 1);
    assert_eq!(page.data[0].value, "centos");
}

#[tokio::test]
async fn test_repeated_runs_produce_identical_pages() {
    let clause = build_filter_query(None, "901234");
    let args = count_desc(3, 0);

    let executor = StubExecutor::new(os_buckets());
    let first = enumerate(
        "host.os_release",
        &StringValue,
        &args,
        &clause,
        &executor,
        &QueriesConfig::default(),
    )
    .await
    .unwrap();

    let second = enumerate(
        "host.os_release",
        &StringValue,
        &args,
        &clause,
        &executor,
        &QueriesConfig::default(),
    )
    .await
    .unwrap();

    assert_eq!(first, second);
}

#[tokio::test]
async fn test_request_targets_configured_index_with_field_correlation() {
    let executor = StubExecutor::new(os_buckets());
    let clause = build_filter_query(None, "901234");
    let queries = QueriesConfig {
        hosts_index: "prod.hosts".to_string(),
        ..Default::default()
    };

    enumerate(
        "host.os_release",
        &StringValue,
        &EnumerationArgs::default(),
        &clause,
        &executor,
        &queries,
    )
    .await
    .unwrap();

    let requests = executor.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].0, "prod.hosts");
    assert_eq!(requests[0].1, "host.os_release");
}

#[tokio::test]
async fn test_backend_failure_propagates_without_partial_results() {
    let executor = StubExecutor::failing("connection refused");
    let clause = build_filter_query(None, "901234");

    let result = enumerate(
        "host.os_release",
        &StringValue,
        &EnumerationArgs::default(),
        &clause,
        &executor,
        &QueriesConfig::default(),
    )
    .await;

    match result {
        Err(EnumerationError::Search(err)) => {
            assert!(err.to_string().contains("connection refused"));
        }
        other => panic!("Unexpected result: {:?}", other),
    }
}

#[tokio::test]
async fn test_sibling_enumerations_share_one_clause_concurrently() {
    let sids = StubExecutor::new(vec![bucket("H2O", 5), bucket("PRD", 12)]);
    let flags = StubExecutor::new(vec![bucket("false", 80), bucket("true", 20)]);
    let clause = build_filter_query(None, "901234");
    let queries = QueriesConfig::default();
    let args = EnumerationArgs::default();

    let (sid_page, flag_page) = futures::join!(
        fields::sap_sids(&args, &clause, &sids, &queries),
        fields::sap_system(&args, &clause, &flags, &queries),
    );

    let sid_page = sid_page.unwrap();
    let flag_page = flag_page.unwrap();

    assert_eq!(sid_page.data[0].value, "H2O");
    assert_eq!(sid_page.meta.total, 2);
    assert_eq!(flag_page.data[0].value, false);
    assert_eq!(flag_page.data[1].value, true);

    // both siblings embedded the same clause
    assert_eq!(sids.last_body()["query"], flags.last_body()["query"]);
}

#[tokio::test]
async fn test_bool_field_conversion_failure_is_fatal() {
    let executor = StubExecutor::new(vec![bucket("maybe", 7)]);
    let clause = build_filter_query(None, "901234");

    let result = fields::sap_system(
        &EnumerationArgs::default(),
        &clause,
        &executor,
        &QueriesConfig::default(),
    )
    .await;

    match result {
        Err(EnumerationError::Conversion { key, .. }) => assert_eq!(key, "maybe"),
        other => panic!("Unexpected result: {:?}", other),
    }
}
