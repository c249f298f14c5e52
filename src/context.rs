//! Per-request context
//!
//! Holds the account identifier and the seeded host filter clause shared by
//! sibling enumeration calls within one request. Seeding must complete
//! before any enumeration reads the clause; that ordering belongs to the
//! orchestrating layer, and a missing clause is an integration bug rather
//! than a recoverable condition.

use crate::filter::{build_filter_query, FilterClause, HostFilter};

/// Per-request holder for the seeded filter clause. Created per incoming
/// request, discarded after.
#[derive(Debug, Clone)]
pub struct RequestContext {
    account_number: String,
    host_query: Option<FilterClause>,
}

impl RequestContext {
    pub fn new(account_number: impl Into<String>) -> Self {
        Self {
            account_number: account_number.into(),
            host_query: None,
        }
    }

    pub fn account_number(&self) -> &str {
        &self.account_number
    }

    /// The seeded clause, if seeding has run.
    pub fn host_query(&self) -> Option<&FilterClause> {
        self.host_query.as_ref()
    }
}

/// Seed the request context with the backend clause for a host filter.
///
/// Produces no payload; its only effect is the context write. Malformed
/// filter expressions are the filter builder's concern, not checked here.
pub fn seed_host_query(context: &mut RequestContext, filter: Option<&HostFilter>) {
    let clause = build_filter_query(filter, &context.account_number);
    context.host_query = Some(clause);
}
