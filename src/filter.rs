//! Host filter clause construction
//!
//! Turns a structured host filter expression plus an account identifier into
//! an opaque backend bool-query clause. Every clause scopes to the account
//! term; caller-supplied conditions are appended as additional filters.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Opaque backend query representation.
///
/// Immutable once attached to a request context; the enumeration engine only
/// embeds it verbatim under the request's `query` key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FilterClause(Value);

impl FilterClause {
    pub fn as_json(&self) -> &Value {
        &self.0
    }

    pub fn into_inner(self) -> Value {
        self.0
    }
}

/// String condition: exact match or wildcard pattern. `eq` wins when both
/// are supplied.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StringMatch {
    pub eq: Option<String>,
    pub matches: Option<String>,
}

/// Structured host filter expression
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HostFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub and: Option<Vec<HostFilter>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub or: Option<Vec<HostFilter>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub not: Option<Box<HostFilter>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<StringMatch>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub fqdn: Option<StringMatch>,
}

/// Build the backend filter clause for a host filter expression.
///
/// The result always restricts to the given account; an absent filter
/// produces the bare account restriction.
pub fn build_filter_query(filter: Option<&HostFilter>, account_number: &str) -> FilterClause {
    let mut conditions = vec![json!({ "term": { "account": account_number } })];

    if let Some(filter) = filter {
        conditions.extend(filter_conditions(filter));
    }

    FilterClause(json!({ "bool": { "filter": conditions } }))
}

fn filter_conditions(filter: &HostFilter) -> Vec<Value> {
    let mut conditions = Vec::new();

    if let Some(id) = &filter.id {
        conditions.push(json!({ "term": { "host.id": id } }));
    }

    if let Some(display_name) = &filter.display_name {
        if let Some(condition) = string_condition("host.display_name", display_name) {
            conditions.push(condition);
        }
    }

    if let Some(fqdn) = &filter.fqdn {
        if let Some(condition) = string_condition("host.fqdn", fqdn) {
            conditions.push(condition);
        }
    }

    if let Some(and) = &filter.and {
        let nested: Vec<Value> = and.iter().flat_map(filter_conditions).collect();
        if !nested.is_empty() {
            conditions.push(json!({ "bool": { "filter": nested } }));
        }
    }

    if let Some(or) = &filter.or {
        let branches: Vec<Value> = or
            .iter()
            .map(|branch| json!({ "bool": { "filter": filter_conditions(branch) } }))
            .collect();
        if !branches.is_empty() {
            conditions.push(json!({
                "bool": { "should": branches, "minimum_should_match": 1 }
            }));
        }
    }

    if let Some(not) = &filter.not {
        let negated = filter_conditions(not);
        if !negated.is_empty() {
            conditions.push(json!({ "bool": { "must_not": negated } }));
        }
    }

    conditions
}

fn string_condition(field: &str, condition: &StringMatch) -> Option<Value> {
    if let Some(eq) = &condition.eq {
        Some(json!({ "term": { field: eq } }))
    } else {
        condition
            .matches
            .as_ref()
            .map(|pattern| json!({ "wildcard": { field: pattern } }))
    }
}
