//! Per-field enumerations
//!
//! Ready-made converters and entry points for the system-profile fields the
//! inventory API exposes. Each entry point pins a backend field path to a
//! typed converter; callers needing other fields use
//! [`enumerate`](crate::enumeration::enumerate) directly.

use crate::config::QueriesConfig;
use crate::enumeration::{enumerate, EnumerationArgs, ResultPage, ValueConverter};
use crate::error::EnumerationError;
use crate::filter::FilterClause;
use crate::search::QueryExecutor;
use anyhow::anyhow;

/// SAP system flag, indexed as a boolean keyword
pub const SAP_SYSTEM_FIELD: &str = "host.system_profile_facts.sap_system";

/// SAP system identifiers
pub const SAP_SIDS_FIELD: &str = "host.system_profile_facts.sap_sids";

/// Identity conversion for string-keyed fields
pub struct StringValue;

impl ValueConverter for StringValue {
    type Value = String;

    fn convert(&self, key: &str) -> anyhow::Result<String> {
        Ok(key.to_string())
    }
}

/// Conversion for boolean keyword fields. The backend renders boolean keys
/// as `"true"`/`"false"` (numeric forms appear on older indexes).
pub struct BoolValue;

impl ValueConverter for BoolValue {
    type Value = bool;

    fn convert(&self, key: &str) -> anyhow::Result<bool> {
        match key {
            "true" | "1" => Ok(true),
            "false" | "0" => Ok(false),
            other => Err(anyhow!("not a boolean key: '{}'", other)),
        }
    }
}

/// Enumerate the distinct `sap_system` flags over the filtered host set.
pub async fn sap_system(
    args: &EnumerationArgs,
    host_query: &FilterClause,
    executor: &dyn QueryExecutor,
    queries: &QueriesConfig,
) -> Result<ResultPage<bool>, EnumerationError> {
    enumerate(SAP_SYSTEM_FIELD, &BoolValue, args, host_query, executor, queries).await
}

/// Enumerate the distinct SAP system identifiers over the filtered host set.
pub async fn sap_sids(
    args: &EnumerationArgs,
    host_query: &FilterClause,
    executor: &dyn QueryExecutor,
    queries: &QueriesConfig,
) -> Result<ResultPage<String>, EnumerationError> {
    enumerate(SAP_SIDS_FIELD, &StringValue, args, host_query, executor, queries).await
}
