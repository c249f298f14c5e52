//! Hostfacet: Field-Value Enumeration for a Search-Backed Host Inventory
//!
//! Computes the distinct values of a host-document field, their document
//! counts, and a deterministically ordered, paginated view of that value
//! list. Query execution is delegated to an external search backend; this
//! crate only shapes the aggregation request and post-processes the
//! response.

pub mod config;
pub mod context;
pub mod enumeration;
pub mod error;
pub mod fields;
pub mod filter;
pub mod logging;
pub mod search;
pub mod validation;

pub use enumeration::{
    enumerate, EnumerationArgs, OrderBy, OrderHow, ResultItem, ResultMeta, ResultPage,
    SearchFilter, ValueConverter, ValueFilter,
};
pub use error::{EnumerationError, SearchError, ValidationError};
pub use filter::{build_filter_query, FilterClause, HostFilter};
