use thiserror::Error;

use podcat_catalog::CatalogError;

/// Fatal aggregation errors.
///
/// Only the catalog-list fetch can abort a run; every other failure is
/// degraded to a recorded [`crate::FailureRecord`] plus a substituted
/// default, or halts scheduling through the circuit breaker without
/// being an error.
#[derive(Debug, Error)]
pub enum AggregateError {
    #[error("catalog list fetch failed: {0}")]
    CatalogList(#[from] CatalogError),
}
