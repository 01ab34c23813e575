//! Per-resource failure policy.
//!
//! Structural resources (product detail, provider list, variants,
//! shipping) get a recorded failure plus a substituted default;
//! provider-detail enrichment is auxiliary metadata and is tolerated
//! silently. Keeping the table in one place makes the asymmetry
//! auditable instead of scattering it across call sites.

use crate::types::FailureRecord;

/// Upstream resources the aggregator fetches per blueprint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    ProductDetail,
    ProviderList,
    ProviderDetail,
    Variants,
    Shipping,
}

/// What happens when a fetch for a given resource fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureMode {
    /// Append a [`FailureRecord`] to the current unit's buffer and
    /// substitute a default value.
    Recorded,
    /// Log at debug and carry on with the data already in hand.
    Silent,
}

#[must_use]
pub fn failure_mode(kind: ResourceKind) -> FailureMode {
    match kind {
        ResourceKind::ProviderDetail => FailureMode::Silent,
        ResourceKind::ProductDetail
        | ResourceKind::ProviderList
        | ResourceKind::Variants
        | ResourceKind::Shipping => FailureMode::Recorded,
    }
}

/// Logical operation name surfaced in failure records.
#[must_use]
pub fn operation_name(kind: ResourceKind) -> &'static str {
    match kind {
        ResourceKind::ProductDetail => "fetchProductDetail",
        ResourceKind::ProviderList => "fetchPrintProviders",
        ResourceKind::ProviderDetail => "fetchProviderDetail",
        ResourceKind::Variants => "fetchVariants",
        ResourceKind::Shipping => "fetchShipping",
    }
}

/// Routes one fetch failure through the policy table: recorded kinds
/// append to `buffer`, silent kinds only log.
pub(crate) fn note_failure(
    buffer: &mut Vec<FailureRecord>,
    kind: ResourceKind,
    blueprint_id: u32,
    provider_id: Option<u32>,
    error: &podcat_catalog::CatalogError,
) {
    match failure_mode(kind) {
        FailureMode::Recorded => {
            tracing::warn!(
                blueprint = blueprint_id,
                provider = ?provider_id,
                operation = operation_name(kind),
                error = %error,
                "fetch failed; substituting default"
            );
            buffer.push(FailureRecord {
                blueprint_id,
                provider_id,
                operation: operation_name(kind),
                error: error.to_string(),
            });
        }
        FailureMode::Silent => {
            tracing::debug!(
                blueprint = blueprint_id,
                provider = ?provider_id,
                operation = operation_name(kind),
                error = %error,
                "auxiliary fetch failed; keeping base data"
            );
        }
    }
}
