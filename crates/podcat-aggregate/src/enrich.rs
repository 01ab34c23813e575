//! Provider enrichment.
//!
//! The list endpoints return base provider records (id, title, coarse
//! location); the detail endpoint adds address, production metrics,
//! rating and pricing. Enrichment is auxiliary metadata: a failed
//! detail fetch keeps the base record and is tolerated per the policy
//! table (silent, not recorded, no retry).

use podcat_catalog::{CatalogClient, PrintProvider};

use crate::policy::{note_failure, ResourceKind};
use crate::types::FailureRecord;

/// Fetches the detail record for `base` and overlays the detail-only
/// fields onto a copy of it. On failure the base record is returned
/// unmodified; the failure is routed through the policy table (which
/// classifies provider detail as silent).
pub async fn enrich_provider(
    client: &CatalogClient,
    blueprint_id: u32,
    base: PrintProvider,
    failures: &mut Vec<FailureRecord>,
) -> PrintProvider {
    match client.get_print_provider(base.id).await {
        Ok(detail) => overlay(base, detail),
        Err(e) => {
            note_failure(
                failures,
                ResourceKind::ProviderDetail,
                blueprint_id,
                Some(base.id),
                &e,
            );
            base
        }
    }
}

/// Merges detail-only fields into the base record. Base identity fields
/// (id, title) win; detail fills in whatever the list endpoint omitted.
fn overlay(base: PrintProvider, detail: PrintProvider) -> PrintProvider {
    PrintProvider {
        id: base.id,
        title: base.title,
        location: if base.location.is_empty() {
            detail.location
        } else {
            base.location
        },
        address: detail.address.or(base.address),
        production_time_days: detail.production_time_days.or(base.production_time_days),
        rating: detail.rating.or(base.rating),
        base_price_cents: detail.base_price_cents.or(base.base_price_cents),
        blueprint_offerings: if detail.blueprint_offerings.is_empty() {
            base.blueprint_offerings
        } else {
            detail.blueprint_offerings
        },
    }
}
