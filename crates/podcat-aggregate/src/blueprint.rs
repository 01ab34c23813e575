//! Per-blueprint aggregation.
//!
//! One catalog entry fans out into four kinds of fetches (product
//! detail, provider list, per-provider variants, per-provider shipping)
//! joined back into a single [`CombinedProduct`]. Every sub-failure
//! degrades to a recorded failure plus a substituted default, so this
//! operation has no fatal failure mode and never stalls the pipeline on
//! one bad blueprint.

use std::collections::HashMap;

use podcat_catalog::{Blueprint, CatalogClient, ProductDetail};

use crate::enrich::enrich_provider;
use crate::policy::{note_failure, ResourceKind};
use crate::types::{CombinedProduct, FailureRecord};

/// Result of one blueprint aggregation: the combined record (always
/// produced) plus the failures recorded while building it.
#[derive(Debug)]
pub struct BlueprintOutcome {
    pub product: CombinedProduct,
    pub failures: Vec<FailureRecord>,
}

/// Aggregates everything known about one catalog entry.
///
/// Product detail and the blueprint's provider list are fetched
/// concurrently; providers are then enriched sequentially (per-blueprint
/// volume is small); variants and shipping fan out concurrently across
/// providers, with each provider's failures isolated to that provider.
pub async fn aggregate_blueprint(client: &CatalogClient, entry: &Blueprint) -> BlueprintOutcome {
    let blueprint_id = entry.id;
    let mut failures = Vec::new();

    let (detail_result, providers_result) = tokio::join!(
        client.get_product_detail(blueprint_id),
        client.list_blueprint_providers(blueprint_id),
    );

    let detail = match detail_result {
        Ok(detail) => detail,
        Err(e) => {
            note_failure(&mut failures, ResourceKind::ProductDetail, blueprint_id, None, &e);
            ProductDetail::placeholder(blueprint_id)
        }
    };

    let base_providers = match providers_result {
        Ok(providers) => providers,
        Err(e) => {
            note_failure(&mut failures, ResourceKind::ProviderList, blueprint_id, None, &e);
            Vec::new()
        }
    };

    let mut providers = Vec::with_capacity(base_providers.len());
    for base in base_providers {
        providers.push(enrich_provider(client, blueprint_id, base, &mut failures).await);
    }

    // Fan out variants and shipping across all providers at once; the
    // per-provider pair also runs its two fetches concurrently.
    let per_provider = providers.iter().map(|provider| {
        let provider_id = provider.id;
        async move {
            let (variants, shipping) = tokio::join!(
                client.list_variants(blueprint_id, provider_id),
                client.list_shipping_options(blueprint_id, provider_id),
            );
            (provider_id, variants, shipping)
        }
    });
    let fetched = futures::future::join_all(per_provider).await;

    let mut provider_variants = HashMap::with_capacity(providers.len());
    let mut provider_shipping = HashMap::with_capacity(providers.len());
    for (provider_id, variants_result, shipping_result) in fetched {
        let variants = match variants_result {
            Ok(variants) => variants,
            Err(e) => {
                note_failure(
                    &mut failures,
                    ResourceKind::Variants,
                    blueprint_id,
                    Some(provider_id),
                    &e,
                );
                Vec::new()
            }
        };
        provider_variants.insert(provider_id, variants);

        let shipping = match shipping_result {
            Ok(options) => options,
            Err(e) => {
                note_failure(
                    &mut failures,
                    ResourceKind::Shipping,
                    blueprint_id,
                    Some(provider_id),
                    &e,
                );
                Vec::new()
            }
        };
        provider_shipping.insert(provider_id, shipping);
    }

    tracing::debug!(
        blueprint = blueprint_id,
        providers = providers.len(),
        failures = failures.len(),
        "blueprint aggregation complete"
    );

    BlueprintOutcome {
        product: CombinedProduct {
            detail,
            providers,
            provider_variants,
            provider_shipping,
        },
        failures,
    }
}
