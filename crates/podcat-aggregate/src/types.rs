use std::collections::HashMap;
use std::hash::{Hash, Hasher};

use serde::Serialize;

use podcat_catalog::{PrintProvider, ProductDetail, ShippingOption, Variant};

/// The terminal aggregate for one blueprint: product detail (or the
/// fallback placeholder), enriched providers, and per-provider variant
/// and shipping maps.
///
/// Identity is the blueprint id alone — two records with the same id
/// are the same record regardless of payload differences, which drives
/// the dedup guard in the run state.
#[derive(Debug, Clone, Serialize)]
pub struct CombinedProduct {
    pub detail: ProductDetail,
    pub providers: Vec<PrintProvider>,
    pub provider_variants: HashMap<u32, Vec<Variant>>,
    pub provider_shipping: HashMap<u32, Vec<ShippingOption>>,
}

impl CombinedProduct {
    #[must_use]
    pub fn blueprint_id(&self) -> u32 {
        self.detail.id
    }
}

impl PartialEq for CombinedProduct {
    fn eq(&self, other: &Self) -> bool {
        self.blueprint_id() == other.blueprint_id()
    }
}

impl Eq for CombinedProduct {}

impl Hash for CombinedProduct {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.blueprint_id().hash(state);
    }
}

/// A recorded, non-fatal failure tied to one logical fetch operation.
///
/// Ephemeral: the buffer holding these is cleared at the start of each
/// batch and inspected when the batch drains.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailureRecord {
    pub blueprint_id: u32,
    /// Provider the failure was isolated to, for provider-scoped
    /// fetches. `None` for blueprint-level operations.
    pub provider_id: Option<u32>,
    pub operation: &'static str,
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn product(id: u32, title: &str) -> CombinedProduct {
        let mut detail = ProductDetail::placeholder(id);
        detail.title = title.to_string();
        CombinedProduct {
            detail,
            providers: Vec::new(),
            provider_variants: HashMap::new(),
            provider_shipping: HashMap::new(),
        }
    }

    #[test]
    fn equality_is_by_blueprint_id_alone() {
        assert_eq!(product(42, "one payload"), product(42, "another payload"));
        assert_ne!(product(42, "same payload"), product(43, "same payload"));
    }

    #[test]
    fn set_dedup_follows_id_identity() {
        let mut set = HashSet::new();
        assert!(set.insert(product(42, "first")));
        assert!(!set.insert(product(42, "second")));
        assert_eq!(set.len(), 1);
    }
}
