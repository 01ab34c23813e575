//! Wire types for the print-on-demand catalog API.
//!
//! ## Observed shapes
//!
//! ### `location` on print providers
//! Polymorphic at the wire level: older catalog entries return a bare
//! country-code string (`"US"`), newer ones a structured address object
//! (`{"country": "US", "city": "Denver", ...}`). Both shapes are
//! accepted and normalized at the decode boundary into a country string
//! plus an optional [`ProviderAddress`]; the union never leaks past
//! this module.
//!
//! ### Variant and shipping envelopes
//! The variant list arrives wrapped in `{id, title, variants: [...]}`
//! and shipping arrives as a small number of profiles, each covering a
//! set of variant ids with shared handling time and cost tiers. The
//! client unwraps/flattens both before returning to callers.
//!
//! ### Prices
//! All monetary amounts are integer cents on the wire. They are carried
//! as `i64` and never computed on, so no decimal type is involved.
//!
//! ### Pass-through fields
//! `options`, `placeholders` and `print_areas` vary by blueprint and do
//! not drive control flow; they are carried opaquely as
//! `serde_json::Value`.

use serde::{Deserialize, Serialize};

/// One product template from the catalog list endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Blueprint {
    pub id: u32,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub images: Vec<String>,
}

/// Full product detail for one blueprint.
///
/// A fallback instance (see [`ProductDetail::placeholder`]) carries
/// sentinel title/description values so downstream consumers can render
/// something when the detail fetch failed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductDetail {
    pub id: u32,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub images: Vec<String>,
    /// Absent from some older catalog entries; treated as available.
    #[serde(default = "default_true")]
    pub available: bool,
    /// Print-area geometry; opaque pass-through.
    #[serde(default)]
    pub print_areas: serde_json::Value,
    /// Option matrix (colors, sizes, ...); opaque pass-through.
    #[serde(default)]
    pub options: serde_json::Value,
    #[serde(default)]
    pub main_image_url: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

fn default_true() -> bool {
    true
}

impl ProductDetail {
    /// Sentinel title carried by fallback instances.
    pub const PLACEHOLDER_TITLE: &'static str = "Partial Product";
    /// Sentinel description carried by fallback instances.
    pub const PLACEHOLDER_DESCRIPTION: &'static str = "Data missing";

    /// Builds the fallback detail used when the detail fetch for
    /// `blueprint_id` fails. The aggregation continues with this
    /// degraded record instead of aborting.
    #[must_use]
    pub fn placeholder(blueprint_id: u32) -> Self {
        Self {
            id: blueprint_id,
            title: Self::PLACEHOLDER_TITLE.to_string(),
            description: Some(Self::PLACEHOLDER_DESCRIPTION.to_string()),
            brand: None,
            model: None,
            images: Vec::new(),
            available: false,
            print_areas: serde_json::Value::Null,
            options: serde_json::Value::Null,
            main_image_url: None,
            created_at: None,
            updated_at: None,
        }
    }

    /// `true` when this instance was built by [`Self::placeholder`]
    /// rather than decoded from a response.
    #[must_use]
    pub fn is_placeholder(&self) -> bool {
        self.title == Self::PLACEHOLDER_TITLE
    }
}

/// A manufacturing/fulfillment partner.
///
/// The list endpoints return the base fields (id, title, location);
/// the detail endpoint adds address, production metrics, rating,
/// pricing and offerings, overlaid by the enricher. Detail-only fields
/// are `None`/empty on base records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawPrintProvider")]
pub struct PrintProvider {
    pub id: u32,
    pub title: String,
    /// Country code normalized from the polymorphic wire `location`.
    pub location: String,
    /// Structured address, populated when the wire sent the object
    /// shape (or after enrichment).
    pub address: Option<ProviderAddress>,
    pub production_time_days: Option<u32>,
    pub rating: Option<f64>,
    /// Lowest base price across this provider's offerings, in cents.
    pub base_price_cents: Option<i64>,
    /// Blueprint ids this provider can produce.
    pub blueprint_offerings: Vec<u32>,
}

/// Structured provider address from the object form of `location`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderAddress {
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub address1: Option<String>,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub zip: Option<String>,
}

/// Wire-level provider record before `location` normalization.
#[derive(Deserialize)]
struct RawPrintProvider {
    id: u32,
    title: String,
    #[serde(default)]
    location: Option<RawLocation>,
    #[serde(default)]
    production_time_days: Option<u32>,
    #[serde(default)]
    rating: Option<f64>,
    #[serde(default, rename = "base_price")]
    base_price_cents: Option<i64>,
    #[serde(default)]
    blueprint_offerings: Vec<u32>,
}

/// The two accepted wire shapes of `location`. Decoding must not error
/// on either shape.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawLocation {
    Country(String),
    Address(ProviderAddress),
}

impl From<RawPrintProvider> for PrintProvider {
    fn from(raw: RawPrintProvider) -> Self {
        let (location, address) = match raw.location {
            Some(RawLocation::Country(country)) => (country, None),
            Some(RawLocation::Address(addr)) => (addr.country.clone(), Some(addr)),
            None => (String::new(), None),
        };
        Self {
            id: raw.id,
            title: raw.title,
            location,
            address,
            production_time_days: raw.production_time_days,
            rating: raw.rating,
            base_price_cents: raw.base_price_cents,
            blueprint_offerings: raw.blueprint_offerings,
        }
    }
}

/// One purchasable configuration of a blueprint, scoped to a
/// (blueprint, provider) pair when fetched through the provider
/// variants endpoint. Ids are unique only within that scope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Variant {
    pub id: u64,
    pub title: String,
    /// Provider price in cents; absent on catalog-level variants.
    #[serde(default)]
    pub price: Option<i64>,
    #[serde(default)]
    pub options: serde_json::Value,
    #[serde(default)]
    pub placeholders: serde_json::Value,
    #[serde(default)]
    pub available: Option<bool>,
}

/// Wire envelope around the provider variant list. Unwrapped by the
/// client; callers only ever see `Vec<Variant>`.
#[derive(Deserialize)]
pub(crate) struct VariantsEnvelope {
    #[serde(default)]
    pub(crate) id: Option<u32>,
    #[serde(default)]
    pub(crate) title: Option<String>,
    pub(crate) variants: Vec<Variant>,
}

/// Response-level handling time shared by every profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HandlingTime {
    pub value: u32,
    pub unit: String,
}

/// Wire shape of the provider shipping resource.
#[derive(Deserialize)]
pub(crate) struct ShippingResponse {
    pub(crate) handling_time: HandlingTime,
    #[serde(default)]
    pub(crate) profiles: Vec<ShippingProfile>,
}

#[derive(Deserialize)]
pub(crate) struct ShippingProfile {
    pub(crate) variant_ids: Vec<u64>,
    pub(crate) first_item: ShippingCost,
    pub(crate) additional_items: ShippingCost,
    #[serde(default)]
    pub(crate) countries: Vec<String>,
}

#[derive(Deserialize)]
pub(crate) struct ShippingCost {
    pub(crate) cost: i64,
    pub(crate) currency: String,
}

/// Per-variant shipping terms, flattened from a profile.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShippingOption {
    pub variant_id: u64,
    pub handling_time: HandlingTime,
    pub first_item_cents: i64,
    pub additional_item_cents: i64,
    pub currency: String,
    pub countries: Vec<String>,
}

/// Flattens profile × variant-id into one [`ShippingOption`] per
/// variant id, replicating the response-level handling time and the
/// profile's cost tiers. The flattened count equals the sum of each
/// profile's variant-id count.
pub(crate) fn flatten_shipping(response: ShippingResponse) -> Vec<ShippingOption> {
    let mut options = Vec::new();
    for profile in response.profiles {
        for variant_id in profile.variant_ids {
            options.push(ShippingOption {
                variant_id,
                handling_time: response.handling_time.clone(),
                first_item_cents: profile.first_item.cost,
                additional_item_cents: profile.additional_items.cost,
                currency: profile.first_item.currency.clone(),
                countries: profile.countries.clone(),
            });
        }
    }
    options
}

/// Structured error envelope carried by non-2xx responses:
/// `{status, code, message, errors?: {reason?, code?}}`.
#[derive(Debug, Deserialize)]
pub(crate) struct ApiErrorEnvelope {
    pub(crate) code: i64,
    pub(crate) message: String,
    #[serde(default)]
    pub(crate) errors: Option<ApiErrorDetail>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ApiErrorDetail {
    #[serde(default)]
    pub(crate) reason: Option<String>,
}

#[cfg(test)]
#[path = "types_test.rs"]
mod tests;
