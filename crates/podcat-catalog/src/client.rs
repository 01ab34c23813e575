//! HTTP client for the print-on-demand catalog REST API.
//!
//! Wraps `reqwest` with the fixed header set (bearer auth, content
//! negotiation, API version), typed response deserialization, and
//! mapping of non-2xx responses through the API's structured error
//! envelope. Envelope-wrapped resources (variants, shipping profiles)
//! are unwrapped here so callers never see the wire envelope.

use std::time::Duration;

use reqwest::{Client, Url};
use serde::de::DeserializeOwned;

use podcat_core::AppConfig;

use crate::error::CatalogError;
use crate::types::{
    flatten_shipping, ApiErrorEnvelope, Blueprint, PrintProvider, ProductDetail, ShippingOption,
    ShippingResponse, Variant, VariantsEnvelope,
};

/// Client for the catalog API.
///
/// Holds the HTTP client, bearer token, API version and base URL. Use
/// [`CatalogClient::new`] for production or
/// [`CatalogClient::with_base_url`] to point at a mock server in tests.
pub struct CatalogClient {
    client: Client,
    token: String,
    api_version: String,
    base_url: Url,
}

impl CatalogClient {
    /// Creates a client pointed at the configured production API.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`CatalogError::BadUrl`] if the
    /// configured base URL is invalid.
    pub fn new(config: &AppConfig) -> Result<Self, CatalogError> {
        Self::with_base_url(config, &config.api_base_url)
    }

    /// Creates a client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`CatalogError::BadUrl`] if `base_url`
    /// is not a valid URL.
    pub fn with_base_url(config: &AppConfig, base_url: &str) -> Result<Self, CatalogError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(&config.user_agent)
            .build()?;

        // Normalise: ensure the base URL ends with exactly one slash so
        // that join() appends to the path rather than replacing the last
        // segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| CatalogError::BadUrl {
            context: "base URL".to_string(),
            reason: format!("'{base_url}': {e}"),
        })?;

        Ok(Self {
            client,
            token: config.api_token.clone(),
            api_version: config.api_version.clone(),
            base_url,
        })
    }

    /// Fetches the full catalog of blueprints.
    ///
    /// This is the one call made exactly once per aggregation run; its
    /// failure is fatal to the run.
    ///
    /// # Errors
    ///
    /// Any [`CatalogError`] variant from the request/decode path.
    pub async fn list_blueprints(&self) -> Result<Vec<Blueprint>, CatalogError> {
        self.get_json("v1/catalog/blueprints.json", "listBlueprints")
            .await
    }

    /// Fetches full product detail for one blueprint.
    ///
    /// # Errors
    ///
    /// Any [`CatalogError`] variant from the request/decode path.
    pub async fn get_product_detail(&self, blueprint_id: u32) -> Result<ProductDetail, CatalogError> {
        self.get_json(
            &format!("v1/catalog/blueprints/{blueprint_id}.json"),
            &format!("getProductDetail(blueprint={blueprint_id})"),
        )
        .await
    }

    /// Fetches the global print-provider list.
    ///
    /// # Errors
    ///
    /// Any [`CatalogError`] variant from the request/decode path.
    pub async fn list_print_providers(&self) -> Result<Vec<PrintProvider>, CatalogError> {
        self.get_json("v1/catalog/print_providers.json", "listPrintProviders")
            .await
    }

    /// Fetches the providers offering one blueprint. Returns base
    /// (list-level) records; detail fields are overlaid by the enricher.
    ///
    /// # Errors
    ///
    /// Any [`CatalogError`] variant from the request/decode path.
    pub async fn list_blueprint_providers(
        &self,
        blueprint_id: u32,
    ) -> Result<Vec<PrintProvider>, CatalogError> {
        self.get_json(
            &format!("v1/catalog/blueprints/{blueprint_id}/print_providers.json"),
            &format!("listBlueprintProviders(blueprint={blueprint_id})"),
        )
        .await
    }

    /// Fetches the enriched detail record for one provider.
    ///
    /// # Errors
    ///
    /// Any [`CatalogError`] variant from the request/decode path.
    pub async fn get_print_provider(&self, provider_id: u32) -> Result<PrintProvider, CatalogError> {
        self.get_json(
            &format!("v1/catalog/print_providers/{provider_id}.json"),
            &format!("getPrintProvider(provider={provider_id})"),
        )
        .await
    }

    /// Fetches the provider-scoped variant list for a blueprint,
    /// unwrapping the `{id, title, variants}` envelope.
    ///
    /// # Errors
    ///
    /// Any [`CatalogError`] variant from the request/decode path.
    pub async fn list_variants(
        &self,
        blueprint_id: u32,
        provider_id: u32,
    ) -> Result<Vec<Variant>, CatalogError> {
        let envelope: VariantsEnvelope = self
            .get_json(
                &format!(
                    "v1/catalog/blueprints/{blueprint_id}/print_providers/{provider_id}/variants.json"
                ),
                &format!("listVariants(blueprint={blueprint_id}, provider={provider_id})"),
            )
            .await?;
        tracing::debug!(
            blueprint = blueprint_id,
            provider = provider_id,
            envelope_id = ?envelope.id,
            envelope_title = ?envelope.title,
            count = envelope.variants.len(),
            "unwrapped variant envelope"
        );
        Ok(envelope.variants)
    }

    /// Fetches the provider-scoped shipping profiles for a blueprint and
    /// flattens them into one [`ShippingOption`] per covered variant id.
    ///
    /// # Errors
    ///
    /// Any [`CatalogError`] variant from the request/decode path.
    pub async fn list_shipping_options(
        &self,
        blueprint_id: u32,
        provider_id: u32,
    ) -> Result<Vec<ShippingOption>, CatalogError> {
        let response: ShippingResponse = self
            .get_json(
                &format!(
                    "v1/catalog/blueprints/{blueprint_id}/print_providers/{provider_id}/shipping.json"
                ),
                &format!("listShipping(blueprint={blueprint_id}, provider={provider_id})"),
            )
            .await?;
        Ok(flatten_shipping(response))
    }

    fn endpoint(&self, path: &str) -> Result<Url, CatalogError> {
        self.base_url.join(path).map_err(|e| CatalogError::BadUrl {
            context: path.to_string(),
            reason: e.to_string(),
        })
    }

    /// Sends a GET with the fixed header set and decodes the body.
    ///
    /// Non-2xx responses are mapped through [`Self::status_error`]; a
    /// 2xx body that does not match `T` becomes
    /// [`CatalogError::Deserialize`] tagged with `context`.
    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        context: &str,
    ) -> Result<T, CatalogError> {
        let url = self.endpoint(path)?;
        tracing::debug!(url = %url, context, "catalog GET");

        let response = self
            .client
            .get(url.clone())
            .bearer_auth(&self.token)
            .header(reqwest::header::ACCEPT, "application/json")
            .header("X-Api-Version", &self.api_version)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(Self::status_error(status.as_u16(), &url, &body));
        }

        serde_json::from_str(&body).map_err(|e| CatalogError::Deserialize {
            context: context.to_string(),
            source: e,
        })
    }

    /// Maps a non-2xx response to a typed error, preferring the API's
    /// structured error envelope over a generic status error when the
    /// body decodes as one.
    fn status_error(status: u16, url: &Url, body: &str) -> CatalogError {
        match serde_json::from_str::<ApiErrorEnvelope>(body) {
            Ok(envelope) => {
                let message = match envelope.errors.and_then(|d| d.reason) {
                    Some(reason) => format!("{}: {reason}", envelope.message),
                    None => envelope.message,
                };
                CatalogError::Api {
                    status,
                    code: envelope.code,
                    message,
                }
            }
            Err(_) => CatalogError::UnexpectedStatus {
                status,
                url: url.to_string(),
            },
        }
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
