//! Integration tests for `CatalogClient` using wiremock HTTP mocks.
//!
//! Each test stands up its own `MockServer`, so no real network traffic
//! is made. Header matchers double as assertions that the fixed header
//! set (bearer auth, content negotiation, API version) is attached to
//! every request.

use serde_json::json;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use podcat_catalog::{CatalogClient, CatalogError};
use podcat_core::AppConfig;

fn test_config() -> AppConfig {
    AppConfig {
        api_token: "test-token".to_string(),
        api_base_url: "https://api.printify.com".to_string(),
        api_version: "v1".to_string(),
        log_level: "info".to_string(),
        request_timeout_secs: 5,
        user_agent: "podcat-test/0.1".to_string(),
        batch_size: 9,
        inter_batch_delay_ms: 0,
        sequential_delay_ms: 0,
        catalog_limit: 0,
    }
}

fn test_client(base_url: &str) -> CatalogClient {
    CatalogClient::with_base_url(&test_config(), base_url)
        .expect("client construction should not fail")
}

fn blueprint_json(id: u32) -> serde_json::Value {
    json!({
        "id": id,
        "title": format!("Blueprint {id}"),
        "description": "A product template",
        "brand": "Delta",
        "model": "11736",
        "images": ["https://images.example.com/front.png"]
    })
}

#[tokio::test]
async fn list_blueprints_sends_fixed_headers_and_decodes() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/catalog/blueprints.json"))
        .and(header("Authorization", "Bearer test-token"))
        .and(header("Accept", "application/json"))
        .and(header("X-Api-Version", "v1"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(&json!([blueprint_json(3), blueprint_json(5)])),
        )
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let blueprints = client.list_blueprints().await.expect("should decode list");

    assert_eq!(blueprints.len(), 2);
    assert_eq!(blueprints[0].id, 3);
    assert_eq!(blueprints[1].title, "Blueprint 5");
}

#[tokio::test]
async fn get_product_detail_decodes_full_record() {
    let server = MockServer::start().await;

    let body = json!({
        "id": 3,
        "title": "Kids Regular Fit Tee",
        "description": "Soft cotton tee",
        "brand": "Delta",
        "model": "11736",
        "images": ["https://images.example.com/front.png"],
        "available": true,
        "print_areas": [{"position": "front", "height": 3995, "width": 3153}],
        "options": [{"name": "Colors", "type": "color"}],
        "main_image_url": "https://images.example.com/main.png",
        "created_at": "2023-10-01 12:00:00+00:00",
        "updated_at": "2024-01-05 08:30:00+00:00"
    });

    Mock::given(method("GET"))
        .and(path("/v1/catalog/blueprints/3.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let detail = client.get_product_detail(3).await.expect("should decode detail");

    assert_eq!(detail.id, 3);
    assert!(detail.available);
    assert!(!detail.is_placeholder());
    assert_eq!(
        detail.main_image_url.as_deref(),
        Some("https://images.example.com/main.png")
    );
}

#[tokio::test]
async fn blueprint_providers_accept_both_location_shapes() {
    let server = MockServer::start().await;

    let body = json!([
        {"id": 29, "title": "Monster Digital", "location": "US"},
        {
            "id": 30,
            "title": "OPT OnDemand",
            "location": {"country": "LV", "city": "Riga", "zip": "LV-1063"}
        }
    ]);

    Mock::given(method("GET"))
        .and(path("/v1/catalog/blueprints/3/print_providers.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let providers = client
        .list_blueprint_providers(3)
        .await
        .expect("mixed location shapes should decode");

    assert_eq!(providers.len(), 2);
    assert_eq!(providers[0].location, "US");
    assert!(providers[0].address.is_none());
    assert_eq!(providers[1].location, "LV");
    assert_eq!(
        providers[1].address.as_ref().and_then(|a| a.city.as_deref()),
        Some("Riga")
    );
}

#[tokio::test]
async fn list_variants_unwraps_envelope() {
    let server = MockServer::start().await;

    let body = json!({
        "id": 3,
        "title": "Kids Regular Fit Tee",
        "variants": [
            {"id": 17390, "title": "Heather / XS", "price": 1210,
             "options": {"color": "Heather", "size": "XS"}},
            {"id": 17391, "title": "Heather / S", "price": 1210,
             "options": {"color": "Heather", "size": "S"}}
        ]
    });

    Mock::given(method("GET"))
        .and(path("/v1/catalog/blueprints/3/print_providers/29/variants.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let variants = client.list_variants(3, 29).await.expect("should unwrap envelope");

    assert_eq!(variants.len(), 2);
    assert_eq!(variants[0].id, 17390);
    assert_eq!(variants[1].price, Some(1210));
}

#[tokio::test]
async fn list_shipping_options_flattens_profiles() {
    let server = MockServer::start().await;

    let body = json!({
        "handling_time": {"value": 30, "unit": "day"},
        "profiles": [
            {
                "variant_ids": [17390, 17391, 17392],
                "first_item": {"cost": 450, "currency": "USD"},
                "additional_items": {"cost": 0, "currency": "USD"},
                "countries": ["US"]
            },
            {
                "variant_ids": [17390, 17391],
                "first_item": {"cost": 1000, "currency": "USD"},
                "additional_items": {"cost": 100, "currency": "USD"},
                "countries": ["REST_OF_THE_WORLD"]
            }
        ]
    });

    Mock::given(method("GET"))
        .and(path("/v1/catalog/blueprints/3/print_providers/29/shipping.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let options = client
        .list_shipping_options(3, 29)
        .await
        .expect("should flatten profiles");

    // Sum of per-profile variant-id counts: 3 + 2.
    assert_eq!(options.len(), 5);
    assert!(options.iter().all(|o| o.handling_time.value == 30));
    let world = options
        .iter()
        .find(|o| o.countries == ["REST_OF_THE_WORLD"])
        .expect("world profile flattened");
    assert_eq!(world.first_item_cents, 1000);
}

#[tokio::test]
async fn non_2xx_with_envelope_surfaces_api_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/catalog/blueprints/999.json"))
        .respond_with(ResponseTemplate::new(404).set_body_json(&json!({
            "status": "error",
            "code": 8150,
            "message": "Blueprint not found",
            "errors": {"reason": "no blueprint with id 999"}
        })))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client
        .get_product_detail(999)
        .await
        .expect_err("expected Api error");

    match err {
        CatalogError::Api {
            status,
            code,
            message,
        } => {
            assert_eq!(status, 404);
            assert_eq!(code, 8150);
            assert_eq!(message, "Blueprint not found: no blueprint with id 999");
        }
        other => panic!("expected Api error, got: {other:?}"),
    }
}

#[tokio::test]
async fn non_2xx_without_envelope_is_unexpected_status() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/catalog/blueprints.json"))
        .respond_with(ResponseTemplate::new(503).set_body_string("upstream unavailable"))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client.list_blueprints().await.expect_err("expected error");

    assert!(
        matches!(err, CatalogError::UnexpectedStatus { status: 503, .. }),
        "expected UnexpectedStatus(503), got: {err:?}"
    );
}

#[tokio::test]
async fn schema_mismatch_is_deserialize_error() {
    let server = MockServer::start().await;

    // 200 body that is valid JSON but not a blueprint list.
    Mock::given(method("GET"))
        .and(path("/v1/catalog/blueprints.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&json!({"unexpected": true})))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client.list_blueprints().await.expect_err("expected error");

    assert!(
        matches!(err, CatalogError::Deserialize { ref context, .. } if context == "listBlueprints"),
        "expected Deserialize(listBlueprints), got: {err:?}"
    );
}

#[tokio::test]
async fn global_provider_list_decodes() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/catalog/print_providers.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&json!([
            {"id": 29, "title": "Monster Digital", "location": "US"}
        ])))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let providers = client.list_print_providers().await.expect("should decode");
    assert_eq!(providers.len(), 1);
    assert_eq!(providers[0].id, 29);
}

#[tokio::test]
async fn provider_detail_decodes_enrichment_fields() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/catalog/print_providers/29.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&json!({
            "id": 29,
            "title": "Monster Digital",
            "location": {
                "country": "US",
                "city": "Miami",
                "address1": "16085 NW 52nd Ave",
                "region": "FL",
                "zip": "33014"
            },
            "production_time_days": 3,
            "rating": 4.6,
            "base_price": 899,
            "blueprint_offerings": [3, 5, 6]
        })))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let provider = client.get_print_provider(29).await.expect("should decode detail");

    assert_eq!(provider.location, "US");
    assert_eq!(provider.rating, Some(4.6));
    assert_eq!(provider.production_time_days, Some(3));
    assert_eq!(provider.blueprint_offerings, vec![3, 5, 6]);
}
