//! Integration tests for `CatalogClient`.
//!
//! Each test stands up a `wiremock` server, so no real network traffic is
//! made. Covers every endpoint plus the error variants the client maps.

use rust_decimal::Decimal;
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use storefront_client::{CatalogClient, ClientError};

fn test_client(server: &MockServer) -> CatalogClient {
    CatalogClient::new(&server.uri(), 5, "storefront-test/0.1").expect("failed to build test client")
}

fn product_json(id: &str, name: &str, price: f64, category: &str) -> serde_json::Value {
    json!({
        "id": id,
        "name": name,
        "description": format!("{name} description"),
        "price": price,
        "category": category,
        "image": format!("/images/{id}.jpg"),
        "inStock": true
    })
}

// ---------------------------------------------------------------------------
// Happy paths
// ---------------------------------------------------------------------------

#[tokio::test]
async fn list_products_decodes_catalog() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/products"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            product_json("1", "Wireless Headphones", 199.99, "electronics"),
            product_json("5", "Running Shoes", 129.99, "footwear"),
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let products = test_client(&server).list_products().await.expect("list");

    assert_eq!(products.len(), 2);
    assert_eq!(products[0].name, "Wireless Headphones");
    assert_eq!(products[0].price, Decimal::new(19999, 2));
    assert!(products[1].in_stock);
}

#[tokio::test]
async fn get_product_returns_found_product() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/products/3"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(product_json("3", "Leather Wallet", 49.99, "accessories")),
        )
        .mount(&server)
        .await;

    let product = test_client(&server).get_product("3").await.expect("get");

    assert_eq!(product.id, "3");
    assert_eq!(product.category, "accessories");
}

#[tokio::test]
async fn get_product_maps_error_payload_to_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/products/999"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"error": "Product not found"})))
        .mount(&server)
        .await;

    let result = test_client(&server).get_product("999").await;

    assert!(
        matches!(result, Err(ClientError::ProductNotFound { ref id }) if id == "999"),
        "expected ProductNotFound, got: {result:?}"
    );
}

#[tokio::test]
async fn related_products_hits_related_endpoint() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/products/3/related"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            product_json("4", "Sunglasses", 79.99, "accessories"),
            product_json("6", "Backpack", 59.99, "accessories"),
        ])))
        .mount(&server)
        .await;

    let related = test_client(&server)
        .related_products("3")
        .await
        .expect("related");

    let ids: Vec<&str> = related.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, ["4", "6"]);
}

#[tokio::test]
async fn related_products_maps_error_payload_to_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/products/nope/related"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"error": "Product not found"})))
        .mount(&server)
        .await;

    let result = test_client(&server).related_products("nope").await;

    assert!(matches!(result, Err(ClientError::ProductNotFound { .. })));
}

#[tokio::test]
async fn search_sends_query_parameter_untrimmed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/products/search"))
        .and(query_param("query", " head "))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([product_json(
            "1",
            "Wireless Headphones",
            199.99,
            "electronics"
        )])))
        .expect(1)
        .mount(&server)
        .await;

    let results = test_client(&server).search(" head ").await.expect("search");

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].id, "1");
}

#[tokio::test]
async fn search_returns_empty_vec_for_no_matches() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/products/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let results = test_client(&server).search("zzz").await.expect("search");

    assert!(results.is_empty());
}

// ---------------------------------------------------------------------------
// Error variants
// ---------------------------------------------------------------------------

#[tokio::test]
async fn server_error_status_is_unexpected_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/products"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let result = test_client(&server).list_products().await;

    assert!(
        matches!(result, Err(ClientError::UnexpectedStatus { status: 500, .. })),
        "expected UnexpectedStatus(500), got: {result:?}"
    );
}

#[tokio::test]
async fn malformed_body_is_deserialize_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/products"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json at all"))
        .mount(&server)
        .await;

    let result = test_client(&server).list_products().await;

    assert!(
        matches!(result, Err(ClientError::Deserialize { ref context, .. }) if context == "product list"),
        "expected Deserialize, got: {result:?}"
    );
}

#[tokio::test]
async fn unreachable_server_is_http_error() {
    let server = MockServer::start().await;
    let client = test_client(&server);
    drop(server);

    let result = client.list_products().await;

    assert!(
        matches!(result, Err(ClientError::Http(_))),
        "expected Http error, got: {result:?}"
    );
}
