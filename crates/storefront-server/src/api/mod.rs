mod products;

use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, Method},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use storefront_core::Catalog;
use tower::ServiceBuilder;
use tower_http::{compression::CompressionLayer, cors::CorsLayer, trace::TraceLayer};

use crate::middleware::{request_id, REQUEST_ID_HEADER};

#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<Catalog>,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct HealthData {
    status: &'static str,
    products: usize,
}

fn build_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET])
        .allow_headers([header::CONTENT_TYPE, REQUEST_ID_HEADER])
}

pub fn build_app(state: AppState) -> Router {
    // `/search` is a static segment and wins over the `{id}` capture.
    Router::new()
        .route("/api/health", get(health))
        .route("/api/products", get(products::list_products))
        .route("/api/products/search", get(products::search_products))
        .route("/api/products/{id}", get(products::get_product))
        .route(
            "/api/products/{id}/related",
            get(products::related_products),
        )
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(build_cors())
                .layer(CompressionLayer::new())
                .layer(axum::middleware::from_fn(request_id)),
        )
        .with_state(state)
}

async fn health(State(state): State<AppState>) -> Json<HealthData> {
    Json(HealthData {
        status: "ok",
        products: state.catalog.len(),
    })
}
