use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Response},
    Extension, Json,
};
use serde::Deserialize;
use storefront_core::catalog::RELATED_LIMIT;
use storefront_core::{search_catalog, Product, ProductLookup};

use crate::middleware::RequestId;

use super::AppState;

#[derive(Debug, Deserialize)]
pub(super) struct SearchQuery {
    pub query: Option<String>,
}

pub(super) async fn list_products(State(state): State<AppState>) -> Json<Vec<Product>> {
    Json(state.catalog.all().to_vec())
}

pub(super) async fn get_product(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(id): Path<String>,
) -> Json<ProductLookup> {
    match state.catalog.get(&id) {
        Some(product) => Json(ProductLookup::Found(product.clone())),
        None => {
            tracing::debug!(request_id = %req_id.0, id = %id, "product not found");
            Json(ProductLookup::not_found())
        }
    }
}

pub(super) async fn related_products(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(id): Path<String>,
) -> Response {
    if state.catalog.get(&id).is_none() {
        tracing::debug!(request_id = %req_id.0, id = %id, "related lookup for unknown product");
        return Json(ProductLookup::not_found()).into_response();
    }

    let related: Vec<Product> = state
        .catalog
        .related(&id, RELATED_LIMIT)
        .into_iter()
        .cloned()
        .collect();
    Json(related).into_response()
}

pub(super) async fn search_products(
    State(state): State<AppState>,
    Query(params): Query<SearchQuery>,
) -> Json<Vec<Product>> {
    let query = params.query.unwrap_or_default();
    let results: Vec<Product> = search_catalog(state.catalog.all(), &query)
        .into_iter()
        .cloned()
        .collect();
    tracing::debug!(query = %query, matches = results.len(), "product search");
    Json(results)
}
