//! Catalog browsing and search command handlers.
//!
//! Fetch failures are logged and treated as an empty result so a flaky
//! server never aborts the command.

use std::sync::Arc;
use std::time::Duration;

use storefront_client::{CatalogClient, ClientError, DiscoveryEvent, DiscoverySearch};
use storefront_core::filter::ALL_CATEGORIES;
use storefront_core::{
    apply_filters, is_searchable, Catalog, FilterPatch, KeyValueStorage, Product, Store,
};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

use crate::render;

async fn fetch_catalog(client: &CatalogClient) -> Vec<Product> {
    match client.list_products().await {
        Ok(products) => products,
        Err(e) => {
            tracing::warn!(error = %e, "failed to fetch products");
            Vec::new()
        }
    }
}

/// Lists the catalog through the saved filters.
pub(crate) async fn run_products<S: KeyValueStorage>(client: &CatalogClient, store: &Store<S>) {
    let products = fetch_catalog(client).await;
    let visible = apply_filters(&products, store.filters());

    println!("{} products found", visible.len());
    for product in visible {
        println!("  {}", render::product_line(product));
    }
}

/// Shows one product page followed by its related products.
pub(crate) async fn run_product(client: &CatalogClient, id: &str) {
    let product = match client.get_product(id).await {
        Ok(product) => product,
        Err(ClientError::ProductNotFound { .. }) => {
            println!("Product not found");
            return;
        }
        Err(e) => {
            tracing::warn!(error = %e, id, "failed to fetch product");
            println!("Product not found");
            return;
        }
    };
    println!("{}", render::product_detail(&product));

    let related = match client.related_products(id).await {
        Ok(related) => related,
        Err(e) => {
            tracing::warn!(error = %e, id, "failed to fetch related products");
            Vec::new()
        }
    };
    if !related.is_empty() {
        println!("\nRelated products:");
        for product in &related {
            println!("  {}", render::product_line(product));
        }
    }
}

pub(crate) async fn run_categories(client: &CatalogClient) {
    let catalog = Catalog::new(fetch_catalog(client).await);
    println!("{ALL_CATEGORIES}");
    for category in catalog.categories() {
        println!("{category}");
    }
}

/// One-shot search-box lookup. A blank query clears the saved search without
/// contacting the server; results write the trimmed query into the filters.
pub(crate) async fn run_search<S: KeyValueStorage>(
    client: &CatalogClient,
    store: &mut Store<S>,
    query: &str,
) {
    if !is_searchable(query) {
        store.set_filters(FilterPatch::search(""));
        println!("Search cleared");
        return;
    }

    match client.search(query).await {
        Ok(products) => show_results(store, query.trim(), &products),
        Err(e) => tracing::warn!(error = %e, query, "search failed"),
    }
}

/// Reads queries from stdin, one per line, and prints results for each query
/// that settles for the debounce window. Ends at end of input.
pub(crate) async fn run_search_watch<S: KeyValueStorage>(
    client: CatalogClient,
    store: &mut Store<S>,
    debounce: Duration,
) -> anyhow::Result<()> {
    let (tx, rx) = mpsc::channel(32);
    let mut events = DiscoverySearch::new(Arc::new(client), debounce).spawn(rx);

    let reader = tokio::spawn(async move {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        while let Some(line) = lines.next_line().await? {
            if tx.send(line).await.is_err() {
                break;
            }
        }
        Ok::<(), std::io::Error>(())
    });

    while let Some(event) = events.recv().await {
        match event {
            DiscoveryEvent::Results { query, products } => {
                show_results(store, &query, &products);
            }
            DiscoveryEvent::Cleared => {
                store.set_filters(FilterPatch::search(""));
                println!("Search cleared");
            }
        }
    }

    reader.await??;
    Ok(())
}

fn show_results<S: KeyValueStorage>(store: &mut Store<S>, query: &str, products: &[Product]) {
    store.set_filters(FilterPatch::search(query));
    println!("{} results for \"{query}\"", products.len());
    for product in products {
        println!("  {}", render::product_line(product));
    }
}
