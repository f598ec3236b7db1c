//! Cart command handlers.

use clap::Subcommand;
use storefront_client::{CatalogClient, ClientError};
use storefront_core::{KeyValueStorage, Product, Store};

use crate::render;

/// Sub-commands available under `cart`.
#[derive(Debug, Subcommand)]
pub enum CartCommands {
    /// Show cart contents and totals
    Show,
    /// Add one unit of a product
    Add {
        /// Product id
        id: String,
    },
    /// Remove a product's line
    Remove {
        /// Product id
        id: String,
    },
    /// Set a line's quantity (must be at least 1)
    Set {
        /// Product id
        id: String,
        /// New quantity
        quantity: u32,
    },
    /// Increase a line's quantity by one
    Inc {
        /// Product id
        id: String,
    },
    /// Decrease a line's quantity by one
    Dec {
        /// Product id
        id: String,
    },
    /// Empty the cart
    Clear,
}

/// What the add-to-cart button would do for `product`.
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum AddOutcome {
    Added { quantity: u32 },
    OutOfStock,
    Rejected,
}

/// Adds `product` unless it is out of stock.
pub(crate) fn add_if_in_stock<S: KeyValueStorage>(
    store: &mut Store<S>,
    product: &Product,
) -> AddOutcome {
    if !product.in_stock {
        tracing::info!(product_id = %product.id, "refusing to add out-of-stock product");
        return AddOutcome::OutOfStock;
    }
    let quantity_of = |store: &Store<S>| {
        store
            .cart()
            .item(&product.id)
            .map_or(0, |item| item.quantity)
    };
    let before = quantity_of(store);
    store.add_to_cart(product);
    match quantity_of(store) {
        quantity if quantity == before => AddOutcome::Rejected,
        quantity => AddOutcome::Added { quantity },
    }
}

/// Moves a line's quantity by `delta`. Returns `false` if the line is missing
/// or the engine rejected the new quantity.
pub(crate) fn step_quantity<S: KeyValueStorage>(
    store: &mut Store<S>,
    product_id: &str,
    delta: i64,
) -> bool {
    let Some(current) = store.cart().item(product_id).map(|item| item.quantity) else {
        return false;
    };
    let Ok(target) = u32::try_from(i64::from(current) + delta) else {
        return false;
    };
    store.update_quantity(product_id, target);
    store.cart().item(product_id).map(|item| item.quantity) == Some(target)
}

pub(crate) async fn run_cart<S: KeyValueStorage>(
    client: &CatalogClient,
    store: &mut Store<S>,
    command: CartCommands,
) {
    match command {
        CartCommands::Show => {}
        CartCommands::Add { id } => match client.get_product(&id).await {
            Ok(product) => match add_if_in_stock(store, &product) {
                AddOutcome::Added { quantity } => {
                    println!("Added {} (quantity {quantity})", product.name);
                }
                AddOutcome::OutOfStock => {
                    println!("{} is out of stock", product.name);
                    return;
                }
                AddOutcome::Rejected => {
                    println!("Could not add {}: cart total is too large", product.name);
                }
            },
            Err(ClientError::ProductNotFound { .. }) => {
                println!("Product not found");
                return;
            }
            Err(e) => {
                tracing::warn!(error = %e, id = %id, "failed to fetch product");
                return;
            }
        },
        CartCommands::Remove { id } => {
            if store.cart().item(&id).is_none() {
                println!("{id} is not in the cart");
            }
            store.remove_from_cart(&id);
        }
        CartCommands::Set { id, quantity } => {
            store.update_quantity(&id, quantity);
            if store.cart().item(&id).map(|item| item.quantity) != Some(quantity) {
                println!("Quantity unchanged: must be at least 1 for a product in the cart");
            }
        }
        CartCommands::Inc { id } => {
            if !step_quantity(store, &id, 1) {
                println!("{id} is not in the cart");
            }
        }
        CartCommands::Dec { id } => {
            if !step_quantity(store, &id, -1) {
                println!("Quantity unchanged: must be at least 1 for a product in the cart");
            }
        }
        CartCommands::Clear => {
            store.clear_cart();
        }
    }

    println!("{}", render::cart_summary(store.cart()));
}
