//! Application state container.
//!
//! [`Store`] owns the cart and the listing filters, hydrates them from a
//! [`KeyValueStorage`] on construction and writes the full state back after
//! every mutation that changed something.

use serde::{Deserialize, Serialize};

use crate::error::StorageError;
use crate::filter::FilterPatch;
use crate::storage::KeyValueStorage;
use crate::types::{CartState, FilterState, Product};

/// Key under which the state envelope is stored.
pub const STORAGE_KEY: &str = "cart-storage";

const STATE_VERSION: u32 = 0;

/// Everything that is persisted between sessions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedState {
    pub cart: CartState,
    pub filters: FilterState,
}

#[derive(Debug, Deserialize)]
struct Envelope {
    state: PersistedState,
    version: u32,
}

#[derive(Serialize)]
struct EnvelopeRef<'a> {
    state: &'a PersistedState,
    version: u32,
}

pub struct Store<S> {
    storage: S,
    state: PersistedState,
}

impl<S: KeyValueStorage> Store<S> {
    /// Builds a store from whatever `storage` holds under [`STORAGE_KEY`].
    ///
    /// Missing, unreadable or malformed state falls back to defaults.
    pub fn load(storage: S) -> Self {
        let state = read_state(&storage).unwrap_or_default();
        Self { storage, state }
    }

    #[must_use]
    pub fn cart(&self) -> &CartState {
        &self.state.cart
    }

    #[must_use]
    pub fn filters(&self) -> &FilterState {
        &self.state.filters
    }

    #[must_use]
    pub fn state(&self) -> &PersistedState {
        &self.state
    }

    #[must_use]
    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn add_to_cart(&mut self, product: &Product) -> &CartState {
        if self.state.cart.add(product) {
            tracing::debug!(product_id = %product.id, "added to cart");
            self.persist();
        } else {
            tracing::warn!(product_id = %product.id, "add rejected; quantity or cart totals would overflow");
        }
        &self.state.cart
    }

    pub fn remove_from_cart(&mut self, product_id: &str) -> &CartState {
        if self.state.cart.remove(product_id) {
            tracing::debug!(product_id, "removed from cart");
            self.persist();
        }
        &self.state.cart
    }

    /// Sets a line's quantity. Values below 1, unknown ids and changes whose
    /// totals would overflow are ignored.
    pub fn update_quantity(&mut self, product_id: &str, quantity: u32) -> &CartState {
        if self.state.cart.set_quantity(product_id, quantity) {
            tracing::debug!(product_id, quantity, "quantity updated");
            self.persist();
            return &self.state.cart;
        }

        match self.state.cart.item(product_id) {
            _ if quantity < 1 => {
                tracing::debug!(product_id, quantity, "quantity below 1 ignored");
            }
            None => {
                tracing::debug!(product_id, quantity, "quantity update for product not in cart");
            }
            Some(item) if item.quantity == quantity => {
                tracing::debug!(product_id, quantity, "quantity unchanged");
            }
            Some(_) => {
                tracing::warn!(product_id, quantity, "quantity rejected; cart totals would overflow");
            }
        }
        &self.state.cart
    }

    pub fn clear_cart(&mut self) -> &CartState {
        self.state.cart.clear();
        self.persist();
        &self.state.cart
    }

    pub fn set_filters(&mut self, patch: FilterPatch) -> &FilterState {
        if !patch.is_empty() {
            self.state.filters.apply_patch(patch);
            self.persist();
        }
        &self.state.filters
    }

    pub fn reset_filters(&mut self) -> &FilterState {
        self.state.filters = FilterState::default();
        self.persist();
        &self.state.filters
    }

    // Best-effort: failures are logged and the in-memory state stays authoritative.
    fn persist(&self) {
        if let Err(e) = self.write_state() {
            tracing::warn!(error = %e, key = STORAGE_KEY, "failed to persist state");
        }
    }

    fn write_state(&self) -> Result<(), StorageError> {
        let encoded = encode_state(&self.state)?;
        self.storage.set(STORAGE_KEY, &encoded)
    }
}

fn encode_state(state: &PersistedState) -> Result<String, StorageError> {
    let envelope = EnvelopeRef {
        state,
        version: STATE_VERSION,
    };
    serde_json::to_string(&envelope).map_err(|source| StorageError::Serialize {
        key: STORAGE_KEY.to_string(),
        source,
    })
}

fn read_state(storage: &impl KeyValueStorage) -> Option<PersistedState> {
    let raw = match storage.get(STORAGE_KEY) {
        Ok(Some(raw)) => raw,
        Ok(None) => return None,
        Err(e) => {
            tracing::warn!(error = %e, key = STORAGE_KEY, "failed to read stored state; using defaults");
            return None;
        }
    };

    let envelope: Envelope = match serde_json::from_str(&raw) {
        Ok(envelope) => envelope,
        Err(e) => {
            tracing::warn!(error = %e, key = STORAGE_KEY, "malformed stored state; using defaults");
            return None;
        }
    };

    if envelope.version != STATE_VERSION {
        tracing::warn!(
            version = envelope.version,
            expected = STATE_VERSION,
            "unsupported stored state version; using defaults"
        );
        return None;
    }

    let PersistedState { cart, filters } = envelope.state;
    let Some(cart) = CartState::from_items(cart.items) else {
        tracing::warn!(key = STORAGE_KEY, "stored cart violates invariants; using defaults");
        return None;
    };

    Some(PersistedState { cart, filters })
}

#[cfg(test)]
#[path = "store_test.rs"]
mod tests;
