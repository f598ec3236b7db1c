//! Cart engine: line-item mutations and total recomputation.
//!
//! Every mutation ends by recomputing both totals from the full item list,
//! so the cached values can never drift from `items`. A mutation whose totals
//! would overflow `Decimal` is rejected and leaves the cart as it was.

use std::collections::HashSet;

use rust_decimal::Decimal;

use crate::types::{CartLineItem, CartState, Product};

/// Promotional marker. A product whose description contains this exact,
/// case-sensitive substring gets 10% off its line total.
pub const DISCOUNT_MARKER: &str = "HuluLulu";

/// Share of the price still paid on a discounted line.
fn discount_multiplier() -> Decimal {
    Decimal::new(9, 1)
}

/// Returns `true` if a description carries the discount marker.
#[must_use]
pub fn is_discount_eligible(description: &str) -> bool {
    description.contains(DISCOUNT_MARKER)
}

impl Product {
    #[must_use]
    pub fn has_discount(&self) -> bool {
        is_discount_eligible(&self.description)
    }

    /// Unit price after the promotional discount, if any.
    #[must_use]
    pub fn discounted_price(&self) -> Decimal {
        if self.has_discount() {
            self.price * discount_multiplier()
        } else {
            self.price
        }
    }
}

impl CartLineItem {
    #[must_use]
    pub fn new(product: Product) -> Self {
        Self {
            product,
            quantity: 1,
        }
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.product.id
    }

    /// Price times quantity, or `None` if the product overflows `Decimal`.
    #[must_use]
    pub fn line_total(&self) -> Option<Decimal> {
        self.product.price.checked_mul(Decimal::from(self.quantity))
    }

    #[must_use]
    pub fn discounted_line_total(&self) -> Option<Decimal> {
        let total = self.line_total()?;
        if self.product.has_discount() {
            total.checked_mul(discount_multiplier())
        } else {
            Some(total)
        }
    }
}

impl CartState {
    /// Adds one unit of `product`: bumps the existing line or appends a new
    /// line with quantity 1.
    ///
    /// Returns `false`, leaving the cart untouched, when the quantity is
    /// already at its maximum or the new totals would overflow.
    pub fn add(&mut self, product: &Product) -> bool {
        let mut items = self.items.clone();
        match items.iter_mut().find(|item| item.id() == product.id) {
            Some(item) => match item.quantity.checked_add(1) {
                Some(quantity) => item.quantity = quantity,
                None => return false,
            },
            None => items.push(CartLineItem::new(product.clone())),
        }
        self.commit(items)
    }

    /// Removes the line for `product_id`. Returns `false` (and changes
    /// nothing) when no such line exists.
    pub fn remove(&mut self, product_id: &str) -> bool {
        if self.item(product_id).is_none() {
            return false;
        }
        let items = self
            .items
            .iter()
            .filter(|item| item.id() != product_id)
            .cloned()
            .collect();
        self.commit(items)
    }

    /// Sets the quantity of an existing line to exactly `quantity`.
    ///
    /// Quantities below 1 are rejected without touching state, as are unknown
    /// ids and quantities whose totals would overflow. Returns whether the
    /// cart changed.
    pub fn set_quantity(&mut self, product_id: &str, quantity: u32) -> bool {
        if quantity < 1 {
            return false;
        }
        let mut items = self.items.clone();
        let Some(item) = items.iter_mut().find(|item| item.id() == product_id) else {
            return false;
        };
        if item.quantity == quantity {
            return false;
        }
        item.quantity = quantity;
        self.commit(items)
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.total = Decimal::ZERO;
        self.discounted_total = Decimal::ZERO;
    }

    #[must_use]
    pub fn item(&self, product_id: &str) -> Option<&CartLineItem> {
        self.items.iter().find(|item| item.id() == product_id)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Total units across all lines (the cart badge count).
    #[must_use]
    pub fn unit_count(&self) -> u32 {
        self.items
            .iter()
            .fold(0u32, |sum, item| sum.saturating_add(item.quantity))
    }

    #[must_use]
    pub fn has_discount(&self) -> bool {
        self.discounted_total < self.total
    }

    #[must_use]
    pub fn savings(&self) -> Decimal {
        self.total - self.discounted_total
    }

    /// Rebuilds a cart from stored line items, recomputing totals.
    ///
    /// Returns `None` if the items break a cart invariant: duplicate ids, a
    /// zero quantity, a negative price or totals that overflow.
    #[must_use]
    pub fn from_items(items: Vec<CartLineItem>) -> Option<Self> {
        let mut seen = HashSet::with_capacity(items.len());
        let valid = items.iter().all(|item| {
            item.quantity >= 1 && item.product.price >= Decimal::ZERO && seen.insert(item.id())
        });
        if !valid {
            return None;
        }
        let mut cart = Self::default();
        cart.commit(items).then_some(cart)
    }

    /// Replaces the items and both totals, or leaves everything as it was if
    /// the totals of `items` overflow.
    fn commit(&mut self, items: Vec<CartLineItem>) -> bool {
        let Some((total, discounted_total)) = totals(&items) else {
            return false;
        };
        self.items = items;
        self.total = total;
        self.discounted_total = discounted_total;
        true
    }
}

fn totals(items: &[CartLineItem]) -> Option<(Decimal, Decimal)> {
    items
        .iter()
        .try_fold((Decimal::ZERO, Decimal::ZERO), |(total, discounted), item| {
            Some((
                total.checked_add(item.line_total()?)?,
                discounted.checked_add(item.discounted_line_total()?)?,
            ))
        })
}

#[cfg(test)]
#[path = "cart_test.rs"]
mod tests;
