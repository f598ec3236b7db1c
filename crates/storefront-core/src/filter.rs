//! Product listing pipeline: category, price, stock, text, then sort.

use std::cmp::Ordering;

use rust_decimal::Decimal;

use crate::types::{FilterState, Product, SortBy};

/// Category value that behaves like an empty category.
pub const ALL_CATEGORIES: &str = "all";

/// Partial update to [`FilterState`]. `None` fields leave the current value
/// alone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterPatch {
    pub category: Option<String>,
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
    pub in_stock: Option<Option<bool>>,
    pub sort_by: Option<SortBy>,
    pub search_query: Option<String>,
}

impl FilterPatch {
    /// Sets both price bounds, swapping them if given out of order.
    #[must_use]
    pub fn price_range(a: Decimal, b: Decimal) -> Self {
        Self {
            min_price: Some(a.min(b)),
            max_price: Some(a.max(b)),
            ..Self::default()
        }
    }

    /// The "only in stock" toggle: on writes `true`, off writes "don't care".
    #[must_use]
    pub fn in_stock_only(enabled: bool) -> Self {
        Self {
            in_stock: Some(enabled.then_some(true)),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn search(query: impl Into<String>) -> Self {
        Self {
            search_query: Some(query.into()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

impl FilterState {
    /// Merges `patch` into the current filters.
    pub fn apply_patch(&mut self, patch: FilterPatch) {
        let FilterPatch {
            category,
            min_price,
            max_price,
            in_stock,
            sort_by,
            search_query,
        } = patch;

        if let Some(category) = category {
            self.category = category;
        }
        if let Some(min_price) = min_price {
            self.min_price = min_price;
        }
        if let Some(max_price) = max_price {
            self.max_price = max_price;
        }
        if let Some(in_stock) = in_stock {
            self.in_stock = in_stock;
        }
        if let Some(sort_by) = sort_by {
            self.sort_by = sort_by;
        }
        if let Some(search_query) = search_query {
            self.search_query = Some(search_query);
        }
    }

    /// The non-blank, lower-cased text query, if any.
    fn text_needle(&self) -> Option<String> {
        self.search_query
            .as_deref()
            .filter(|q| !q.trim().is_empty())
            .map(str::to_lowercase)
    }
}

/// Runs the listing pipeline over `products`.
///
/// Pure: the same inputs always produce the same, stably ordered output.
#[must_use]
pub fn apply_filters<'a>(products: &'a [Product], filters: &FilterState) -> Vec<&'a Product> {
    let needle = filters.text_needle();

    let mut listed: Vec<&Product> = products
        .iter()
        .filter(|p| matches_category(p, &filters.category))
        .filter(|p| filters.min_price <= p.price && p.price <= filters.max_price)
        .filter(|p| matches_stock(p, filters.in_stock))
        .filter(|p| needle.as_deref().is_none_or(|n| matches_text(p, n)))
        .collect();

    listed.sort_by(|a, b| compare(a, b, filters.sort_by));
    listed
}

fn matches_category(product: &Product, category: &str) -> bool {
    category.is_empty() || category == ALL_CATEGORIES || product.category == category
}

// Only an explicit `true` filters; `false` behaves like "don't care".
fn matches_stock(product: &Product, in_stock: Option<bool>) -> bool {
    in_stock != Some(true) || product.in_stock
}

fn matches_text(product: &Product, needle: &str) -> bool {
    product.name.to_lowercase().contains(needle)
        || product.description.to_lowercase().contains(needle)
        || product.category.to_lowercase().contains(needle)
}

fn compare(a: &Product, b: &Product, sort_by: SortBy) -> Ordering {
    match sort_by {
        SortBy::PriceAsc => a.price.cmp(&b.price),
        SortBy::PriceDesc => b.price.cmp(&a.price),
        SortBy::NameAsc => locale_cmp(&a.name, &b.name),
        SortBy::NameDesc => locale_cmp(&b.name, &a.name),
    }
}

/// Case-insensitive comparison; on a tie, lowercase sorts before uppercase.
fn locale_cmp(a: &str, b: &str) -> Ordering {
    a.chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase))
        .then_with(|| b.cmp(a))
}

#[cfg(test)]
#[path = "filter_test.rs"]
mod tests;
