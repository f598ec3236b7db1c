use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Payload message returned by the product lookup endpoint for unknown ids.
pub const PRODUCT_NOT_FOUND: &str = "Product not found";

/// A catalog entry. Created once when the catalog is loaded and never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    /// Free text shown on the product page. Also carries the promotional
    /// marker checked by [`crate::is_discount_eligible`].
    pub description: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub category: String,
    /// Image URI.
    pub image: String,
    pub in_stock: bool,
}

/// A product in the cart together with how many of it are held.
///
/// Serializes flat, i.e. the product fields plus `quantity`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLineItem {
    #[serde(flatten)]
    pub product: Product,
    pub quantity: u32,
}

/// Cart contents plus cached totals.
///
/// `total` and `discounted_total` are recomputed from `items` after every
/// mutation. Neither is ever patched incrementally.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartState {
    pub items: Vec<CartLineItem>,
    #[serde(with = "rust_decimal::serde::float")]
    pub total: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub discounted_total: Decimal,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortBy {
    PriceAsc,
    PriceDesc,
    #[default]
    NameAsc,
    NameDesc,
}

impl SortBy {
    pub const ALL: [SortBy; 4] = [
        SortBy::PriceAsc,
        SortBy::PriceDesc,
        SortBy::NameAsc,
        SortBy::NameDesc,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            SortBy::PriceAsc => "price-asc",
            SortBy::PriceDesc => "price-desc",
            SortBy::NameAsc => "name-asc",
            SortBy::NameDesc => "name-desc",
        }
    }

    /// Human label used by the filter panel.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            SortBy::PriceAsc => "Price: Low to High",
            SortBy::PriceDesc => "Price: High to Low",
            SortBy::NameAsc => "Name: A to Z",
            SortBy::NameDesc => "Name: Z to A",
        }
    }
}

impl fmt::Display for SortBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortBy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SortBy::ALL
            .into_iter()
            .find(|sort| sort.as_str() == s)
            .ok_or_else(|| {
                format!("unknown sort order \"{s}\"; expected price-asc, price-desc, name-asc or name-desc")
            })
    }
}

/// Criteria for the product listing pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterState {
    /// Empty string or `"all"` disables the category stage.
    pub category: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub min_price: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub max_price: Decimal,
    /// `Some(true)` hides out-of-stock products. `Some(false)` and `None`
    /// both leave the listing unfiltered.
    pub in_stock: Option<bool>,
    pub sort_by: SortBy,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search_query: Option<String>,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            category: String::new(),
            min_price: Decimal::ZERO,
            max_price: Decimal::from(1000),
            in_stock: None,
            sort_by: SortBy::NameAsc,
            search_query: None,
        }
    }
}

/// Body of `GET /api/products/{id}`: the product, or an error payload with
/// a 200 status when the id is unknown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProductLookup {
    Found(Product),
    Missing { error: String },
}

impl ProductLookup {
    #[must_use]
    pub fn not_found() -> Self {
        ProductLookup::Missing {
            error: PRODUCT_NOT_FOUND.to_string(),
        }
    }
}
