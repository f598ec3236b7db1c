use rust_decimal::Decimal;

use crate::types::Product;

/// Number of related products shown on a product page.
pub const RELATED_LIMIT: usize = 3;

/// Immutable, in-memory product catalog.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    #[must_use]
    pub fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    /// The storefront's hardcoded product list.
    #[must_use]
    pub fn builtin() -> Self {
        Self::new(builtin_products())
    }

    #[must_use]
    pub fn all(&self) -> &[Product] {
        &self.products
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Distinct categories in first-seen order.
    #[must_use]
    pub fn categories(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for product in &self.products {
            if !seen.contains(&product.category.as_str()) {
                seen.push(&product.category);
            }
        }
        seen
    }

    /// Up to `limit` other products sharing the category of `id`, in catalog
    /// order. Empty when `id` is unknown.
    #[must_use]
    pub fn related(&self, id: &str, limit: usize) -> Vec<&Product> {
        let Some(product) = self.get(id) else {
            return Vec::new();
        };
        self.products
            .iter()
            .filter(|p| p.category == product.category && p.id != id)
            .take(limit)
            .collect()
    }
}

fn entry(
    id: &str,
    name: &str,
    description: &str,
    price_cents: i64,
    category: &str,
    image: &str,
    in_stock: bool,
) -> Product {
    Product {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        price: Decimal::new(price_cents, 2),
        category: category.to_string(),
        image: image.to_string(),
        in_stock,
    }
}

fn builtin_products() -> Vec<Product> {
    vec![
        entry(
            "1",
            "Wireless Headphones",
            "Experience superior audio with HuluLulu wireless headphones featuring advanced Bluetooth 5.0, 30-hour battery life, active noise cancellation reducing ambient sound by 98%, memory foam ear cushions, and compatibility with Siri and Google Assistant.",
            19999,
            "electronics",
            "https://images.unsplash.com/photo-1505740420928-5e560c06d30e?w=500",
            true,
        ),
        entry(
            "2",
            "Smart Watch",
            "Track your health and fitness with the HuluLulu smartwatch offering continuous heart rate and SpO2 monitoring, built-in GPS, water resistance up to 50 meters, customizable watch faces, and 7-day battery life for everyday use.",
            29999,
            "electronics",
            "https://images.unsplash.com/photo-1523275335684-37898b6baf30?w=500",
            true,
        ),
        entry(
            "3",
            "Leather Wallet",
            "Crafted from premium full-grain Italian leather, the HuluLulu wallet includes RFID blocking technology, 8 card slots, 2 bill compartments, a slim and elegant design, and comes in classic brown and black finishes.",
            4999,
            "accessories",
            "https://images.unsplash.com/photo-1627123424574-724758594e93?w=500",
            true,
        ),
        entry(
            "4",
            "Sunglasses",
            "Stylish and protective, these HuluLulu sunglasses feature polarized UV400 lenses, anti-reflective coating, a durable acetate frame with spring hinges, and include a hard case and cleaning cloth for convenient storage.",
            12999,
            "accessories",
            "https://images.unsplash.com/photo-1572635196237-14b3f281503f?w=500",
            false,
        ),
        entry(
            "5",
            "Running Shoes",
            "Built for performance, HuluLulu running shoes combine breathable mesh uppers, responsive cushioning, anti-slip rubber soles, memory foam insoles, and reflective elements to keep you visible and comfortable on every run.",
            8999,
            "footwear",
            "https://images.unsplash.com/photo-1542291026-7eec264c27ff?w=500",
            true,
        ),
        entry(
            "6",
            "Backpack",
            "Designed for travel and everyday use, the HuluLulu backpack is made from durable water-resistant cordura, features a padded laptop sleeve, multiple organizational pockets, ergonomic straps, side bottle holders, and compression straps for secure packing.",
            7999,
            "accessories",
            "https://images.unsplash.com/photo-1553062407-98eeb64c6a62?w=500",
            true,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn builtin_catalog_has_six_unique_products() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.len(), 6);
        let ids: HashSet<&str> = catalog.all().iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids.len(), 6, "product ids must be unique");
        assert!(catalog.all().iter().all(|p| p.price >= Decimal::ZERO));
    }

    #[test]
    fn get_finds_by_id() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.get("5").map(|p| p.name.as_str()), Some("Running Shoes"));
        assert!(catalog.get("999").is_none());
    }

    #[test]
    fn categories_are_distinct_in_first_seen_order() {
        let catalog = Catalog::builtin();
        assert_eq!(
            catalog.categories(),
            ["electronics", "accessories", "footwear"]
        );
    }

    #[test]
    fn related_excludes_self_and_respects_limit() {
        let catalog = Catalog::builtin();
        let related: Vec<&str> = catalog
            .related("3", RELATED_LIMIT)
            .iter()
            .map(|p| p.id.as_str())
            .collect();
        assert_eq!(related, ["4", "6"]);

        assert_eq!(catalog.related("3", 1).len(), 1);
        assert!(catalog.related("5", RELATED_LIMIT).is_empty());
        assert!(catalog.related("nope", RELATED_LIMIT).is_empty());
    }
}
