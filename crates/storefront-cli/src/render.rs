//! Plain-text rendering for terminal output.

use std::fmt::Write as _;

use storefront_core::filter::ALL_CATEGORIES;
use storefront_core::money::format_money;
use storefront_core::{CartState, FilterState, Product};

pub(crate) fn product_line(product: &Product) -> String {
    let mut line = format!(
        "[{}] {} - {} ({})",
        product.id,
        product.name,
        format_money(product.price),
        product.category
    );
    if !product.in_stock {
        line.push_str(" [out of stock]");
    }
    line
}

/// Product page: name, pricing, stock and description.
pub(crate) fn product_detail(product: &Product) -> String {
    let mut out = format!("{}\n", product.name);
    let _ = writeln!(out, "Category: {}", product.category);
    if product.has_discount() {
        let _ = writeln!(
            out,
            "Price: {} -> {} (10% OFF)",
            format_money(product.price),
            format_money(product.discounted_price())
        );
    } else {
        let _ = writeln!(out, "Price: {}", format_money(product.price));
    }
    let _ = writeln!(
        out,
        "Stock: {}",
        if product.in_stock { "In stock" } else { "Out of stock" }
    );
    let _ = write!(out, "\n{}", product.description);
    out
}

pub(crate) fn cart_summary(cart: &CartState) -> String {
    if cart.is_empty() {
        return "Your cart is empty".to_string();
    }

    let mut out = String::new();
    for item in &cart.items {
        let _ = writeln!(
            out,
            "{} x {} [{}] - {}",
            item.quantity,
            item.product.name,
            item.id(),
            item.line_total().map_or_else(|| "-".to_string(), format_money)
        );
    }
    let _ = writeln!(
        out,
        "\nItems: {} ({} {})",
        cart.unit_count(),
        cart.items.len(),
        if cart.items.len() == 1 { "line" } else { "lines" }
    );
    let _ = write!(out, "Subtotal: {}", format_money(cart.total));
    if cart.has_discount() {
        let _ = write!(
            out,
            "\nDiscounted total: {}\nYou save: {}",
            format_money(cart.discounted_total),
            format_money(cart.savings())
        );
    }
    out
}

pub(crate) fn filters_summary(filters: &FilterState) -> String {
    let category = if filters.category.is_empty() {
        ALL_CATEGORIES
    } else {
        filters.category.as_str()
    };
    let stock = match filters.in_stock {
        Some(true) => "in stock only",
        _ => "any",
    };
    let query = filters
        .search_query
        .as_deref()
        .filter(|q| !q.trim().is_empty())
        .unwrap_or("-");

    format!(
        "Category: {category}\nPrice: {} to {}\nStock: {stock}\nSort: {} ({})\nSearch: {query}",
        format_money(filters.min_price),
        format_money(filters.max_price),
        filters.sort_by.label(),
        filters.sort_by,
    )
}
