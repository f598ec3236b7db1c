use rust_decimal::Decimal;

use super::*;
use crate::Catalog;

fn ids<'a>(products: &[&'a Product]) -> Vec<&'a str> {
    products.iter().map(|p| p.id.as_str()).collect()
}

fn names<'a>(products: &[&'a Product]) -> Vec<&'a str> {
    products.iter().map(|p| p.name.as_str()).collect()
}

fn priced(id: &str, name: &str, cents: i64) -> Product {
    Product {
        id: id.to_string(),
        name: name.to_string(),
        description: String::new(),
        price: Decimal::new(cents, 2),
        category: "misc".to_string(),
        image: String::new(),
        in_stock: true,
    }
}

#[test]
fn default_filters_list_everything_by_name() {
    let catalog = Catalog::builtin();
    let listed = apply_filters(catalog.all(), &FilterState::default());
    assert_eq!(
        names(&listed),
        [
            "Backpack",
            "Leather Wallet",
            "Running Shoes",
            "Smart Watch",
            "Sunglasses",
            "Wireless Headphones",
        ]
    );
}

#[test]
fn footwear_in_stock_price_window() {
    let catalog = Catalog::builtin();
    let mut filters = FilterState::default();
    filters.apply_patch(FilterPatch {
        category: Some("footwear".to_string()),
        min_price: Some(Decimal::from(50)),
        max_price: Some(Decimal::from(200)),
        in_stock: Some(Some(true)),
        ..FilterPatch::default()
    });

    let listed = apply_filters(catalog.all(), &filters);
    assert_eq!(names(&listed), ["Running Shoes"]);
    assert!(listed.iter().all(|p| p.in_stock
        && p.category == "footwear"
        && p.price >= Decimal::from(50)
        && p.price <= Decimal::from(200)));
}

#[test]
fn all_sentinel_disables_category_stage() {
    let catalog = Catalog::builtin();
    let filters = FilterState {
        category: ALL_CATEGORIES.to_string(),
        ..FilterState::default()
    };
    assert_eq!(apply_filters(catalog.all(), &filters).len(), catalog.len());
}

#[test]
fn category_match_is_exact() {
    let catalog = Catalog::builtin();
    let filters = FilterState {
        category: "Accessories".to_string(),
        ..FilterState::default()
    };
    assert!(apply_filters(catalog.all(), &filters).is_empty());
}

#[test]
fn price_bounds_are_inclusive() {
    let catalog = Catalog::builtin();
    let filters = FilterState {
        min_price: Decimal::new(4999, 2),
        max_price: Decimal::new(8999, 2),
        sort_by: SortBy::PriceAsc,
        ..FilterState::default()
    };
    assert_eq!(ids(&apply_filters(catalog.all(), &filters)), ["3", "6", "5"]);
}

#[test]
fn in_stock_true_hides_out_of_stock() {
    let catalog = Catalog::builtin();
    let filters = FilterState {
        in_stock: Some(true),
        ..FilterState::default()
    };
    let listed = apply_filters(catalog.all(), &filters);
    assert_eq!(listed.len(), 5);
    assert!(!ids(&listed).contains(&"4"));
}

#[test]
fn in_stock_false_does_not_filter() {
    let catalog = Catalog::builtin();
    let filters = FilterState {
        in_stock: Some(false),
        ..FilterState::default()
    };
    let listed = apply_filters(catalog.all(), &filters);
    assert_eq!(listed.len(), catalog.len());
    assert!(ids(&listed).contains(&"4"));
}

#[test]
fn text_stage_matches_category_ignoring_case() {
    let catalog = Catalog::builtin();
    let filters = FilterState {
        search_query: Some("ACCESS".to_string()),
        ..FilterState::default()
    };
    assert_eq!(
        names(&apply_filters(catalog.all(), &filters)),
        ["Backpack", "Leather Wallet", "Sunglasses"]
    );
}

#[test]
fn blank_text_query_is_ignored() {
    let catalog = Catalog::builtin();
    for query in ["", "   "] {
        let filters = FilterState {
            search_query: Some(query.to_string()),
            ..FilterState::default()
        };
        assert_eq!(apply_filters(catalog.all(), &filters).len(), catalog.len());
    }
}

#[test]
fn sorts_by_price_both_ways() {
    let catalog = Catalog::builtin();
    let asc = FilterState {
        sort_by: SortBy::PriceAsc,
        ..FilterState::default()
    };
    let desc = FilterState {
        sort_by: SortBy::PriceDesc,
        ..FilterState::default()
    };
    assert_eq!(
        ids(&apply_filters(catalog.all(), &asc)),
        ["3", "6", "5", "4", "1", "2"]
    );
    assert_eq!(
        ids(&apply_filters(catalog.all(), &desc)),
        ["2", "1", "4", "5", "6", "3"]
    );
}

#[test]
fn name_sort_ignores_case() {
    let products = vec![
        priced("1", "banana", 100),
        priced("2", "Apple", 100),
        priced("3", "cherry", 100),
    ];
    let desc = FilterState {
        sort_by: SortBy::NameDesc,
        ..FilterState::default()
    };
    assert_eq!(
        names(&apply_filters(&products, &FilterState::default())),
        ["Apple", "banana", "cherry"]
    );
    assert_eq!(
        names(&apply_filters(&products, &desc)),
        ["cherry", "banana", "Apple"]
    );
}

#[test]
fn price_sort_is_stable_for_ties() {
    let products = vec![
        priced("a", "Zeta", 500),
        priced("b", "Alpha", 500),
        priced("c", "Mid", 100),
        priced("d", "Beta", 500),
    ];
    let filters = FilterState {
        sort_by: SortBy::PriceAsc,
        ..FilterState::default()
    };
    assert_eq!(ids(&apply_filters(&products, &filters)), ["c", "a", "b", "d"]);
}

#[test]
fn pipeline_is_deterministic() {
    let catalog = Catalog::builtin();
    let filters = FilterState {
        in_stock: Some(true),
        sort_by: SortBy::PriceDesc,
        search_query: Some("hulu".to_string()),
        ..FilterState::default()
    };
    let first = apply_filters(catalog.all(), &filters);
    let second = apply_filters(catalog.all(), &filters);
    assert_eq!(first, second);
}

#[test]
fn empty_catalog_yields_empty_listing() {
    assert!(apply_filters(&[], &FilterState::default()).is_empty());
}

#[test]
fn patch_only_touches_given_fields() {
    let mut filters = FilterState::default();
    filters.apply_patch(FilterPatch {
        category: Some("electronics".to_string()),
        ..FilterPatch::default()
    });
    assert_eq!(filters.category, "electronics");
    assert_eq!(filters.min_price, Decimal::ZERO);
    assert_eq!(filters.max_price, Decimal::from(1000));
    assert_eq!(filters.sort_by, SortBy::NameAsc);
}

#[test]
fn price_range_patch_swaps_reversed_bounds() {
    let patch = FilterPatch::price_range(Decimal::from(300), Decimal::from(20));
    assert_eq!(patch.min_price, Some(Decimal::from(20)));
    assert_eq!(patch.max_price, Some(Decimal::from(300)));
}

#[test]
fn in_stock_toggle_never_writes_false() {
    assert_eq!(FilterPatch::in_stock_only(true).in_stock, Some(Some(true)));
    assert_eq!(FilterPatch::in_stock_only(false).in_stock, Some(None));
}

#[test]
fn search_patch_overwrites_previous_query() {
    let mut filters = FilterState::default();
    filters.apply_patch(FilterPatch::search("watch"));
    filters.apply_patch(FilterPatch::search(""));
    assert_eq!(filters.search_query.as_deref(), Some(""));
}
