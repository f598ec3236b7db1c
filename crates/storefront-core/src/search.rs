//! Linear-scan product search.
//!
//! Two entry points share the matcher but not the trigger rule:
//! [`search_catalog`] backs the HTTP search endpoint and matches any query,
//! including the empty one, while [`discover`] backs the search box and
//! refuses to look anything up for blank input. Neither is tied to the text
//! stage of the listing pipeline in [`crate::filter`], which also matches on
//! category.

use crate::types::Product;

/// Returns `true` if `query` has at least one non-whitespace character.
#[must_use]
pub fn is_searchable(query: &str) -> bool {
    !query.trim().is_empty()
}

/// Products whose name or description contains `query`, ignoring case.
///
/// The query is not trimmed. An empty query matches everything.
#[must_use]
pub fn search_catalog<'a>(products: &'a [Product], query: &str) -> Vec<&'a Product> {
    let needle = query.to_lowercase();
    products
        .iter()
        .filter(|p| {
            p.name.to_lowercase().contains(&needle) || p.description.to_lowercase().contains(&needle)
        })
        .collect()
}

/// Search-box lookup: nothing for blank input, otherwise [`search_catalog`].
#[must_use]
pub fn discover<'a>(products: &'a [Product], query: &str) -> Vec<&'a Product> {
    if !is_searchable(query) {
        return Vec::new();
    }
    search_catalog(products, query)
}
