//! Filter panel command handlers.

use clap::{Args, Subcommand};
use rust_decimal::Decimal;
use storefront_core::{FilterPatch, KeyValueStorage, SortBy, Store};

use crate::render;

/// Sub-commands available under `filters`.
#[derive(Debug, Subcommand)]
pub enum FilterCommands {
    /// Show the saved filters
    Show,
    /// Change one or more filters
    Set(SetFilters),
    /// Restore the default filters
    Reset,
}

#[derive(Debug, Args, Default, PartialEq, Eq)]
pub struct SetFilters {
    /// Category to show ("all" or empty for every category)
    #[arg(long)]
    pub category: Option<String>,
    /// Lower price bound
    #[arg(long)]
    pub min_price: Option<Decimal>,
    /// Upper price bound
    #[arg(long)]
    pub max_price: Option<Decimal>,
    /// Only show in-stock products (true/false)
    #[arg(long)]
    pub in_stock: Option<bool>,
    /// Sort order: price-asc, price-desc, name-asc or name-desc
    #[arg(long)]
    pub sort: Option<SortBy>,
    /// Text filter over name, description and category
    #[arg(long)]
    pub query: Option<String>,
}

impl SetFilters {
    /// Translates the flags into a patch the way the filter panel writes it.
    pub(crate) fn into_patch(self) -> FilterPatch {
        let mut patch = match (self.min_price, self.max_price) {
            (Some(min), Some(max)) => FilterPatch::price_range(min, max),
            (min_price, max_price) => FilterPatch {
                min_price,
                max_price,
                ..FilterPatch::default()
            },
        };
        if let Some(enabled) = self.in_stock {
            patch.in_stock = FilterPatch::in_stock_only(enabled).in_stock;
        }
        patch.category = self.category;
        patch.sort_by = self.sort;
        patch.search_query = self.query;
        patch
    }
}

pub(crate) fn run_filters<S: KeyValueStorage>(store: &mut Store<S>, command: FilterCommands) {
    let filters = match command {
        FilterCommands::Show => store.filters(),
        FilterCommands::Set(flags) => {
            let patch = flags.into_patch();
            if patch.is_empty() {
                println!("No filter changes given");
            }
            store.set_filters(patch)
        }
        FilterCommands::Reset => store.reset_filters(),
    };
    println!("{}", render::filters_summary(filters));
}
