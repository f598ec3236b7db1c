pub mod app_config;
pub mod cart;
pub mod catalog;
pub mod config;
pub mod error;
pub mod filter;
pub mod money;
pub mod search;
pub mod storage;
pub mod store;
pub mod types;

pub use app_config::{AppConfig, Environment};
pub use cart::{is_discount_eligible, DISCOUNT_MARKER};
pub use catalog::Catalog;
pub use config::{load_app_config, load_app_config_from_env};
pub use error::{ConfigError, StorageError};
pub use filter::{apply_filters, FilterPatch};
pub use search::{discover, is_searchable, search_catalog};
pub use storage::{FileStorage, KeyValueStorage, MemoryStorage};
pub use store::{PersistedState, Store, STORAGE_KEY};
pub use types::{CartLineItem, CartState, FilterState, Product, ProductLookup, SortBy};
