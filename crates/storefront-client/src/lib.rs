pub mod client;
pub mod discovery;
pub mod error;

pub use client::CatalogClient;
pub use discovery::{debounce, DiscoveryEvent, DiscoverySearch, QueryTracker, Ticket};
pub use error::ClientError;
