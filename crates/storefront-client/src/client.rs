//! HTTP client for the storefront catalog API.

use std::time::Duration;

use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use storefront_core::{AppConfig, Product, ProductLookup};

use crate::error::ClientError;

/// Body of `GET /api/products/{id}/related`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RelatedLookup {
    Found(Vec<Product>),
    Missing { error: String },
}

/// Client for the catalog endpoints.
///
/// The not-found case of the lookup endpoints arrives as a JSON payload with
/// a 200 status; it is mapped to [`ClientError::ProductNotFound`] here. Any
/// non-2xx status is [`ClientError::UnexpectedStatus`]. Nothing is retried.
#[derive(Debug, Clone)]
pub struct CatalogClient {
    client: Client,
    base_url: Url,
}

impl CatalogClient {
    /// Creates a client for the API rooted at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidBaseUrl`] if `base_url` is not an
    /// absolute http(s) URL, or [`ClientError::Http`] if the underlying
    /// `reqwest::Client` cannot be constructed.
    pub fn new(base_url: &str, timeout_secs: u64, user_agent: &str) -> Result<Self, ClientError> {
        let base_url = Url::parse(base_url).map_err(|e| ClientError::InvalidBaseUrl {
            base_url: base_url.to_string(),
            reason: e.to_string(),
        })?;
        if base_url.cannot_be_a_base() || !matches!(base_url.scheme(), "http" | "https") {
            return Err(ClientError::InvalidBaseUrl {
                base_url: base_url.to_string(),
                reason: "expected an http(s) URL".to_string(),
            });
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;
        Ok(Self { client, base_url })
    }

    /// Creates a client from the application configuration.
    ///
    /// # Errors
    ///
    /// See [`CatalogClient::new`].
    pub fn from_config(config: &AppConfig) -> Result<Self, ClientError> {
        Self::new(
            &config.base_url,
            config.request_timeout_secs,
            &config.user_agent,
        )
    }

    /// Fetches the full catalog.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] on transport failure, non-2xx status or an
    /// undecodable body.
    pub async fn list_products(&self) -> Result<Vec<Product>, ClientError> {
        let url = self.endpoint(&["api", "products"]);
        self.get_json(url, "product list").await
    }

    /// Fetches one product by id.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::ProductNotFound`] when the server answers with
    /// its not-found payload, otherwise as [`CatalogClient::list_products`].
    pub async fn get_product(&self, id: &str) -> Result<Product, ClientError> {
        let url = self.endpoint(&["api", "products", id]);
        match self.get_json(url, "product lookup").await? {
            ProductLookup::Found(product) => Ok(product),
            ProductLookup::Missing { error } => {
                tracing::debug!(id, error = %error, "product lookup returned error payload");
                Err(ClientError::ProductNotFound { id: id.to_string() })
            }
        }
    }

    /// Fetches products related to `id` (same category, excluding itself).
    ///
    /// # Errors
    ///
    /// As [`CatalogClient::get_product`].
    pub async fn related_products(&self, id: &str) -> Result<Vec<Product>, ClientError> {
        let url = self.endpoint(&["api", "products", id, "related"]);
        match self.get_json(url, "related products").await? {
            RelatedLookup::Found(products) => Ok(products),
            RelatedLookup::Missing { error } => {
                tracing::debug!(id, error = %error, "related lookup returned error payload");
                Err(ClientError::ProductNotFound { id: id.to_string() })
            }
        }
    }

    /// Runs a server-side search. The query is sent as given, untrimmed.
    ///
    /// # Errors
    ///
    /// As [`CatalogClient::list_products`].
    pub async fn search(&self, query: &str) -> Result<Vec<Product>, ClientError> {
        let mut url = self.endpoint(&["api", "products", "search"]);
        url.query_pairs_mut().append_pair("query", query);
        self.get_json(url, "product search").await
    }

    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        // `new` rejects cannot-be-a-base URLs, so segments are always available.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url, context: &str) -> Result<T, ClientError> {
        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|source| ClientError::Deserialize {
            context: context.to_string(),
            source,
        })
    }
}
