//! HTTP client for the remote product catalog.

use crate::error::{CatalogError, Result};
use crate::types::{CatalogConfig, ProductResponse};
use reqwest::Client;
use shelf_core::Barcode;
use std::time::Duration;
use tracing::debug;

/// Client for a product catalog speaking the Open Food Facts v0 API.
///
/// One HTTP GET per lookup, keyed by barcode; no authentication, no retries,
/// no pagination. Best effort.
pub struct CatalogClient {
    http: Client,
    config: CatalogConfig,
}

impl CatalogClient {
    /// Create a new client with the given configuration.
    pub fn new(config: CatalogConfig) -> Result<Self> {
        // Validate and normalize the base URL
        if config.base_url.is_empty() {
            return Err(CatalogError::InvalidUrl("URL cannot be empty".into()));
        }
        let base_url = config.base_url.trim_end_matches('/').to_string();
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(CatalogError::InvalidUrl(
                "URL must start with http:// or https://".into(),
            ));
        }

        let http = Client::builder()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(format!("ShelfScan/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(CatalogError::Request)?;

        Ok(Self {
            http,
            config: CatalogConfig { base_url },
        })
    }

    /// The catalog base URL.
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// Fetch the catalog document for one barcode.
    pub async fn fetch_product(&self, code: &Barcode) -> Result<ProductResponse> {
        let url = format!("{}/api/v0/product/{}.json", self.config.base_url, code);
        debug!(url = %url, "Fetching product");

        let response = self.http.get(&url).send().await.map_err(|e| {
            if e.is_connect() || e.is_timeout() {
                CatalogError::Unreachable(e.to_string())
            } else {
                CatalogError::Request(e)
            }
        })?;

        let status = response.status();

        if status.is_success() {
            let product: ProductResponse = response.json().await.map_err(|e| {
                CatalogError::ParseError(format!("Failed to parse product response: {}", e))
            })?;

            debug!(
                code = %code,
                status = product.status,
                "Fetched product document"
            );

            Ok(product)
        } else {
            let error_text = response.text().await.unwrap_or_default();
            Err(CatalogError::ServerError {
                status: status.as_u16(),
                message: error_text,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_validation() {
        assert!(CatalogClient::new(CatalogConfig::new("https://example.com")).is_ok());
        assert!(CatalogClient::new(CatalogConfig::new("http://localhost:8080")).is_ok());

        assert!(CatalogClient::new(CatalogConfig::new("")).is_err());
        assert!(CatalogClient::new(CatalogConfig::new("not-a-url")).is_err());
        assert!(CatalogClient::new(CatalogConfig::new("ftp://example.com")).is_err());
    }

    #[test]
    fn test_url_normalization() {
        let client =
            CatalogClient::new(CatalogConfig::new("https://example.com/")).expect("valid url");
        assert_eq!(client.base_url(), "https://example.com");
    }
}
