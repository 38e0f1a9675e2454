//! Client for the book-search proxy endpoint.
//!
//! Search goes through the Bookend service rather than straight to the
//! provider, because the provider credentials live server-side.

use reqwest::Client;

use bookend_types::BookHit;

use crate::error::{ClientError, Result};

/// HTTP client for `GET {service}/api/search`.
#[derive(Debug, Clone)]
pub struct SearchClient {
    client: Client,
    base_url: String,
}

impl SearchClient {
    /// Create a search client for the given service base URL.
    pub fn new(base_url: &str) -> Result<Self> {
        let base_url = base_url.trim_end_matches('/').to_string();

        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(ClientError::InvalidUrl(format!(
                "URL must start with http:// or https://, got: {}",
                base_url
            )));
        }

        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(10))
            .build()
            .map_err(ClientError::Decode)?;

        Ok(Self { client, base_url })
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Search for books by title or author.
    pub async fn search(&self, query: &str) -> Result<Vec<BookHit>> {
        let url = format!("{}/api/search", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[("query", query)])
            .send()
            .await
            .map_err(|e| ClientError::Http {
                url: url.clone(),
                source: e,
            })?;

        let status = response.status();
        if status.is_success() {
            response.json().await.map_err(ClientError::Decode)
        } else {
            let message = response
                .json::<serde_json::Value>()
                .await
                .ok()
                .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(String::from))
                .unwrap_or_else(|| status.to_string());
            Err(ClientError::Api {
                status: status.as_u16(),
                message,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_client_creation() {
        let client = SearchClient::new("http://localhost:8080/").unwrap();
        assert_eq!(client.base_url(), "http://localhost:8080");
    }

    #[test]
    fn test_search_client_rejects_bad_scheme() {
        assert!(matches!(
            SearchClient::new("ftp://example.com"),
            Err(ClientError::InvalidUrl(_))
        ));
    }
}
