//! Upstream book-search provider client.
//!
//! The browser never talks to the provider directly; this service holds
//! the credentials and proxies `/api/search` to the provider, returning
//! the provider's result items untouched.

use reqwest::Client;
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::{SEARCH_CLIENT_ID_ENV, SEARCH_CLIENT_SECRET_ENV, SearchConfig};

/// Number of results requested from the provider per query.
const RESULT_COUNT: u32 = 10;

/// Errors talking to the upstream search provider.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    /// The provider answered with a non-success status.
    #[error("Search provider returned status {status}")]
    Upstream { status: u16 },
    /// The request never completed or the body could not be read.
    #[error("Search request failed: {0}")]
    Http(#[from] reqwest::Error),
    /// The provider answered 200 but the body had no items array.
    #[error("Search provider returned an unexpected response shape")]
    MalformedResponse,
}

impl SearchError {
    /// HTTP status to relay to our own caller. The upstream status passes
    /// through when there is one; failures without a status are 500.
    pub fn status(&self) -> u16 {
        match self {
            SearchError::Upstream { status } => *status,
            SearchError::Http(_) | SearchError::MalformedResponse => 500,
        }
    }
}

/// Authenticated client for the book-search provider.
#[derive(Clone)]
pub struct BookSearchProvider {
    client: Client,
    endpoint: String,
    client_id: String,
    client_secret: String,
}

impl BookSearchProvider {
    /// Build a provider from config and environment credentials.
    ///
    /// Returns `None` when either credential variable is missing, in
    /// which case the search endpoint reports itself unconfigured.
    pub fn from_env(config: &SearchConfig) -> Option<Self> {
        let client_id = std::env::var(SEARCH_CLIENT_ID_ENV).ok()?;
        let client_secret = std::env::var(SEARCH_CLIENT_SECRET_ENV).ok()?;
        Some(Self::new(&config.endpoint, client_id, client_secret))
    }

    /// Build a provider with explicit credentials.
    pub fn new(endpoint: &str, client_id: String, client_secret: String) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.to_string(),
            client_id,
            client_secret,
        }
    }

    /// Query the provider and return its result items verbatim.
    pub async fn search(&self, query: &str) -> Result<Value, SearchError> {
        debug!(query, "forwarding search to provider");

        let response = self
            .client
            .get(&self.endpoint)
            .header("X-Naver-Client-Id", &self.client_id)
            .header("X-Naver-Client-Secret", &self.client_secret)
            .query(&[("query", query), ("display", &RESULT_COUNT.to_string())])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), "search provider rejected request");
            return Err(SearchError::Upstream {
                status: status.as_u16(),
            });
        }

        let body: Value = response.json().await?;
        match body.get("items") {
            Some(items) if items.is_array() => Ok(items.clone()),
            _ => Err(SearchError::MalformedResponse),
        }
    }
}

impl std::fmt::Debug for BookSearchProvider {
    // Credentials stay out of logs.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BookSearchProvider")
            .field("endpoint", &self.endpoint)
            .finish_non_exhaustive()
    }
}
