//! The record-store abstraction and its REST implementation.
//!
//! The external store is a generic collection service: `GET/POST/PUT/DELETE`
//! over `/users` and `/readingRecords`, with filtering via query parameters.
//! There is no indexed lookup; callers that need "find user by name" list
//! the collection and scan it client-side.

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::warn;

use bookend_types::{NewUser, ReadingRecord, RecordDraft, RecordPatch, User};

use crate::error::{ClientError, Result};

/// Persistence operations used by the service and the CLI.
///
/// Implemented by [`RestStore`] for the external store and by
/// [`crate::MemoryStore`] for tests and offline demos.
#[async_trait]
pub trait RecordStore: Send + Sync {
    // --- Users ---

    /// List the full user collection.
    async fn list_users(&self) -> Result<Vec<User>>;

    /// Fetch one user by id.
    async fn get_user(&self, id: &str) -> Result<User>;

    /// Create a user; the store assigns the id.
    async fn create_user(&self, new_user: &NewUser) -> Result<User>;

    /// Replace a user's fields.
    async fn update_user(&self, id: &str, user: &User) -> Result<User>;

    // --- Reading records ---

    /// Records owned by one user.
    async fn records_for_user(&self, user_id: &str) -> Result<Vec<ReadingRecord>>;

    /// Fetch one record by id.
    async fn get_record(&self, id: &str) -> Result<ReadingRecord>;

    /// Create a record; the store assigns id and creation time.
    async fn create_record(&self, draft: &RecordDraft) -> Result<ReadingRecord>;

    /// Merge a partial update into a record.
    async fn update_record(&self, id: &str, patch: &RecordPatch) -> Result<ReadingRecord>;

    /// Delete a record. A subsequent fetch by id fails with `NotFound`.
    async fn delete_record(&self, id: &str) -> Result<()>;

    /// All records marked public, across users.
    async fn public_records(&self) -> Result<Vec<ReadingRecord>>;
}

/// HTTP client for the external record store.
#[derive(Debug, Clone)]
pub struct RestStore {
    client: Client,
    base_url: String,
}

impl RestStore {
    /// Create a store client for the given base URL.
    pub fn new(base_url: &str) -> Result<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(10))
            .build()
            .map_err(ClientError::Decode)?;
        Self::with_client(base_url, client)
    }

    /// Create a store client with a custom reqwest Client.
    pub fn with_client(base_url: &str, client: Client) -> Result<Self> {
        let base_url = base_url.trim_end_matches('/').to_string();

        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(ClientError::InvalidUrl(format!(
                "URL must start with http:// or https://, got: {}",
                base_url
            )));
        }

        Ok(Self { client, base_url })
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // ======================================================================
    // Internal HTTP helpers
    // ======================================================================

    async fn get<T: DeserializeOwned>(&self, path: &str, query: &[(&str, &str)]) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .client
            .get(&url)
            .query(query)
            .send()
            .await
            .map_err(|e| ClientError::Http {
                url: url.clone(),
                source: e,
            })?;
        handle_response(&url, response).await
    }

    async fn post_json<T: DeserializeOwned, B: Serialize>(&self, path: &str, body: &B) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| ClientError::Http {
                url: url.clone(),
                source: e,
            })?;
        handle_response(&url, response).await
    }

    async fn put_json<T: DeserializeOwned, B: Serialize>(&self, path: &str, body: &B) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .client
            .put(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| ClientError::Http {
                url: url.clone(),
                source: e,
            })?;
        handle_response(&url, response).await
    }

    async fn delete(&self, path: &str) -> Result<()> {
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .client
            .delete(&url)
            .send()
            .await
            .map_err(|e| ClientError::Http {
                url: url.clone(),
                source: e,
            })?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(error_from_status(&url, status, response).await)
        }
    }
}

#[async_trait]
impl RecordStore for RestStore {
    async fn list_users(&self) -> Result<Vec<User>> {
        self.get("/users", &[]).await
    }

    async fn get_user(&self, id: &str) -> Result<User> {
        self.get(&format!("/users/{}", id), &[]).await
    }

    async fn create_user(&self, new_user: &NewUser) -> Result<User> {
        self.post_json("/users", new_user).await
    }

    async fn update_user(&self, id: &str, user: &User) -> Result<User> {
        self.put_json(&format!("/users/{}", id), user).await
    }

    async fn records_for_user(&self, user_id: &str) -> Result<Vec<ReadingRecord>> {
        self.get("/readingRecords", &[("userId", user_id)]).await
    }

    async fn get_record(&self, id: &str) -> Result<ReadingRecord> {
        self.get(&format!("/readingRecords/{}", id), &[]).await
    }

    async fn create_record(&self, draft: &RecordDraft) -> Result<ReadingRecord> {
        self.post_json("/readingRecords", draft).await
    }

    async fn update_record(&self, id: &str, patch: &RecordPatch) -> Result<ReadingRecord> {
        self.put_json(&format!("/readingRecords/{}", id), patch).await
    }

    async fn delete_record(&self, id: &str) -> Result<()> {
        self.delete(&format!("/readingRecords/{}", id)).await
    }

    async fn public_records(&self) -> Result<Vec<ReadingRecord>> {
        self.get("/readingRecords", &[("isPublic", "true")]).await
    }
}

/// Decode a successful response, or map the failure to a `ClientError`.
async fn handle_response<T: DeserializeOwned>(url: &str, response: reqwest::Response) -> Result<T> {
    let status = response.status();
    if status.is_success() {
        response.json().await.map_err(ClientError::Decode)
    } else {
        Err(error_from_status(url, status, response).await)
    }
}

async fn error_from_status(
    url: &str,
    status: reqwest::StatusCode,
    response: reqwest::Response,
) -> ClientError {
    let message = response
        .json::<serde_json::Value>()
        .await
        .ok()
        .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(String::from))
        .unwrap_or_else(|| status.to_string());

    warn!(url, status = status.as_u16(), %message, "store request failed");

    if status == reqwest::StatusCode::NOT_FOUND {
        ClientError::NotFound(message)
    } else {
        ClientError::Api {
            status: status.as_u16(),
            message,
        }
    }
}
