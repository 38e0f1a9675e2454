//! Shared application state.

use std::sync::Arc;

use time::OffsetDateTime;

use bookend_client::RecordStore;

use crate::search::BookSearchProvider;

/// Shared state for all API handlers.
///
/// The store is behind a trait object so handlers can run against the
/// external REST store in production and an in-memory store in tests.
pub struct AppState {
    /// Backing record store.
    pub store: Arc<dyn RecordStore>,
    /// Upstream book-search provider, present only when credentials are
    /// configured.
    pub search: Option<BookSearchProvider>,
    /// When this process started.
    pub started_at: OffsetDateTime,
}

impl AppState {
    /// Create new application state.
    pub fn new(store: Arc<dyn RecordStore>, search: Option<BookSearchProvider>) -> Arc<Self> {
        Arc::new(Self {
            store,
            search,
            started_at: OffsetDateTime::now_utc(),
        })
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("search", &self.search.is_some())
            .field("started_at", &self.started_at)
            .finish_non_exhaustive()
    }
}
