//! HTTP REST facade for the Bookend reading log.
//!
//! This crate provides a service that:
//! - Exposes auth, record, community, and ranking endpoints over REST
//! - Delegates persistence to the external record store (or an
//!   in-memory store for demos and tests)
//! - Proxies book searches to the upstream provider so credentials
//!   stay server-side
//!
//! # REST API Endpoints
//!
//! - `GET /api/health` - Service health check
//! - `POST /api/auth/register` - Create a user (409 on duplicate name)
//! - `POST /api/auth/login` - Scan-based login, returns a demo token
//! - `PUT /api/users/{id}` - Replace a user object
//! - `PUT /api/users/{id}/profile-image` - Set image, fan out to records
//! - `GET /api/records?userId=` - One user's records, newest first
//! - `POST /api/records` - Create a validated reading record
//! - `GET/PUT/DELETE /api/records/{id}` - Single-record operations
//! - `GET /api/community` - All public records, newest first
//! - `GET /api/rankings` - Hot, most-read, and top-rated boards
//! - `GET /api/search?query=` - Book search proxied to the provider
//! - `POST /api/dev/seed` - Populate demo users and records
//!
//! # Configuration
//!
//! The service reads configuration from `~/.config/bookend/server.toml`:
//!
//! ```toml
//! [server]
//! bind = "127.0.0.1:8080"
//!
//! [store]
//! backend = "rest"
//! base_url = "https://example.mockapi.io/api/v1"
//!
//! [search]
//! endpoint = "https://openapi.naver.com/v1/search/book.json"
//! ```
//!
//! Search provider credentials come from the `NAVER_CLIENT_ID` and
//! `NAVER_CLIENT_SECRET` environment variables; without them the
//! `/api/search` endpoint reports itself unconfigured.

pub mod api;
pub mod config;
pub mod search;
pub mod state;

pub use config::{
    Config, ConfigError, SearchConfig, ServerConfig, StoreBackend, StoreConfig, ValidationError,
};
pub use search::BookSearchProvider;
pub use state::AppState;
