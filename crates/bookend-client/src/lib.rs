//! Store access and client-side flows for the Bookend reading log.
//!
//! The external record store is a generic REST collection service; this
//! crate wraps it behind the [`RecordStore`] trait so the HTTP facade and
//! the CLI can also run against the in-memory [`MemoryStore`] in tests and
//! offline demos.
//!
//! # Example
//!
//! ```no_run
//! use bookend_client::{RestStore, auth};
//!
//! # async fn example() -> bookend_client::Result<()> {
//! let store = RestStore::new("https://example.mockapi.io")?;
//! let session = auth::login(&store, "alice", "password123").await?;
//! println!("logged in as {}", session.user.username);
//! # Ok(())
//! # }
//! ```

pub mod auth;
pub mod demo;
pub mod error;
pub mod memory;
pub mod search;
pub mod session;
pub mod store;

pub use error::{ClientError, Result};
pub use memory::MemoryStore;
pub use search::SearchClient;
pub use session::{Session, SessionFile, default_session_path};
pub use store::{RecordStore, RestStore};
