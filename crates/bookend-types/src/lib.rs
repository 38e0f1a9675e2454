//! Shared data model for the Bookend reading log.
//!
//! This crate provides the types exchanged with the external record store
//! and the ranking aggregation over public reading records. It is free of
//! I/O so the same types serve the HTTP client, the service, and the CLI.
//!
//! # Example
//!
//! ```
//! use bookend_types::RecordDraft;
//!
//! let draft = RecordDraft {
//!     user_id: "1".into(),
//!     title: "Dune".into(),
//!     author: "Frank Herbert".into(),
//!     user_rating: 5,
//!     ..RecordDraft::default()
//! };
//! assert!(draft.validate().is_ok());
//! ```

pub mod error;
pub mod rankings;
pub mod types;

pub use error::{ValidationError, ValidationResult};
pub use rankings::{PRIOR_WEIGHT, RankedBook, Rankings, calculate_rankings};
pub use types::{BookHit, NewUser, ReadingRecord, RecordDraft, RecordPatch, User, strip_markup};
