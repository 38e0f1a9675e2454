//! Command implementations.

pub mod auth;
pub mod community;
pub mod rankings;
pub mod records;
pub mod search;
pub mod seed;

use anyhow::{Context, Result, bail};

use bookend_client::{Session, SessionFile};

/// Load the stored session or fail with a login hint.
pub fn require_session(sessions: &SessionFile) -> Result<Session> {
    match sessions.load().context("reading session file")? {
        Some(session) => Ok(session),
        None => bail!("Not logged in. Run: bookend login <username>"),
    }
}
