//! Persisted login session.
//!
//! The browser build of this application kept the authenticated user in
//! local storage under a single key; the CLI keeps the same single
//! serialized object in a JSON file under the platform config directory,
//! written on login and removed on logout.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use bookend_types::User;

/// The locally cached authenticated user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub user: User,
    /// Demo token minted at login; never verified anywhere.
    pub token: String,
}

/// Errors reading or writing the session file.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Failed to read session file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to parse session file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("Failed to write session file {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Default session file path following platform conventions.
///
/// - Linux: `~/.config/bookend/session.json`
/// - macOS: `~/Library/Application Support/bookend/session.json`
pub fn default_session_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("bookend")
        .join("session.json")
}

/// Handle to the session file.
#[derive(Debug, Clone)]
pub struct SessionFile {
    path: PathBuf,
}

impl SessionFile {
    /// Use the default platform path.
    pub fn new() -> Self {
        Self {
            path: default_session_path(),
        }
    }

    /// Use an explicit path.
    pub fn at<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Load the stored session, if any.
    pub fn load(&self) -> Result<Option<Session>, SessionError> {
        if !self.path.exists() {
            return Ok(None);
        }
        let content = std::fs::read_to_string(&self.path).map_err(|e| SessionError::Read {
            path: self.path.clone(),
            source: e,
        })?;
        serde_json::from_str(&content)
            .map(Some)
            .map_err(|e| SessionError::Parse {
                path: self.path.clone(),
                source: e,
            })
    }

    /// Persist a session, creating parent directories if needed.
    pub fn save(&self, session: &Session) -> Result<(), SessionError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| SessionError::Write {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }
        let content = serde_json::to_string_pretty(session).map_err(|e| SessionError::Parse {
            path: self.path.clone(),
            source: e,
        })?;
        std::fs::write(&self.path, content).map_err(|e| SessionError::Write {
            path: self.path.clone(),
            source: e,
        })
    }

    /// Remove the session file. Missing files are not an error.
    pub fn clear(&self) -> Result<(), SessionError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(SessionError::Write {
                path: self.path.clone(),
                source: e,
            }),
        }
    }
}

impl Default for SessionFile {
    fn default() -> Self {
        Self::new()
    }
}
