//! # Sync Errors
//!
//! This module defines the error type shared by every layer that talks to the remote store.
//! Callers branch on the variant instead of inspecting message text.

/// Errors that can occur while synchronizing with the remote collection store.
#[derive(Debug, Clone, thiserror::Error, PartialEq)]
pub enum SyncError {
    /// No response was obtained (DNS, refused connection, reset, ...).
    #[error("{0}")]
    Transport(String),

    /// The store answered with a non-success status code.
    #[error("HTTP error! status: {status}")]
    Protocol { status: u16 },

    /// A body could not be encoded, or the store answered with an unexpected shape.
    #[error("Invalid JSON: {0}")]
    Decode(String),

    /// A payload was rejected before it was sent.
    #[error("{reason}")]
    Validation { field: &'static str, reason: String },
}

impl SyncError {
    /// Returns the status code for protocol failures.
    pub fn status(&self) -> Option<u16> {
        match self {
            SyncError::Protocol { status } => Some(*status),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}

impl From<serde_json::Error> for SyncError {
    fn from(e: serde_json::Error) -> Self {
        SyncError::Decode(e.to_string())
    }
}
