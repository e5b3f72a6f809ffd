//! Error and warning types for the gallery.

use thiserror::Error;

pub const DEFAULT_FETCH_ERROR_MESSAGE: &str =
    "Could not load projects. Please try refreshing the page.";

/// Failure of the single project fetch. Never retried.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum FetchError {
    /// The server answered outside the 200-299 range.
    #[error("HTTP error! status: {0}")]
    Status(u16),

    /// The request never produced a response.
    #[error("transport error: {0}")]
    Transport(String),

    /// The body was not a JSON array of projects.
    #[error("malformed project list: {0}")]
    Decode(String),

    /// A local source could not be read.
    #[error("I/O error: {0}")]
    Io(String),
}

impl FetchError {
    /// Returns a user-facing message for the gallery area.
    #[must_use]
    pub fn user_message(&self) -> &'static str {
        DEFAULT_FETCH_ERROR_MESSAGE
    }

    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status(status) => Some(*status),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}

impl From<std::io::Error> for FetchError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

/// Non-fatal conditions. Logged, never propagated.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GalleryWarning {
    #[error("tab with path {path:?} not found")]
    UnknownTab { path: String },

    #[error("tab {path:?} requested before projects finished loading")]
    NotReady { path: String },

    #[error("load-more control not found, loading more is disabled")]
    LoadMoreDisabled,
}

/// Initialization failures. The gallery feature is skipped, the host keeps running.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InitError {
    #[error("required element missing: {0}")]
    MissingElement(&'static str),

    #[error("invalid gallery configuration: {0}")]
    InvalidConfig(String),
}
