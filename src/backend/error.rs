//! Errors raised at the HTTP boundary

use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BackendError {
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} answered {status}: {message}")]
    Status {
        url: String,
        status: StatusCode,
        message: String,
    },

    #[error("unexpected response body from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} rejected the submitted form")]
    Rejected { url: String },
}

impl BackendError {
    /// Short text for the status bar
    pub fn summary(&self) -> &'static str {
        match self {
            BackendError::Client(_) => "HTTP client unavailable",
            BackendError::Transport { .. } => "Server unreachable",
            BackendError::Status { .. } => "Server error",
            BackendError::Decode { .. } => "Unexpected server response",
            BackendError::Rejected { .. } => "Server rejected the form",
        }
    }
}
