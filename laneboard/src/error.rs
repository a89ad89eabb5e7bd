//! Error types for the lane engine

use crate::types::Status;
use thiserror::Error;

/// Result type for lane engine operations
pub type Result<T> = std::result::Result<T, BoardError>;

/// Errors that can occur while loading, reconciling or persisting a board
#[derive(Debug, Error)]
pub enum BoardError {
    /// Network or connection failure talking to the card store
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The card store answered with a non-success status
    #[error("store rejected {url} with status {status}: {body}")]
    Rejected {
        status: u16,
        url: String,
        body: String,
    },

    /// The configured store endpoint cannot be used to build request URLs
    #[error("invalid store endpoint {url}: {message}")]
    InvalidEndpoint { url: String, message: String },

    /// Card not known to the store
    #[error("card not found: {id}")]
    CardNotFound { id: String },

    /// One or more lane containers are not attached to the view
    #[error("lane containers not attached: {}", format_lanes(.missing))]
    DetachedLanes { missing: Vec<Status> },

    /// Drag session asked to move between incompatible states
    #[error("invalid drag transition: {from} -> {to}")]
    InvalidTransition { from: String, to: String },

    /// The store's response body is not a list of card records
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration could not be extracted
    #[error("configuration error: {0}")]
    Config(Box<figment::Error>),
}

fn format_lanes(lanes: &[Status]) -> String {
    lanes
        .iter()
        .map(Status::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

impl From<figment::Error> for BoardError {
    fn from(e: figment::Error) -> Self {
        Self::Config(Box::new(e))
    }
}

impl BoardError {
    /// Create a rejected-response error
    pub fn rejected(status: u16, url: impl Into<String>, body: impl Into<String>) -> Self {
        Self::Rejected {
            status,
            url: url.into(),
            body: body.into(),
        }
    }

    /// Create an invalid endpoint error
    pub fn invalid_endpoint(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidEndpoint {
            url: url.into(),
            message: message.into(),
        }
    }

    /// Create an invalid transition error
    pub fn invalid_transition(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self::InvalidTransition {
            from: from.into(),
            to: to.into(),
        }
    }

    /// Check if a caller could reasonably retry the failed request.
    ///
    /// The engine never retries on its own; this is for embedders.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Http(e) => e.is_timeout() || e.is_connect(),
            Self::Rejected { status, .. } => *status >= 500,
            _ => false,
        }
    }
}
