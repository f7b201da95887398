// web_app/error.rs - Error types shared by client, server and tools
//
// Both enums are Clone so they can sit inside reactive signals and be shown
// as passive notifications.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A failed call to the marketplace backend
#[derive(Clone, Debug, Error, PartialEq, Eq, Serialize, Deserialize)]
pub enum FetchError {
    /// Connection refused, DNS failure, broken body stream...
    #[error("network error: {0}")]
    Transport(String),

    #[error("request timed out after {0} ms")]
    Timeout(u64),

    #[error("backend responded with HTTP {status}: {message}")]
    Status { status: u16, message: String },

    /// Error relayed through a server function
    #[error("{0}")]
    Backend(String),
}

impl FetchError {
    /// Whether trying the same request again can succeed.
    ///
    /// Client errors (4xx) other than 408/429 will fail the same way.
    pub fn is_retryable(&self) -> bool {
        match self {
            FetchError::Status { status, .. } => {
                !(400..500).contains(status) || *status == 408 || *status == 429
            }
            _ => true,
        }
    }
}

#[cfg(any(feature = "ssr", feature = "hydrate"))]
impl From<leptos::prelude::ServerFnError> for FetchError {
    fn from(error: leptos::prelude::ServerFnError) -> Self {
        FetchError::Backend(error.to_string())
    }
}

/// A form value rejected before anything is sent to the backend
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{0} is required")]
    Missing(&'static str),

    #[error("{field} {reason}")]
    Invalid { field: &'static str, reason: String },
}

impl ValidationError {
    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        ValidationError::Invalid {
            field,
            reason: reason.into(),
        }
    }

    /// Name of the offending form field
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::Missing(field) => field,
            ValidationError::Invalid { field, .. } => field,
        }
    }
}
