//! # List errors
//!
//! Failures a list endpoint can produce, and the display-only view of them
//! that list shells are allowed to see.

use thiserror::Error;

use crate::state::FetchKind;

/// Why fetching one page failed
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ListError {
    /// The request never produced a response (offline, DNS, CORS, timeout)
    #[error("network error: {0}")]
    Network(String),

    /// The endpoint answered with a non-success status
    #[error("server returned {status}: {message}")]
    Status { status: u16, message: String },

    /// The response body was not a valid page
    #[error("could not read response: {0}")]
    Decode(String),
}

impl ListError {
    /// Message suitable for showing next to a retry button
    pub fn display_message(&self) -> String {
        match self {
            ListError::Network(_) => {
                "Could not reach the server. Check your connection and try again.".to_string()
            }
            ListError::Status { status, .. } if *status >= 500 => {
                "Something went wrong on our side. Please try again.".to_string()
            }
            ListError::Status { message, .. } if !message.trim().is_empty() => message.clone(),
            ListError::Status { status, .. } => format!("Request failed ({})", status),
            ListError::Decode(_) => "Received an unexpected response from the server.".to_string(),
        }
    }
}

/// Last failure of a list, as exposed in its snapshot.
///
/// Carries which fetch failed so `retry` can re-issue exactly that request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorInfo {
    pub kind: FetchKind,
    pub page_number: u32,
    pub message: String,
}

impl ErrorInfo {
    pub(crate) fn new(kind: FetchKind, page_number: u32, error: &ListError) -> Self {
        Self {
            kind,
            page_number,
            message: error.display_message(),
        }
    }
}
