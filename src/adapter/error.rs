//! Adapter error types

use thiserror::Error;

/// The in-flight turn was cancelled by the caller.
///
/// This is the only failure that crosses the adapter boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("turn cancelled")]
pub struct Cancelled;

/// Failure talking to the backend, absorbed into a soft-failure turn
#[derive(Debug, Error)]
#[error("{message}")]
pub struct AdapterError {
    pub kind: AdapterErrorKind,
    pub message: String,
    /// HTTP status for [`AdapterErrorKind::Http`]
    pub status: Option<u16>,
}

impl AdapterError {
    pub fn new(kind: AdapterErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            status: None,
        }
    }

    /// Non-2xx response; message carries status code and reason phrase
    pub fn http(status: reqwest::StatusCode) -> Self {
        let reason = status.canonical_reason().unwrap_or("Unknown Status");
        Self {
            kind: AdapterErrorKind::Http,
            message: format!("Backend error: {} {}", status.as_u16(), reason),
            status: Some(status.as_u16()),
        }
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::new(AdapterErrorKind::Network, message)
    }

    pub fn timeout(message: impl Into<String>) -> Self {
        Self::new(AdapterErrorKind::Timeout, message)
    }

    pub fn decode(message: impl Into<String>) -> Self {
        Self::new(AdapterErrorKind::Decode, message)
    }

    pub fn unknown(message: impl Into<String>) -> Self {
        Self::new(AdapterErrorKind::Unknown, message)
    }

    /// Classify a transport-level failure from the HTTP client
    pub fn from_transport(err: &reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::timeout(format!("Request timeout: {err}"))
        } else if err.is_connect() {
            Self::network(format!("Connection failed: {err}"))
        } else if err.is_decode() {
            Self::decode(format!("Failed to decode response: {err}"))
        } else {
            Self::unknown(format!("Request failed: {err}"))
        }
    }
}

/// How a backend call failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdapterErrorKind {
    /// Backend answered with a non-2xx status
    Http,
    /// Connection refused, reset, DNS failure
    Network,
    Timeout,
    /// Response body was not the expected JSON
    Decode,
    Unknown,
}
