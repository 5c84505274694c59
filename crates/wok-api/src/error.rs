//! REST boundary error taxonomy.

use std::fmt;

/// Errors a REST client call may return.
///
/// `Clone` so coalesced callers behind `wok-cache` can each receive the
/// failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Network or transport failure (refused, DNS, timeout).
    Transport(String),
    /// The backend answered with a non-success status; `message` carries the
    /// backend's own error text when it sent one.
    Status { code: u16, message: String },
    /// A response body could not be decoded.
    Decode(String),
    /// Missing or invalid client configuration (base URLs, identity).
    Config(String),
}

impl ApiError {
    pub(crate) fn transport(err: reqwest::Error) -> Self {
        ApiError::Transport(err.to_string())
    }

    /// HTTP status code, when the backend answered at all.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            ApiError::Status { code, .. } => Some(*code),
            _ => None,
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Transport(msg) => write!(f, "transport error: {msg}"),
            ApiError::Status { code, message } => {
                write!(f, "backend error status={code}: {message}")
            }
            ApiError::Decode(msg) => write!(f, "decode error: {msg}"),
            ApiError::Config(msg) => write!(f, "config error: {msg}"),
        }
    }
}

impl std::error::Error for ApiError {}
