//! Error types for the Smart Shamba client.
//!
//! Every failure a caller can observe is reported through the single
//! [`Error`] type. Its variants distinguish transport, backend-reported,
//! protocol and input validation failures, while [`Error::message`] gives
//! the normalized human-readable text regardless of the variant.

use std::fmt;
use thiserror::Error;

/// Message used when a backend failure carries neither `message` nor `error`.
pub const FALLBACK_MESSAGE: &str = "Request failed";

/// The unified error type for client operations.
#[derive(Debug, Error)]
pub enum Error {
    /// No response was obtained (connection, DNS, TLS, timeout).
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// The backend answered but reported failure.
    #[error("backend error: {0}")]
    Backend(#[from] BackendError),

    /// The backend answered with a success payload of an unexpected shape.
    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    /// Input validation errors (base URL, route, request construction).
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInputError),
}

impl Error {
    /// Returns the human-readable failure text.
    ///
    /// For backend failures this is the text extracted from the response
    /// envelope; for transport failures it is the underlying transport
    /// message.
    pub fn message(&self) -> String {
        match self {
            Error::Transport(e) => e.message.clone(),
            Error::Backend(e) => e.message.clone(),
            Error::Protocol(e) => e.message.clone(),
            Error::InvalidInput(e) => e.to_string(),
        }
    }

    /// Returns the HTTP status when the backend produced a response.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Backend(e) => Some(e.status),
            _ => None,
        }
    }

    /// Returns true if the backend rejected the request's authentication.
    pub fn is_auth_rejected(&self) -> bool {
        matches!(self, Error::Backend(e) if e.is_unauthorized())
    }
}

/// A failure where no response was received.
///
/// Timeouts land here too; callers see no timeout-specific type.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct TransportError {
    /// Message taken from the underlying transport error.
    pub message: String,
}

impl TransportError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// A failure reported by the backend.
#[derive(Debug)]
pub struct BackendError {
    /// HTTP status code.
    pub status: u16,
    /// Text extracted from the envelope, or [`FALLBACK_MESSAGE`].
    pub message: String,
}

impl BackendError {
    pub fn new(status: u16, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    /// Check if this is an HTTP 401.
    pub fn is_unauthorized(&self) -> bool {
        self.status == 401
    }
}

impl fmt::Display for BackendError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HTTP {}: {}", self.status, self.message)
    }
}

impl std::error::Error for BackendError {}

/// A success response that could not be interpreted.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct ProtocolError {
    pub message: String,
}

impl ProtocolError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Protocol(ProtocolError::new(format!(
            "unexpected response body: {}",
            err
        )))
    }
}

/// Input validation errors.
#[derive(Debug, Error)]
pub enum InvalidInputError {
    /// Invalid base URL.
    #[error("invalid base URL '{value}': {reason}")]
    BaseUrl { value: String, reason: String },

    /// Invalid backend route.
    #[error("invalid route '{value}': {reason}")]
    Route { value: String, reason: String },

    /// Generic invalid input.
    #[error("invalid input: {message}")]
    Other { message: String },
}

/// Failures of the durable token store.
///
/// These never reach callers of the client; the session cache logs and
/// swallows them.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("corrupt stored session: {0}")]
    Corrupt(String),

    #[error("storage unavailable: {0}")]
    Unavailable(String),
}
