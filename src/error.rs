//! Error types for the back-office toolkit.

use std::fmt;

/// Result type for gateway and composer operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Fallback error text used when the backend rejects a request without
/// providing a `message` field in the response body.
pub const GENERIC_FAILURE_MESSAGE: &str = "The request was rejected by the server.";

/// Error types for the back-office toolkit.
///
/// All gateway and composer operations return `Result<T>` where `Result` is
/// defined as `std::result::Result<T, Error>`. Different variants represent
/// different failure modes:
#[derive(Debug, Clone)]
pub enum Error {
    /// Local validation failed before any network call was issued.
    ///
    /// Raised by the composer when a draft is not submittable (no customer
    /// selected, an item without a product, a non-positive quantity) and by
    /// payload checks such as `NewProduct::validate()`.
    ///
    /// No request reaches the backend when this variant is returned.
    Validation(String),

    /// The backend rejected a request (non-2xx response).
    ///
    /// Carries the server-provided `message` when the response body had one,
    /// otherwise [`GENERIC_FAILURE_MESSAGE`]. Typical causes:
    /// - Insufficient stock for a requested line item
    /// - Unknown customer or product id
    /// - Backend-side validation failure
    ///
    /// **Recovery:** Surface the message to the user; the draft that produced
    /// the request is left untouched so it can be corrected and retried.
    Submission(String),

    /// Transport-level failure: the service could not be reached.
    ///
    /// Common causes:
    /// - Backend not running
    /// - Connection refused or reset
    /// - Request timeout
    Network(String),

    /// The response body could not be decoded into the expected type.
    ///
    /// Indicates a contract mismatch or a corrupted response.
    Decode(String),

    /// The addressed resource does not exist (404).
    NotFound(String),

    /// Configuration error during gateway construction.
    ///
    /// Common causes:
    /// - Invalid base URL
    /// - HTTP client construction failure
    Config(String),

    /// Generic error with custom message.
    ///
    /// Used for errors that don't fit into other variants.
    Other(String),
}

impl Error {
    /// Convert the error into the string shown to the user.
    ///
    /// This is the boundary mapping between gateway/composer failures and
    /// view state: server-provided messages pass through verbatim, transport
    /// and decoding problems collapse into generic phrasing. Nothing is
    /// retried and nothing panics.
    pub fn user_message(&self) -> String {
        match self {
            Error::Validation(msg) | Error::Submission(msg) | Error::Config(msg) => msg.clone(),
            Error::NotFound(msg) => msg.clone(),
            Error::Network(_) => {
                "The service is unreachable. Check that the backend is running.".to_string()
            }
            Error::Decode(_) => "The service returned an unexpected response.".to_string(),
            Error::Other(_) => "An unexpected error occurred.".to_string(),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Validation(msg) => write!(f, "Validation error: {}", msg),
            Error::Submission(msg) => write!(f, "Submission rejected: {}", msg),
            Error::Network(msg) => write!(f, "Network error: {}", msg),
            Error::Decode(msg) => write!(f, "Decode error: {}", msg),
            Error::NotFound(msg) => write!(f, "Not found: {}", msg),
            Error::Config(msg) => write!(f, "Config error: {}", msg),
            Error::Other(msg) => write!(f, "Error: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

// ============================================================================
// Conversions from other error types
// ============================================================================

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        if e.is_io() {
            Error::Network(e.to_string())
        } else {
            Error::Decode(e.to_string())
        }
    }
}

impl From<String> for Error {
    fn from(e: String) -> Self {
        Error::Other(e)
    }
}

impl From<&str> for Error {
    fn from(e: &str) -> Self {
        Error::Other(e.to_string())
    }
}

#[cfg(feature = "http")]
impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            Error::Decode(e.to_string())
        } else {
            Error::Network(e.to_string())
        }
    }
}
