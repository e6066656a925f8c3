//! Error types for Folio.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Placeholder rendered when a failure carries no status code.
const MISSING_STATUS: &str = "undefined";

/// Placeholder rendered when a failure carries no usable message.
pub const NO_INFORMATION: &str = "No information";

/// Classification of a failed content request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// The request never received a response (DNS, connect, timeout).
    Transport,
    /// A response arrived with an error status.
    HttpStatus,
    /// Anything that is not shaped like an HTTP failure.
    Unknown,
}

/// The single error shape every content request failure is reduced to.
///
/// Built once where the failure is observed and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedError {
    kind: ErrorKind,
    status_code: Option<u16>,
    message: String,
    source_endpoint: Option<String>,
}

impl NormalizedError {
    /// A failure where no response was received.
    pub fn transport(message: impl Into<String>, endpoint: Option<String>) -> Self {
        Self {
            kind: ErrorKind::Transport,
            status_code: None,
            message: message.into(),
            source_endpoint: endpoint,
        }
    }

    /// A failure carrying an HTTP status from the server.
    pub fn http_status(status: u16, message: impl Into<String>, endpoint: Option<String>) -> Self {
        Self {
            kind: ErrorKind::HttpStatus,
            status_code: Some(status),
            message: message.into(),
            source_endpoint: endpoint,
        }
    }

    /// A failure that is not an HTTP failure at all.
    ///
    /// Empty or missing messages collapse to [`NO_INFORMATION`].
    pub fn unknown(message: Option<String>) -> Self {
        let message = message
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| NO_INFORMATION.to_string());
        Self {
            kind: ErrorKind::Unknown,
            status_code: None,
            message,
            source_endpoint: None,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn status_code(&self) -> Option<u16> {
        self.status_code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn source_endpoint(&self) -> Option<&str> {
        self.source_endpoint.as_deref()
    }
}

impl fmt::Display for NormalizedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            ErrorKind::Transport | ErrorKind::HttpStatus => {
                write!(f, "API request failed: ")?;
                match self.status_code {
                    Some(status) => write!(f, "{}", status)?,
                    None => write!(f, "{}", MISSING_STATUS)?,
                }
                write!(f, " - {}", self.message)
            }
            ErrorKind::Unknown => write!(f, "Unknown error: {}", self.message),
        }
    }
}

impl std::error::Error for NormalizedError {}

#[derive(Debug, Error)]
pub enum Error {
    // Content API errors
    #[error(transparent)]
    Api(#[from] NormalizedError),

    // Startup errors
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    // Generic
    #[error("Internal error: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}

impl From<url::ParseError> for Error {
    fn from(err: url::ParseError) -> Self {
        Error::Config(format!("invalid URL: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_status_message() {
        let err = NormalizedError::http_status(404, "Not Found", Some("posts/".into()));
        assert_eq!(err.to_string(), "API request failed: 404 - Not Found");
        assert_eq!(err.kind(), ErrorKind::HttpStatus);
        assert_eq!(err.source_endpoint(), Some("posts/"));
    }

    #[test]
    fn test_transport_renders_undefined_status() {
        let err = NormalizedError::transport("connection refused", None);
        assert_eq!(
            err.to_string(),
            "API request failed: undefined - connection refused"
        );
        assert_eq!(err.status_code(), None);
    }

    #[test]
    fn test_unknown_falls_back_to_no_information() {
        assert_eq!(
            NormalizedError::unknown(None).to_string(),
            "Unknown error: No information"
        );
        assert_eq!(
            NormalizedError::unknown(Some("  ".into())).to_string(),
            "Unknown error: No information"
        );
        assert_eq!(
            NormalizedError::unknown(Some("boom".into())).to_string(),
            "Unknown error: boom"
        );
    }

    #[test]
    fn test_api_error_is_transparent() {
        let err: Error = NormalizedError::http_status(500, "Internal Server Error", None).into();
        assert_eq!(err.to_string(), "API request failed: 500 - Internal Server Error");
    }
}
